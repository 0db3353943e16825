//! # Catalog Crate
//!
//! This crate owns the video catalog and the viewer preference model.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (VideoRecord, Category, PreferenceSet, VideoIndex)
//! - **parser**: Parse catalog files, category keys, tags and upload URLs
//! - **index**: Load and validate a catalog file, create uploaded videos
//! - **error**: Error types for everything entering through this crate
//!
//! ## Example Usage
//!
//! ```ignore
//! use catalog::{Category, VideoIndex};
//! use std::path::Path;
//!
//! let index = VideoIndex::load_from_file(Path::new("data/videos.json"))?;
//! let sports = index.list_by_category(Category::Sports, 10);
//! println!("{} sports videos", sports.len());
//! ```

// Public modules
pub mod error;
pub mod index;
pub mod parser;
pub mod types;

// Re-export commonly used types for convenience
pub use error::{CatalogError, Result};
pub use types::{
    // Type aliases
    VideoId,
    ViewerId,
    // Core types
    Category,
    CreatorStats,
    NewVideo,
    PreferenceSet,
    VideoIndex,
    VideoRecord,
};

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn video(id: &str, category: Category, day: u32, creator: &str) -> VideoRecord {
        VideoRecord {
            id: id.to_string(),
            title: format!("Video {}", id),
            description: String::new(),
            video_url: format!("https://cdn.example.com/{}.mp4", id),
            thumbnail_url: None,
            category,
            duration_secs: 60,
            views: 100,
            likes: 10,
            age_appropriate: true,
            created_by: creator.to_string(),
            tags: vec![],
            created_at: Utc.with_ymd_and_hms(2024, 7, day, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_video_index_creation() {
        let index = VideoIndex::new();
        assert_eq!(index.len(), 0);
        assert!(index.list_by_recency(10).is_empty());
    }

    #[test]
    fn test_list_by_recency_orders_newest_first() {
        let index = VideoIndex::from_videos(vec![
            video("a", Category::Sports, 1, "x"),
            video("b", Category::Music, 5, "x"),
            video("c", Category::Sports, 3, "y"),
        ]);

        let ids: Vec<_> = index.list_by_recency(10).into_iter().map(|v| v.id).collect();
        assert_eq!(ids, vec!["b", "c", "a"]);

        assert_eq!(index.list_by_recency(2).len(), 2);
    }

    #[test]
    fn test_list_by_category() {
        let index = VideoIndex::from_videos(vec![
            video("a", Category::Sports, 1, "x"),
            video("b", Category::Music, 5, "x"),
            video("c", Category::Sports, 3, "y"),
        ]);

        let ids: Vec<_> = index
            .list_by_category(Category::Sports, 10)
            .into_iter()
            .map(|v| v.id)
            .collect();
        assert_eq!(ids, vec!["c", "a"]);
        assert!(index.list_by_category(Category::News, 10).is_empty());
    }

    #[test]
    fn test_reinsert_moves_category() {
        let mut index = VideoIndex::from_videos(vec![video("a", Category::Sports, 1, "x")]);
        index.insert_video(video("a", Category::Music, 1, "x"));

        assert_eq!(index.len(), 1);
        assert!(index.list_by_category(Category::Sports, 10).is_empty());
        assert_eq!(index.list_by_category(Category::Music, 10).len(), 1);
    }

    #[test]
    fn test_like_delta_floors_at_zero() {
        let mut index = VideoIndex::from_videos(vec![video("a", Category::Sports, 1, "x")]);

        assert_eq!(index.apply_like_delta("a", 1).unwrap(), 11);
        assert_eq!(index.apply_like_delta("a", -50).unwrap(), 0);
        assert!(matches!(
            index.apply_like_delta("missing", 1),
            Err(CatalogError::VideoNotFound(_))
        ));
    }

    #[test]
    fn test_creator_queries() {
        let mut index = VideoIndex::from_videos(vec![
            video("a", Category::Sports, 1, "coach"),
            video("b", Category::Music, 5, "coach"),
            video("c", Category::Sports, 3, "someone"),
        ]);

        let ids: Vec<_> = index
            .list_by_creator("coach", 10)
            .into_iter()
            .map(|v| v.id)
            .collect();
        assert_eq!(ids, vec!["b", "a"]);

        let stats = index.creator_stats("coach");
        assert_eq!(stats.videos, 2);
        assert_eq!(stats.total_views, 200);
        assert_eq!(stats.total_likes, 20);

        index.remove_video("b");
        assert_eq!(index.creator_stats("coach").videos, 1);
        assert_eq!(index.creator_stats("nobody"), CreatorStats::default());
    }

    #[test]
    fn test_preference_toggles_keep_sets_disjoint() {
        let mut prefs = PreferenceSet::new();

        assert!(prefs.toggle_blocked(Category::Sports));
        assert!(prefs.is_blocked(Category::Sports));

        // Preferring a blocked category unblocks it
        assert!(prefs.toggle_preferred(Category::Sports));
        assert!(prefs.is_preferred(Category::Sports));
        assert!(!prefs.is_blocked(Category::Sports));

        // And blocking a preferred one removes the preference
        assert!(prefs.toggle_blocked(Category::Sports));
        assert!(!prefs.is_preferred(Category::Sports));
        assert!(prefs.is_blocked(Category::Sports));

        // Toggling again clears it
        assert!(!prefs.toggle_blocked(Category::Sports));
        assert!(!prefs.is_blocked(Category::Sports));
    }

    #[test]
    fn test_preferred_order_is_kept() {
        let mut prefs = PreferenceSet::new();
        prefs.toggle_preferred(Category::Travel);
        prefs.toggle_preferred(Category::Educational);
        prefs.toggle_preferred(Category::Music);
        prefs.toggle_preferred(Category::Educational);

        assert_eq!(
            prefs.preferred_categories,
            vec![Category::Travel, Category::Music]
        );
    }

    #[test]
    fn test_preference_summary() {
        let mut prefs = PreferenceSet::new();
        assert_eq!(prefs.summary(), "no preferred · no blocked · Parental Mode: OFF");

        prefs.toggle_preferred(Category::Travel);
        prefs.toggle_preferred(Category::Music);
        prefs.toggle_blocked(Category::News);
        prefs.toggle_parental_mode();
        assert_eq!(prefs.summary(), "2 preferred · 1 blocked · Parental Mode: ON");
    }

    #[test]
    fn test_preferences_default_when_fields_missing() {
        let prefs: PreferenceSet = serde_json::from_str("{}").unwrap();
        assert_eq!(prefs, PreferenceSet::default());
    }

    #[test]
    fn test_stored_preferences_are_normalized() {
        let mut prefs: PreferenceSet = serde_json::from_str(
            r#"{"preferred_categories": ["music", "travel", "music", "news"],
                "blocked_categories": ["travel"]}"#,
        )
        .unwrap();
        assert_eq!(prefs.preferred_categories, vec![Category::Music, Category::News]);
        assert!(prefs.is_blocked(Category::Travel));
        assert!(!prefs.is_preferred(Category::Travel));

        assert!(!prefs.toggle_preferred(Category::Music));
        assert!(!prefs.is_preferred(Category::Music));
    }
}
