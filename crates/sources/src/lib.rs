//! # Sources Crate
//!
//! Candidate generation for the feed, plus the collaborator interfaces the
//! feed reads through.
//!
//! ## Components
//!
//! ### Category Source
//! Explicit category browse, newest first (up to 50 videos).
//!
//! ### Preferred Category Source
//! The recommended feed: one block per preferred category, in the order the
//! viewer added them (up to 10 videos each).
//!
//! ### Recent Source
//! Whole catalog, newest first (up to 50 videos). Also feeds shuffle mode.
//!
//! ### Collaborators
//! - `CatalogAccessor`: read access plus like updates; `LocalCatalog` is
//!   the in-process implementation
//! - `PreferenceStore`: per-viewer preferences; in-memory and JSON file
//!   implementations are provided
//!
//! ## Example Usage
//!
//! ```ignore
//! use sources::{
//!     viewer_context::build_viewer_context, CatalogAccessor, FeedRequest,
//!     InMemoryPreferenceStore, LocalCatalog, PreferredCategorySource,
//! };
//! use std::sync::Arc;
//!
//! let catalog: Arc<dyn CatalogAccessor> = Arc::new(LocalCatalog::open("data/videos.json")?);
//! let store = InMemoryPreferenceStore::new();
//!
//! let context = build_viewer_context(&store, "viewer", FeedRequest::default()).await?;
//! let preferred = PreferredCategorySource::new(catalog.clone());
//! let candidates = preferred.get_candidates(&context).await?;
//! ```

// Public modules
pub mod category;
pub mod local_catalog;
pub mod preferences;
pub mod preferred;
pub mod recent;
pub mod traits;
pub mod types;
pub mod viewer_context;

// Re-export commonly used types
pub use category::CategorySource;
pub use local_catalog::LocalCatalog;
pub use preferences::{InMemoryPreferenceStore, JsonPreferenceStore};
pub use preferred::PreferredCategorySource;
pub use recent::RecentSource;
pub use traits::{CatalogAccessor, PreferenceStore};
pub use types::{Candidate, CandidateSource, FeedMode, FeedRequest, ViewerContext};

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{anyhow, Result};
    use async_trait::async_trait;
    use catalog::{Category, PreferenceSet, VideoIndex, VideoRecord};
    use chrono::{TimeZone, Utc};
    use std::sync::Arc;
    use std::time::Duration;

    fn video(id: &str, category: Category, day: u32) -> VideoRecord {
        VideoRecord {
            id: id.to_string(),
            title: format!("Video {}", id),
            description: String::new(),
            video_url: format!("https://cdn.example.com/{}.mp4", id),
            thumbnail_url: None,
            category,
            duration_secs: 30,
            views: 0,
            likes: 0,
            age_appropriate: true,
            created_by: "creator".to_string(),
            tags: vec![],
            created_at: Utc.with_ymd_and_hms(2024, 7, day, 0, 0, 0).unwrap(),
        }
    }

    fn create_test_catalog() -> Arc<dyn CatalogAccessor> {
        let mut videos = Vec::new();
        for day in 1..=15 {
            videos.push(video(&format!("travel-{}", day), Category::Travel, day));
        }
        videos.push(video("edu-1", Category::Educational, 1));
        videos.push(video("edu-2", Category::Educational, 2));
        videos.push(video("music-1", Category::Music, 20));
        Arc::new(LocalCatalog::new(VideoIndex::from_videos(videos)))
    }

    fn context_preferring(categories: &[Category]) -> ViewerContext {
        let mut prefs = PreferenceSet::new();
        for &category in categories {
            prefs.toggle_preferred(category);
        }
        ViewerContext::new("viewer").with_preferences(prefs)
    }

    /// Answers category queries with a delay that shrinks for later categories
    struct SlowFirstCatalog {
        inner: Arc<dyn CatalogAccessor>,
    }

    #[async_trait]
    impl CatalogAccessor for SlowFirstCatalog {
        async fn list_by_recency(&self, limit: usize) -> Result<Vec<VideoRecord>> {
            self.inner.list_by_recency(limit).await
        }

        async fn list_by_category(&self, category: Category, limit: usize) -> Result<Vec<VideoRecord>> {
            if category == Category::Travel {
                tokio::time::sleep(Duration::from_millis(30)).await;
            }
            self.inner.list_by_category(category, limit).await
        }

        async fn apply_like_delta(&self, id: &str, delta: i64) -> Result<u64> {
            self.inner.apply_like_delta(id, delta).await
        }
    }

    struct FailingCatalog;

    #[async_trait]
    impl CatalogAccessor for FailingCatalog {
        async fn list_by_recency(&self, _limit: usize) -> Result<Vec<VideoRecord>> {
            Err(anyhow!("catalog offline"))
        }

        async fn list_by_category(&self, _category: Category, _limit: usize) -> Result<Vec<VideoRecord>> {
            Err(anyhow!("catalog offline"))
        }

        async fn apply_like_delta(&self, _id: &str, _delta: i64) -> Result<u64> {
            Err(anyhow!("catalog offline"))
        }
    }

    #[tokio::test]
    async fn test_preferred_blocks_follow_preference_order() {
        let source = PreferredCategorySource::new(create_test_catalog());
        let context = context_preferring(&[Category::Educational, Category::Travel]);

        let candidates = source.get_candidates(&context).await.unwrap();

        // 2 educational + 10 travel (capped)
        assert_eq!(candidates.len(), 12);
        assert_eq!(candidates[0].video_id(), "edu-2");
        assert_eq!(candidates[1].video_id(), "edu-1");
        assert_eq!(candidates[2].video_id(), "travel-15");
        assert!(candidates[2..].iter().all(|c| c.source == CandidateSource::Preferred(Category::Travel)));
    }

    #[tokio::test]
    async fn test_preferred_order_survives_slow_queries() {
        let catalog: Arc<dyn CatalogAccessor> = Arc::new(SlowFirstCatalog {
            inner: create_test_catalog(),
        });
        let source = PreferredCategorySource::new(catalog);
        let context = context_preferring(&[Category::Travel, Category::Music]);

        let candidates = source.get_candidates(&context).await.unwrap();

        assert_eq!(candidates.first().unwrap().category(), Category::Travel);
        assert_eq!(candidates.last().unwrap().video_id(), "music-1");
    }

    #[tokio::test]
    async fn test_preferred_empty_without_preferences() {
        let source = PreferredCategorySource::new(create_test_catalog());
        let candidates = source.get_candidates(&ViewerContext::new("viewer")).await.unwrap();
        assert!(candidates.is_empty());
    }

    #[tokio::test]
    async fn test_recent_source_limit() {
        let source = RecentSource::new(create_test_catalog()).with_limit(3);
        let candidates = source.get_candidates(&ViewerContext::new("viewer")).await.unwrap();

        let ids: Vec<&str> = candidates.iter().map(|c| c.video_id()).collect();
        assert_eq!(ids, vec!["music-1", "travel-15", "travel-14"]);
        assert!(candidates.iter().all(|c| c.source == CandidateSource::Recent));
    }

    #[tokio::test]
    async fn test_category_source() {
        let source = CategorySource::new(create_test_catalog());
        let candidates = source
            .get_candidates(&ViewerContext::new("viewer"), Category::Educational)
            .await
            .unwrap();

        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].source, CandidateSource::Category(Category::Educational));
    }

    #[tokio::test]
    async fn test_sources_propagate_catalog_failures() {
        let catalog: Arc<dyn CatalogAccessor> = Arc::new(FailingCatalog);
        let context = context_preferring(&[Category::Travel]);

        assert!(RecentSource::new(catalog.clone()).get_candidates(&context).await.is_err());
        assert!(PreferredCategorySource::new(catalog.clone())
            .get_candidates(&context)
            .await
            .is_err());
        assert!(CategorySource::new(catalog)
            .get_candidates(&context, Category::Travel)
            .await
            .is_err());
    }

    #[test]
    fn test_feed_mode_parsing() {
        assert_eq!("Shuffle".parse::<FeedMode>().unwrap(), FeedMode::Shuffle);
        assert_eq!("for-you".parse::<FeedMode>().unwrap(), FeedMode::Recommended);
        assert!("popular".parse::<FeedMode>().is_err());
    }

    #[test]
    fn test_shuffle_ignored_for_category_browse() {
        let shuffle = ViewerContext::new("viewer").with_request(FeedRequest::new(FeedMode::Shuffle));
        assert!(shuffle.shuffles());

        let browse = shuffle.with_request(FeedRequest {
            explicit_category: Some(Category::Music),
            mode: FeedMode::Shuffle,
        });
        assert!(!browse.shuffles());
    }
}
