//! Core domain types for the video catalog.
//!
//! This module defines the fundamental data structures used throughout the system:
//! - Type aliases for identifiers (VideoId, ViewerId)
//! - The closed Category set
//! - VideoRecord, the unit the feed is built from
//! - PreferenceSet, the viewer's filtering choices
//! - VideoIndex, the in-memory catalog with secondary indices

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

use crate::error::{CatalogError, Result};

// =============================================================================
// Type Aliases
// =============================================================================

/// Unique identifier for a video, stable for the video's lifetime
pub type VideoId = String;

/// Identifier for a viewer whose preferences are stored
pub type ViewerId = String;

// =============================================================================
// Categories
// =============================================================================

/// Fixed set of category keys a video can be filed under.
///
/// Serialized as the snake_case key (`"art_creativity"`), which is also the
/// form accepted on the command line and in preference files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Educational,
    Entertainment,
    Lifestyle,
    Fitness,
    Cooking,
    Travel,
    Technology,
    ArtCreativity,
    Music,
    Comedy,
    News,
    Sports,
    Gaming,
    Business,
}

impl Category {
    /// Every category, in display order
    pub const ALL: [Category; 14] = [
        Category::Educational,
        Category::Entertainment,
        Category::Lifestyle,
        Category::Fitness,
        Category::Cooking,
        Category::Travel,
        Category::Technology,
        Category::ArtCreativity,
        Category::Music,
        Category::Comedy,
        Category::News,
        Category::Sports,
        Category::Gaming,
        Category::Business,
    ];

    /// The stable key used in files and on the command line
    pub fn key(self) -> &'static str {
        match self {
            Category::Educational => "educational",
            Category::Entertainment => "entertainment",
            Category::Lifestyle => "lifestyle",
            Category::Fitness => "fitness",
            Category::Cooking => "cooking",
            Category::Travel => "travel",
            Category::Technology => "technology",
            Category::ArtCreativity => "art_creativity",
            Category::Music => "music",
            Category::Comedy => "comedy",
            Category::News => "news",
            Category::Sports => "sports",
            Category::Gaming => "gaming",
            Category::Business => "business",
        }
    }

    /// Human readable label
    pub fn label(self) -> &'static str {
        match self {
            Category::ArtCreativity => "Art & Creativity",
            Category::Educational => "Educational",
            Category::Entertainment => "Entertainment",
            Category::Lifestyle => "Lifestyle",
            Category::Fitness => "Fitness",
            Category::Cooking => "Cooking",
            Category::Travel => "Travel",
            Category::Technology => "Technology",
            Category::Music => "Music",
            Category::Comedy => "Comedy",
            Category::News => "News",
            Category::Sports => "Sports",
            Category::Gaming => "Gaming",
            Category::Business => "Business",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Category::Educational => "Learn something new every day.",
            Category::Entertainment => "Fun, engaging content.",
            Category::Lifestyle => "Daily life inspiration.",
            Category::Fitness => "Training and recovery tips.",
            Category::Cooking => "Recipes and kitchen hacks.",
            Category::Travel => "Explore the world.",
            Category::Technology => "Latest tech & how-tos.",
            Category::ArtCreativity => "Make, design, create.",
            Category::Music => "Performances & lessons.",
            Category::Comedy => "Laughs & sketches.",
            Category::News => "Stay informed.",
            Category::Sports => "Games and highlights.",
            Category::Gaming => "Gameplay & reviews.",
            Category::Business => "Markets, startups, ops.",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

// =============================================================================
// Video Types
// =============================================================================

/// A single short-form video in the catalog.
///
/// Only `id`, `category`, `age_appropriate` and `created_at` drive selection;
/// the remaining fields are payload carried through to the viewer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoRecord {
    pub id: VideoId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub video_url: String,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    pub category: Category,
    #[serde(default)]
    pub duration_secs: u32,
    #[serde(default)]
    pub views: u64,
    #[serde(default)]
    pub likes: u64,
    /// Missing in a file means "not reviewed", which parental mode treats as unsafe
    #[serde(default)]
    pub age_appropriate: bool,
    #[serde(default)]
    pub created_by: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// Input for creating a new video through the upload flow
#[derive(Debug, Clone)]
pub struct NewVideo {
    pub title: String,
    pub video_url: String,
    pub category: Category,
    pub description: String,
    /// Comma-separated tags as typed by the uploader
    pub tags: String,
    pub age_appropriate: bool,
    pub created_by: String,
}

/// Aggregate numbers shown on a creator's profile
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatorStats {
    pub videos: usize,
    pub total_views: u64,
    pub total_likes: u64,
}

// =============================================================================
// Preferences
// =============================================================================

/// A viewer's feed preferences.
///
/// `preferred_categories` is an ordered set: its order decides the block
/// order of the recommended feed. A category is never both preferred and
/// blocked; the toggles keep the two sets disjoint, and stored preferences
/// are normalized the same way when they are read back.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "StoredPreferences")]
pub struct PreferenceSet {
    pub preferred_categories: Vec<Category>,
    pub blocked_categories: BTreeSet<Category>,
    pub parental_mode: bool,
}

/// Preferences exactly as found in storage
#[derive(Deserialize)]
struct StoredPreferences {
    #[serde(default)]
    preferred_categories: Vec<Category>,
    #[serde(default)]
    blocked_categories: BTreeSet<Category>,
    #[serde(default)]
    parental_mode: bool,
}

impl From<StoredPreferences> for PreferenceSet {
    /// Repeated preferred entries keep their first position. A category
    /// listed as both preferred and blocked stays blocked.
    fn from(stored: StoredPreferences) -> Self {
        let mut preferred_categories = Vec::with_capacity(stored.preferred_categories.len());
        for category in stored.preferred_categories {
            if !preferred_categories.contains(&category) && !stored.blocked_categories.contains(&category) {
                preferred_categories.push(category);
            }
        }
        Self {
            preferred_categories,
            blocked_categories: stored.blocked_categories,
            parental_mode: stored.parental_mode,
        }
    }
}

impl PreferenceSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_preferred(&self, category: Category) -> bool {
        self.preferred_categories.contains(&category)
    }

    pub fn is_blocked(&self, category: Category) -> bool {
        self.blocked_categories.contains(&category)
    }

    /// Add or remove `category` from the preferred set.
    ///
    /// Returns whether the category is preferred afterwards.
    pub fn toggle_preferred(&mut self, category: Category) -> bool {
        self.blocked_categories.remove(&category);
        if let Some(pos) = self.preferred_categories.iter().position(|c| *c == category) {
            self.preferred_categories.remove(pos);
            false
        } else {
            self.preferred_categories.push(category);
            true
        }
    }

    /// Add or remove `category` from the blocked set.
    ///
    /// Returns whether the category is blocked afterwards.
    pub fn toggle_blocked(&mut self, category: Category) -> bool {
        self.preferred_categories.retain(|c| *c != category);
        if self.blocked_categories.remove(&category) {
            false
        } else {
            self.blocked_categories.insert(category);
            true
        }
    }

    /// Flip parental mode, returning the new value
    pub fn toggle_parental_mode(&mut self) -> bool {
        self.parental_mode = !self.parental_mode;
        self.parental_mode
    }

    /// One-line summary, e.g. "2 preferred · no blocked · Parental Mode: OFF"
    pub fn summary(&self) -> String {
        let preferred = match self.preferred_categories.len() {
            0 => "no preferred".to_string(),
            n => format!("{} preferred", n),
        };
        let blocked = match self.blocked_categories.len() {
            0 => "no blocked".to_string(),
            n => format!("{} blocked", n),
        };
        let parental = if self.parental_mode { "ON" } else { "OFF" };
        format!("{} · {} · Parental Mode: {}", preferred, blocked, parental)
    }
}

// =============================================================================
// VideoIndex - The In-Memory Catalog
// =============================================================================

/// Holds every video plus the secondary indices used by feed queries.
#[derive(Debug, Default)]
pub struct VideoIndex {
    // Primary data store
    pub(crate) videos: HashMap<VideoId, VideoRecord>,

    // Secondary indices for specialized queries
    /// Videos grouped by category
    pub(crate) category_index: HashMap<Category, Vec<VideoId>>,
    /// Videos grouped by uploader
    pub(crate) creator_index: HashMap<String, Vec<VideoId>>,
}

impl VideoIndex {
    /// Creates a new, empty VideoIndex
    pub fn new() -> Self {
        Self {
            videos: HashMap::new(),
            category_index: HashMap::new(),
            creator_index: HashMap::new(),
        }
    }

    /// Get a video by ID
    pub fn get_video(&self, id: &str) -> Option<&VideoRecord> {
        self.videos.get(id)
    }

    /// Newest videos across the whole catalog
    pub fn list_by_recency(&self, limit: usize) -> Vec<VideoRecord> {
        self.newest_first(self.videos.keys(), limit)
    }

    /// Newest videos in one category
    pub fn list_by_category(&self, category: Category, limit: usize) -> Vec<VideoRecord> {
        match self.category_index.get(&category) {
            Some(ids) => self.newest_first(ids.iter(), limit),
            None => Vec::new(),
        }
    }

    /// Newest videos uploaded by `creator`
    pub fn list_by_creator(&self, creator: &str, limit: usize) -> Vec<VideoRecord> {
        match self.creator_index.get(creator) {
            Some(ids) => self.newest_first(ids.iter(), limit),
            None => Vec::new(),
        }
    }

    /// Totals across everything `creator` has uploaded
    pub fn creator_stats(&self, creator: &str) -> CreatorStats {
        let ids = self
            .creator_index
            .get(creator)
            .map(|v| v.as_slice())
            .unwrap_or(&[]);

        ids.iter()
            .filter_map(|id| self.videos.get(id))
            .fold(CreatorStats::default(), |mut stats, video| {
                stats.videos += 1;
                stats.total_views += video.views;
                stats.total_likes += video.likes;
                stats
            })
    }

    /// Every video, newest first
    pub fn all_videos(&self) -> Vec<VideoRecord> {
        self.list_by_recency(usize::MAX)
    }

    /// Insert a video and update the secondary indices.
    ///
    /// A record with an existing id replaces the old one.
    pub fn insert_video(&mut self, video: VideoRecord) {
        self.remove_video(&video.id);

        self.category_index
            .entry(video.category)
            .or_default()
            .push(video.id.clone());
        self.creator_index
            .entry(video.created_by.clone())
            .or_default()
            .push(video.id.clone());
        self.videos.insert(video.id.clone(), video);
    }

    /// Remove a video, returning it if it existed
    pub fn remove_video(&mut self, id: &str) -> Option<VideoRecord> {
        let video = self.videos.remove(id)?;
        if let Some(ids) = self.category_index.get_mut(&video.category) {
            ids.retain(|v| v != id);
        }
        if let Some(ids) = self.creator_index.get_mut(&video.created_by) {
            ids.retain(|v| v != id);
        }
        Some(video)
    }

    /// Add `delta` to a video's like counter, flooring at zero.
    ///
    /// Returns the new like count.
    pub fn apply_like_delta(&mut self, id: &str, delta: i64) -> Result<u64> {
        let video = self
            .videos
            .get_mut(id)
            .ok_or_else(|| CatalogError::VideoNotFound(id.to_string()))?;

        video.likes = if delta >= 0 {
            video.likes.saturating_add(delta as u64)
        } else {
            video.likes.saturating_sub(delta.unsigned_abs())
        };
        Ok(video.likes)
    }

    /// Number of videos in the catalog
    pub fn len(&self) -> usize {
        self.videos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.videos.is_empty()
    }

    /// Collect the given ids, newest first, ties broken by id so results are stable
    fn newest_first<'a>(
        &self,
        ids: impl Iterator<Item = &'a VideoId>,
        limit: usize,
    ) -> Vec<VideoRecord> {
        let mut records: Vec<&VideoRecord> = ids.filter_map(|id| self.videos.get(id)).collect();
        records.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        records.into_iter().take(limit).cloned().collect()
    }
}
