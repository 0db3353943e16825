//! Collaborator interfaces the feed is built on.
//!
//! Both are supplied by the hosting application and injected as
//! `Arc<dyn ...>`; nothing in the selection path owns a global store.

use anyhow::Result;
use async_trait::async_trait;
use catalog::{Category, PreferenceSet, VideoRecord};

/// Read access to the video catalog plus the one mutation the feed performs.
#[async_trait]
pub trait CatalogAccessor: Send + Sync {
    /// Newest videos across the catalog, at most `limit`
    async fn list_by_recency(&self, limit: usize) -> Result<Vec<VideoRecord>>;

    /// Newest videos in `category`, at most `limit`
    async fn list_by_category(&self, category: Category, limit: usize) -> Result<Vec<VideoRecord>>;

    /// Current like count of a video
    async fn like_count(&self, id: &str) -> Result<u64> {
        self.apply_like_delta(id, 0).await
    }

    /// Add `delta` to a video's likes (never below zero), returning the new count
    async fn apply_like_delta(&self, id: &str, delta: i64) -> Result<u64>;
}

/// Storage for per-viewer preferences.
#[async_trait]
pub trait PreferenceStore: Send + Sync {
    /// Stored preferences, or the all-empty default when none exist
    async fn load(&self, viewer_id: &str) -> Result<PreferenceSet>;

    async fn save(&self, viewer_id: &str, preferences: &PreferenceSet) -> Result<()>;
}
