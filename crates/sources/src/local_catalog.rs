//! In-process catalog backed by a `VideoIndex`.
//!
//! Reads take a shared lock so concurrent selections never wait on each
//! other. When opened from a file, every mutation is written back so likes
//! and uploads survive between runs.

use crate::traits::CatalogAccessor;
use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use catalog::{Category, CreatorStats, NewVideo, VideoIndex, VideoRecord};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, warn};

#[derive(Clone)]
pub struct LocalCatalog {
    index: Arc<RwLock<VideoIndex>>,
    backing_file: Option<PathBuf>,
}

impl LocalCatalog {
    /// Wrap an index that lives only in memory
    pub fn new(index: VideoIndex) -> Self {
        Self {
            index: Arc::new(RwLock::new(index)),
            backing_file: None,
        }
    }

    /// Load a catalog file and write mutations back to it
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let index = VideoIndex::load_from_file(&path)
            .with_context(|| format!("Failed to load catalog from {}", path.display()))?;
        Ok(Self {
            index: Arc::new(RwLock::new(index)),
            backing_file: Some(path),
        })
    }

    pub async fn len(&self) -> usize {
        self.index.read().await.len()
    }

    pub async fn get_video(&self, id: &str) -> Option<VideoRecord> {
        self.index.read().await.get_video(id).cloned()
    }

    /// Upload flow: validate, store and persist a new video
    pub async fn create_video(&self, new_video: NewVideo) -> Result<VideoRecord> {
        let mut index = self.index.write().await;
        let video = index.create_video(new_video)?;
        if let Err(e) = self.persist(&index).await {
            index.remove_video(&video.id);
            return Err(e);
        }
        Ok(video)
    }

    pub async fn remove_video(&self, id: &str) -> Result<Option<VideoRecord>> {
        let mut index = self.index.write().await;
        let Some(removed) = index.remove_video(id) else {
            warn!("Video {} not found for removal", id);
            return Ok(None);
        };
        if let Err(e) = self.persist(&index).await {
            index.insert_video(removed);
            return Err(e);
        }
        Ok(Some(removed))
    }

    pub async fn list_by_creator(&self, creator: &str, limit: usize) -> Vec<VideoRecord> {
        self.index.read().await.list_by_creator(creator, limit)
    }

    pub async fn creator_stats(&self, creator: &str) -> CreatorStats {
        self.index.read().await.creator_stats(creator)
    }

    /// Write `index` to the backing file, if there is one.
    ///
    /// Callers hold the write guard across this call, so snapshots reach
    /// the file in the same order the mutations were applied.
    async fn persist(&self, index: &VideoIndex) -> Result<()> {
        let Some(path) = self.backing_file.clone() else {
            return Ok(());
        };
        let videos = index.all_videos();
        debug!("Persisting {} videos to {}", videos.len(), path.display());

        tokio::task::spawn_blocking(move || catalog::parser::write_videos(&path, &videos))
            .await
            .context("Catalog writer task panicked")?
            .context("Failed to write catalog")?;
        Ok(())
    }
}

#[async_trait]
impl CatalogAccessor for LocalCatalog {
    async fn list_by_recency(&self, limit: usize) -> Result<Vec<VideoRecord>> {
        Ok(self.index.read().await.list_by_recency(limit))
    }

    async fn list_by_category(&self, category: Category, limit: usize) -> Result<Vec<VideoRecord>> {
        Ok(self.index.read().await.list_by_category(category, limit))
    }

    async fn like_count(&self, id: &str) -> Result<u64> {
        self.index
            .read()
            .await
            .get_video(id)
            .map(|video| video.likes)
            .ok_or_else(|| anyhow!("Video {} not found", id))
    }

    async fn apply_like_delta(&self, id: &str, delta: i64) -> Result<u64> {
        let mut index = self.index.write().await;
        let before = index
            .get_video(id)
            .map(|video| video.likes)
            .ok_or_else(|| anyhow!("Video {} not found", id))?;
        let likes = index.apply_like_delta(id, delta)?;
        if likes == before {
            return Ok(likes);
        }
        if let Err(e) = self.persist(&index).await {
            index.apply_like_delta(id, before as i64 - likes as i64)?;
            return Err(e);
        }
        Ok(likes)
    }
}
