//! VideoIndex building, validation and the upload flow.
//!
//! This module builds the VideoIndex from parsed records:
//! - Validate every record (in parallel, records are independent)
//! - Reject duplicate ids before anything is indexed
//! - Build the category and creator indices through `insert_video`

use crate::error::{CatalogError, Result};
use crate::parser;
use crate::types::*;
use chrono::Utc;
use rayon::prelude::*;
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, info};

impl VideoIndex {
    /// Load a catalog file into a fresh index
    ///
    /// Steps:
    /// 1. Parse the JSON array of records
    /// 2. Validate records in parallel
    /// 3. Reject duplicate ids
    /// 4. Insert everything (builds secondary indices)
    pub fn load_from_file(path: &Path) -> Result<Self> {
        info!("Loading video catalog from {:?}", path);

        let videos = parser::parse_videos(path)?;

        if let Some(err) = videos.par_iter().find_map_any(|v| validate_record(v).err()) {
            return Err(err);
        }

        let mut seen = HashSet::with_capacity(videos.len());
        for video in &videos {
            if !seen.insert(video.id.as_str()) {
                return Err(CatalogError::DuplicateId(video.id.clone()));
            }
        }

        let index = Self::from_videos(videos);
        info!("Loaded {} videos", index.len());
        Ok(index)
    }

    /// Build an index from records that are already validated
    pub fn from_videos(videos: impl IntoIterator<Item = VideoRecord>) -> Self {
        let mut index = VideoIndex::new();
        for video in videos {
            index.insert_video(video);
        }
        index
    }

    /// Write the catalog back to disk, newest first
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        debug!("Writing {} videos to {:?}", self.len(), path);
        parser::write_videos(path, &self.all_videos())
    }

    /// Create a video from the upload form
    ///
    /// The title must be non-empty and the URL must point directly at an
    /// .mp4 file. Counters start at zero and the id is freshly generated.
    pub fn create_video(&mut self, new_video: NewVideo) -> Result<VideoRecord> {
        let title = new_video.title.trim();
        if title.is_empty() {
            return Err(CatalogError::ValidationError(
                "a title is required".to_string(),
            ));
        }
        if !parser::is_mp4_url(&new_video.video_url) {
            return Err(CatalogError::InvalidValue {
                field: "video_url".to_string(),
                value: new_video.video_url.clone(),
            });
        }

        let video = VideoRecord {
            id: uuid::Uuid::new_v4().simple().to_string(),
            title: title.to_string(),
            description: new_video.description.trim().to_string(),
            video_url: new_video.video_url.trim().to_string(),
            thumbnail_url: None,
            category: new_video.category,
            duration_secs: 0,
            views: 0,
            likes: 0,
            age_appropriate: new_video.age_appropriate,
            created_by: new_video.created_by,
            tags: parser::parse_tags(&new_video.tags),
            created_at: Utc::now(),
        };

        info!("Created video {} in {}", video.id, video.category);
        self.insert_video(video.clone());
        Ok(video)
    }
}

/// Per-record checks applied when a catalog file is loaded
fn validate_record(video: &VideoRecord) -> Result<()> {
    if video.id.trim().is_empty() {
        return Err(CatalogError::ValidationError(format!(
            "video '{}' has an empty id",
            video.title
        )));
    }
    if video.title.trim().is_empty() {
        return Err(CatalogError::ValidationError(format!(
            "video {} has an empty title",
            video.id
        )));
    }
    if video.video_url.trim().is_empty() {
        return Err(CatalogError::InvalidValue {
            field: "video_url".to_string(),
            value: video.video_url.clone(),
        });
    }
    Ok(())
}
