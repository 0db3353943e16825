//! # Feed Selector
//!
//! Coordinates one selection pass:
//! 1. Pick the candidate source for the request (category browse,
//!    preferred categories, or recent)
//! 2. Fetch candidates through the catalog
//! 3. Run the filter pipeline (blocked, parental, shuffle, de-duplicate)
//!
//! The selector holds no per-viewer state. It is cheap to clone and safe to
//! share between tasks; the session decides which result to keep.

use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{error, info};

use pipeline::FilterPipeline;
use sources::{
    Candidate, CatalogAccessor, CategorySource, FeedMode, PreferredCategorySource, RecentSource,
    ViewerContext,
};

use crate::config::FeedConfig;
use crate::selection::FeedSelection;

#[derive(Clone)]
pub struct FeedSelector {
    catalog: Arc<dyn CatalogAccessor>,
    category_source: Arc<CategorySource>,
    preferred_source: Arc<PreferredCategorySource>,
    recent_source: Arc<RecentSource>,
    filter_pipeline: Arc<FilterPipeline>,
    config: FeedConfig,
}

impl FeedSelector {
    /// Selector with the standard feed pipeline
    pub fn new(catalog: Arc<dyn CatalogAccessor>, config: FeedConfig) -> Self {
        Self::with_pipeline(catalog, config, FilterPipeline::feed())
    }

    pub fn with_pipeline(
        catalog: Arc<dyn CatalogAccessor>,
        config: FeedConfig,
        filter_pipeline: FilterPipeline,
    ) -> Self {
        let category_source = CategorySource::new(catalog.clone()).with_limit(config.category_limit);
        let preferred_source = PreferredCategorySource::new(catalog.clone())
            .with_per_category_limit(config.per_category_limit);
        let recent_source = RecentSource::new(catalog.clone()).with_limit(config.recent_limit);

        Self {
            catalog,
            category_source: Arc::new(category_source),
            preferred_source: Arc::new(preferred_source),
            recent_source: Arc::new(recent_source),
            filter_pipeline: Arc::new(filter_pipeline),
            config,
        }
    }

    pub fn config(&self) -> &FeedConfig {
        &self.config
    }

    /// Compute the ordered candidate list for `context`.
    ///
    /// Fetch failures are returned as errors; `load` turns them into a
    /// failed selection.
    pub async fn select(&self, context: &ViewerContext) -> Result<Vec<Candidate>> {
        let start_time = Instant::now();

        let candidates = self.generate_candidates(context).await?;
        info!(
            "Generated {} candidates for viewer {} (mode: {}, category: {})",
            candidates.len(),
            context.viewer_id,
            context.request.mode,
            context
                .request
                .explicit_category
                .map(|c| c.key())
                .unwrap_or("none")
        );

        let selected = self
            .filter_pipeline
            .apply(candidates, context)
            .context("Failed to apply filters")?;

        info!(
            "Selected {} videos for viewer {} in {:.2?}",
            selected.len(),
            context.viewer_id,
            start_time.elapsed()
        );
        Ok(selected)
    }

    /// Run `select` and wrap the outcome as a fresh selection with the cursor at 0
    pub async fn load(&self, context: &ViewerContext) -> FeedSelection {
        into_selection(self.select(context).await, context)
    }

    /// Apply a like or unlike to the catalog, returning the new count.
    /// Unliking never takes the count below zero.
    pub async fn toggle_like(&self, video_id: &str, liked: bool) -> Result<u64> {
        let delta = if liked { 1 } else { -1 };
        let likes = self
            .catalog
            .apply_like_delta(video_id, delta)
            .await
            .with_context(|| format!("Failed to update likes for video {}", video_id))?;
        info!("Video {} now has {} likes (liked: {})", video_id, likes, liked);
        Ok(likes)
    }

    /// Current like count of a video, without changing it
    pub async fn like_count(&self, video_id: &str) -> Result<u64> {
        self.catalog
            .like_count(video_id)
            .await
            .with_context(|| format!("Failed to read likes for video {}", video_id))
    }

    async fn generate_candidates(&self, context: &ViewerContext) -> Result<Vec<Candidate>> {
        if let Some(category) = context.request.explicit_category {
            return self
                .category_source
                .get_candidates(context, category)
                .await
                .with_context(|| format!("Failed to fetch category {}", category));
        }

        let has_preferences = !context.preferences.preferred_categories.is_empty();
        match context.request.mode {
            FeedMode::Recommended if has_preferences => self
                .preferred_source
                .get_candidates(context)
                .await
                .context("Failed to fetch preferred categories"),
            _ => self
                .recent_source
                .get_candidates(context)
                .await
                .context("Failed to fetch recent videos"),
        }
    }
}

/// Convert a selection result into what the viewer sees. Errors are logged
/// and become an empty selection carrying the message.
pub(crate) fn into_selection(result: Result<Vec<Candidate>>, context: &ViewerContext) -> FeedSelection {
    match result {
        Ok(candidates) => FeedSelection::from_candidates(candidates, context),
        Err(e) => {
            error!("Feed load failed for viewer {}: {:#}", context.viewer_id, e);
            FeedSelection::failed(format!("{:#}", e))
        }
    }
}
