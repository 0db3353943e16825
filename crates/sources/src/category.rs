//! Category Source
//!
//! Serves an explicit category browse. When a category is requested it
//! replaces every preference-driven source.

use crate::traits::CatalogAccessor;
use crate::types::{Candidate, CandidateSource, ViewerContext};
use anyhow::Result;
use catalog::Category;
use std::sync::Arc;
use tracing::{debug, instrument};

pub struct CategorySource {
    catalog: Arc<dyn CatalogAccessor>,
    limit: usize,
}

impl CategorySource {
    pub fn new(catalog: Arc<dyn CatalogAccessor>) -> Self {
        Self { catalog, limit: 50 }
    }

    /// Configure how many videos are fetched for the category (default: 50)
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    #[instrument(skip(self, context, category), fields(viewer_id = %context.viewer_id, category = %category))]
    pub async fn get_candidates(
        &self,
        context: &ViewerContext,
        category: Category,
    ) -> Result<Vec<Candidate>> {
        let videos = self.catalog.list_by_category(category, self.limit).await?;
        debug!("Category {} returned {} videos", category, videos.len());

        Ok(videos
            .into_iter()
            .map(|video| Candidate::new(video, CandidateSource::Category(category)))
            .collect())
    }
}
