//! Recent Source
//!
//! Catalog-wide listing, newest first. Feeds both the recent and the
//! shuffle modes; shuffling happens later in the pipeline.

use crate::traits::CatalogAccessor;
use crate::types::{Candidate, CandidateSource, ViewerContext};
use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, instrument};

pub struct RecentSource {
    catalog: Arc<dyn CatalogAccessor>,
    limit: usize,
}

impl RecentSource {
    pub fn new(catalog: Arc<dyn CatalogAccessor>) -> Self {
        Self { catalog, limit: 50 }
    }

    /// Configure how many videos are fetched (default: 50)
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    #[instrument(skip(self, context), fields(viewer_id = %context.viewer_id))]
    pub async fn get_candidates(&self, context: &ViewerContext) -> Result<Vec<Candidate>> {
        let videos = self.catalog.list_by_recency(self.limit).await?;
        debug!("Recent source returned {} videos", videos.len());

        Ok(videos
            .into_iter()
            .map(|video| Candidate::new(video, CandidateSource::Recent))
            .collect())
    }
}
