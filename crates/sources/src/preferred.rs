//! Preferred Category Source
//!
//! Builds the recommended feed: one newest-first block per preferred
//! category, concatenated in the order the viewer added them. The per
//! category queries run concurrently but their results are joined back in
//! preference order, so the output never depends on which query finished
//! first.
//!
//! A video can appear in more than one block only if the catalog returns
//! it twice; duplicate removal is left to the pipeline.

use crate::traits::CatalogAccessor;
use crate::types::{Candidate, CandidateSource, ViewerContext};
use anyhow::{Context, Result};
use futures::future::try_join_all;
use std::sync::Arc;
use tracing::{debug, instrument};

pub struct PreferredCategorySource {
    catalog: Arc<dyn CatalogAccessor>,
    per_category_limit: usize,
}

impl PreferredCategorySource {
    pub fn new(catalog: Arc<dyn CatalogAccessor>) -> Self {
        Self {
            catalog,
            per_category_limit: 10,
        }
    }

    /// Configure how many videos each preferred category contributes (default: 10)
    pub fn with_per_category_limit(mut self, limit: usize) -> Self {
        self.per_category_limit = limit;
        self
    }

    pub fn per_category_limit(&self) -> usize {
        self.per_category_limit
    }

    /// Returns an empty list when the viewer has no preferred categories;
    /// the caller decides what to fall back to.
    #[instrument(skip(self, context), fields(viewer_id = %context.viewer_id))]
    pub async fn get_candidates(&self, context: &ViewerContext) -> Result<Vec<Candidate>> {
        let preferred = &context.preferences.preferred_categories;
        if preferred.is_empty() {
            return Ok(Vec::new());
        }

        let queries = preferred.iter().map(|&category| {
            let catalog = Arc::clone(&self.catalog);
            let limit = self.per_category_limit;
            async move {
                let videos = catalog
                    .list_by_category(category, limit)
                    .await
                    .with_context(|| format!("Failed to list preferred category {}", category))?;
                Ok::<_, anyhow::Error>((category, videos))
            }
        });
        let blocks = try_join_all(queries).await?;

        let candidates: Vec<Candidate> = blocks
            .into_iter()
            .flat_map(|(category, videos)| {
                videos
                    .into_iter()
                    .map(move |video| Candidate::new(video, CandidateSource::Preferred(category)))
            })
            .collect();

        debug!(
            "Preferred source returned {} videos across {} categories",
            candidates.len(),
            preferred.len()
        );
        Ok(candidates)
    }
}
