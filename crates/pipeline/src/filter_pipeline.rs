//! The FilterPipeline orchestrates multiple filters.
//!
//! This module provides the main FilterPipeline struct that chains
//! multiple filters together using the builder pattern.

use crate::filters::{BlockedCategoryFilter, DuplicateFilter, ParentalModeFilter, ShuffleFilter};
use crate::traits::Filter;
use anyhow::Result;
use sources::{Candidate, ViewerContext};

/// Chains multiple filters together into a processing pipeline.
///
/// ## Usage
/// ```ignore
/// let pipeline = FilterPipeline::new()
///     .add_filter(BlockedCategoryFilter)
///     .add_filter(ParentalModeFilter)
///     .add_filter(DuplicateFilter);
///
/// let filtered = pipeline.apply(candidates, &context)?;
/// ```
pub struct FilterPipeline {
    filters: Vec<Box<dyn Filter>>,
}

impl FilterPipeline {
    /// Create a new empty FilterPipeline.
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
        }
    }

    /// The feed's standard stages: blocked, parental, shuffle, de-duplicate.
    pub fn feed() -> Self {
        Self::feed_with_shuffle(ShuffleFilter::new())
    }

    /// The standard stages with a caller-supplied shuffle, e.g. a seeded one
    pub fn feed_with_shuffle(shuffle: ShuffleFilter) -> Self {
        Self::new()
            .add_filter(BlockedCategoryFilter)
            .add_filter(ParentalModeFilter)
            .add_filter(shuffle)
            .add_filter(DuplicateFilter)
    }

    /// Add a filter to the pipeline (builder pattern).
    pub fn add_filter(mut self, filter: impl Filter + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    /// Names of the filters in the order they run
    pub fn filter_names(&self) -> Vec<&str> {
        self.filters.iter().map(|f| f.name()).collect()
    }

    /// Apply all filters in sequence to the candidates.
    ///
    /// Each stage logs its name with input and output counts at debug level.
    /// The first failing filter aborts the pass.
    pub fn apply(&self, candidates: Vec<Candidate>, context: &ViewerContext) -> Result<Vec<Candidate>> {
        let mut current = candidates;
        for filter in &self.filters {
            tracing::debug!(
                "Applying filter: {} (input count: {})",
                filter.name(),
                current.len()
            );
            current = filter.apply(current, context)?;
            tracing::debug!(
                "Filter applied: {} (output count: {})",
                filter.name(),
                current.len()
            );
        }
        Ok(current)
    }
}

impl Default for FilterPipeline {
    fn default() -> Self {
        Self::new()
    }
}
