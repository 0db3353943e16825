//! Core traits for the filtering pipeline.
//!
//! This module defines the Filter trait that allows composable,
//! extensible filters to be applied to candidate sets.

use anyhow::Result;
use sources::{Candidate, ViewerContext};

/// Core trait for filtering candidates.
///
/// Filters take ownership of the candidate list and return the list that
/// survives. A filter may also reorder, as the shuffle filter does.
pub trait Filter: Send + Sync {
    /// Returns the name of this filter (for logging/debugging)
    fn name(&self) -> &str;

    /// Apply this filter to a set of candidates.
    ///
    /// # Arguments
    /// * `candidates` - The candidates to filter (takes ownership)
    /// * `context` - Viewer preferences and the current request
    fn apply(&self, candidates: Vec<Candidate>, context: &ViewerContext)
        -> Result<Vec<Candidate>>;
}
