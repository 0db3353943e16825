//! Filter to remove videos in categories the viewer has blocked.

use crate::traits::Filter;
use anyhow::Result;
use sources::{Candidate, ViewerContext};

/// Removes candidates whose category is in the viewer's blocked set.
pub struct BlockedCategoryFilter;

impl Filter for BlockedCategoryFilter {
    fn name(&self) -> &str {
        "BlockedCategoryFilter"
    }

    fn apply(&self, candidates: Vec<Candidate>, context: &ViewerContext) -> Result<Vec<Candidate>> {
        let blocked = &context.preferences.blocked_categories;
        if blocked.is_empty() {
            return Ok(candidates);
        }

        Ok(candidates
            .into_iter()
            .filter(|candidate| !blocked.contains(&candidate.category()))
            .collect())
    }
}
