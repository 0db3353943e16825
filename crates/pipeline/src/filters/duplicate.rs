//! Filter to drop repeated video ids.
//!
//! The first occurrence in list order is kept, so preference order and
//! recency order survive de-duplication.

use crate::traits::Filter;
use anyhow::Result;
use sources::{Candidate, ViewerContext};
use std::collections::HashSet;

pub struct DuplicateFilter;

impl Filter for DuplicateFilter {
    fn name(&self) -> &str {
        "DuplicateFilter"
    }

    fn apply(&self, candidates: Vec<Candidate>, _context: &ViewerContext) -> Result<Vec<Candidate>> {
        let mut seen = HashSet::with_capacity(candidates.len());
        Ok(candidates
            .into_iter()
            .filter(|candidate| seen.insert(candidate.video.id.clone()))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::test_support::{candidate, ids};
    use catalog::Category;
    use sources::CandidateSource;

    #[test]
    fn test_first_occurrence_wins() {
        let mut second_a = candidate("a", Category::Travel, true);
        second_a.source = CandidateSource::Preferred(Category::Travel);

        let candidates = vec![
            candidate("a", Category::Travel, true),
            candidate("b", Category::Travel, true),
            second_a,
            candidate("c", Category::Travel, true),
            candidate("b", Category::Travel, true),
        ];

        let filtered = DuplicateFilter.apply(candidates, &ViewerContext::new("viewer")).unwrap();
        assert_eq!(ids(&filtered), vec!["a", "b", "c"]);
        assert_eq!(filtered[0].source, CandidateSource::Recent);
    }
}
