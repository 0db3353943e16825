//! Filter that gates the feed to age-appropriate videos in parental mode.

use crate::traits::Filter;
use anyhow::Result;
use sources::{Candidate, ViewerContext};

/// Drops every video not marked age-appropriate while parental mode is on.
/// Does nothing when parental mode is off.
pub struct ParentalModeFilter;

impl Filter for ParentalModeFilter {
    fn name(&self) -> &str {
        "ParentalModeFilter"
    }

    fn apply(&self, candidates: Vec<Candidate>, context: &ViewerContext) -> Result<Vec<Candidate>> {
        if !context.preferences.parental_mode {
            return Ok(candidates);
        }

        Ok(candidates
            .into_iter()
            .filter(|candidate| candidate.video.age_appropriate)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::test_support::{candidate, ids};
    use catalog::{Category, PreferenceSet};

    fn candidates() -> Vec<Candidate> {
        vec![
            candidate("1", Category::Comedy, true),
            candidate("2", Category::Comedy, false),
            candidate("3", Category::Sports, true),
        ]
    }

    #[test]
    fn test_parental_mode_on() {
        let mut prefs = PreferenceSet::new();
        prefs.toggle_parental_mode();
        let context = ViewerContext::new("viewer").with_preferences(prefs);

        let filtered = ParentalModeFilter.apply(candidates(), &context).unwrap();
        assert_eq!(ids(&filtered), vec!["1", "3"]);
    }

    #[test]
    fn test_parental_mode_off() {
        let context = ViewerContext::new("viewer");
        let filtered = ParentalModeFilter.apply(candidates(), &context).unwrap();
        assert_eq!(filtered.len(), 3);
    }
}
