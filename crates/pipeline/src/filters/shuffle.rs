//! Random permutation of the feed for shuffle mode.
//!
//! Only applies when the viewer is in shuffle mode without an explicit
//! category. A fixed seed makes the permutation reproducible.

use crate::traits::Filter;
use anyhow::Result;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use sources::{Candidate, ViewerContext};

#[derive(Debug, Clone, Copy, Default)]
pub struct ShuffleFilter {
    seed: Option<u64>,
}

impl ShuffleFilter {
    /// Shuffle with the thread-local generator
    pub fn new() -> Self {
        Self::default()
    }

    /// Shuffle deterministically from `seed`
    pub fn with_seed(seed: u64) -> Self {
        Self { seed: Some(seed) }
    }
}

impl Filter for ShuffleFilter {
    fn name(&self) -> &str {
        "ShuffleFilter"
    }

    fn apply(&self, mut candidates: Vec<Candidate>, context: &ViewerContext) -> Result<Vec<Candidate>> {
        if !context.shuffles() {
            return Ok(candidates);
        }

        match self.seed {
            Some(seed) => candidates.shuffle(&mut StdRng::seed_from_u64(seed)),
            None => candidates.shuffle(&mut rand::rng()),
        }
        Ok(candidates)
    }
}
