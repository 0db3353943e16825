//! Filter implementations for the candidate pipeline.
//!
//! This module contains all the concrete filter implementations
//! that can be composed into a FilterPipeline.

pub mod blocked_category;
pub mod duplicate;
pub mod parental_mode;
pub mod shuffle;

// Re-export for convenience
pub use blocked_category::BlockedCategoryFilter;
pub use duplicate::DuplicateFilter;
pub use parental_mode::ParentalModeFilter;
pub use shuffle::ShuffleFilter;
