//! Pipeline for filtering and ordering feed candidates.
//!
//! This crate provides:
//! - Filter trait and implementations for candidate filtering
//! - FilterPipeline for composing filters
//!
//! ## Architecture
//! Candidates from the sources pass through the filters in order:
//! 1. Blocked categories are removed
//! 2. Videos that are not age-appropriate are removed in parental mode
//! 3. The list is permuted in shuffle mode
//! 4. Duplicate ids are dropped, first occurrence wins
//!
//! ## Example Usage
//! ```ignore
//! use pipeline::FilterPipeline;
//!
//! let pipeline = FilterPipeline::feed();
//! let visible = pipeline.apply(candidates, &context)?;
//! ```

pub mod filter_pipeline;
pub mod filters;
pub mod traits;

// Re-export main types
pub use filter_pipeline::FilterPipeline;
pub use traits::Filter;
