//! Error types for the catalog crate.
//!
//! Everything that enters the system through a catalog file, a preference
//! file or an upload form is validated here, so consuming code downstream
//! can rely on well-formed records.

use thiserror::Error;

/// Errors that can occur while loading, validating or mutating the catalog
#[derive(Error, Debug)]
pub enum CatalogError {
    /// File could not be found or opened
    #[error("Failed to open file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading or writing a file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// File content is not valid JSON for the expected shape
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// A record in a data file couldn't be parsed
    #[error("Parse error at record {record} in {file}: {reason}")]
    ParseError {
        file: String,
        record: usize,
        reason: String,
    },

    /// A field had a value outside its allowed set
    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },

    /// Two records share the same video id
    #[error("Duplicate video id: {0}")]
    DuplicateId(String),

    /// Referenced video doesn't exist
    #[error("Video not found: {0}")]
    VideoNotFound(String),

    /// Data validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, CatalogError>;
