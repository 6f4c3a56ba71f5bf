//! Error types for codesplit.
//!
//! A single `SplitterError` covers validation failures surfaced to the user
//! as well as the packaging and IO failures around them.

use thiserror::Error;

/// Main error type for the codesplit library.
#[derive(Debug, Error)]
pub enum SplitterError {
    /// The input text is empty or whitespace-only.
    #[error("Input text is empty")]
    EmptyInput,

    /// The delimiter is empty or whitespace-only.
    #[error("Delimiter cannot be empty")]
    InvalidDelimiter,

    /// The delimiter never appears in front of a valid file path.
    #[error("No valid file headers found. Please check your delimiter \"{delimiter}\" and ensure it's followed by a valid file path")]
    NoHeadersFound { delimiter: String },

    /// Packaging was requested before any records were produced.
    #[error("Nothing to package: split the input first")]
    NotProcessed,

    /// A record path cannot be placed in the archive.
    #[error("Invalid archive entry path '{path}': {reason}")]
    InvalidEntryPath { path: String, reason: &'static str },

    /// The input exceeds the configured size limit.
    #[error("Input is {size} bytes, which exceeds the limit of {limit} bytes")]
    InputTooLarge { size: usize, limit: usize },

    /// The zip writer failed.
    #[error("Failed to create archive: {0}")]
    Packaging(#[from] zip::result::ZipError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for codesplit operations.
pub type Result<T> = std::result::Result<T, SplitterError>;
