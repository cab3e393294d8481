//! Error types for docsift
//!
//! One error enum for the whole crate. Per-item failures (a single document
//! that cannot be parsed, a single text that cannot be scored) are handled
//! where they occur and only logged; everything that reaches a caller as
//! `Err` is meant to abort the run.

use thiserror::Error;

/// Main error type for the ranking pipeline
#[derive(Error, Debug)]
pub enum SiftError {
    /// A document could not be opened or parsed
    #[error("Failed to extract text from {document}: {reason}")]
    Extraction { document: String, reason: String },

    /// The similarity scorer could not score a batch
    #[error("Scoring failed: {0}")]
    Scoring(String),

    /// Scorer returned a different number of scores than texts it was given
    #[error("Scorer returned {actual} scores for {expected} sections")]
    ScoreCountMismatch { expected: usize, actual: usize },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Missing or malformed persona / job input
    #[error("Input error: {0}")]
    InputError(String),

    /// Embedding model could not be loaded or run
    #[error("Model error: {0}")]
    ModelError(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// Generic errors with context
    #[error("{0}")]
    Generic(String),
}

/// Result type alias for docsift operations
pub type Result<T> = std::result::Result<T, SiftError>;

/// Convert anyhow errors to SiftError
impl From<anyhow::Error> for SiftError {
    fn from(err: anyhow::Error) -> Self {
        // {:#} keeps the context chain on one line
        SiftError::Generic(format!("{:#}", err))
    }
}
