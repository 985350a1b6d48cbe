//! Error handling for synthetic cohort generation.

pub mod util;

use std::io;

use arrow::error::ArrowError;
use parquet::errors::ParquetError;

/// Errors that can occur while configuring, generating or exporting a cohort
#[derive(Debug, thiserror::Error)]
pub enum SynthError {
    /// A generator argument is unusable (e.g. a record count of zero)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A patient profile was finalized without a required field
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// A rule table or sampling configuration failed validation
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Error opening, reading or writing a file
    #[error("IO error: {context}: {source}")]
    Io {
        /// What was being attempted
        context: String,
        /// Underlying IO error
        #[source]
        source: io::Error,
    },

    /// Error building Arrow data for export
    #[error("Arrow error: {0}")]
    Arrow(#[from] ArrowError),

    /// Error writing Parquet output
    #[error("Parquet error: {0}")]
    Parquet(#[from] ParquetError),

    /// Error parsing a JSON configuration
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SynthError {
    /// Create an invalid-argument error
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Create an invalid-configuration error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig(message.into())
    }

    /// Wrap an IO error with a description of the failed operation
    pub fn io(context: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }
}

impl From<io::Error> for SynthError {
    fn from(error: io::Error) -> Self {
        Self::io("IO operation failed", error)
    }
}

/// Result type for cohort generation operations
pub type Result<T> = std::result::Result<T, SynthError>;
