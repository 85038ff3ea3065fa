//! Error types for the harvester.

use thiserror::Error;

/// Main error type for the harvester library.
#[derive(Debug, Error)]
pub enum HarvesterError {
    /// Invalid or missing harvest source configuration.
    #[error("Invalid harvest configuration: {0}")]
    Config(String),

    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing or serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Catalog document is neither a dataset list nor a catalog object.
    #[error("Wrong JSON object: {0}")]
    InvalidDocument(String),

    /// Dataset record is missing required nested structure.
    #[error("Malformed dataset record: missing or invalid '{field}'")]
    MalformedRecord { field: String },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for harvester operations.
pub type Result<T> = std::result::Result<T, HarvesterError>;
