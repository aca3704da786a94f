//! Error types for rekord-client

use std::time::Duration;
use thiserror::Error;

/// Errors that can occur in Rekor operations
#[derive(Error, Debug)]
pub enum Error {
    /// HTTP request error
    #[error("HTTP error: {0}")]
    Http(String),

    /// API error
    #[error("API error: {0}")]
    Api(String),

    /// The request did not complete within its time budget
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// Response body could not be parsed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Entry could not be encoded
    #[error("Encoding error: {0}")]
    Encode(String),
}

/// Result type for Rekor operations
pub type Result<T> = std::result::Result<T, Error>;
