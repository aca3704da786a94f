//! Error types for rekord

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Errors that abort an upload run
#[derive(Error, Debug)]
pub enum Error {
    /// A key or signature file could not be read
    #[error("failed to read {what} {}: {source}", .path.display())]
    Io {
        /// Which input was being read
        what: &'static str,
        /// Path of the input
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Artifact download failed or returned a non-success status
    #[error("artifact fetch failed: {0}")]
    Fetch(String),

    /// Decompression, key parsing or response parsing failed
    #[error("decode error: {0}")]
    Decode(String),

    /// The signature does not verify against the public key
    #[error("signature verification failed: {0}")]
    Verification(String),

    /// The log entry could not be encoded
    #[error("entry encoding failed: {0}")]
    Encode(String),

    /// A network operation ran out of time
    #[error("{operation} timed out after {after:?}")]
    Timeout {
        /// The operation that was cancelled
        operation: &'static str,
        /// The time budget that ran out
        after: Duration,
    },

    /// The log rejected the entry or could not be reached
    #[error("log submission failed: {0}")]
    Submission(String),
}

impl Error {
    /// Whether this is a failed trust check rather than an I/O or transport problem
    pub fn is_verification_failure(&self) -> bool {
        matches!(self, Error::Verification(_))
    }
}

impl From<rekord_crypto::Error> for Error {
    fn from(e: rekord_crypto::Error) -> Self {
        match e {
            rekord_crypto::Error::Verification(msg) => Error::Verification(msg),
            other => Error::Decode(other.to_string()),
        }
    }
}

impl From<rekord_client::Error> for Error {
    fn from(e: rekord_client::Error) -> Self {
        match e {
            rekord_client::Error::Timeout(after) => Error::Timeout {
                operation: "log submission",
                after,
            },
            rekord_client::Error::Json(e) => Error::Decode(format!("malformed log response: {}", e)),
            rekord_client::Error::Encode(msg) => Error::Encode(msg),
            rekord_client::Error::Http(msg) | rekord_client::Error::Api(msg) => {
                Error::Submission(msg)
            }
        }
    }
}

/// Result type for rekord operations
pub type Result<T> = std::result::Result<T, Error>;
