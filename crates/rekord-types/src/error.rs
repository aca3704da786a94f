//! Error types for rekord-types

use thiserror::Error;

/// Errors that can occur in rekord-types
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid hex or base64 encoding
    #[error("Invalid encoding: {0}")]
    InvalidEncoding(String),
}

/// Result type for rekord-types operations
pub type Result<T> = std::result::Result<T, Error>;
