//! Error types for rekord-crypto

use thiserror::Error;

/// Errors that can occur in cryptographic operations
#[derive(Error, Debug)]
pub enum Error {
    /// Signature did not verify against any key
    #[error("Verification error: {0}")]
    Verification(String),

    /// Malformed or unusable public key material
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    /// Unsupported algorithm
    #[error("Unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// ASCII armor encoding/decoding error
    #[error("Armor error: {0}")]
    Armor(String),

    /// DER encoding/decoding error
    #[error("DER error: {0}")]
    Der(String),

    /// Compressed content could not be decompressed
    #[error("Decompression error: {0}")]
    Decompress(String),
}

impl From<der::Error> for Error {
    fn from(e: der::Error) -> Self {
        Error::Der(e.to_string())
    }
}

/// Result type for cryptographic operations
pub type Result<T> = std::result::Result<T, Error>;
