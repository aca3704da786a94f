//! Cryptographic primitives for artifact signature records
//!
//! This crate classifies key material as armored or binary, computes the
//! content digest of an artifact, and checks detached signatures against a
//! keyring, using aws-lc-rs as the cryptographic backend.

pub mod armor;
pub mod error;
pub mod hash;
pub mod keyring;
pub mod verification;

#[cfg(test)]
pub(crate) mod test_keys;

pub use armor::{classify, probe, PUBLIC_KEY_LABEL, SIGNATURE_LABEL};
pub use error::{Error, Result};
pub use hash::{content_digest, is_gzip_source, sha256, Sha256Hasher};
pub use keyring::Keyring;
pub use verification::{verify_detached, SigningScheme, VerificationKey};
