//! Artifact signature verification and transparency log submission
//!
//! Given an artifact URL, a detached signature and a public key, this crate
//! checks that the artifact is exactly what was signed and then records that
//! fact in a Rekor transparency log. Stages run strictly in order and the
//! first failure aborts the run, so nothing is submitted unless the signature
//! verified.

pub mod error;
pub mod fetch;
pub mod loader;
pub mod upload;

// Re-export core crates
pub use rekord_client as client;
pub use rekord_crypto as crypto;
pub use rekord_types as types;

pub use error::{Error, Result};
pub use fetch::ArtifactFetcher;
pub use loader::load_key_material;
pub use upload::{UploadConfig, UploadOutcome, UploadRequest, Uploader, DEFAULT_REKOR_SERVER};
