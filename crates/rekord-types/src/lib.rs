//! Core types for artifact signature records
//!
//! This crate provides the data structures shared by the hashing, verification
//! and submission stages: encoding tags for key material and the content digest.

pub mod encoding;
pub mod error;

pub use encoding::{Base64, Encoded, EncodingClass, Sha256Hash};
pub use error::{Error, Result};
