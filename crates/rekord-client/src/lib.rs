//! Rekor transparency log client
//!
//! This crate builds the entry that records a verified artifact signature and
//! submits it to a Rekor instance.

pub mod client;
pub mod entry;
pub mod error;

pub use client::{RekorClient, ADD_ENTRY_PATH, DEFAULT_TIMEOUT};
pub use entry::{ArmoredEntry, LogEntry, RawEntry, SubmissionResult, SubmissionStatus};
pub use error::{Error, Result};
