//! The upload pipeline
//!
//! One run loads the signature and key, downloads the artifact, hashes it,
//! checks the signature, builds the log entry and submits it. Each stage
//! finishes before the next starts and any failure ends the run.

use crate::error::Result;
use crate::fetch::ArtifactFetcher;
use crate::loader::load_key_material;
use rekord_client::{LogEntry, RekorClient, SubmissionResult};
use rekord_crypto::{content_digest, verify_detached, Keyring};
use rekord_types::Sha256Hash;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, Instrument, Span};

/// Log server used when none is configured
pub const DEFAULT_REKOR_SERVER: &str = "http://localhost:3000";

/// Configuration for upload runs
#[derive(Debug, Clone)]
pub struct UploadConfig {
    /// Base URL of the Rekor server
    pub rekor_server: String,
    /// Budget for downloading the artifact
    pub fetch_timeout: Duration,
    /// Budget for submitting the entry
    pub submit_timeout: Duration,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            rekor_server: DEFAULT_REKOR_SERVER.to_string(),
            fetch_timeout: rekord_client::DEFAULT_TIMEOUT,
            submit_timeout: rekord_client::DEFAULT_TIMEOUT,
        }
    }
}

impl UploadConfig {
    /// Use a different Rekor server
    pub fn with_rekor_server(mut self, url: impl Into<String>) -> Self {
        self.rekor_server = url.into();
        self
    }

    /// Set both the fetch and the submission budget
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self.submit_timeout = timeout;
        self
    }

    /// Set the submission budget only
    pub fn with_submit_timeout(mut self, timeout: Duration) -> Self {
        self.submit_timeout = timeout;
        self
    }
}

/// The three inputs of one run
#[derive(Debug, Clone)]
pub struct UploadRequest {
    /// HTTP(S) URL of the artifact
    pub artifact_url: String,
    /// Path to the detached signature
    pub signature_path: PathBuf,
    /// Path to the public key
    pub public_key_path: PathBuf,
}

impl UploadRequest {
    /// Create a new request
    pub fn new(
        artifact_url: impl Into<String>,
        signature_path: impl Into<PathBuf>,
        public_key_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            artifact_url: artifact_url.into(),
            signature_path: signature_path.into(),
            public_key_path: public_key_path.into(),
        }
    }
}

/// What a successful run produced
#[derive(Debug, Clone)]
pub struct UploadOutcome {
    /// Digest of the (decompressed) artifact
    pub digest: Sha256Hash,
    /// The entry that was submitted
    pub entry: LogEntry,
    /// The log's acknowledgment
    pub result: SubmissionResult,
}

/// Runs the pipeline against one Rekor server
pub struct Uploader {
    config: UploadConfig,
    fetcher: ArtifactFetcher,
    rekor: RekorClient,
    span: Span,
}

impl Uploader {
    /// Create an uploader for the given configuration
    pub fn new(config: UploadConfig) -> Self {
        let fetcher = ArtifactFetcher::new(config.fetch_timeout);
        let rekor =
            RekorClient::new(config.rekor_server.clone()).with_timeout(config.submit_timeout);
        let span = tracing::info_span!("upload", server = %config.rekor_server);

        Self {
            config,
            fetcher,
            rekor,
            span,
        }
    }

    /// Record every stage of every run under `span`
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    /// Get the configuration
    pub fn config(&self) -> &UploadConfig {
        &self.config
    }

    /// Verify the artifact and submit its entry
    pub async fn upload(&self, request: &UploadRequest) -> Result<UploadOutcome> {
        self.run(request).instrument(self.span.clone()).await
    }

    async fn run(&self, request: &UploadRequest) -> Result<UploadOutcome> {
        // Key material is checked before anything is downloaded
        let signature = load_key_material(&request.signature_path, "signature")?;
        let public_key = load_key_material(&request.public_key_path, "public key")?;
        let keyring = Keyring::from_material(&public_key)?;
        info!(keys = keyring.len(), "public key ring loaded");

        info!(url = %request.artifact_url, "downloading artifact");
        let artifact = self.fetcher.fetch(&request.artifact_url).await?;
        info!(bytes = artifact.len(), "contents fetched");

        let digest = content_digest(&request.artifact_url, &artifact)?;
        info!(%digest, "artifact hashed");

        verify_detached(&keyring, &artifact, &signature)?;
        info!(encoding = %signature.class(), "signature validation passed");

        let entry = LogEntry::build(&request.artifact_url, digest, &signature, &public_key)?;

        info!(armored = entry.is_armored(), "uploading entry to rekor");
        let result = self.rekor.submit(&entry).await?;
        info!(status = %result.status.file_received, "entry accepted");

        Ok(UploadOutcome {
            digest,
            entry,
            result,
        })
    }
}
