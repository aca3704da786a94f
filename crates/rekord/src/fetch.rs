//! Artifact download

use crate::error::{Error, Result};
use std::time::Duration;

/// Downloads artifacts with a single bounded GET per call
pub struct ArtifactFetcher {
    client: reqwest::Client,
    timeout: Duration,
}

impl ArtifactFetcher {
    /// Create a fetcher that gives up after `timeout`
    pub fn new(timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::new(),
            timeout,
        }
    }

    /// Fetch the artifact body
    ///
    /// Transport errors and non-success statuses are errors; an empty or
    /// partial body is never handed on. There is no retry.
    pub async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        let request = async {
            let response = self
                .client
                .get(url)
                .send()
                .await
                .map_err(|e| Error::Fetch(format!("GET {}: {}", url, e)))?;

            let status = response.status();
            if !status.is_success() {
                return Err(Error::Fetch(format!("GET {} returned {}", url, status)));
            }

            let body = response
                .bytes()
                .await
                .map_err(|e| Error::Fetch(format!("failed to read body of {}: {}", url, e)))?;
            Ok::<_, Error>(body.to_vec())
        };

        tokio::time::timeout(self.timeout, request)
            .await
            .map_err(|_| Error::Timeout {
                operation: "artifact fetch",
                after: self.timeout,
            })?
    }
}
