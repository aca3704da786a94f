//! Rekor client for submitting log entries

use crate::entry::{LogEntry, SubmissionResult};
use crate::error::{Error, Result};
use reqwest::header::CONTENT_TYPE;
use std::time::Duration;

/// Path of the add endpoint, relative to the server URL
pub const ADD_ENTRY_PATH: &str = "/api/v1/add";

/// Time budget for a submission when none is configured
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(180);

/// A client for interacting with Rekor
pub struct RekorClient {
    /// Base URL of the Rekor instance
    url: String,
    /// HTTP client
    client: reqwest::Client,
    /// Upper bound on a whole request, response body included
    timeout: Duration,
}

impl RekorClient {
    /// Create a new Rekor client
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            client: reqwest::Client::new(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Set the time budget for each request
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Full URL of the add endpoint
    pub fn add_url(&self) -> String {
        format!("{}{}", self.url.trim_end_matches('/'), ADD_ENTRY_PATH)
    }

    /// Serialize and submit an entry
    pub async fn submit(&self, entry: &LogEntry) -> Result<SubmissionResult> {
        let body = entry.to_json()?;
        self.submit_json(body).await
    }

    /// Submit an already serialized entry
    ///
    /// The request is cancelled once the time budget runs out; no retry is
    /// attempted on any failure.
    pub async fn submit_json(&self, body: Vec<u8>) -> Result<SubmissionResult> {
        let url = self.add_url();
        tracing::debug!(%url, bytes = body.len(), "posting entry");

        let request = async {
            let response = self
                .client
                .post(&url)
                .header(CONTENT_TYPE, "application/json")
                .body(body)
                .send()
                .await
                .map_err(|e| Error::Http(e.to_string()))?;

            if !response.status().is_success() {
                let status = response.status();
                let body = response
                    .text()
                    .await
                    .unwrap_or_else(|e| format!("(body unreadable: {})", e));
                return Err(Error::Api(format!(
                    "failed to add entry: {} - {}",
                    status, body
                )));
            }

            let content = response
                .bytes()
                .await
                .map_err(|e| Error::Http(format!("failed to read response: {}", e)))?;
            Ok::<_, Error>(content)
        };

        let content = tokio::time::timeout(self.timeout, request)
            .await
            .map_err(|_| Error::Timeout(self.timeout))??;

        Ok(serde_json::from_slice(&content)?)
    }
}
