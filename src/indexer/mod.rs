//! Client for the URL-indexing HTTP API
//!
//! One submission is one POST: the batch of URLs joined with newlines as a
//! plain-text body, with the site identifier and access token passed as query
//! parameters. There is no retry; a failed batch stays unsubmitted and is
//! picked up by the next run.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE, USER_AGENT};
use reqwest::Client;
use std::time::Duration;

use crate::config::IndexingConfig;
use crate::error::SubmitError;

/// Fixed identifying User-Agent expected by the Baidu submission endpoint
const SUBMIT_USER_AGENT: &str = "curl/7.12.1";

/// Seam for the indexing API so the orchestrator can be tested without a
/// network
#[async_trait]
pub trait IndexingApi: Send + Sync {
    /// Submit a batch of URLs, returning the raw response body on success
    async fn submit(&self, urls: &[String]) -> Result<String, SubmitError>;
}

/// HTTP client for the indexing API
pub struct IndexingClient {
    /// HTTP client with configured timeout
    client: Client,

    /// Submission endpoint URL
    endpoint: String,

    /// Site identifier (`site` query parameter)
    site: String,

    /// Access token (`token` query parameter)
    token: String,
}

impl IndexingClient {
    /// Create a client from configuration
    ///
    /// # Errors
    ///
    /// Returns `SubmitError::Http` if the HTTP client cannot be created
    pub fn new(config: &IndexingConfig) -> Result<Self, SubmitError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .gzip(true)
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            site: config.site.clone(),
            token: config.token.clone(),
        })
    }

    /// Create a client pointed at a custom endpoint, for tests with mock
    /// servers
    ///
    /// # Errors
    ///
    /// Returns `SubmitError::Http` if the HTTP client cannot be created
    pub fn with_endpoint(endpoint: &str, site: &str, token: &str) -> Result<Self, SubmitError> {
        let config = IndexingConfig {
            endpoint: endpoint.to_string(),
            site: site.to_string(),
            token: token.to_string(),
            batch_size: 20,
            timeout_secs: 10,
        };
        Self::new(&config)
    }

    fn build_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("text/plain"));
        headers.insert(USER_AGENT, HeaderValue::from_static(SUBMIT_USER_AGENT));
        headers
    }
}

#[async_trait]
impl IndexingApi for IndexingClient {
    async fn submit(&self, urls: &[String]) -> Result<String, SubmitError> {
        let body = urls.join("\n");

        let response = self
            .client
            .post(&self.endpoint)
            .query(&[("site", self.site.as_str()), ("token", self.token.as_str())])
            .headers(Self::build_headers())
            .body(body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if status.is_success() {
            tracing::info!(count = urls.len(), response = %text, "Indexing API accepted batch");
            Ok(text)
        } else {
            tracing::warn!(status = %status, response = %text, "Indexing API rejected batch");
            Err(SubmitError::Api(text))
        }
    }
}
