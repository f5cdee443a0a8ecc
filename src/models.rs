// Core data structures for the linkpush service

use chrono::Utc;
use serde::{Deserialize, Serialize};
use url::Url;

/// One tracked URL and its submission status
///
/// Serialized in camelCase to stay wire-compatible with collections written
/// by earlier deployments of the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkRecord {
    /// Absolute http(s) URL
    pub url: String,

    /// Whether the URL has been announced to the indexing API
    pub submitted: bool,

    /// RFC 3339 timestamp of when the URL was first observed
    pub added_at: String,

    /// RFC 3339 timestamp of the successful submission, absent until then
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submitted_at: Option<String>,
}

impl LinkRecord {
    /// Create a fresh, unsubmitted record with the current timestamp
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            submitted: false,
            added_at: Utc::now().to_rfc3339(),
            submitted_at: None,
        }
    }

    /// Mark the record as submitted now
    pub fn mark_submitted(&mut self) {
        self.submitted = true;
        self.submitted_at = Some(Utc::now().to_rfc3339());
    }
}

/// Counts derived from the link collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LinkStats {
    pub total: usize,
    pub submitted: usize,
    pub pending: usize,
}

impl LinkStats {
    /// Compute counts over a record slice
    pub fn from_records(records: &[LinkRecord]) -> Self {
        let submitted = records.iter().filter(|r| r.submitted).count();
        Self {
            total: records.len(),
            submitted,
            pending: records.len() - submitted,
        }
    }
}

/// Check whether a line is a well-formed absolute http(s) URL
///
/// Used as the upload filter: anything that does not parse, or uses another
/// scheme (ftp, mailto, ...), is dropped.
pub fn is_http_url(candidate: &str) -> bool {
    match Url::parse(candidate) {
        Ok(url) => matches!(url.scheme(), "http" | "https"),
        Err(_) => false,
    }
}
