//! Batch submission routine
//!
//! The single submission path shared by the manual-submit endpoint, the
//! scheduled-trigger endpoint, and the `submit` CLI command. Each run takes
//! at most one batch of unsubmitted links, announces it to the indexing API,
//! and on success marks those links as submitted.

use serde::Serialize;
use std::collections::HashSet;

use crate::error::{StoreError, SubmitError};
use crate::indexer::IndexingApi;
use crate::models::LinkRecord;
use crate::store::LinkStore;

/// Result of one submission run
#[derive(Debug, Clone, Serialize)]
pub struct SubmitOutcome {
    /// Number of links submitted in this run
    pub submitted: usize,

    /// Human-readable summary
    pub message: String,
}

impl SubmitOutcome {
    fn nothing_pending() -> Self {
        Self {
            submitted: 0,
            message: String::from("no links pending submission"),
        }
    }
}

/// Run one submission cycle
///
/// Reads the unsubmitted links, submits the first `batch_size` of them in
/// stored order, and marks the batch as submitted on success. A failed
/// submission leaves the collection untouched so the batch is retried on the
/// next invocation; re-running after a drained store is a no-op success.
pub async fn run(
    store: &dyn LinkStore,
    indexer: &dyn IndexingApi,
    batch_size: usize,
) -> Result<SubmitOutcome, SubmitError> {
    let pending = unsubmitted(store).await;

    if pending.is_empty() {
        tracing::info!("No links pending submission");
        return Ok(SubmitOutcome::nothing_pending());
    }

    let urls: Vec<String> = pending
        .into_iter()
        .take(batch_size)
        .map(|link| link.url)
        .collect();

    tracing::info!(count = urls.len(), "Submitting link batch");

    let ack = indexer.submit(&urls).await?;
    tracing::debug!(response = %ack, "Indexing API acknowledged batch");

    mark_submitted(store, &urls).await?;

    Ok(SubmitOutcome {
        submitted: urls.len(),
        message: format!("submitted {} links", urls.len()),
    })
}

/// Fetch the unsubmitted links, treating an unreadable store as empty
pub async fn unsubmitted(store: &dyn LinkStore) -> Vec<LinkRecord> {
    match store.load_all().await {
        Ok(records) => records.into_iter().filter(|link| !link.submitted).collect(),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to load links, treating store as empty");
            Vec::new()
        }
    }
}

/// Mark every record whose URL is in the batch as submitted
///
/// Reloads the collection before mutating so links uploaded while the batch
/// was in flight are preserved.
async fn mark_submitted(store: &dyn LinkStore, urls: &[String]) -> Result<(), StoreError> {
    let batch: HashSet<&str> = urls.iter().map(String::as_str).collect();

    let mut records = store.load_all().await?;
    for record in records
        .iter_mut()
        .filter(|record| batch.contains(record.url.as_str()))
    {
        record.mark_submitted();
    }

    store.save_all(&records).await
}
