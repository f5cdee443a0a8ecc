//! Common test utilities

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use std::time::Instant;

use linkpush::error::{StoreError, SubmitError};
use linkpush::indexer::IndexingApi;
use linkpush::models::LinkRecord;
use linkpush::server::api::create_router;
use linkpush::server::AppState;
use linkpush::store::LinkStore;

/// Recording indexing client with a canned answer
pub struct MockIndexer {
    calls: Mutex<Vec<Vec<String>>>,
    fail_with: Option<String>,
}

#[allow(dead_code)]
impl MockIndexer {
    /// Client that accepts every batch
    pub fn succeeding() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            fail_with: None,
        }
    }

    /// Client that rejects every batch with the given error detail
    pub fn failing(detail: &str) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            fail_with: Some(detail.to_string()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl IndexingApi for MockIndexer {
    async fn submit(&self, urls: &[String]) -> Result<String, SubmitError> {
        self.calls.lock().unwrap().push(urls.to_vec());
        match &self.fail_with {
            Some(detail) => Err(SubmitError::Api(detail.clone())),
            None => Ok(format!("{{\"success\":{}}}", urls.len())),
        }
    }
}

/// Store whose every operation fails, for error-path tests
#[allow(dead_code)]
pub struct FailingStore;

#[async_trait]
impl LinkStore for FailingStore {
    async fn load_all(&self) -> Result<Vec<LinkRecord>, StoreError> {
        Err(StoreError::Read("connection refused".to_string()))
    }

    async fn save_all(&self, _records: &[LinkRecord]) -> Result<(), StoreError> {
        Err(StoreError::Write("connection refused".to_string()))
    }
}

/// Create `count` unsubmitted records with distinct URLs
#[allow(dead_code)]
pub fn seed_links(count: usize) -> Vec<LinkRecord> {
    (0..count)
        .map(|i| LinkRecord::new(format!("http://example.com/post/{i}")))
        .collect()
}

/// Build application state around the given store and indexer
#[allow(dead_code)]
pub fn test_state(store: Arc<dyn LinkStore>, indexer: Arc<dyn IndexingApi>) -> AppState {
    AppState {
        store,
        indexer,
        batch_size: 20,
        start_time: Instant::now(),
    }
}

/// Serve the API router on an ephemeral port, returning its base URL
#[allow(dead_code)]
pub async fn spawn_server(state: AppState) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test listener");
    let addr = listener.local_addr().expect("listener address");

    let router = create_router(state);
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("serve test app");
    });

    format!("http://{addr}")
}
