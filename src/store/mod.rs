//! Link collection persistence
//!
//! The whole collection is stored as one serialized JSON blob under a single
//! key; every mutation is a read-modify-write of the full collection. There is
//! no cross-caller serialization, so concurrent writers race last-writer-wins.
//!
//! [`RedisStore`] is the production backend; [`MemoryStore`] backs tests and
//! local development without a Redis instance.

mod redis;

pub use self::redis::RedisStore;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::StoreError;
use crate::models::LinkRecord;

/// Storage seam for the link collection
#[async_trait]
pub trait LinkStore: Send + Sync {
    /// Fetch and deserialize the full collection
    ///
    /// An absent key yields an empty collection; a collection that cannot be
    /// decoded yields [`StoreError::Decode`].
    async fn load_all(&self) -> Result<Vec<LinkRecord>, StoreError>;

    /// Serialize and write the full collection, overwriting the prior value
    async fn save_all(&self, records: &[LinkRecord]) -> Result<(), StoreError>;
}

/// In-process link store
///
/// Keeps the collection in a `RwLock`-guarded vector. Useful for tests and
/// for running the service without an external Redis.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<Vec<LinkRecord>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded with records
    pub fn with_records(records: Vec<LinkRecord>) -> Self {
        Self {
            records: RwLock::new(records),
        }
    }
}

#[async_trait]
impl LinkStore for MemoryStore {
    async fn load_all(&self) -> Result<Vec<LinkRecord>, StoreError> {
        Ok(self.records.read().await.clone())
    }

    async fn save_all(&self, records: &[LinkRecord]) -> Result<(), StoreError> {
        *self.records.write().await = records.to_vec();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_store_starts_empty() {
        let store = MemoryStore::new();
        let records = store.load_all().await.unwrap();
        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn test_memory_store_roundtrip() {
        let store = MemoryStore::new();
        let records = vec![
            LinkRecord::new("http://a.com"),
            LinkRecord::new("http://b.com"),
        ];

        store.save_all(&records).await.unwrap();
        let loaded = store.load_all().await.unwrap();

        assert_eq!(loaded, records);
    }

    #[tokio::test]
    async fn test_memory_store_save_overwrites() {
        let store = MemoryStore::with_records(vec![LinkRecord::new("http://old.com")]);

        store
            .save_all(&[LinkRecord::new("http://new.com")])
            .await
            .unwrap();

        let loaded = store.load_all().await.unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].url, "http://new.com");
    }
}
