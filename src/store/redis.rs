//! Redis-backed link store
//!
//! The collection lives as a single JSON string under one key, matching the
//! layout written by earlier deployments of the service.

use async_trait::async_trait;
use deadpool_redis::{Config as PoolConfig, Pool, Runtime};
use redis::AsyncCommands;

use crate::config::StoreConfig;
use crate::error::StoreError;
use crate::models::LinkRecord;
use crate::store::LinkStore;

/// Link store over a Redis connection pool
pub struct RedisStore {
    /// Connection pool
    pool: Pool,

    /// Key holding the serialized collection
    key: String,
}

impl RedisStore {
    /// Connect to Redis and verify the connection with a PING
    pub async fn connect(config: &StoreConfig) -> Result<Self, StoreError> {
        let pool_config = PoolConfig::from_url(&config.redis_url);
        let pool = pool_config
            .builder()
            .map_err(|e| StoreError::Connection(format!("failed to create pool builder: {e}")))?
            .max_size(config.pool_size)
            .runtime(Runtime::Tokio1)
            .build()
            .map_err(|e| StoreError::Connection(format!("failed to create connection pool: {e}")))?;

        let mut conn = pool
            .get()
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        let _: String = redis::cmd("PING")
            .query_async(&mut *conn)
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        tracing::info!(url = %config.redis_url, key = %config.key, "Connected to Redis link store");

        Ok(Self {
            pool,
            key: config.key.clone(),
        })
    }
}

#[async_trait]
impl LinkStore for RedisStore {
    async fn load_all(&self) -> Result<Vec<LinkRecord>, StoreError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        let raw: Option<String> = conn
            .get(&self.key)
            .await
            .map_err(|e| StoreError::Read(e.to_string()))?;

        match raw {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(Vec::new()),
        }
    }

    async fn save_all(&self, records: &[LinkRecord]) -> Result<(), StoreError> {
        let raw = serde_json::to_string(records).map_err(|e| StoreError::Write(e.to_string()))?;

        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        conn.set::<_, _, ()>(&self.key, raw)
            .await
            .map_err(|e| StoreError::Write(e.to_string()))?;

        tracing::debug!(key = %self.key, count = records.len(), "Saved link collection");

        Ok(())
    }
}
