//! linkpush - Batch URL submission service
//!
//! A small web service that collects URLs, tracks which of them have been
//! announced to a search-engine indexing API, and submits unsubmitted URLs
//! in bounded batches, either on demand or driven by an external scheduler.
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - [`config`] - Configuration management and settings
//! - [`models`] - Link records and derived statistics
//! - [`store`] - Link collection persistence (Redis, in-memory)
//! - [`indexer`] - Client for the URL-indexing HTTP API
//! - [`orchestrator`] - Batch submission routine shared by all triggers
//! - [`server`] - HTTP surface (manual submit, status, upload, scheduled)
//!
//! # Example
//!
//! ```no_run
//! use linkpush::config::Config;
//! use linkpush::server::LinkServer;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let server = LinkServer::new(config).await?;
//!     server.start().await?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod indexer;
pub mod models;
pub mod orchestrator;
pub mod server;
pub mod store;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::Config;
    pub use crate::error::{StoreError, SubmitError};
    pub use crate::indexer::{IndexingApi, IndexingClient};
    pub use crate::models::{LinkRecord, LinkStats};
    pub use crate::orchestrator::SubmitOutcome;
    pub use crate::store::{LinkStore, MemoryStore, RedisStore};
}

// Direct re-exports for convenience
pub use models::{LinkRecord, LinkStats};
