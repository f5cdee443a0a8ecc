//! Configuration management for the linkpush service
//!
//! This module handles loading and validating configuration from environment
//! variables and TOML files.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Indexing API configuration
    pub indexing: IndexingConfig,

    /// Link store configuration
    pub store: StoreConfig,

    /// HTTP server configuration
    pub server: ServerConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Indexing API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexingConfig {
    /// Submission endpoint URL
    pub endpoint: String,

    /// Site identifier passed as the `site` query parameter
    pub site: String,

    /// Access token passed as the `token` query parameter
    pub token: String,

    /// Maximum number of URLs submitted per run
    pub batch_size: usize,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

/// Link store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Redis URL (e.g., redis://localhost:6379)
    pub redis_url: String,

    /// Key holding the serialized link collection
    pub key: String,

    /// Connection pool size
    pub pool_size: usize,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address to bind the server to
    pub bind_address: SocketAddr,

    /// Directory served for non-API paths
    pub static_dir: PathBuf,

    /// Enable permissive CORS on responses
    pub enable_cors: bool,

    /// Enable per-request tracing
    pub enable_request_logging: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (text, json)
    pub format: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let endpoint = std::env::var("BAIDU_ENDPOINT")
            .unwrap_or_else(|_| String::from("http://data.zz.baidu.com/urls"));

        let site = std::env::var("BAIDU_SITE").unwrap_or_default();

        let token = std::env::var("BAIDU_TOKEN").unwrap_or_default();

        let batch_size = std::env::var("LINKPUSH_BATCH_SIZE")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(20);

        let timeout_secs = std::env::var("LINKPUSH_TIMEOUT")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(30);

        let redis_url =
            std::env::var("REDIS_URL").unwrap_or_else(|_| String::from("redis://localhost:6379"));

        let key = std::env::var("LINKPUSH_STORE_KEY").unwrap_or_else(|_| String::from("all_links"));

        let pool_size = std::env::var("REDIS_POOL_SIZE")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(10);

        let bind_address = std::env::var("LINKPUSH_BIND")
            .ok()
            .and_then(|v| v.parse::<SocketAddr>().ok())
            .unwrap_or_else(|| "0.0.0.0:8080".parse().expect("valid default bind address"));

        let static_dir = std::env::var("LINKPUSH_STATIC_DIR")
            .unwrap_or_else(|_| String::from("static"))
            .into();

        let level = std::env::var("LINKPUSH_LOG_LEVEL").unwrap_or_else(|_| String::from("info"));

        let format = std::env::var("LINKPUSH_LOG_FORMAT").unwrap_or_else(|_| String::from("text"));

        Ok(Self {
            indexing: IndexingConfig {
                endpoint,
                site,
                token,
                batch_size,
                timeout_secs,
            },
            store: StoreConfig {
                redis_url,
                key,
                pool_size,
            },
            server: ServerConfig {
                bind_address,
                static_dir,
                enable_cors: true,
                enable_request_logging: true,
            },
            logging: LoggingConfig { level, format },
        })
    }

    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse TOML config file: {}", path.display()))?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.indexing.site.is_empty() {
            anyhow::bail!("indexing site identifier must not be empty");
        }

        if self.indexing.token.is_empty() {
            anyhow::bail!("indexing access token must not be empty");
        }

        if self.indexing.batch_size == 0 {
            anyhow::bail!("batch_size must be greater than 0");
        }

        if url::Url::parse(&self.indexing.endpoint).is_err() {
            anyhow::bail!("indexing endpoint is not a valid URL: {}", self.indexing.endpoint);
        }

        if self.store.pool_size == 0 {
            anyhow::bail!("pool_size must be greater than 0");
        }

        Ok(())
    }

    /// Get request timeout as Duration
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.indexing.timeout_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            indexing: IndexingConfig {
                endpoint: String::from("http://data.zz.baidu.com/urls"),
                site: String::new(),
                token: String::new(),
                batch_size: 20,
                timeout_secs: 30,
            },
            store: StoreConfig {
                redis_url: String::from("redis://localhost:6379"),
                key: String::from("all_links"),
                pool_size: 10,
            },
            server: ServerConfig {
                bind_address: "0.0.0.0:8080".parse().expect("valid default bind address"),
                static_dir: PathBuf::from("static"),
                enable_cors: true,
                enable_request_logging: true,
            },
            logging: LoggingConfig {
                level: String::from("info"),
                format: String::from("text"),
            },
        }
    }
}
