//! Error types for the linkpush service
//!
//! This module defines custom error types used throughout the application.

use thiserror::Error;

/// Errors that can occur while reading or writing the link collection
#[derive(Error, Debug)]
pub enum StoreError {
    /// Could not reach the key-value backend
    #[error("store connection failed: {0}")]
    Connection(String),

    /// Read from the key-value backend failed
    #[error("store read failed: {0}")]
    Read(String),

    /// Write to the key-value backend failed
    #[error("store write failed: {0}")]
    Write(String),

    /// Stored collection could not be decoded
    #[error("failed to decode stored links: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Errors that can occur during a submission run
#[derive(Error, Debug)]
pub enum SubmitError {
    /// HTTP request error
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The indexing API answered with a non-success status;
    /// carries the response body as the error detail
    #[error("indexing API rejected submission: {0}")]
    Api(String),

    /// Store error while marking the batch as submitted
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}
