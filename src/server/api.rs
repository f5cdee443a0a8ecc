//! API routes and handlers
//!
//! Four JSON endpoints share the router: manual submit, status, upload, and
//! the scheduled trigger. Everything else falls through to the static file
//! service configured on the server.

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{any, get, post},
    Json, Router,
};
use chrono::Utc;
use serde::Serialize;
use std::collections::HashSet;

use crate::models::{is_http_url, LinkRecord, LinkStats};
use crate::orchestrator;

use super::AppState;

// ============================================================================
// API Response Types
// ============================================================================

/// Response for the submit and scheduled-trigger endpoints
#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SubmitResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: None,
            error: Some(message.into()),
        }
    }
}

/// Response for the status endpoint
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub total: usize,
    pub submitted: usize,
    pub pending: usize,
    #[serde(rename = "lastUpdate")]
    pub last_update: String,
}

/// Response for a successful upload
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub success: bool,
    pub message: String,
    pub total: usize,
}

/// Simple error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: message.into(),
        }
    }
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
}

// ============================================================================
// API Routes
// ============================================================================

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health_check))
        // The original surface accepted any method on submit and status
        .route("/api/submit", any(manual_submit))
        .route("/api/status", any(link_status))
        .route("/api/upload", post(upload_links))
        // Invoked by an external scheduler; the hosting platform has no cron
        .route("/scheduled", post(scheduled_submit))
        .with_state(state)
}

// ============================================================================
// Handlers
// ============================================================================

/// Health check endpoint
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
    })
}

/// Manually trigger one submission cycle
async fn manual_submit(State(state): State<AppState>) -> Response {
    tracing::info!("Manual submission triggered");
    run_submission(&state).await
}

/// Scheduled-trigger entry point, driven by an external cron caller
async fn scheduled_submit(State(state): State<AppState>) -> Response {
    tracing::info!("Scheduled submission triggered");
    run_submission(&state).await
}

/// Shared adapter from the orchestrator result to an HTTP response
async fn run_submission(state: &AppState) -> Response {
    match orchestrator::run(state.store.as_ref(), state.indexer.as_ref(), state.batch_size).await {
        Ok(outcome) => (StatusCode::OK, Json(SubmitResponse::ok(outcome.message))).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Submission run failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(SubmitResponse::error(e.to_string())),
            )
                .into_response()
        }
    }
}

/// Report collection counts
async fn link_status(State(state): State<AppState>) -> Response {
    match state.store.load_all().await {
        Ok(records) => {
            let stats = LinkStats::from_records(&records);
            (
                StatusCode::OK,
                Json(StatusResponse {
                    total: stats.total,
                    submitted: stats.submitted,
                    pending: stats.pending,
                    last_update: Utc::now().to_rfc3339(),
                }),
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to load links for status");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new(e.to_string())),
            )
                .into_response()
        }
    }
}

/// Accept a newline-delimited URL file and append the genuinely new links
async fn upload_links(State(state): State<AppState>, mut multipart: Multipart) -> Response {
    let mut content: Option<String> = None;

    loop {
        match multipart.next_field().await {
            Ok(Some(field)) => {
                if field.name() == Some("file") {
                    match field.text().await {
                        Ok(text) => {
                            content = Some(text);
                            break;
                        }
                        Err(e) => {
                            return (
                                StatusCode::BAD_REQUEST,
                                Json(ErrorResponse::new(format!("failed to read upload: {e}"))),
                            )
                                .into_response();
                        }
                    }
                }
            }
            Ok(None) => break,
            Err(e) => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ErrorResponse::new(format!("malformed upload: {e}"))),
                )
                    .into_response();
            }
        }
    }

    let Some(content) = content else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new("missing file field")),
        )
            .into_response();
    };

    let urls: Vec<&str> = content
        .lines()
        .map(str::trim)
        .filter(|line| is_http_url(line))
        .collect();

    let mut records = match state.store.load_all().await {
        Ok(records) => records,
        Err(e) => {
            tracing::error!(error = %e, "Failed to load links for upload");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new(e.to_string())),
            )
                .into_response();
        }
    };

    // Suppress duplicates against the stored set and within the upload itself
    let mut seen: HashSet<String> = records.iter().map(|r| r.url.clone()).collect();
    let mut added = 0;
    for url in urls {
        if seen.insert(url.to_string()) {
            records.push(LinkRecord::new(url));
            added += 1;
        }
    }

    if let Err(e) = state.store.save_all(&records).await {
        tracing::error!(error = %e, "Failed to save uploaded links");
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::new(e.to_string())),
        )
            .into_response();
    }

    tracing::info!(added, total = records.len(), "Upload processed");

    (
        StatusCode::OK,
        Json(UploadResponse {
            success: true,
            message: format!("added {added} new links"),
            total: records.len(),
        }),
    )
        .into_response()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submit_response_ok_shape() {
        let response = SubmitResponse::ok("submitted 5 links");
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["message"], "submitted 5 links");
        assert!(json.get("error").is_none());
    }

    #[test]
    fn test_submit_response_error_shape() {
        let response = SubmitResponse::error("token is not valid");
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "token is not valid");
        assert!(json.get("message").is_none());
    }

    #[test]
    fn test_status_response_uses_last_update_key() {
        let response = StatusResponse {
            total: 7,
            submitted: 3,
            pending: 4,
            last_update: "2024-01-01T00:00:00Z".to_string(),
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["total"], 7);
        assert_eq!(json["lastUpdate"], "2024-01-01T00:00:00Z");
    }

    #[test]
    fn test_error_response() {
        let response = ErrorResponse::new("missing file field");
        assert!(!response.success);
        assert_eq!(response.error, "missing file field");
    }
}
