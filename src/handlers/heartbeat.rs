//! Heartbeat endpoint handler.
//!
//! Returns server status information, including uptime and what the store
//! currently holds. Answers 503 when the store cannot be queried.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use std::sync::Arc;

use crate::logging::log_error;
use crate::schema::SCHEMA_VERSION;
use crate::state::AppState;
use crate::store::StoreSummary;

/// Heartbeat response structure
#[derive(Debug, Serialize)]
pub struct HeartbeatResponse {
    /// Server ID (unique per instance)
    pub server_id: String,
    /// Current timestamp (ISO 8601 format)
    pub timestamp: String,
    /// Server uptime in seconds
    pub uptime_seconds: u64,
    /// "healthy" or "unavailable"
    pub status: String,
    pub store: StoreInfo,
}

/// Store information structure
#[derive(Debug, Serialize)]
pub struct StoreInfo {
    pub path: Option<String>,
    pub schema_version: u32,
    pub query_timeout_ms: u64,
    /// Absent when the store could not be queried
    #[serde(flatten)]
    pub summary: Option<StoreSummary>,
}

/// Handle GET /heartbeat requests
pub async fn heartbeat_handler(State(state): State<Arc<AppState>>) -> Response {
    let timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);

    let summary = match state.store.summary().await {
        Ok(summary) => Some(summary),
        Err(error) => {
            log_error(&error, "heartbeat store check");
            None
        }
    };

    let (status_code, status) = if summary.is_some() {
        (StatusCode::OK, "healthy")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "unavailable")
    };

    let response = HeartbeatResponse {
        server_id: state.server_id.clone(),
        timestamp,
        uptime_seconds: state.started_at.elapsed().as_secs(),
        status: status.to_string(),
        store: StoreInfo {
            path: state
                .config
                .store
                .path
                .as_ref()
                .map(|p| p.display().to_string()),
            schema_version: SCHEMA_VERSION,
            query_timeout_ms: state.store.query_timeout().as_millis() as u64,
            summary,
        },
    };

    (status_code, Json(response)).into_response()
}
