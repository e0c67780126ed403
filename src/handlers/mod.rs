//! HTTP request handlers for the climate API.
//!
//! This module contains all the endpoint handlers for the web server and
//! the router that wires them to their paths.

pub mod heartbeat;
pub mod index;
pub mod precipitation;
pub mod stations;
pub mod summary;
pub mod tobs;

use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::error::ClimateError;
use crate::logging::{create_http_trace_layer, log_request_error};
use crate::state::AppState;

pub use heartbeat::heartbeat_handler;
pub use index::index_handler;
pub use precipitation::precipitation_handler;
pub use stations::{station_details_handler, stations_handler};
pub use summary::{range_summary_handler, start_summary_handler};
pub use tobs::tobs_handler;

/// Prefix shared by every data endpoint
pub const API_PREFIX: &str = "/api/v1.0";

/// Build the application router with all routes and middleware
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/heartbeat", get(heartbeat_handler))
        .route("/api/v1.0/precipitation", get(precipitation_handler))
        .route("/api/v1.0/stations", get(stations_handler))
        .route("/api/v1.0/stations/details", get(station_details_handler))
        .route("/api/v1.0/tobs", get(tobs_handler))
        .route("/api/v1.0/:start", get(start_summary_handler))
        .route("/api/v1.0/:start/:end", get(range_summary_handler))
        .layer(CorsLayer::permissive())
        .layer(create_http_trace_layer())
        .with_state(state)
}

/// Log a failed request and turn the error into a JSON error response
pub(crate) fn error_response(
    error: ClimateError,
    endpoint: &str,
    request_id: &str,
    params: Option<&str>,
) -> Response {
    log_request_error(&error, endpoint, request_id, params);

    (
        error.status_code(),
        Json(serde_json::json!({
            "error": error.to_string(),
            "request_id": request_id
        })),
    )
        .into_response()
}
