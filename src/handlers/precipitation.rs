//! Precipitation endpoint handler.
//!
//! Returns every (date, prcp) pair recorded in the trailing year, across all
//! stations.

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

use super::error_response;
use crate::logging::{generate_request_id, log_request_success};
use crate::state::AppState;

const ENDPOINT: &str = "/api/v1.0/precipitation";

/// Handle GET /api/v1.0/precipitation requests
pub async fn precipitation_handler(State(state): State<Arc<AppState>>) -> Response {
    let request_id = generate_request_id();
    let start_time = Instant::now();

    debug!(endpoint = ENDPOINT, request_id = %request_id, "Processing precipitation request");

    match state.store.recent_precipitation().await {
        Ok(readings) => {
            log_request_success(ENDPOINT, &request_id, start_time, readings.len());
            Json(readings).into_response()
        }
        Err(error) => error_response(error, ENDPOINT, &request_id, None),
    }
}
