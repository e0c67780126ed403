//! Temperature observation endpoint handler.
//!
//! Returns the trailing year of temperature observations for whichever
//! station reported most often in that year.

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

use super::error_response;
use crate::logging::{generate_request_id, log_request_success};
use crate::state::AppState;

const ENDPOINT: &str = "/api/v1.0/tobs";

/// Handle GET /api/v1.0/tobs requests
pub async fn tobs_handler(State(state): State<Arc<AppState>>) -> Response {
    let request_id = generate_request_id();
    let start_time = Instant::now();

    debug!(endpoint = ENDPOINT, request_id = %request_id, "Processing tobs request");

    match state.store.temperature_observations().await {
        Ok(observations) => {
            log_request_success(ENDPOINT, &request_id, start_time, observations.len());
            Json(observations).into_response()
        }
        Err(error) => error_response(error, ENDPOINT, &request_id, None),
    }
}
