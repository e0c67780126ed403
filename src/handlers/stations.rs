//! Station endpoint handlers.
//!
//! `/stations` lists the ids of stations that reported in the trailing year,
//! busiest first. `/stations/details` returns the station reference rows.

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

use super::error_response;
use crate::logging::{generate_request_id, log_request_success};
use crate::state::AppState;

/// Handle GET /api/v1.0/stations requests
pub async fn stations_handler(State(state): State<Arc<AppState>>) -> Response {
    const ENDPOINT: &str = "/api/v1.0/stations";
    let request_id = generate_request_id();
    let start_time = Instant::now();

    debug!(endpoint = ENDPOINT, request_id = %request_id, "Processing stations request");

    match state.store.active_stations().await {
        Ok(stations) => {
            log_request_success(ENDPOINT, &request_id, start_time, stations.len());
            Json(stations).into_response()
        }
        Err(error) => error_response(error, ENDPOINT, &request_id, None),
    }
}

/// Handle GET /api/v1.0/stations/details requests
pub async fn station_details_handler(State(state): State<Arc<AppState>>) -> Response {
    const ENDPOINT: &str = "/api/v1.0/stations/details";
    let request_id = generate_request_id();
    let start_time = Instant::now();

    debug!(endpoint = ENDPOINT, request_id = %request_id, "Processing station details request");

    match state.store.station_details().await {
        Ok(stations) => {
            log_request_success(ENDPOINT, &request_id, start_time, stations.len());
            Json(stations).into_response()
        }
        Err(error) => error_response(error, ENDPOINT, &request_id, None),
    }
}
