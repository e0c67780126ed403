//! Logging utilities for the climate API server.
//!
//! Structured logging helpers so request logs carry the same fields
//! (endpoint, request id, duration) everywhere.

use std::time::Instant;
use tracing::{debug, error, info, warn, Level};

use tower_http::trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tower_http::LatencyUnit;
use uuid::Uuid;

use crate::error::ClimateError;
use crate::store::StoreSummary;

/// Creates the tracing layer for HTTP request/response logging
pub fn create_http_trace_layer() -> TraceLayer<
    tower_http::classify::SharedClassifier<tower_http::classify::ServerErrorsAsFailures>,
    DefaultMakeSpan,
    DefaultOnRequest,
    DefaultOnResponse,
> {
    let response_formatter = DefaultOnResponse::new()
        .level(Level::DEBUG)
        .latency_unit(LatencyUnit::Micros);

    TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_request(DefaultOnRequest::new().level(Level::DEBUG))
        .on_response(response_formatter)
}

/// Initialize the tracing subscriber with the given log level.
///
/// `RUST_LOG` wins over the configured level when it is set.
pub fn init_tracing(log_level: &str) {
    let filter = match std::env::var("RUST_LOG") {
        Ok(val) => val,
        Err(_) => log_level.to_string(),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .init();
}

/// Log the outcome of a request that completed
pub fn log_request_success(endpoint: &str, request_id: &str, start_time: Instant, rows: usize) {
    info!(
        endpoint = endpoint,
        request_id = request_id,
        duration_us = start_time.elapsed().as_micros() as u64,
        rows = rows,
        "Request successful"
    );
}

/// Log a summary of what the store holds
pub fn log_store_stats(path: &str, summary: &StoreSummary) {
    if summary.measurement_count == 0 {
        warn!(
            operation = "store_open",
            path = path,
            "Store holds no measurements; windowed endpoints will return empty results"
        );
    }

    info!(
        operation = "store_open",
        path = path,
        measurements = summary.measurement_count,
        stations = summary.station_count,
        earliest = ?summary.earliest_date,
        latest = ?summary.latest_date,
        "Store loaded successfully"
    );
}

/// Log an error with context
pub fn log_error(error: &ClimateError, context: &str) {
    error!(error = %error, context = context, "Error occurred");
}

/// Log an error that occurred during request processing.
///
/// Client mistakes are logged at debug level, store failures as errors.
pub fn log_request_error(
    error: &ClimateError,
    endpoint: &str,
    request_id: &str,
    params: Option<&str>,
) {
    if error.is_client_error() {
        debug!(
            error = %error,
            endpoint = endpoint,
            request_id = request_id,
            params = params.unwrap_or("none"),
            "Rejected request"
        );
    } else {
        error!(
            error = %error,
            endpoint = endpoint,
            request_id = request_id,
            params = params.unwrap_or("none"),
            status = error.status_code().as_u16(),
            "Request processing error"
        );
    }
}

/// Generate a unique request ID
pub fn generate_request_id() -> String {
    Uuid::new_v4().to_string()
}
