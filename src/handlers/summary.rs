//! Temperature summary endpoint handlers.
//!
//! `/api/v1.0/{start}` and `/api/v1.0/{start}/{end}` return `[min, avg, max]`
//! of the observed temperature over an inclusive date range. A range with no
//! measurements answers `[null, null, null]`.

use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

use super::error_response;
use crate::error::{ClimateError, Result};
use crate::logging::{generate_request_id, log_request_success};
use crate::query::{parse_date, TemperatureSummary};
use crate::state::AppState;

/// Handle GET /api/v1.0/{start} requests
pub async fn start_summary_handler(
    State(state): State<Arc<AppState>>,
    path: std::result::Result<Path<String>, PathRejection>,
) -> Response {
    let dates = path
        .map(|Path(start)| (start, None))
        .map_err(|rejection| path_error("start", rejection));
    summarize(&state, "/api/v1.0/:start", dates).await
}

/// Handle GET /api/v1.0/{start}/{end} requests
pub async fn range_summary_handler(
    State(state): State<Arc<AppState>>,
    path: std::result::Result<Path<(String, String)>, PathRejection>,
) -> Response {
    let dates = path
        .map(|Path((start, end))| (start, Some(end)))
        .map_err(|rejection| path_error("start/end", rejection));
    summarize(&state, "/api/v1.0/:start/:end", dates).await
}

/// Segments that do not decode (e.g. invalid UTF-8) never reach date parsing
fn path_error(param: &str, rejection: PathRejection) -> ClimateError {
    ClimateError::InvalidParameter {
        param: param.to_string(),
        message: rejection.body_text(),
    }
}

async fn summarize(
    state: &AppState,
    endpoint: &str,
    dates: Result<(String, Option<String>)>,
) -> Response {
    let request_id = generate_request_id();
    let start_time = Instant::now();

    let (start, end) = match dates {
        Ok(dates) => dates,
        Err(error) => return error_response(error, endpoint, &request_id, None),
    };

    debug!(
        endpoint = endpoint,
        request_id = %request_id,
        start = %start,
        end = ?end,
        "Processing temperature summary request"
    );

    match run_summary(state, &start, end.as_deref()).await {
        Ok(summary) => {
            let rows = usize::from(!summary.is_empty());
            log_request_success(endpoint, &request_id, start_time, rows);
            Json(summary).into_response()
        }
        Err(error) => {
            let params = format!("start={}, end={}", start, end.as_deref().unwrap_or("none"));
            error_response(error, endpoint, &request_id, Some(&params))
        }
    }
}

async fn run_summary(state: &AppState, start: &str, end: Option<&str>) -> Result<TemperatureSummary> {
    let start = parse_date("start", start)?;
    let end = end.map(|end| parse_date("end", end)).transpose()?;
    state.store.temperature_summary(start, end).await
}
