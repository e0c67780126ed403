//! # climate-api
//!
//! A small read-only HTTP API over a station/measurement climate database.
//!
//! The server opens an SQLite file holding daily `measurement` rows and
//! `station` reference rows, and answers a fixed set of queries about it as
//! JSON: the last year of precipitation, the stations active in that year,
//! temperature observations of the busiest station, and min/avg/max
//! temperature over any date range.
//!
//! ## Architecture
//!
//! - **Store Layer**: a pool of read-only connections with per-query timeouts
//! - **Query Layer**: the window derivation, filtering and aggregation queries
//! - **API Layer**: axum handlers exposing the queries under `/api/v1.0`

pub mod config;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod query;
pub mod schema;
pub mod state;
pub mod store;
#[cfg(test)]
pub(crate) mod test_utils;

pub use config::Config;
pub use error::{ClimateError, Result};
pub use handlers::router;
pub use logging::{create_http_trace_layer, generate_request_id, init_tracing, log_error, log_store_stats};
pub use query::{DateWindow, PrecipitationReading, StationActivity, TemperatureSummary};
pub use schema::{Measurement, Station};
pub use state::AppState;
pub use store::{ClimateStore, StoreSummary};
