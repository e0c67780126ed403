//! Error types for the climate API.
//!
//! A single error enum covers every failure the server can hit, from
//! configuration and startup through to per-request query failures.

use axum::http::StatusCode;
use thiserror::Error;

/// The main error type for climate API operations.
#[derive(Error, Debug)]
pub enum ClimateError {
    /// Database driver errors
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// The store does not match the compiled schema
    #[error("Schema mismatch: {message}")]
    Schema { message: String },

    /// A date supplied by the client could not be parsed
    #[error("Invalid date for '{param}': '{value}' (expected YYYY-MM-DD)")]
    InvalidDate { param: String, value: String },

    /// Invalid parameter errors
    #[error("Invalid parameter: {param} - {message}")]
    InvalidParameter { param: String, message: String },

    /// A query did not finish within the configured timeout
    #[error("Query '{operation}' timed out after {timeout_ms} ms")]
    QueryTimeout { operation: String, timeout_ms: u64 },

    /// Stored data that cannot be interpreted
    #[error("Corrupt stored data: {message}")]
    CorruptData { message: String },

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Server errors
    #[error("Server error: {message}")]
    Server { message: String },
}

impl ClimateError {
    /// HTTP status code used when this error ends a request
    pub fn status_code(&self) -> StatusCode {
        match self {
            ClimateError::InvalidDate { .. } | ClimateError::InvalidParameter { .. } => {
                StatusCode::BAD_REQUEST
            }
            ClimateError::QueryTimeout { .. } | ClimateError::Database(sqlx::Error::PoolTimedOut) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Whether the client caused this error
    pub fn is_client_error(&self) -> bool {
        self.status_code().is_client_error()
    }
}

/// Convenience type alias for Results with ClimateError
pub type Result<T> = std::result::Result<T, ClimateError>;
