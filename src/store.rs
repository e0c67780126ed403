//! Access to the read-only climate database.
//!
//! The database is opened once at startup as a pool of read-only SQLite
//! connections. Each query borrows one connection for its whole duration and
//! gives it back when it finishes, fails, or is cancelled by the timeout.

use chrono::NaiveDate;
use serde::Serialize;
use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection, SqlitePool, SqlitePoolOptions};
use std::future::Future;
use std::path::Path;
use std::time::{Duration, Instant};
use tracing::{debug, info};

use crate::config::StoreConfig;
use crate::error::{ClimateError, Result};
use crate::query::{self, PrecipitationReading, TemperatureSummary};
use crate::schema::{self, Station};

/// Row counts and date coverage of the store, reported at startup and by
/// the heartbeat endpoint
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoreSummary {
    pub measurement_count: i64,
    pub station_count: i64,
    pub earliest_date: Option<NaiveDate>,
    pub latest_date: Option<NaiveDate>,
}

/// Handle to the climate database shared by all requests
#[derive(Debug, Clone)]
pub struct ClimateStore {
    pool: SqlitePool,
    query_timeout: Duration,
}

impl ClimateStore {
    /// Open the database at `path` read-only and verify its schema
    pub async fn open(path: &Path, config: &StoreConfig) -> Result<Self> {
        if !path.exists() {
            return Err(ClimateError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("Database not found: {}", path.display()),
            )));
        }

        let options = SqliteConnectOptions::new()
            .filename(path)
            .read_only(true)
            .create_if_missing(false);

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.query_timeout())
            .connect_with(options)
            .await?;

        info!(
            path = %path.display(),
            max_connections = config.max_connections,
            "Opened read-only database"
        );

        let store = Self::from_pool(pool, config.query_timeout());
        store.verify_schema().await?;
        Ok(store)
    }

    /// Wrap an existing pool
    pub fn from_pool(pool: SqlitePool, query_timeout: Duration) -> Self {
        Self {
            pool,
            query_timeout,
        }
    }

    pub fn query_timeout(&self) -> Duration {
        self.query_timeout
    }

    /// Run `op` on a pooled connection, bounded by the query timeout.
    ///
    /// The connection lives inside the timed future, so it is released on
    /// every exit path including cancellation.
    async fn run<T, F, Fut>(&self, operation: &'static str, op: F) -> Result<T>
    where
        F: FnOnce(SqlitePool) -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let start = Instant::now();
        let outcome = tokio::time::timeout(self.query_timeout, op(self.pool.clone())).await;

        match outcome {
            Ok(result) => {
                debug!(
                    operation = operation,
                    duration_us = start.elapsed().as_micros() as u64,
                    ok = result.is_ok(),
                    "Query finished"
                );
                result
            }
            Err(_) => Err(ClimateError::QueryTimeout {
                operation: operation.to_string(),
                timeout_ms: self.query_timeout.as_millis() as u64,
            }),
        }
    }

    async fn verify_schema(&self) -> Result<()> {
        self.run("verify_schema", |pool| async move {
            let mut conn = pool.acquire().await?;
            schema::verify_schema(&mut conn).await
        })
        .await?;

        debug!(version = schema::SCHEMA_VERSION, "Schema verified");
        Ok(())
    }

    pub async fn summary(&self) -> Result<StoreSummary> {
        self.run("store_summary", |pool| async move {
            let mut conn = pool.acquire().await?;
            load_summary(&mut conn).await
        })
        .await
    }

    pub async fn recent_precipitation(&self) -> Result<Vec<PrecipitationReading>> {
        self.run("recent_precipitation", |pool| async move {
            let mut conn = pool.acquire().await?;
            query::recent_precipitation(&mut conn).await
        })
        .await
    }

    pub async fn active_stations(&self) -> Result<Vec<String>> {
        self.run("active_stations", |pool| async move {
            let mut conn = pool.acquire().await?;
            query::active_stations(&mut conn).await
        })
        .await
    }

    pub async fn temperature_observations(&self) -> Result<Vec<f64>> {
        self.run("temperature_observations", |pool| async move {
            let mut conn = pool.acquire().await?;
            query::temperature_observations(&mut conn).await
        })
        .await
    }

    pub async fn temperature_summary(
        &self,
        start: NaiveDate,
        end: Option<NaiveDate>,
    ) -> Result<TemperatureSummary> {
        self.run("temperature_summary", |pool| async move {
            let mut conn = pool.acquire().await?;
            query::temperature_summary(&mut conn, start, end).await
        })
        .await
    }

    pub async fn station_details(&self) -> Result<Vec<Station>> {
        self.run("station_details", |pool| async move {
            let mut conn = pool.acquire().await?;
            query::station_details(&mut conn).await
        })
        .await
    }

    /// Close every pooled connection
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

async fn load_summary(conn: &mut SqliteConnection) -> Result<StoreSummary> {
    let (measurement_count, earliest, latest): (i64, Option<String>, Option<String>) =
        sqlx::query_as("SELECT COUNT(*), MIN(date), MAX(date) FROM measurement")
            .fetch_one(&mut *conn)
            .await?;

    let station_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM station")
        .fetch_one(&mut *conn)
        .await?;

    Ok(StoreSummary {
        measurement_count,
        station_count,
        earliest_date: earliest.as_deref().map(stored_date).transpose()?,
        latest_date: latest.as_deref().map(stored_date).transpose()?,
    })
}

fn stored_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, query::DATE_FORMAT).map_err(|_| ClimateError::CorruptData {
        message: format!("measurement.date holds '{}', expected YYYY-MM-DD", value),
    })
}
