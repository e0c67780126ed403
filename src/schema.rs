//! Table definitions for the climate store.
//!
//! The store layout is fixed at build time. On startup the live database is
//! checked against these definitions instead of being reflected into types.

use chrono::NaiveDate;
use serde::Serialize;
use sqlx::sqlite::SqliteConnection;
use sqlx::FromRow;

use crate::error::{ClimateError, Result};

/// Version of the table layout this build understands
pub const SCHEMA_VERSION: u32 = 1;

/// A table the service reads, with the columns it relies on
#[derive(Debug, Clone, Copy)]
pub struct TableDef {
    pub name: &'static str,
    pub columns: &'static [&'static str],
    /// DDL for the table; used to build fixture databases
    pub create_sql: &'static str,
}

pub const MEASUREMENT: TableDef = TableDef {
    name: "measurement",
    columns: &["id", "station", "date", "prcp", "tobs"],
    create_sql: "CREATE TABLE measurement (
        id INTEGER NOT NULL PRIMARY KEY,
        station TEXT NOT NULL,
        date TEXT NOT NULL,
        prcp FLOAT,
        tobs FLOAT NOT NULL
    )",
};

pub const STATION: TableDef = TableDef {
    name: "station",
    columns: &["id", "station", "name", "latitude", "longitude", "elevation"],
    create_sql: "CREATE TABLE station (
        id INTEGER NOT NULL PRIMARY KEY,
        station TEXT NOT NULL,
        name TEXT NOT NULL,
        latitude FLOAT,
        longitude FLOAT,
        elevation FLOAT
    )",
};

/// Every table in schema version 1
pub const TABLES: [TableDef; 2] = [MEASUREMENT, STATION];

/// One station's observations for one calendar date
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Measurement {
    #[sqlx(rename = "station")]
    pub station_id: String,
    pub date: NaiveDate,
    #[sqlx(rename = "prcp")]
    pub precipitation: Option<f64>,
    #[sqlx(rename = "tobs")]
    pub temperature_observation: f64,
}

/// Reference metadata for a weather-reporting site
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Station {
    #[sqlx(rename = "station")]
    pub station_id: String,
    pub name: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub elevation: Option<f64>,
}

/// Check that every table and column this build reads exists in the store
pub async fn verify_schema(conn: &mut SqliteConnection) -> Result<()> {
    for table in TABLES {
        let present: Vec<String> =
            sqlx::query_scalar("SELECT name FROM pragma_table_info(?1)")
                .bind(table.name)
                .fetch_all(&mut *conn)
                .await?;

        if present.is_empty() {
            return Err(ClimateError::Schema {
                message: format!(
                    "table '{}' is missing (schema version {})",
                    table.name, SCHEMA_VERSION
                ),
            });
        }

        let missing: Vec<&str> = table
            .columns
            .iter()
            .copied()
            .filter(|column| !present.iter().any(|p| p.eq_ignore_ascii_case(column)))
            .collect();

        if !missing.is_empty() {
            return Err(ClimateError::Schema {
                message: format!(
                    "table '{}' is missing columns: {}",
                    table.name,
                    missing.join(", ")
                ),
            });
        }
    }

    Ok(())
}
