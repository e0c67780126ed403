//! Test data generation utilities.
//!
//! This module builds SQLite files with known measurement patterns for
//! testing the climate-api server end to end.

use chrono::{Days, NaiveDate};
use climate_api::schema::TABLES;
use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection};
use sqlx::{Connection, Error};
use std::path::Path;

type Result<T> = std::result::Result<T, Error>;

/// Reports every day of the fixture period
pub const DAILY_STATION: &str = "USC00519281";
/// Reports every other day of the fixture period
pub const ALTERNATE_STATION: &str = "USC00519397";
/// Stops reporting before the trailing window starts
pub const RETIRED_STATION: &str = "USC00511918";

pub const FIRST_DATE: (i32, u32, u32) = (2016, 1, 1);
pub const LATEST_DATE: (i32, u32, u32) = (2017, 8, 23);
pub const RETIRED_AFTER: (i32, u32, u32) = (2016, 6, 30);

/// A measurement row as written to the fixture database
#[derive(Debug, Clone, PartialEq)]
pub struct FixtureRow {
    pub station: &'static str,
    pub date: NaiveDate,
    pub prcp: Option<f64>,
    pub tobs: f64,
}

pub fn ymd((year, month, day): (i32, u32, u32)) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid fixture date")
}

/// Every measurement in the fixture database, in insertion order.
///
/// Rows are ordered by date, then by station within a date.
pub fn fixture_measurements() -> Vec<FixtureRow> {
    let first = ymd(FIRST_DATE);
    let latest = ymd(LATEST_DATE);
    let retired_after = ymd(RETIRED_AFTER);

    let mut rows = Vec::new();
    let mut date = first;
    let mut i: u64 = 0;

    while date <= latest {
        if date <= retired_after {
            rows.push(FixtureRow {
                station: RETIRED_STATION,
                date,
                prcp: Some(0.25),
                tobs: 55.0 + (i % 10) as f64,
            });
        }

        rows.push(FixtureRow {
            station: DAILY_STATION,
            date,
            prcp: Some((i % 7) as f64 / 10.0),
            tobs: 60.0 + (i % 20) as f64,
        });

        if i % 2 == 0 {
            rows.push(FixtureRow {
                station: ALTERNATE_STATION,
                date,
                prcp: if i % 10 == 0 { None } else { Some((i % 3) as f64 / 20.0) },
                tobs: 65.0 + (i % 15) as f64,
            });
        }

        date = date + Days::new(1);
        i += 1;
    }

    rows
}

/// Reference rows for the fixture stations: (station, name, lat, lon, elevation)
pub fn fixture_stations() -> Vec<(&'static str, &'static str, f64, f64, f64)> {
    vec![
        (DAILY_STATION, "WAIHEE 837.5, HI US", 21.45167, -157.84889, 32.9),
        (ALTERNATE_STATION, "WAIKIKI 717.2, HI US", 21.2716, -157.8168, 3.0),
        (RETIRED_STATION, "HONOLULU OBSERVATORY 702.2, HI US", 21.3152, -157.9992, 0.9),
    ]
}

async fn create_database(path: &Path) -> Result<SqliteConnection> {
    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true);
    SqliteConnection::connect_with(&options).await
}

/// Creates a database with the tables but no rows
pub async fn create_empty_climate_db(path: &Path) -> Result<()> {
    let mut conn = create_database(path).await?;
    for table in TABLES {
        sqlx::query(table.create_sql).execute(&mut conn).await?;
    }
    conn.close().await
}

/// Creates a database with no tables at all
pub async fn create_schemaless_db(path: &Path) -> Result<()> {
    let mut conn = create_database(path).await?;
    sqlx::query("CREATE TABLE unrelated (id INTEGER PRIMARY KEY)")
        .execute(&mut conn)
        .await?;
    conn.close().await
}

/// Creates the fixture climate database described by [`fixture_measurements`]
pub async fn create_test_climate_db(path: &Path) -> Result<()> {
    let mut conn = create_database(path).await?;
    let mut tx = conn.begin().await?;

    for table in TABLES {
        sqlx::query(table.create_sql).execute(&mut *tx).await?;
    }

    for (station, name, latitude, longitude, elevation) in fixture_stations() {
        sqlx::query(
            "INSERT INTO station (station, name, latitude, longitude, elevation)
             VALUES (?1, ?2, ?3, ?4, ?5)",
        )
        .bind(station)
        .bind(name)
        .bind(latitude)
        .bind(longitude)
        .bind(elevation)
        .execute(&mut *tx)
        .await?;
    }

    for row in fixture_measurements() {
        sqlx::query("INSERT INTO measurement (station, date, prcp, tobs) VALUES (?1, ?2, ?3, ?4)")
            .bind(row.station)
            .bind(row.date.format("%Y-%m-%d").to_string())
            .bind(row.prcp)
            .bind(row.tobs)
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;
    conn.close().await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_shape() {
        let rows = fixture_measurements();
        assert_eq!(rows.first().map(|r| r.date), Some(ymd(FIRST_DATE)));
        assert_eq!(rows.last().map(|r| r.date), Some(ymd(LATEST_DATE)));
        assert!(rows
            .iter()
            .filter(|r| r.station == RETIRED_STATION)
            .all(|r| r.date <= ymd(RETIRED_AFTER)));
    }
}
