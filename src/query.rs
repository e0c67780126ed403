//! The fixed queries served by the API.
//!
//! Every query runs against a single borrowed connection. The store is opened
//! read-only and never written while the server runs, so the statements of a
//! windowed query agree without a transaction. Dates are stored as `YYYY-MM-DD`
//! text, which sorts the same way the dates do, so range filters are plain
//! string comparisons inside SQLite.

use chrono::{Days, NaiveDate};
use serde::{Serialize, Serializer};
use sqlx::sqlite::SqliteConnection;
use sqlx::FromRow;
use tracing::debug;

use crate::error::{ClimateError, Result};
use crate::schema::Station;

/// Format of every date accepted from clients and held in the store
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Length of the trailing window, counted in days back from the latest date
pub const WINDOW_DAYS: u64 = 365;

/// Parse a client supplied `YYYY-MM-DD` date.
///
/// Only the zero-padded form is accepted; `2017-1-1` is rejected even though
/// it names a real date.
pub fn parse_date(param: &str, value: &str) -> Result<NaiveDate> {
    let invalid = || ClimateError::InvalidDate {
        param: param.to_string(),
        value: value.to_string(),
    };

    let date = NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| invalid())?;
    if date.format(DATE_FORMAT).to_string() != value {
        return Err(invalid());
    }
    Ok(date)
}

/// An inclusive range of calendar dates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    /// The window of [`WINDOW_DAYS`] days ending at `end`
    pub fn trailing(end: NaiveDate) -> Result<Self> {
        let start = end
            .checked_sub_days(Days::new(WINDOW_DAYS))
            .ok_or_else(|| ClimateError::CorruptData {
                message: format!("cannot derive a {} day window ending at {}", WINDOW_DAYS, end),
            })?;
        Ok(Self { start, end })
    }
}

/// One row of the precipitation listing
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct PrecipitationReading {
    pub date: NaiveDate,
    pub prcp: Option<f64>,
}

/// How many measurements a station recorded inside a window
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct StationActivity {
    #[sqlx(rename = "station")]
    pub station_id: String,
    pub observations: i64,
}

/// Minimum, mean and maximum observed temperature.
///
/// All three are `None` when no measurement matched. Serializes as the JSON
/// array `[min, avg, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TemperatureSummary {
    pub min: Option<f64>,
    pub avg: Option<f64>,
    pub max: Option<f64>,
}

impl TemperatureSummary {
    pub fn is_empty(&self) -> bool {
        self.min.is_none() && self.avg.is_none() && self.max.is_none()
    }
}

impl Serialize for TemperatureSummary {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        [self.min, self.avg, self.max].serialize(serializer)
    }
}

/// Latest measurement date in the store, `None` when there are no measurements
pub async fn latest_date(conn: &mut SqliteConnection) -> Result<Option<NaiveDate>> {
    let latest: Option<String> = sqlx::query_scalar("SELECT MAX(date) FROM measurement")
        .fetch_one(&mut *conn)
        .await?;

    latest
        .map(|value| {
            NaiveDate::parse_from_str(&value, DATE_FORMAT).map_err(|_| ClimateError::CorruptData {
                message: format!("measurement.date holds '{}', expected YYYY-MM-DD", value),
            })
        })
        .transpose()
}

/// The trailing window ending at the latest measurement date
pub async fn trailing_window(conn: &mut SqliteConnection) -> Result<Option<DateWindow>> {
    match latest_date(conn).await? {
        Some(latest) => {
            let window = DateWindow::trailing(latest)?;
            debug!(start = %window.start, end = %window.end, "Derived trailing window");
            Ok(Some(window))
        }
        None => Ok(None),
    }
}

/// Every (date, prcp) pair inside the trailing window, across all stations,
/// in insertion order
pub async fn recent_precipitation(conn: &mut SqliteConnection) -> Result<Vec<PrecipitationReading>> {
    let Some(window) = trailing_window(conn).await? else {
        return Ok(Vec::new());
    };

    let readings = sqlx::query_as::<_, PrecipitationReading>(
        "SELECT date, prcp FROM measurement
         WHERE date >= ?1 AND date <= ?2
         ORDER BY id",
    )
    .bind(window.start)
    .bind(window.end)
    .fetch_all(&mut *conn)
    .await?;

    Ok(readings)
}

/// Measurement counts per station inside `window`, busiest first.
///
/// Ties are broken by station id so repeated calls agree.
pub async fn station_activity(
    conn: &mut SqliteConnection,
    window: DateWindow,
    limit: Option<u32>,
) -> Result<Vec<StationActivity>> {
    // SQLite treats a negative LIMIT as no limit
    let limit = limit.map(i64::from).unwrap_or(-1);

    let activity = sqlx::query_as::<_, StationActivity>(
        "SELECT station, COUNT(*) AS observations FROM measurement
         WHERE date >= ?1 AND date <= ?2
         GROUP BY station
         ORDER BY observations DESC, station ASC
         LIMIT ?3",
    )
    .bind(window.start)
    .bind(window.end)
    .bind(limit)
    .fetch_all(&mut *conn)
    .await?;

    Ok(activity)
}

/// Distinct ids of the stations that reported inside the trailing window,
/// busiest first
pub async fn active_stations(conn: &mut SqliteConnection) -> Result<Vec<String>> {
    let Some(window) = trailing_window(conn).await? else {
        return Ok(Vec::new());
    };

    let activity = station_activity(conn, window, None).await?;
    Ok(activity.into_iter().map(|a| a.station_id).collect())
}

/// The station with the most measurements inside the trailing window
pub async fn most_active_station(
    conn: &mut SqliteConnection,
) -> Result<Option<(StationActivity, DateWindow)>> {
    let Some(window) = trailing_window(conn).await? else {
        return Ok(None);
    };

    let busiest = station_activity(conn, window, Some(1)).await?.into_iter().next();
    Ok(busiest.map(|activity| (activity, window)))
}

/// Temperature observations of the most active station inside the trailing
/// window, in insertion order
pub async fn temperature_observations(conn: &mut SqliteConnection) -> Result<Vec<f64>> {
    let Some((station, window)) = most_active_station(conn).await? else {
        return Ok(Vec::new());
    };

    debug!(
        station = %station.station_id,
        observations = station.observations,
        "Selected most active station"
    );

    let observations: Vec<f64> = sqlx::query_scalar(
        "SELECT tobs FROM measurement
         WHERE station = ?1 AND date >= ?2 AND date <= ?3
         ORDER BY id",
    )
    .bind(&station.station_id)
    .bind(window.start)
    .bind(window.end)
    .fetch_all(&mut *conn)
    .await?;

    Ok(observations)
}

/// Min/avg/max temperature over measurements dated `start` or later and,
/// when given, `end` or earlier
pub async fn temperature_summary(
    conn: &mut SqliteConnection,
    start: NaiveDate,
    end: Option<NaiveDate>,
) -> Result<TemperatureSummary> {
    if let Some(end) = end {
        if end < start {
            return Err(ClimateError::InvalidParameter {
                param: "end".to_string(),
                message: format!("end date {} is before start date {}", end, start),
            });
        }
    }

    let (min, avg, max): (Option<f64>, Option<f64>, Option<f64>) = sqlx::query_as(
        "SELECT MIN(tobs), AVG(tobs), MAX(tobs) FROM measurement
         WHERE date >= ?1 AND (?2 IS NULL OR date <= ?2)",
    )
    .bind(start)
    .bind(end)
    .fetch_one(&mut *conn)
    .await?;

    Ok(TemperatureSummary { min, avg, max })
}

/// Reference rows for every station, ordered by station id
pub async fn station_details(conn: &mut SqliteConnection) -> Result<Vec<Station>> {
    let stations = sqlx::query_as::<_, Station>(
        "SELECT station, name, latitude, longitude, elevation FROM station
         ORDER BY station",
    )
    .fetch_all(&mut *conn)
    .await?;

    Ok(stations)
}
