//! Shared fixtures for unit tests.

use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};

use crate::schema::TABLES;

pub const WAIHEE: &str = "USC00519281";
pub const WAIKIKI: &str = "USC00519397";
pub const KANEOHE: &str = "USC00513117";

pub const STATIONS: [(&str, &str, f64, f64, f64); 3] = [
    (WAIKIKI, "WAIKIKI 717.2, HI US", 21.2716, -157.8168, 3.0),
    (KANEOHE, "KANEOHE 838.1, HI US", 21.4234, -157.8015, 14.6),
    (WAIHEE, "WAIHEE 837.5, HI US", 21.45167, -157.84889, 32.9),
];

/// (station, date, prcp, tobs) in insertion order.
///
/// The latest date is 2017-08-23, so the trailing window starts at 2016-08-23.
/// Inside the window WAIHEE has three rows, KANEOHE and WAIKIKI one each.
pub const MEASUREMENTS: [(&str, &str, Option<f64>, f64); 8] = [
    (WAIKIKI, "2016-08-22", Some(0.5), 70.0),
    (WAIHEE, "2016-08-23", Some(0.1), 75.0),
    (WAIKIKI, "2016-08-23", None, 77.0),
    (WAIHEE, "2017-01-01", Some(0.0), 62.0),
    (KANEOHE, "2017-01-01", Some(0.2), 66.0),
    (WAIHEE, "2017-08-23", Some(0.0), 81.0),
    (KANEOHE, "2015-01-01", Some(1.0), 60.0),
    (KANEOHE, "2015-01-02", None, 61.0),
];

/// Single-connection in-memory pool holding the schema but no rows
pub async fn empty_memory_store() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .unwrap();

    for table in TABLES {
        sqlx::query(table.create_sql).execute(&pool).await.unwrap();
    }
    pool
}

/// In-memory pool seeded with [`STATIONS`] and [`MEASUREMENTS`]
pub async fn memory_store() -> SqlitePool {
    let pool = empty_memory_store().await;

    for (station, name, latitude, longitude, elevation) in STATIONS {
        sqlx::query(
            "INSERT INTO station (station, name, latitude, longitude, elevation)
             VALUES (?1, ?2, ?3, ?4, ?5)",
        )
        .bind(station)
        .bind(name)
        .bind(latitude)
        .bind(longitude)
        .bind(elevation)
        .execute(&pool)
        .await
        .unwrap();
    }

    for (station, date, prcp, tobs) in MEASUREMENTS {
        sqlx::query("INSERT INTO measurement (station, date, prcp, tobs) VALUES (?1, ?2, ?3, ?4)")
            .bind(station)
            .bind(date)
            .bind(prcp)
            .bind(tobs)
            .execute(&pool)
            .await
            .unwrap();
    }

    pool
}
