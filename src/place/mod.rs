//! Place records and the SQLite store holding them
//!
//! The `places` table is reference data: request handling only reads it,
//! and only `import` writes to it.

pub mod import;

use crate::error::Result;
use serde::{Deserialize, Serialize};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::FromRow;
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

/// Columns selected for every place query, in `Place` field order
pub(crate) const PLACE_COLUMNS: &str =
    "country_code, postal_code, place_name, admin_name1, admin_code1, latitude, longitude";

/// One row of the `places` table
///
/// Serializes with the column names as field names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Place {
    pub country_code: String,
    pub postal_code: String,
    pub place_name: String,
    /// Region name, e.g. "Massachusetts"
    pub admin_name1: Option<String>,
    /// Region code, e.g. "MA"
    pub admin_code1: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
}

/// Shared handle to the places database
///
/// Cloning is cheap; all clones share one connection pool.
#[derive(Debug, Clone)]
pub struct PlaceStore {
    pool: SqlitePool,
}

impl PlaceStore {
    /// Open an existing database for reading
    pub async fn open(path: &Path) -> Result<Self> {
        let options = Self::options(SqliteConnectOptions::new().filename(path).read_only(true));
        let pool = SqlitePoolOptions::new().connect_with(options).await?;
        debug!("Opened places database {:?} read-only", path);
        Ok(Self { pool })
    }

    /// Open a database for import, creating the file if missing
    pub async fn open_writable(path: &Path) -> Result<Self> {
        let options = Self::options(
            SqliteConnectOptions::new()
                .filename(path)
                .create_if_missing(true),
        );
        let pool = SqlitePoolOptions::new().connect_with(options).await?;
        let store = Self { pool };
        store.ensure_schema().await?;
        Ok(store)
    }

    /// Empty in-memory database with the schema in place
    ///
    /// Limited to one connection that is never recycled, since every
    /// in-memory connection is its own database.
    pub async fn in_memory() -> Result<Self> {
        let options = Self::options(SqliteConnectOptions::from_str("sqlite::memory:")?);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;
        let store = Self { pool };
        store.ensure_schema().await?;
        Ok(store)
    }

    fn options(options: SqliteConnectOptions) -> SqliteConnectOptions {
        // LIKE prefix matches must respect case
        options.pragma("case_sensitive_like", "ON")
    }

    /// Create the `places` table and its lookup indexes if missing
    pub async fn ensure_schema(&self) -> Result<()> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS places (
                country_code TEXT NOT NULL,
                postal_code TEXT NOT NULL,
                place_name TEXT NOT NULL,
                admin_name1 TEXT,
                admin_code1 TEXT,
                latitude REAL NOT NULL,
                longitude REAL NOT NULL
            )",
        )
        .execute(&self.pool)
        .await?;

        for index in [
            "CREATE INDEX IF NOT EXISTS places_place_name ON places (place_name)",
            "CREATE INDEX IF NOT EXISTS places_postal_code ON places (postal_code)",
            "CREATE INDEX IF NOT EXISTS places_admin_name1 ON places (admin_name1)",
            "CREATE INDEX IF NOT EXISTS places_lat_lng ON places (latitude, longitude)",
        ] {
            sqlx::query(index).execute(&self.pool).await?;
        }

        Ok(())
    }

    /// Insert places in a single transaction
    pub async fn insert(&self, places: &[Place]) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        for place in places {
            sqlx::query(
                "INSERT INTO places (country_code, postal_code, place_name, admin_name1, admin_code1, latitude, longitude)
                 VALUES (?, ?, ?, ?, ?, ?, ?)",
            )
            .bind(&place.country_code)
            .bind(&place.postal_code)
            .bind(&place.place_name)
            .bind(&place.admin_name1)
            .bind(&place.admin_code1)
            .bind(place.latitude)
            .bind(place.longitude)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    /// Number of rows in the table
    pub async fn count(&self) -> Result<i64> {
        let count = sqlx::query_scalar("SELECT COUNT(*) FROM places")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    pub(crate) fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}
