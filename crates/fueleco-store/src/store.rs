//! SQLite-backed vehicle store.
//!
//! Every operation opens a fresh connection to the store file and lets it
//! close on drop, on every exit path. Readers share no state; the (offline)
//! ingestion writer is the only writer the storage engine ever sees.

use std::path::{Path, PathBuf};

use sqlx::sqlite::SqliteConnectOptions;
use sqlx::{Connection, SqliteConnection};
use thiserror::Error;
use tracing::info;

use crate::query::{SelectBuilder, VehicleFilter};
use crate::schema::{FilterOptions, NewVehicleRecord, VehicleRecord};

/// Errors from store access.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to open store at {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: sqlx::Error,
    },
    #[error("query failed: {0}")]
    Query(#[from] sqlx::Error),
}

const CREATE_TABLE_SQL: &str = "\
CREATE TABLE vehicles (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    model_year INTEGER,
    manufacturer TEXT,
    division TEXT,
    carline TEXT,
    engine_displacement REAL,
    num_cylinders INTEGER,
    transmission TEXT,
    city_fuel_economy INTEGER,
    highway_fuel_economy INTEGER,
    combined_fuel_economy INTEGER
)";

// Base statement ends in an always-true predicate so filter fragments can
// append with AND.
const SELECT_VEHICLES: &str = "SELECT id, model_year, manufacturer, division, carline, \
    engine_displacement, num_cylinders, transmission, city_fuel_economy, \
    highway_fuel_economy, combined_fuel_economy FROM vehicles WHERE 1=1";

const INSERT_VEHICLE: &str = "INSERT INTO vehicles (model_year, manufacturer, division, \
    carline, engine_displacement, num_cylinders, transmission, city_fuel_economy, \
    highway_fuel_economy, combined_fuel_economy) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)";

/// Handle to the on-disk store. Cheap to clone; holds only the file path.
#[derive(Debug, Clone)]
pub struct VehicleStore {
    path: PathBuf,
}

impl VehicleStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn connect(&self, create: bool) -> Result<SqliteConnection, StoreError> {
        let options = SqliteConnectOptions::new()
            .filename(&self.path)
            .create_if_missing(create);
        SqliteConnection::connect_with(&options)
            .await
            .map_err(|source| StoreError::Open {
                path: self.path.clone(),
                source,
            })
    }

    /// Fetch records matching the filter. Row order is storage order; no
    /// ORDER BY is applied.
    pub async fn list(&self, filter: &VehicleFilter) -> Result<Vec<VehicleRecord>, StoreError> {
        let mut select = SelectBuilder::new(SELECT_VEHICLES);
        select.push_membership("model_year", &filter.years);
        select.push_membership("manufacturer", &filter.manufacturers);
        let (sql, binds) = select.into_parts();

        let mut query = sqlx::query_as::<_, VehicleRecord>(&sql);
        for value in &binds {
            query = query.bind(value);
        }

        let mut conn = self.connect(false).await?;
        Ok(query.fetch_all(&mut conn).await?)
    }

    /// Distinct model years and manufacturers present in the table, each
    /// list ascending. Scans the table on every call; nothing is cached.
    pub async fn filter_options(&self) -> Result<FilterOptions, StoreError> {
        let mut conn = self.connect(false).await?;
        let years: Vec<i64> =
            sqlx::query_scalar("SELECT DISTINCT model_year FROM vehicles ORDER BY model_year")
                .fetch_all(&mut conn)
                .await?;
        let manufacturers: Vec<String> =
            sqlx::query_scalar("SELECT DISTINCT manufacturer FROM vehicles ORDER BY manufacturer")
                .fetch_all(&mut conn)
                .await?;
        Ok(FilterOptions {
            years,
            manufacturers,
        })
    }

    /// Replace the whole table with `records` in one transaction: drop,
    /// recreate, insert. Destructive; prior contents are gone once this
    /// commits, and ids are reassigned from scratch.
    pub async fn replace_all(&self, records: &[NewVehicleRecord]) -> Result<u64, StoreError> {
        let mut conn = self.connect(true).await?;
        let mut tx = conn.begin().await?;

        sqlx::query("DROP TABLE IF EXISTS vehicles")
            .execute(&mut *tx)
            .await?;
        sqlx::query(CREATE_TABLE_SQL).execute(&mut *tx).await?;

        for record in records {
            sqlx::query(INSERT_VEHICLE)
                .bind(record.model_year)
                .bind(&record.manufacturer)
                .bind(&record.division)
                .bind(&record.carline)
                .bind(record.engine_displacement)
                .bind(record.num_cylinders)
                .bind(&record.transmission)
                .bind(record.city_fuel_economy)
                .bind(record.highway_fuel_economy)
                .bind(record.combined_fuel_economy)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        info!(
            "Replaced vehicles table at {:?} with {} records",
            self.path,
            records.len()
        );
        Ok(records.len() as u64)
    }

    /// Number of rows currently in the table.
    pub async fn count(&self) -> Result<u64, StoreError> {
        let mut conn = self.connect(false).await?;
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM vehicles")
            .fetch_one(&mut conn)
            .await?;
        Ok(count as u64)
    }
}
