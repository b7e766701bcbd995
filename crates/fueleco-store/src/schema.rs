//! Vehicle record types.

use serde::{Deserialize, Serialize};

/// A stored fuel-economy record: one row per (model year, manufacturer,
/// carline, configuration) combination. `id` is synthetic and assigned by
/// the store on insert; no uniqueness is enforced across the other fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct VehicleRecord {
    pub id: i64,
    pub model_year: i64,
    pub manufacturer: String,
    pub division: String,
    pub carline: String,
    /// Liters.
    pub engine_displacement: f64,
    pub num_cylinders: i64,
    /// Free-text transmission code, e.g. "Auto(S8)".
    pub transmission: String,
    pub city_fuel_economy: i64,
    pub highway_fuel_economy: i64,
    pub combined_fuel_economy: i64,
}

/// A record produced by ingestion, before the store assigns an id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewVehicleRecord {
    pub model_year: i64,
    pub manufacturer: String,
    pub division: String,
    pub carline: String,
    pub engine_displacement: f64,
    pub num_cylinders: i64,
    pub transmission: String,
    pub city_fuel_economy: i64,
    pub highway_fuel_economy: i64,
    pub combined_fuel_economy: i64,
}

/// Distinct filter values present in the table, for populating filter UIs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterOptions {
    pub years: Vec<i64>,
    pub manufacturers: Vec<String>,
}
