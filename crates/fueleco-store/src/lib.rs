//! Fueleco Store - SQLite persistence for vehicle fuel-economy records
//!
//! This crate owns the table schema, the parameterized query construction,
//! and all access to the on-disk store file.

pub mod query;
pub mod schema;
pub mod store;

pub use query::VehicleFilter;
pub use schema::{FilterOptions, NewVehicleRecord, VehicleRecord};
pub use store::{StoreError, VehicleStore};
