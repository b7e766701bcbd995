//! Fueleco Ingest - CSV ingestion for the vehicle store
//!
//! Reads source CSV files with the fixed fuel-economy guide header,
//! projects and renames the known columns, and bulk-loads the result into
//! the store, replacing any prior contents.

pub mod csv_source;
pub mod error;
pub mod loader;

pub use csv_source::{read_source, SOURCE_COLUMNS};
pub use error::IngestError;
pub use loader::{ingest_files, IngestReport, SourceCount};
