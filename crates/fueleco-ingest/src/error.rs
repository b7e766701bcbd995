//! Typed errors for the ingestion pipeline.

use std::path::PathBuf;

use fueleco_store::StoreError;
use thiserror::Error;

/// Errors that can occur during ingestion. All are fatal: the operator
/// fixes the input and reruns.
#[derive(Debug, Error)]
pub enum IngestError {
    /// A source file does not exist.
    #[error("source file not found: {}", .0.display())]
    SourceNotFound(PathBuf),

    /// A source file is missing one of the expected columns.
    #[error("{}: missing expected column '{column}'", .path.display())]
    SchemaMismatch { path: PathBuf, column: String },

    /// A source file could not be read or a row failed to parse. Raised
    /// before any write, so the previous table contents stay intact.
    #[error("{}, line {line}: {message}", .path.display())]
    Parse {
        path: PathBuf,
        line: u64,
        message: String,
    },

    /// Writing the normalized table failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}
