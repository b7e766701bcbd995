//! Multi-file ingestion into the vehicle store.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use fueleco_store::{NewVehicleRecord, VehicleStore};
use serde::Serialize;
use tracing::info;

use crate::csv_source::read_source;
use crate::error::IngestError;

/// Row count contributed by one source file.
#[derive(Debug, Clone, Serialize)]
pub struct SourceCount {
    pub path: PathBuf,
    pub rows: u64,
}

/// Summary of a completed ingestion run.
#[derive(Debug, Clone, Serialize)]
pub struct IngestReport {
    pub sources: Vec<SourceCount>,
    pub rows_loaded: u64,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
}

/// Ingest the given source files into the store, replacing the table.
///
/// Every file is read and parsed in full before the store is touched, so a
/// bad source aborts with the previous table contents intact. Rows keep
/// file order then row order; no deduplication across or within files.
pub async fn ingest_files(
    store: &VehicleStore,
    sources: &[PathBuf],
) -> Result<IngestReport, IngestError> {
    let started_at = Utc::now();

    let mut counts = Vec::with_capacity(sources.len());
    let mut records: Vec<NewVehicleRecord> = Vec::new();
    for path in sources {
        let rows = read_source(path)?;
        info!("Read {} records from {:?}", rows.len(), path);
        counts.push(SourceCount {
            path: path.clone(),
            rows: rows.len() as u64,
        });
        records.extend(rows);
    }

    let rows_loaded = store.replace_all(&records).await?;

    Ok(IngestReport {
        sources: counts,
        rows_loaded,
        started_at,
        completed_at: Utc::now(),
    })
}
