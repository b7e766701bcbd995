//! Reading and normalizing one source CSV file.

use std::fs::File;
use std::io;
use std::path::Path;

use fueleco_store::NewVehicleRecord;
use tracing::debug;

use crate::error::IngestError;

/// Source header name → target field, in table column order. Exactly these
/// ten columns are projected; anything else in the file is ignored.
pub const SOURCE_COLUMNS: [(&str, &str); 10] = [
    ("Model Year", "model_year"),
    ("Mfr Name", "manufacturer"),
    ("Division", "division"),
    ("Carline", "carline"),
    ("Eng Displ", "engine_displacement"),
    ("# Cyl", "num_cylinders"),
    ("Transmission", "transmission"),
    ("City FE (Guide) - Conventional Fuel", "city_fuel_economy"),
    ("Hwy FE (Guide) - Conventional Fuel", "highway_fuel_economy"),
    ("Comb FE (Guide) - Conventional Fuel", "combined_fuel_economy"),
];

/// Read one source file fully, project to the ten known columns, and parse
/// typed records. Columns are located by (trimmed) header name, so source
/// column order does not matter. Nothing is written anywhere; the caller
/// decides what to do with the rows.
pub fn read_source(path: &Path) -> Result<Vec<NewVehicleRecord>, IngestError> {
    let file = File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => IngestError::SourceNotFound(path.to_path_buf()),
        _ => parse_error(path, 0, e.to_string()),
    })?;

    let mut reader = csv::ReaderBuilder::new().from_reader(file);

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| parse_error(path, 1, e.to_string()))?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    // Field index per expected source column, in SOURCE_COLUMNS order.
    let mut projection = Vec::with_capacity(SOURCE_COLUMNS.len());
    for (source_name, _) in SOURCE_COLUMNS {
        let idx = headers
            .iter()
            .position(|h| h == source_name)
            .ok_or_else(|| IngestError::SchemaMismatch {
                path: path.to_path_buf(),
                column: source_name.to_string(),
            })?;
        projection.push(idx);
    }

    let mut records = Vec::new();
    for result in reader.records() {
        let row = result.map_err(|e| {
            let line = e.position().map(|p| p.line()).unwrap_or(0);
            parse_error(path, line, e.to_string())
        })?;
        let line = row.position().map(|p| p.line()).unwrap_or(0);
        records.push(parse_row(path, line, &row, &projection)?);
    }

    debug!("Read {} records from {:?}", records.len(), path);
    Ok(records)
}

fn parse_row(
    path: &Path,
    line: u64,
    row: &csv::StringRecord,
    projection: &[usize],
) -> Result<NewVehicleRecord, IngestError> {
    let field = |i: usize| row.get(projection[i]).unwrap_or("");

    Ok(NewVehicleRecord {
        model_year: parse_typed(path, line, SOURCE_COLUMNS[0].0, field(0))?,
        manufacturer: field(1).to_string(),
        division: field(2).to_string(),
        carline: field(3).to_string(),
        engine_displacement: parse_typed(path, line, SOURCE_COLUMNS[4].0, field(4))?,
        num_cylinders: parse_typed(path, line, SOURCE_COLUMNS[5].0, field(5))?,
        transmission: field(6).to_string(),
        city_fuel_economy: parse_typed(path, line, SOURCE_COLUMNS[7].0, field(7))?,
        highway_fuel_economy: parse_typed(path, line, SOURCE_COLUMNS[8].0, field(8))?,
        combined_fuel_economy: parse_typed(path, line, SOURCE_COLUMNS[9].0, field(9))?,
    })
}

fn parse_typed<T: std::str::FromStr>(
    path: &Path,
    line: u64,
    column: &str,
    raw: &str,
) -> Result<T, IngestError> {
    raw.parse().map_err(|_| {
        parse_error(
            path,
            line,
            format!("invalid value '{}' in column '{}'", raw, column),
        )
    })
}

fn parse_error(path: &Path, line: u64, message: String) -> IngestError {
    IngestError::Parse {
        path: path.to_path_buf(),
        line,
        message,
    }
}
