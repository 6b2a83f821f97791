//! CSV source for raw rows.
//!
//! Reads a headed CSV file with the columns `City`, `Region`, and
//! `Number_of_Galamsay_Sites` and yields one [`RawRow`] per data row. No
//! validation happens here beyond the header check; blank or missing cells
//! are passed through as `None`.

use std::io::Read;
use std::path::Path;

use thiserror::Error;

use crate::entities::RawRow;

pub const CITY_HEADER: &str = "City";
pub const REGION_HEADER: &str = "Region";
pub const SITES_HEADER: &str = "Number_of_Galamsay_Sites";

/// Errors from loading the input file.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Data file not found: {path}")]
    NotFound { path: String },

    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("Error parsing CSV {path} at data row {row}: {source}")]
    Csv {
        path: String,
        row: u32,
        source: csv::Error,
    },

    #[error("CSV file {path} is missing required headers: {missing}")]
    MissingHeaders { path: String, missing: String },
}

/// Load every data row from the CSV file at `path`.
///
/// # Errors
///
/// Returns `SourceError::NotFound` if the file does not exist, and the other
/// variants for I/O failures, malformed CSV, or missing headers.
pub fn load_rows(path: impl AsRef<Path>) -> Result<Vec<RawRow>, SourceError> {
    let path = path.as_ref();
    let label = path.display().to_string();
    let file = std::fs::File::open(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => SourceError::NotFound {
            path: label.clone(),
        },
        _ => SourceError::Io {
            path: label.clone(),
            source: e,
        },
    })?;
    read_rows(file, &label)
}

/// Read rows from any CSV byte stream. `label` names the input in errors.
///
/// # Errors
///
/// Returns `SourceError::Csv` for malformed input and
/// `SourceError::MissingHeaders` if a required column is absent.
pub fn read_rows<R: Read>(input: R, label: &str) -> Result<Vec<RawRow>, SourceError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(input);

    let headers = reader.headers().map_err(|e| SourceError::Csv {
        path: label.to_string(),
        row: 0,
        source: e,
    })?;
    let column = |name: &str| headers.iter().position(|h| h.trim() == name);
    let (city_idx, region_idx, sites_idx) = match (
        column(CITY_HEADER),
        column(REGION_HEADER),
        column(SITES_HEADER),
    ) {
        (Some(c), Some(r), Some(s)) => (c, r, s),
        (c, r, s) => {
            let missing: Vec<&str> = [
                (c, CITY_HEADER),
                (r, REGION_HEADER),
                (s, SITES_HEADER),
            ]
            .into_iter()
            .filter(|(idx, _)| idx.is_none())
            .map(|(_, name)| name)
            .collect();
            return Err(SourceError::MissingHeaders {
                path: label.to_string(),
                missing: missing.join(", "),
            });
        }
    };

    let mut rows = Vec::new();
    let mut row_number: u32 = 0;
    for record in reader.records() {
        row_number = row_number.saturating_add(1);
        let record = record.map_err(|e| SourceError::Csv {
            path: label.to_string(),
            row: row_number,
            source: e,
        })?;
        rows.push(RawRow::new(
            row_number,
            record.get(city_idx),
            record.get(region_idx),
            record.get(sites_idx),
        ));
    }
    Ok(rows)
}
