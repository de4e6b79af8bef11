//! CSV ingest.
//!
//! This module turns the published installation CSV into untyped [`RawRow`]s.
//! It does no type coercion; that is the normalizer's job.
//!
//! - headers are trimmed and matched case-insensitively (BOM tolerated)
//! - values are trimmed, blank lines skipped, ragged rows tolerated
//! - unparseable records are skipped and reported, never fatal
//! - a header row with no recognized column at all is a source error

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::StringRecord;

use crate::domain::{RawField, RawRow};
use crate::error::AppError;

/// A record-level problem encountered during ingest.
#[derive(Debug, Clone)]
pub struct RowError {
    pub line: u64,
    pub message: String,
}

/// Ingest output: raw rows plus what went wrong along the way.
#[derive(Debug, Clone, Default)]
pub struct CsvIngest {
    pub rows: Vec<RawRow>,
    pub row_errors: Vec<RowError>,
}

/// Read raw rows from a CSV file on disk.
pub fn read_rows_from_path(path: &Path) -> Result<CsvIngest, AppError> {
    let file = File::open(path).map_err(|e| {
        AppError::data_source(format!("Failed to open CSV '{}': {e}", path.display()))
    })?;
    read_rows(file)
}

/// Read raw rows from any CSV byte stream.
pub fn read_rows<R: Read>(input: R) -> Result<CsvIngest, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(input);

    let headers = reader
        .headers()
        .map_err(|e| AppError::data_source(format!("Failed to read CSV headers: {e}")))?
        .clone();

    let header_map = build_header_map(&headers);
    if header_map.is_empty() {
        return Err(AppError::data_source(format!(
            "CSV has none of the expected columns (got: {})",
            headers.iter().collect::<Vec<_>>().join(", ")
        )));
    }

    let mut ingest = CsvIngest::default();
    for result in reader.records() {
        match result {
            Ok(record) => ingest.rows.push(to_raw_row(&record, &header_map)),
            Err(e) => {
                let line = e.position().map(|p| p.line()).unwrap_or_default();
                tracing::warn!(line, error = %e, "skipping unreadable CSV record");
                ingest.row_errors.push(RowError {
                    line,
                    message: format!("CSV parse error: {e}"),
                });
            }
        }
    }

    tracing::debug!(
        rows = ingest.rows.len(),
        errors = ingest.row_errors.len(),
        columns = header_map.len(),
        "CSV ingested"
    );
    Ok(ingest)
}

/// Column index for each recognized field; first occurrence wins.
fn build_header_map(headers: &StringRecord) -> HashMap<RawField, usize> {
    let mut map = HashMap::new();
    for (idx, name) in headers.iter().enumerate() {
        if let Some(field) = RawField::from_header(name) {
            map.entry(field).or_insert(idx);
        }
    }
    map
}

fn to_raw_row(record: &StringRecord, header_map: &HashMap<RawField, usize>) -> RawRow {
    let mut row = RawRow::default();
    for (field, idx) in header_map {
        if let Some(value) = record.get(*idx) {
            row.set(*field, value);
        }
    }
    row
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\u{feff}Name , Status,H100 equivalents,Country,Owner,First Operational Date,Latitude\n\
xAI Colossus, Existing ,\"200,000\",United States of America,xAI,2024-03-30,35.0\n\
\n\
Nebius New Jersey,Planned 2026,378979,United States of America,Nebius AI,,\n\
Short row,Planned\n";

    #[test]
    fn reads_rows_with_trimmed_headers_and_values() {
        let ingest = read_rows(SAMPLE.as_bytes()).unwrap();
        assert_eq!(ingest.rows.len(), 3);
        assert!(ingest.row_errors.is_empty());

        let first = &ingest.rows[0];
        assert_eq!(first.get(RawField::Name), Some("xAI Colossus"));
        assert_eq!(first.get(RawField::Status), Some("Existing"));
        assert_eq!(first.get(RawField::Capacity), Some("200,000"));
        assert_eq!(first.get(RawField::OperationalDate), Some("2024-03-30"));

        let second = &ingest.rows[1];
        assert_eq!(second.get(RawField::OperationalDate), Some(""));
    }

    #[test]
    fn ragged_rows_keep_present_fields() {
        let ingest = read_rows(SAMPLE.as_bytes()).unwrap();
        let short = &ingest.rows[2];
        assert_eq!(short.get(RawField::Status), Some("Planned"));
        assert_eq!(short.get(RawField::Capacity), None);
    }

    #[test]
    fn unrecognized_header_is_a_source_error() {
        let err = read_rows("<html>,<body>\n1,2\n".as_bytes()).unwrap_err();
        assert_eq!(err.exit_code(), 4);
    }

    #[test]
    fn invalid_utf8_record_is_skipped_and_reported() {
        let mut bytes = b"Name,H100 equivalents\nok,10\n".to_vec();
        bytes.extend_from_slice(b"bad\xff,20\n");
        bytes.extend_from_slice(b"also ok,30\n");

        let ingest = read_rows(bytes.as_slice()).unwrap();
        assert_eq!(ingest.rows.len(), 2);
        assert_eq!(ingest.row_errors.len(), 1);
        assert_eq!(ingest.rows[1].get(RawField::Name), Some("also ok"));
    }

    #[test]
    fn header_only_file_is_empty_not_an_error() {
        let ingest = read_rows("Name,Status,H100 equivalents\n".as_bytes()).unwrap();
        assert!(ingest.rows.is_empty());
    }
}
