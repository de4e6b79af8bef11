//! Export query results to JSON/CSV.
//!
//! The exports are meant to be easy to consume in spreadsheets, notebooks or a
//! separate rendering layer.

use std::fs::File;
use std::path::Path;

use crate::domain::TimelineRow;
use crate::engine::CapacityReport;
use crate::error::AppError;

/// Write the full report bundle as pretty JSON.
///
/// Non-finite ratios serialize as `null`.
pub fn write_report_json(path: &Path, report: &CapacityReport) -> Result<(), AppError> {
    let file = File::create(path).map_err(|e| {
        AppError::usage(format!("Failed to create report JSON '{}': {e}", path.display()))
    })?;
    serde_json::to_writer_pretty(file, report)
        .map_err(|e| AppError::usage(format!("Failed to write report JSON: {e}")))?;
    tracing::info!(path = %path.display(), "wrote report JSON");
    Ok(())
}

/// Write the timeline as CSV, one row per year.
pub fn write_timeline_csv(path: &Path, rows: &[TimelineRow]) -> Result<(), AppError> {
    let mut writer = csv::Writer::from_path(path).map_err(|e| {
        AppError::usage(format!("Failed to create timeline CSV '{}': {e}", path.display()))
    })?;
    for row in rows {
        writer
            .serialize(row)
            .map_err(|e| AppError::usage(format!("Failed to write timeline CSV row: {e}")))?;
    }
    writer
        .flush()
        .map_err(|e| AppError::usage(format!("Failed to flush timeline CSV: {e}")))?;
    tracing::info!(path = %path.display(), rows = rows.len(), "wrote timeline CSV");
    Ok(())
}
