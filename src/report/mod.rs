//! Terminal reports over engine results.

pub mod format;

pub use format::*;

use crate::engine::CapacityReport;

/// Rows shown per section of the year breakdown in the full report.
pub const YEAR_LISTING: usize = 10;

/// Every section of a full report, in display order.
pub fn format_report(report: &CapacityReport) -> String {
    let mut sections = vec![
        format_summary(&report.summary),
        format_timeline(&report.timeline),
        format_groups("Top owners", &report.owners),
        format_groups("Top countries", &report.countries),
        format_year_analysis(&report.year_analysis, YEAR_LISTING),
    ];
    sections.retain(|s| !s.is_empty());
    sections.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::bundled_rows;
    use crate::engine::{CapacityEngine, default_years};

    #[test]
    fn full_report_has_every_section() {
        let engine = CapacityEngine::from_rows(&bundled_rows());
        let text = format_report(&engine.report(2026, default_years()));
        for heading in [
            "Key insights:",
            "Capacity timeline (H100e):",
            "Top owners:",
            "Top countries:",
            "Year 2026:",
        ] {
            assert!(text.contains(heading), "missing {heading}");
        }
    }
}
