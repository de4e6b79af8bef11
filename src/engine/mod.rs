//! Aggregation queries over a normalized dataset.
//!
//! Every query is a pure function of the immutable `Dataset`: calling it again
//! returns the same output, and nothing is cached or written back. Results are
//! plain serializable structs meant to be rendered or shipped as-is.

pub mod breakdown;
pub mod insights;
pub mod rollup;
pub mod timeline;

use std::ops::RangeInclusive;

use serde::Serialize;

use crate::dataset::Dataset;
use crate::domain::{GroupKey, GroupRow, InsightSummary, RawRow, TimelineRow, YearAnalysis};

pub use insights::DEFAULT_INSIGHT_YEAR;
pub use timeline::default_years;

/// Groups kept by [`CapacityEngine::by_owner`].
pub const OWNER_LIMIT: usize = 20;

/// Groups kept by [`CapacityEngine::by_country`].
pub const COUNTRY_LIMIT: usize = 15;

/// Query front for one loaded dataset.
#[derive(Debug, Clone)]
pub struct CapacityEngine {
    dataset: Dataset,
}

impl CapacityEngine {
    pub fn new(dataset: Dataset) -> Self {
        Self { dataset }
    }

    pub fn from_rows(rows: &[RawRow]) -> Self {
        Self::new(Dataset::from_rows(rows))
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn timeline(&self, years: RangeInclusive<i32>) -> Vec<TimelineRow> {
        timeline::timeline(&self.dataset, years)
    }

    /// Timeline over the default 2020-2031 window.
    pub fn default_timeline(&self) -> Vec<TimelineRow> {
        self.timeline(default_years())
    }

    /// Top owners by total capacity.
    pub fn by_owner(&self) -> Vec<GroupRow> {
        self.rollup(GroupKey::Owner, Some(OWNER_LIMIT))
    }

    /// Top countries by total capacity.
    pub fn by_country(&self) -> Vec<GroupRow> {
        self.rollup(GroupKey::Country, Some(COUNTRY_LIMIT))
    }

    pub fn rollup(&self, key: GroupKey, limit: Option<usize>) -> Vec<GroupRow> {
        rollup::rollup(&self.dataset, key, limit)
    }

    pub fn summary(&self) -> InsightSummary {
        self.summary_for_year(DEFAULT_INSIGHT_YEAR)
    }

    pub fn summary_for_year(&self, target_year: i32) -> InsightSummary {
        insights::summarize(self.dataset.installations(), target_year)
    }

    pub fn breakdown_for_year(&self, year: i32) -> YearAnalysis {
        breakdown::breakdown_for_year(self.dataset.installations(), year)
    }

    /// Every query bundled together, for export.
    pub fn report(&self, year: i32, years: RangeInclusive<i32>) -> CapacityReport {
        CapacityReport {
            rows_read: self.dataset.rows_read(),
            rows_dropped: self.dataset.rows_dropped(),
            summary: self.summary_for_year(year),
            timeline: self.timeline(years),
            owners: self.by_owner(),
            countries: self.by_country(),
            year_analysis: self.breakdown_for_year(year),
        }
    }
}

/// Serializable bundle of all query results.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CapacityReport {
    pub rows_read: usize,
    pub rows_dropped: usize,
    pub summary: InsightSummary,
    pub timeline: Vec<TimelineRow>,
    pub owners: Vec<GroupRow>,
    pub countries: Vec<GroupRow>,
    pub year_analysis: YearAnalysis,
}
