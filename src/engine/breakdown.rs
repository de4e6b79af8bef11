//! Single-year breakdown.

use crate::domain::{GroupKey, Installation, YearAnalysis};
use crate::engine::rollup::{capacity_by, descending};

/// Everything with `operational_year == year`, largest first, plus per-owner
/// and per-country capacity. Group lists are not truncated.
pub fn breakdown_for_year(installations: &[Installation], year: i32) -> YearAnalysis {
    let mut systems: Vec<Installation> = installations
        .iter()
        .filter(|i| i.operational_year == Some(year))
        .cloned()
        .collect();
    systems.sort_by(|a, b| descending(a.capacity, b.capacity));

    let total_capacity = systems.iter().map(|i| i.capacity).sum();
    let companies = capacity_by(&systems, GroupKey::Owner);
    let countries = capacity_by(&systems, GroupKey::Country);

    YearAnalysis {
        year,
        systems,
        total_capacity,
        companies,
        countries,
    }
}
