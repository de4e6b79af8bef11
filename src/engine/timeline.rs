//! Capacity over time.

use std::collections::BTreeMap;
use std::ops::RangeInclusive;

use crate::domain::{Installation, Status, TimelineRow};

/// First year of the default timeline window.
pub const DEFAULT_TIMELINE_START: i32 = 2020;

/// Length of the default timeline window, in years.
pub const DEFAULT_TIMELINE_YEARS: i32 = 12;

/// The default window: 2020 through 2031.
pub fn default_years() -> RangeInclusive<i32> {
    DEFAULT_TIMELINE_START..=DEFAULT_TIMELINE_START + DEFAULT_TIMELINE_YEARS - 1
}

#[derive(Debug, Clone, Copy, Default)]
struct Annual {
    existing: f64,
    planned: f64,
}

/// One row per year in `years` with cumulative and annual capacity.
///
/// Cumulative columns include everything that came online up to and including
/// the year, even before the window starts. Records without an operational
/// year, and statuses other than Existing/Planned, never contribute.
pub fn timeline<'a, I>(installations: I, years: RangeInclusive<i32>) -> Vec<TimelineRow>
where
    I: IntoIterator<Item = &'a Installation>,
{
    let mut annual: BTreeMap<i32, Annual> = BTreeMap::new();
    for installation in installations {
        let Some(year) = installation.operational_year else { continue };
        let entry = annual.entry(year).or_default();
        match installation.status {
            Status::Existing => entry.existing += installation.capacity,
            Status::Planned => entry.planned += installation.capacity,
            _ => {}
        }
    }

    let (start, end) = (*years.start(), *years.end());
    if start > end {
        return Vec::new();
    }

    // Carry-in from years before the window.
    let mut existing_cumulative = 0.0;
    let mut planned_cumulative = 0.0;
    for a in annual.range(..start).map(|(_, a)| a) {
        existing_cumulative += a.existing;
        planned_cumulative += a.planned;
    }

    let mut previous_total: Option<f64> = None;
    years
        .map(|year| {
            let a = annual.get(&year).copied().unwrap_or_default();
            existing_cumulative += a.existing;
            planned_cumulative += a.planned;
            let total_cumulative = existing_cumulative + planned_cumulative;
            let growth_rate = match previous_total.replace(total_cumulative) {
                Some(prev) if prev > 0.0 => (total_cumulative - prev) / prev * 100.0,
                _ => 0.0,
            };
            TimelineRow {
                year,
                existing_cumulative,
                planned_cumulative,
                total_cumulative,
                annual_existing: a.existing,
                annual_planned: a.planned,
                annual_total: a.existing + a.planned,
                growth_rate,
            }
        })
        .collect()
}
