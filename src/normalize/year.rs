//! Operational-year resolution.
//!
//! Real-world planned installations rarely carry a confirmed date, only a
//! loosely worded status such as `"Planned 2027"` or just `"Planned"`. The year
//! used for time bucketing is therefore resolved through an ordered chain of
//! strategies; the first one that yields a year wins:
//!
//! 1. [`YearStrategy::OperationalDate`]: calendar year of the parsed date
//! 2. [`YearStrategy::StatusYear`]: a year inside `YearPolicy::status_years`
//!    embedded anywhere in the status text
//! 3. [`YearStrategy::PlannedStatusYear`]: a planned status naming 2030
//! 4. [`YearStrategy::PlannedDefault`]: any other planned status gets
//!    `YearPolicy::planned_default`
//!
//! If none applies the record has no operational year and is left out of every
//! year-keyed query.

use std::ops::RangeInclusive;

use chrono::{Datelike, NaiveDate};

use crate::domain::YearStrategy;

/// Year assumed for planned installations whose status carries no year.
///
/// This is a policy choice, not something derivable from the data.
pub const DEFAULT_PLANNED_YEAR: i32 = 2026;

/// Years recognized when scanning free-text status values.
pub const STATUS_YEAR_RANGE: RangeInclusive<i32> = 2024..=2029;

const PLANNED_LATE_YEAR: i32 = 2030;

/// Knobs of the year heuristic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearPolicy {
    pub planned_default: i32,
    pub status_years: RangeInclusive<i32>,
}

impl Default for YearPolicy {
    fn default() -> Self {
        Self {
            planned_default: DEFAULT_PLANNED_YEAR,
            status_years: STATUS_YEAR_RANGE,
        }
    }
}

/// The fields a strategy may look at.
#[derive(Debug, Clone, Copy)]
pub struct YearInputs<'a> {
    pub date: Option<NaiveDate>,
    pub status: Option<&'a str>,
}

impl YearStrategy {
    /// Strategies in the order they are tried.
    pub const CHAIN: [YearStrategy; 4] = [
        YearStrategy::OperationalDate,
        YearStrategy::StatusYear,
        YearStrategy::PlannedStatusYear,
        YearStrategy::PlannedDefault,
    ];

    /// Apply this single strategy.
    pub fn extract(self, inputs: YearInputs<'_>, policy: &YearPolicy) -> Option<i32> {
        match self {
            YearStrategy::OperationalDate => inputs.date.map(|d| d.year()),
            YearStrategy::StatusYear => inputs
                .status
                .and_then(|s| first_year_in(s, &policy.status_years)),
            YearStrategy::PlannedStatusYear => inputs
                .status
                .filter(|s| is_planned(s) && s.contains("2030"))
                .map(|_| PLANNED_LATE_YEAR),
            YearStrategy::PlannedDefault => inputs
                .status
                .filter(|s| is_planned(s))
                .map(|_| policy.planned_default),
        }
    }
}

/// Run the chain and report which strategy produced the year.
pub fn resolve_operational_year(
    inputs: YearInputs<'_>,
    policy: &YearPolicy,
) -> Option<(i32, YearStrategy)> {
    YearStrategy::CHAIN
        .into_iter()
        .find_map(|strategy| strategy.extract(inputs, policy).map(|year| (year, strategy)))
}

fn is_planned(status: &str) -> bool {
    status.to_lowercase().contains("planned")
}

/// First run of four ASCII digits whose value falls inside `range`.
///
/// Windows may overlap longer digit runs, so `"12025"` still yields 2025.
fn first_year_in(text: &str, range: &RangeInclusive<i32>) -> Option<i32> {
    text.as_bytes().windows(4).find_map(|w| {
        if !w.iter().all(u8::is_ascii_digit) {
            return None;
        }
        let year = w
            .iter()
            .fold(0i32, |acc, b| acc * 10 + i32::from(b - b'0'));
        range.contains(&year).then_some(year)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs<'a>(date: Option<NaiveDate>, status: Option<&'a str>) -> YearInputs<'a> {
        YearInputs { date, status }
    }

    #[test]
    fn date_wins_over_status() {
        let date = NaiveDate::from_ymd_opt(2023, 1, 1);
        let resolved = resolve_operational_year(inputs(date, Some("Planned 2027")), &YearPolicy::default());
        assert_eq!(resolved, Some((2023, YearStrategy::OperationalDate)));
    }

    #[test]
    fn status_year_is_extracted_for_any_status() {
        let policy = YearPolicy::default();
        assert_eq!(
            resolve_operational_year(inputs(None, Some("Planned 2027")), &policy),
            Some((2027, YearStrategy::StatusYear))
        );
        assert_eq!(
            resolve_operational_year(inputs(None, Some("Existing (since 2025)")), &policy),
            Some((2025, YearStrategy::StatusYear))
        );
    }

    #[test]
    fn status_year_outside_range_is_ignored() {
        let policy = YearPolicy::default();
        assert_eq!(YearStrategy::StatusYear.extract(inputs(None, Some("Existing 2023")), &policy), None);
        assert_eq!(
            resolve_operational_year(inputs(None, Some("Existing 2023")), &policy),
            None
        );
    }

    #[test]
    fn planned_2030_resolves_to_2030() {
        let resolved = resolve_operational_year(inputs(None, Some("Planned 2030")), &YearPolicy::default());
        assert_eq!(resolved, Some((2030, YearStrategy::PlannedStatusYear)));
    }

    #[test]
    fn planned_without_year_uses_policy_default() {
        let resolved = resolve_operational_year(inputs(None, Some("PLANNED")), &YearPolicy::default());
        assert_eq!(resolved, Some((DEFAULT_PLANNED_YEAR, YearStrategy::PlannedDefault)));

        let policy = YearPolicy {
            planned_default: 2028,
            ..YearPolicy::default()
        };
        let resolved = resolve_operational_year(inputs(None, Some("Planned")), &policy);
        assert_eq!(resolved, Some((2028, YearStrategy::PlannedDefault)));
    }

    #[test]
    fn nothing_applies_yields_none() {
        let policy = YearPolicy::default();
        assert_eq!(resolve_operational_year(inputs(None, Some("Existing")), &policy), None);
        assert_eq!(resolve_operational_year(inputs(None, None), &policy), None);
    }

    #[test]
    fn year_scan_matches_inside_longer_digit_runs() {
        assert_eq!(first_year_in("ref 12025", &STATUS_YEAR_RANGE), Some(2025));
        assert_eq!(first_year_in("20232024", &STATUS_YEAR_RANGE), Some(2024));
        assert_eq!(first_year_in("no year", &STATUS_YEAR_RANGE), None);
    }
}
