//! Headline metrics.

use std::collections::HashSet;

use crate::domain::{InsightSummary, Installation, Status};

/// Year the inflection metrics are computed for unless told otherwise.
pub const DEFAULT_INSIGHT_YEAR: i32 = 2026;

#[derive(Debug, Default)]
struct StatusTally<'a> {
    systems: usize,
    capacity: f64,
    largest: Option<&'a Installation>,
}

impl<'a> StatusTally<'a> {
    fn add(&mut self, installation: &'a Installation) {
        self.systems += 1;
        self.capacity += installation.capacity;
        // Strictly greater: the first record wins a tie.
        if self
            .largest
            .is_none_or(|current| installation.capacity > current.capacity)
        {
            self.largest = Some(installation);
        }
    }

    fn largest_name(&self) -> Option<String> {
        self.largest.map(|i| i.name.clone())
    }
}

/// Compute the summary bundle for `target_year`.
///
/// Ratios divide by existing capacity without guarding: an empty or
/// all-planned dataset yields `inf` or `NaN`, which callers must format.
pub fn summarize(installations: &[Installation], target_year: i32) -> InsightSummary {
    let mut existing = StatusTally::default();
    let mut planned = StatusTally::default();
    let mut capacity_in_year = 0.0;
    let mut systems_in_year = 0usize;
    let mut countries: HashSet<&str> = HashSet::new();

    for installation in installations {
        match installation.status {
            Status::Existing => existing.add(installation),
            Status::Planned => planned.add(installation),
            _ => {}
        }
        if installation.operational_year == Some(target_year) {
            capacity_in_year += installation.capacity;
            systems_in_year += 1;
        }
        countries.insert(installation.country.as_str());
    }

    InsightSummary {
        total_systems: installations.len(),
        existing_systems: existing.systems,
        planned_systems: planned.systems,
        existing_capacity: existing.capacity,
        planned_capacity: planned.capacity,
        total_capacity: existing.capacity + planned.capacity,
        planned_multiplier: planned.capacity / existing.capacity,
        target_year,
        capacity_in_year,
        systems_in_year,
        inflection_multiplier: capacity_in_year / existing.capacity,
        largest_existing: existing.largest_name(),
        largest_planned: planned.largest_name(),
        countries: countries.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::test_support::installation;

    #[test]
    fn counts_and_capacities_by_status() {
        let data = vec![
            installation("Colossus", Status::Existing, 200.0, "USA", "xAI", Some(2024)),
            installation("Fugaku", Status::Existing, 45.0, "Japan", "RIKEN", Some(2023)),
            installation("Stargate", Status::Planned, 1000.0, "USA", "Oracle", Some(2026)),
            installation("Old", Status::Decommissioned, 5.0, "France", "X", Some(2020)),
        ];
        let s = summarize(&data, DEFAULT_INSIGHT_YEAR);
        assert_eq!(s.total_systems, 4);
        assert_eq!(s.existing_systems, 2);
        assert_eq!(s.planned_systems, 1);
        assert_eq!(s.existing_capacity, 245.0);
        assert_eq!(s.planned_capacity, 1000.0);
        assert_eq!(s.total_capacity, 1245.0);
        assert!((s.planned_multiplier - 1000.0 / 245.0).abs() < 1e-12);
        assert_eq!(s.capacity_in_year, 1000.0);
        assert_eq!(s.systems_in_year, 1);
        assert_eq!(s.largest_existing.as_deref(), Some("Colossus"));
        assert_eq!(s.largest_planned.as_deref(), Some("Stargate"));
        assert_eq!(s.countries, 3);
    }

    #[test]
    fn largest_tie_goes_to_first_record() {
        let data = vec![
            installation("first", Status::Planned, 10.0, "USA", "A", None),
            installation("second", Status::Planned, 10.0, "USA", "B", None),
        ];
        let s = summarize(&data, DEFAULT_INSIGHT_YEAR);
        assert_eq!(s.largest_planned.as_deref(), Some("first"));
        assert_eq!(s.largest_existing, None);
    }

    #[test]
    fn ratios_are_non_finite_without_existing_capacity() {
        let data = vec![installation("p", Status::Planned, 10.0, "USA", "A", Some(2026))];
        let s = summarize(&data, DEFAULT_INSIGHT_YEAR);
        assert!(s.planned_multiplier.is_infinite());
        assert!(s.inflection_multiplier.is_infinite());

        let empty = summarize(&[], DEFAULT_INSIGHT_YEAR);
        assert_eq!(empty.total_systems, 0);
        assert_eq!(empty.countries, 0);
        assert!(empty.planned_multiplier.is_nan());
        assert!(empty.inflection_multiplier.is_nan());
    }

    #[test]
    fn countries_count_records_without_year() {
        let data = vec![
            installation("a", Status::Existing, 1.0, "USA", "A", None),
            installation("b", Status::Existing, 1.0, "China", "B", Some(2024)),
            installation("c", Status::Other, 1.0, "USA", "C", None),
        ];
        assert_eq!(summarize(&data, 2024).countries, 2);
    }
}
