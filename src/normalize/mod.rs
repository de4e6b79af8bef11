//! Raw row normalization.
//!
//! Turns untyped, string-valued source rows into canonical [`Installation`]s.
//! The conversion is total: missing or malformed fields fall back to defaults
//! and never abort the load. Rows without positive capacity carry no signal for
//! any aggregation and are dropped.

pub mod parse;
pub mod year;

pub use parse::{parse_date, parse_number};
pub use year::{DEFAULT_PLANNED_YEAR, YearInputs, YearPolicy, resolve_operational_year};

use crate::domain::{Installation, RawField, RawRow, Status};

/// Classify free-text status by case-insensitive substring, in priority order.
///
/// `"Planned 2027"` is `Planned`; the year is picked up separately by the
/// year chain.
pub fn classify_status(raw: Option<&str>) -> Status {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Status::Unknown;
    };
    let lower = raw.to_lowercase();
    if lower.contains("existing") {
        Status::Existing
    } else if lower.contains("planned") {
        Status::Planned
    } else if lower.contains("decommissioned") {
        Status::Decommissioned
    } else {
        Status::Other
    }
}

/// Normalize a single row, without the capacity filter.
pub fn normalize_row(row: &RawRow, policy: &YearPolicy) -> Installation {
    let text = |field: RawField| row.get(field).unwrap_or_default().to_string();

    let status_raw = row.get(RawField::Status);
    let operational_date = parse_date(row.get(RawField::OperationalDate));
    let resolved = resolve_operational_year(
        YearInputs {
            date: operational_date,
            status: status_raw,
        },
        policy,
    );

    Installation {
        name: text(RawField::Name),
        status: classify_status(status_raw),
        capacity: parse_number(row.get(RawField::Capacity)),
        power_capacity_mw: parse_number(row.get(RawField::PowerCapacity)),
        country: text(RawField::Country),
        owner: text(RawField::Owner),
        chip_type: text(RawField::ChipType),
        sector: text(RawField::Sector),
        operational_date,
        operational_year: resolved.map(|(year, _)| year),
        year_basis: resolved.map(|(_, strategy)| strategy),
        hardware_cost: parse_number(row.get(RawField::HardwareCost)),
    }
}

/// Normalize rows with the default year policy.
pub fn normalize(rows: &[RawRow]) -> Vec<Installation> {
    normalize_with_policy(rows, &YearPolicy::default())
}

/// Normalize rows and drop those without positive capacity.
pub fn normalize_with_policy(rows: &[RawRow], policy: &YearPolicy) -> Vec<Installation> {
    rows.iter()
        .enumerate()
        .filter_map(|(idx, row)| {
            let installation = normalize_row(row, policy);
            if installation.capacity > 0.0 {
                Some(installation)
            } else {
                tracing::debug!(
                    row = idx,
                    name = %installation.name,
                    capacity = installation.capacity,
                    "dropping row without positive capacity"
                );
                None
            }
        })
        .collect()
}
