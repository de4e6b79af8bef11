//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - built once from raw rows and queried in-memory
//! - exported to JSON/CSV
//! - handed to any presentation layer without further transformation

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Lifecycle classification of an installation.
///
/// Always derived from the raw status text, never the free text itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    Existing,
    Planned,
    Decommissioned,
    Other,
    Unknown,
}

impl Status {
    pub const ALL: [Status; 5] = [
        Status::Existing,
        Status::Planned,
        Status::Decommissioned,
        Status::Other,
        Status::Unknown,
    ];

    pub fn display_name(self) -> &'static str {
        match self {
            Status::Existing => "Existing",
            Status::Planned => "Planned",
            Status::Decommissioned => "Decommissioned",
            Status::Other => "Other",
            Status::Unknown => "Unknown",
        }
    }
}

/// Which rule of the operational-year chain produced a record's year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum YearStrategy {
    /// Calendar year of a parseable first-operational date.
    OperationalDate,
    /// A `202x` year (within the policy range) found in the status text.
    StatusYear,
    /// A planned status that names 2030 explicitly.
    PlannedStatusYear,
    /// A planned status with no usable year: the policy default year.
    PlannedDefault,
}

/// Recognized columns of the source table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RawField {
    Name,
    Status,
    Capacity,
    PowerCapacity,
    Country,
    Owner,
    OperationalDate,
    ChipType,
    Sector,
    HardwareCost,
}

impl RawField {
    pub const ALL: [RawField; 10] = [
        RawField::Name,
        RawField::Status,
        RawField::Capacity,
        RawField::PowerCapacity,
        RawField::Country,
        RawField::Owner,
        RawField::OperationalDate,
        RawField::ChipType,
        RawField::Sector,
        RawField::HardwareCost,
    ];

    /// Column header as published in the source CSV.
    pub fn header(self) -> &'static str {
        match self {
            RawField::Name => "Name",
            RawField::Status => "Status",
            RawField::Capacity => "H100 equivalents",
            RawField::PowerCapacity => "Power Capacity (MW)",
            RawField::Country => "Country",
            RawField::Owner => "Owner",
            RawField::OperationalDate => "First Operational Date",
            RawField::ChipType => "Chip type (primary)",
            RawField::Sector => "Sector",
            RawField::HardwareCost => "Hardware Cost",
        }
    }

    /// Resolve a header to a field.
    ///
    /// Matching ignores surrounding whitespace, a leading UTF-8 BOM and ASCII case.
    pub fn from_header(name: &str) -> Option<Self> {
        let name = name.trim().trim_start_matches('\u{feff}').trim();
        Self::ALL
            .into_iter()
            .find(|field| field.header().eq_ignore_ascii_case(name))
    }
}

/// One untyped source row: every value is an optional string.
///
/// Numbers arrive as strings (possibly with thousands separators); nothing is
/// validated here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRow {
    #[serde(rename = "Name", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "Status", default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(rename = "H100 equivalents", default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<String>,
    #[serde(rename = "Power Capacity (MW)", default, skip_serializing_if = "Option::is_none")]
    pub power_capacity: Option<String>,
    #[serde(rename = "Country", default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(rename = "Owner", default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(rename = "First Operational Date", default, skip_serializing_if = "Option::is_none")]
    pub operational_date: Option<String>,
    #[serde(rename = "Chip type (primary)", default, skip_serializing_if = "Option::is_none")]
    pub chip_type: Option<String>,
    #[serde(rename = "Sector", default, skip_serializing_if = "Option::is_none")]
    pub sector: Option<String>,
    #[serde(rename = "Hardware Cost", default, skip_serializing_if = "Option::is_none")]
    pub hardware_cost: Option<String>,
}

impl RawRow {
    /// Build a row from `(header, value)` pairs, ignoring unknown headers.
    pub fn from_fields<I, K, V>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut row = RawRow::default();
        for (header, value) in fields {
            if let Some(field) = RawField::from_header(header.as_ref()) {
                row.set(field, value);
            }
        }
        row
    }

    pub fn get(&self, field: RawField) -> Option<&str> {
        self.slot(field).as_deref()
    }

    pub fn set(&mut self, field: RawField, value: impl Into<String>) {
        *self.slot_mut(field) = Some(value.into());
    }

    /// Builder-style `set`, handy for fixtures.
    pub fn with(mut self, field: RawField, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    fn slot(&self, field: RawField) -> &Option<String> {
        match field {
            RawField::Name => &self.name,
            RawField::Status => &self.status,
            RawField::Capacity => &self.capacity,
            RawField::PowerCapacity => &self.power_capacity,
            RawField::Country => &self.country,
            RawField::Owner => &self.owner,
            RawField::OperationalDate => &self.operational_date,
            RawField::ChipType => &self.chip_type,
            RawField::Sector => &self.sector,
            RawField::HardwareCost => &self.hardware_cost,
        }
    }

    fn slot_mut(&mut self, field: RawField) -> &mut Option<String> {
        match field {
            RawField::Name => &mut self.name,
            RawField::Status => &mut self.status,
            RawField::Capacity => &mut self.capacity,
            RawField::PowerCapacity => &mut self.power_capacity,
            RawField::Country => &mut self.country,
            RawField::Owner => &mut self.owner,
            RawField::OperationalDate => &mut self.operational_date,
            RawField::ChipType => &mut self.chip_type,
            RawField::Sector => &mut self.sector,
            RawField::HardwareCost => &mut self.hardware_cost,
        }
    }
}

/// Canonical, normalized installation record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Installation {
    pub name: String,
    pub status: Status,
    /// H100-equivalent capacity; always `> 0` inside a `Dataset`.
    pub capacity: f64,
    #[serde(rename = "powerCapacityMW")]
    pub power_capacity_mw: f64,
    pub country: String,
    pub owner: String,
    pub chip_type: String,
    pub sector: String,
    pub operational_date: Option<NaiveDate>,
    pub operational_year: Option<i32>,
    pub year_basis: Option<YearStrategy>,
    pub hardware_cost: f64,
}

impl Installation {
    /// Render the record back into the raw row shape it came from.
    ///
    /// Feeding the result through the normalizer again reproduces the same
    /// capacity, status and date.
    pub fn to_raw_row(&self) -> RawRow {
        let status = match self.status {
            Status::Unknown => None,
            other => Some(other.display_name().to_string()),
        };
        RawRow {
            name: Some(self.name.clone()),
            status,
            capacity: Some(self.capacity.to_string()),
            power_capacity: Some(self.power_capacity_mw.to_string()),
            country: Some(self.country.clone()),
            owner: Some(self.owner.clone()),
            operational_date: self.operational_date.map(|d| d.format("%Y-%m-%d").to_string()),
            chip_type: Some(self.chip_type.clone()),
            sector: Some(self.sector.clone()),
            hardware_cost: Some(self.hardware_cost.to_string()),
        }
    }
}

/// One year of the capacity timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineRow {
    pub year: i32,
    pub existing_cumulative: f64,
    pub planned_cumulative: f64,
    pub total_cumulative: f64,
    pub annual_existing: f64,
    pub annual_planned: f64,
    pub annual_total: f64,
    /// Percent change of `total_cumulative` over the previous row; 0 for the
    /// first row or when the previous total is 0.
    pub growth_rate: f64,
}

/// Dimension a rollup groups by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupKey {
    Owner,
    Country,
}

impl GroupKey {
    pub fn of(self, installation: &Installation) -> &str {
        match self {
            GroupKey::Owner => &installation.owner,
            GroupKey::Country => &installation.country,
        }
    }
}

/// Per-owner or per-country totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupRow {
    pub name: String,
    pub existing: f64,
    pub planned: f64,
    /// Capacity across all statuses (not only existing + planned).
    pub total: f64,
    pub systems: usize,
}

impl GroupRow {
    /// Planned capacity as a percentage of the group's total.
    pub fn planned_share(&self) -> f64 {
        self.planned / self.total * 100.0
    }

    pub fn expansion_category(&self) -> ExpansionCategory {
        ExpansionCategory::classify(self.existing, self.planned)
    }
}

/// How aggressively a group is adding capacity relative to what it runs today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExpansionCategory {
    /// Planned exceeds 10x existing.
    Aggressive,
    /// Planned exceeds 3x existing.
    Moderate,
    Conservative,
}

impl ExpansionCategory {
    pub fn classify(existing: f64, planned: f64) -> Self {
        if planned > existing * 10.0 {
            ExpansionCategory::Aggressive
        } else if planned > existing * 3.0 {
            ExpansionCategory::Moderate
        } else {
            ExpansionCategory::Conservative
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            ExpansionCategory::Aggressive => "Aggressive Expansion",
            ExpansionCategory::Moderate => "Moderate Growth",
            ExpansionCategory::Conservative => "Conservative",
        }
    }
}

/// Scalar headline metrics.
///
/// Ratios are plain divisions: they are `inf`/`NaN` when existing capacity is 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightSummary {
    pub total_systems: usize,
    pub existing_systems: usize,
    pub planned_systems: usize,
    pub existing_capacity: f64,
    pub planned_capacity: f64,
    pub total_capacity: f64,
    pub planned_multiplier: f64,
    pub target_year: i32,
    pub capacity_in_year: f64,
    pub systems_in_year: usize,
    pub inflection_multiplier: f64,
    pub largest_existing: Option<String>,
    pub largest_planned: Option<String>,
    pub countries: usize,
}

/// Capacity and system count for one key within a single year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearGroup {
    pub name: String,
    pub capacity: f64,
    pub systems: usize,
}

/// Everything coming online in a single operational year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearAnalysis {
    pub year: i32,
    /// Sorted by capacity, largest first.
    pub systems: Vec<Installation>,
    pub total_capacity: f64,
    pub companies: Vec<YearGroup>,
    pub countries: Vec<YearGroup>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_lookup_ignores_case_bom_and_whitespace() {
        assert_eq!(RawField::from_header("\u{feff}Name"), Some(RawField::Name));
        assert_eq!(RawField::from_header("  h100 EQUIVALENTS "), Some(RawField::Capacity));
        assert_eq!(RawField::from_header("Latitude"), None);
    }

    #[test]
    fn raw_row_from_fields_skips_unknown_headers() {
        let row = RawRow::from_fields([("Owner", "xAI"), ("Notes", "ignored"), ("Status", "Existing")]);
        assert_eq!(row.get(RawField::Owner), Some("xAI"));
        assert_eq!(row.get(RawField::Status), Some("Existing"));
        assert_eq!(row.get(RawField::Name), None);
    }

    #[test]
    fn planned_share_is_percentage_of_total() {
        let row = GroupRow {
            name: "A".to_string(),
            existing: 25.0,
            planned: 75.0,
            total: 100.0,
            systems: 2,
        };
        assert!((row.planned_share() - 75.0).abs() < 1e-12);
    }

    #[test]
    fn expansion_category_thresholds_are_strict() {
        use ExpansionCategory::*;
        assert_eq!(ExpansionCategory::classify(10.0, 101.0), Aggressive);
        assert_eq!(ExpansionCategory::classify(10.0, 100.0), Moderate);
        assert_eq!(ExpansionCategory::classify(10.0, 31.0), Moderate);
        assert_eq!(ExpansionCategory::classify(10.0, 30.0), Conservative);
        assert_eq!(ExpansionCategory::classify(0.0, 5.0), Aggressive);
        assert_eq!(ExpansionCategory::classify(0.0, 0.0), Conservative);
    }

    #[test]
    fn group_row_category_uses_existing_and_planned() {
        let row = GroupRow {
            name: "xAI".to_string(),
            existing: 200_000.0,
            planned: 2_221_223.0,
            total: 2_421_223.0,
            systems: 2,
        };
        assert_eq!(row.expansion_category(), ExpansionCategory::Aggressive);
        assert_eq!(row.expansion_category().display_name(), "Aggressive Expansion");
    }
}
