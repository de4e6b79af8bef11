//! The immutable collection of normalized installations.
//!
//! A `Dataset` is built once per load and never mutated; if the source data
//! changes, build a new one. Relationships (by owner, country, year) are not
//! stored: the engine computes them on demand.

use serde_json::Value;

use crate::domain::{Installation, RawField, RawRow};
use crate::error::AppError;
use crate::normalize::{YearPolicy, normalize_with_policy};

#[derive(Debug, Clone, Default)]
pub struct Dataset {
    installations: Vec<Installation>,
    rows_read: usize,
}

impl Dataset {
    /// Normalize raw rows with the default year policy.
    pub fn from_rows(rows: &[RawRow]) -> Self {
        Self::from_rows_with_policy(rows, &YearPolicy::default())
    }

    pub fn from_rows_with_policy(rows: &[RawRow], policy: &YearPolicy) -> Self {
        let installations = normalize_with_policy(rows, policy);
        let dataset = Self {
            installations,
            rows_read: rows.len(),
        };
        tracing::info!(
            rows_read = dataset.rows_read,
            rows_kept = dataset.len(),
            rows_dropped = dataset.rows_dropped(),
            "dataset normalized"
        );
        dataset
    }

    /// Build from a JSON payload that must be an array of objects.
    ///
    /// This is the only construction path that can fail: anything other than an
    /// array of row-like mappings is a contract violation.
    pub fn from_json(value: &Value, policy: &YearPolicy) -> Result<Self, AppError> {
        let rows = rows_from_json(value)?;
        Ok(Self::from_rows_with_policy(&rows, policy))
    }

    pub fn installations(&self) -> &[Installation] {
        &self.installations
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Installation> {
        self.installations.iter()
    }

    pub fn len(&self) -> usize {
        self.installations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.installations.is_empty()
    }

    /// Number of raw rows supplied at construction.
    pub fn rows_read(&self) -> usize {
        self.rows_read
    }

    /// Rows discarded for lacking positive capacity.
    pub fn rows_dropped(&self) -> usize {
        self.rows_read.saturating_sub(self.installations.len())
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Installation;
    type IntoIter = std::slice::Iter<'a, Installation>;

    fn into_iter(self) -> Self::IntoIter {
        self.installations.iter()
    }
}

/// Convert a JSON array of objects into raw rows.
///
/// Scalar values are coerced to strings (`100000` -> `"100000"`); `null` is
/// treated as absent. Nested arrays/objects inside a row are ignored.
pub fn rows_from_json(value: &Value) -> Result<Vec<RawRow>, AppError> {
    let items = value.as_array().ok_or_else(|| {
        AppError::invalid_input(format!("expected an array of rows, got {}", json_kind(value)))
    })?;

    items
        .iter()
        .enumerate()
        .map(|(idx, item)| {
            let object = item.as_object().ok_or_else(|| {
                AppError::invalid_input(format!(
                    "row {idx} is {}, expected an object",
                    json_kind(item)
                ))
            })?;

            let mut row = RawRow::default();
            for (key, value) in object {
                let Some(field) = RawField::from_header(key) else { continue };
                let text = match value {
                    Value::String(s) => s.clone(),
                    Value::Number(n) => n.to_string(),
                    Value::Bool(b) => b.to_string(),
                    Value::Null | Value::Array(_) | Value::Object(_) => continue,
                };
                row.set(field, text);
            }
            Ok(row)
        })
        .collect()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn from_json_coerces_scalars() {
        let value = json!([
            {"Name": "A", "Status": "Existing", "H100 equivalents": 200000, "Country": "USA", "Notes": [1, 2]},
            {"Name": "B", "Status": "Planned", "H100 equivalents": "50,000", "Owner": null}
        ]);
        let dataset = Dataset::from_json(&value, &YearPolicy::default()).unwrap();
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.installations()[0].capacity, 200_000.0);
        assert_eq!(dataset.installations()[1].capacity, 50_000.0);
        assert_eq!(dataset.installations()[1].owner, "");
    }

    #[test]
    fn from_json_rejects_non_array() {
        let err = Dataset::from_json(&json!({"Name": "A"}), &YearPolicy::default()).unwrap_err();
        assert_eq!(err.exit_code(), 3);
        assert!(err.to_string().contains("an object"));
    }

    #[test]
    fn from_json_rejects_non_object_rows() {
        let err = Dataset::from_json(&json!([{"Name": "A"}, "oops"]), &YearPolicy::default()).unwrap_err();
        assert!(err.to_string().contains("row 1"));
    }

    #[test]
    fn counts_dropped_rows() {
        let rows = vec![
            RawRow::default().with(RawField::Capacity, "10"),
            RawRow::default().with(RawField::Capacity, "0"),
            RawRow::default(),
        ];
        let dataset = Dataset::from_rows(&rows);
        assert_eq!(dataset.rows_read(), 3);
        assert_eq!(dataset.len(), 1);
        assert_eq!(dataset.rows_dropped(), 2);
    }

    #[test]
    fn empty_json_array_is_valid() {
        let dataset = Dataset::from_json(&json!([]), &YearPolicy::default()).unwrap();
        assert!(dataset.is_empty());
    }
}
