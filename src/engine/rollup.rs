//! Group-by-and-sum over owner or country.
//!
//! Keys are matched exactly: `"OpenAI,Microsoft"` and `"OpenAI"` are separate
//! groups. Groups live in a `Vec` in first-encountered order, with a map from
//! key to slot index; a stable descending sort then keeps ties in that order.

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::domain::{GroupKey, GroupRow, Installation, Status, YearGroup};

#[derive(Debug, Clone, Copy, Default)]
struct GroupAccumulator {
    existing: f64,
    planned: f64,
    total: f64,
    systems: usize,
}

impl GroupAccumulator {
    fn add(&mut self, installation: &Installation) {
        match installation.status {
            Status::Existing => self.existing += installation.capacity,
            Status::Planned => self.planned += installation.capacity,
            _ => {}
        }
        self.total += installation.capacity;
        self.systems += 1;
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct CapacityAccumulator {
    capacity: f64,
    systems: usize,
}

/// Slot-indexed grouping that remembers first-encountered order.
struct Slots<'a, A> {
    index: HashMap<&'a str, usize>,
    groups: Vec<(&'a str, A)>,
}

impl<'a, A: Default> Slots<'a, A> {
    fn new() -> Self {
        Self {
            index: HashMap::new(),
            groups: Vec::new(),
        }
    }

    fn slot(&mut self, key: &'a str) -> &mut A {
        let groups = &mut self.groups;
        let idx = *self.index.entry(key).or_insert_with(|| {
            groups.push((key, A::default()));
            groups.len() - 1
        });
        &mut self.groups[idx].1
    }

    fn into_groups(self) -> Vec<(&'a str, A)> {
        self.groups
    }
}

/// Roll installations up by `key`, sorted by total (largest first).
///
/// `limit` keeps only the top-N groups.
pub fn rollup<'a, I>(installations: I, key: GroupKey, limit: Option<usize>) -> Vec<GroupRow>
where
    I: IntoIterator<Item = &'a Installation>,
{
    let mut slots = Slots::<GroupAccumulator>::new();
    for installation in installations {
        slots.slot(key.of(installation)).add(installation);
    }

    let mut rows: Vec<GroupRow> = slots
        .into_groups()
        .into_iter()
        .map(|(name, acc)| GroupRow {
            name: name.to_string(),
            existing: acc.existing,
            planned: acc.planned,
            total: acc.total,
            systems: acc.systems,
        })
        .collect();

    rows.sort_by(|a, b| descending(a.total, b.total));
    if let Some(limit) = limit {
        rows.truncate(limit);
    }
    rows
}

/// Capacity and count per key, sorted by capacity (largest first), untruncated.
pub fn capacity_by<'a, I>(installations: I, key: GroupKey) -> Vec<YearGroup>
where
    I: IntoIterator<Item = &'a Installation>,
{
    let mut slots = Slots::<CapacityAccumulator>::new();
    for installation in installations {
        let acc = slots.slot(key.of(installation));
        acc.capacity += installation.capacity;
        acc.systems += 1;
    }

    let mut rows: Vec<YearGroup> = slots
        .into_groups()
        .into_iter()
        .map(|(name, acc)| YearGroup {
            name: name.to_string(),
            capacity: acc.capacity,
            systems: acc.systems,
        })
        .collect();

    rows.sort_by(|a, b| descending(a.capacity, b.capacity));
    rows
}

pub(crate) fn descending(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}
