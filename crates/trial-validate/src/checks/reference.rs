//! Cross-table checks.

use std::collections::{HashMap, HashSet};

use trial_model::{FieldValue, TableRow};

use super::count;

pub(super) fn dangling(
    rows: &[&dyn TableRow],
    column: &str,
    referenced: &[&dyn TableRow],
    referenced_column: &str,
) -> u64 {
    let keys: HashSet<FieldValue> = referenced
        .iter()
        .filter_map(|row| row.field(referenced_column))
        .collect();
    count(
        rows.iter()
            .filter(|row| row.field(column).is_none_or(|value| !keys.contains(&value)))
            .count(),
    )
}

pub(super) fn before_reference(
    rows: &[&dyn TableRow],
    column: &str,
    key: &str,
    referenced: &[&dyn TableRow],
    referenced_key: &str,
    referenced_column: &str,
) -> u64 {
    let mut reference_dates = HashMap::new();
    for row in referenced {
        if let (Some(k), Some(date)) = (
            row.field(referenced_key),
            row.field(referenced_column).and_then(|v| v.as_date()),
        ) {
            reference_dates.entry(k).or_insert(date);
        }
    }

    count(
        rows.iter()
            .filter(|row| {
                let Some(reference) = row.field(key).and_then(|k| reference_dates.get(&k)) else {
                    return false;
                };
                match row.field(column).and_then(|v| v.as_date()) {
                    Some(date) => date < *reference,
                    None => true,
                }
            })
            .count(),
    )
}
