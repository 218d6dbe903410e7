use std::collections::HashSet;

use trial_model::TableRow;

use super::count;

pub(super) fn duplicates(rows: &[&dyn TableRow], column: &str) -> u64 {
    let mut seen = HashSet::new();
    count(
        rows.iter()
            .filter_map(|row| row.field(column))
            .filter(|value| !seen.insert(value.clone()))
            .count(),
    )
}

pub(super) fn not_allowed(rows: &[&dyn TableRow], column: &str, allowed: &[String]) -> u64 {
    count(
        rows.iter()
            .filter(|row| {
                row.field(column)
                    .is_none_or(|value| !allowed.contains(&value.to_string()))
            })
            .count(),
    )
}
