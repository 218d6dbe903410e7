use trial_model::{FieldValue, TableRow};

use super::count;

pub(super) fn out_of_range(
    rows: &[&dyn TableRow],
    column: &str,
    min: Option<i64>,
    max: Option<i64>,
) -> u64 {
    count(
        rows.iter()
            .filter(|row| match row.field(column).and_then(|v| v.as_int()) {
                Some(v) => min.is_some_and(|min| v < min) || max.is_some_and(|max| v > max),
                None => true,
            })
            .count(),
    )
}

pub(super) fn missing(rows: &[&dyn TableRow], column: &str) -> u64 {
    count(
        rows.iter()
            .filter(|row| match row.field(column) {
                None => true,
                Some(FieldValue::Text(text)) => text.trim().is_empty(),
                Some(_) => false,
            })
            .count(),
    )
}
