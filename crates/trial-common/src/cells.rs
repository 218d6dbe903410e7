//! Polars `AnyValue` conversions.
//!
//! Source extracts arrive with inferred column types, so the same logical field
//! may be an integer in one file and a string in another. These functions
//! normalize a single cell into the value the caller expects.

use polars::prelude::*;

/// Converts a Polars `AnyValue` to a `String` representation.
///
/// Returns an empty string for `Null`, and formats floats without unnecessary
/// trailing zeros.
///
/// # Examples
///
/// ```
/// use polars::prelude::AnyValue;
/// use trial_common::cell_to_string;
///
/// assert_eq!(cell_to_string(AnyValue::Null), "");
/// assert_eq!(cell_to_string(AnyValue::Int64(249)), "249");
/// assert_eq!(cell_to_string(AnyValue::String("F")), "F");
/// ```
pub fn cell_to_string(value: AnyValue<'_>) -> String {
    match value {
        AnyValue::Null => String::new(),
        AnyValue::Int8(v) => v.to_string(),
        AnyValue::Int16(v) => v.to_string(),
        AnyValue::Int32(v) => v.to_string(),
        AnyValue::Int64(v) => v.to_string(),
        AnyValue::UInt8(v) => v.to_string(),
        AnyValue::UInt16(v) => v.to_string(),
        AnyValue::UInt32(v) => v.to_string(),
        AnyValue::UInt64(v) => v.to_string(),
        AnyValue::Float32(v) => format_numeric(f64::from(v)),
        AnyValue::Float64(v) => format_numeric(v),
        AnyValue::String(s) => s.to_string(),
        AnyValue::StringOwned(s) => s.to_string(),
        AnyValue::Boolean(b) => b.to_string(),
        other => {
            let s = other.to_string();
            if s.starts_with('"') && s.ends_with('"') && s.len() >= 2 {
                s[1..s.len() - 1].to_string()
            } else {
                s
            }
        }
    }
}

/// Converts a cell to a trimmed `String`, returning `None` when it is empty.
pub fn cell_to_string_non_empty(value: AnyValue<'_>) -> Option<String> {
    let s = cell_to_string(value);
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Formats a float without trailing zeros after the decimal point.
///
/// Integer-valued floats like 40.0 are formatted as "40".
pub fn format_numeric(v: f64) -> String {
    let s = format!("{v}");
    if s.contains('.') {
        let trimmed = s.trim_end_matches('0').trim_end_matches('.');
        if trimmed.is_empty() {
            "0".to_string()
        } else {
            trimmed.to_string()
        }
    } else {
        s
    }
}

/// Converts a cell to `i64`, returning `None` for null or non-integer values.
///
/// Floats are accepted only when they carry no fractional part, so a subject
/// key read as `249.0` still joins with `249`.
pub fn cell_to_i64(value: AnyValue<'_>) -> Option<i64> {
    match value {
        AnyValue::Null => None,
        AnyValue::Int8(v) => Some(i64::from(v)),
        AnyValue::Int16(v) => Some(i64::from(v)),
        AnyValue::Int32(v) => Some(i64::from(v)),
        AnyValue::Int64(v) => Some(v),
        AnyValue::UInt8(v) => Some(i64::from(v)),
        AnyValue::UInt16(v) => Some(i64::from(v)),
        AnyValue::UInt32(v) => Some(i64::from(v)),
        AnyValue::UInt64(v) => i64::try_from(v).ok(),
        AnyValue::Float32(v) => whole_float(f64::from(v)),
        AnyValue::Float64(v) => whole_float(v),
        AnyValue::String(s) => parse_i64(s),
        AnyValue::StringOwned(s) => parse_i64(&s),
        _ => None,
    }
}

fn whole_float(v: f64) -> Option<i64> {
    if v.is_finite() && v.fract() == 0.0 {
        Some(v as i64)
    } else {
        None
    }
}

/// Parses a string as `i64`, returning `None` for invalid or empty strings.
pub fn parse_i64(value: &str) -> Option<i64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<i64>().ok()
}

/// Extracts the calendar year from the start of a date or datetime string.
///
/// Accepts a bare four-digit year (`"1944"`), an ISO date (`"2075-03-13"`) or
/// a datetime (`"2075-03-13 00:00:00"`). Anything else yields `None`.
pub fn leading_year(value: &str) -> Option<i32> {
    let trimmed = value.trim();
    let digits: String = trimmed.chars().take_while(char::is_ascii_digit).collect();
    if digits.len() != 4 {
        return None;
    }
    match trimmed[digits.len()..].chars().next() {
        None | Some('-') | Some('/') | Some('T') | Some(' ') => digits.parse().ok(),
        Some(_) => None,
    }
}
