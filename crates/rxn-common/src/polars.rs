//! Polars `AnyValue` and column helpers.
//!
//! The reaction tables are wide and sparse: most cells are null. These helpers
//! keep the null/empty distinction explicit so filters and dedupe keys never
//! confuse a missing molecule with an empty string.

use polars::prelude::{AnyValue, DataFrame, PolarsResult};

/// Converts a Polars `AnyValue` to a `String` representation.
///
/// Returns an empty string for `Null` and formats floats without trailing
/// zeros.
///
/// # Examples
///
/// ```
/// use polars::prelude::AnyValue;
/// use rxn_common::any_to_string;
///
/// assert_eq!(any_to_string(AnyValue::Null), "");
/// assert_eq!(any_to_string(AnyValue::Float64(65.0)), "65");
/// assert_eq!(any_to_string(AnyValue::String("CCO")), "CCO");
/// ```
pub fn any_to_string(value: AnyValue<'_>) -> String {
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
        other => other.to_string(),
    }
}

/// Formats a floating-point number as a string without trailing zeros.
///
/// # Examples
///
/// ```
/// use rxn_common::format_numeric;
///
/// assert_eq!(format_numeric(1.0), "1");
/// assert_eq!(format_numeric(10.0), "10");
/// assert_eq!(format_numeric(65.39), "65.39");
/// assert_eq!(format_numeric(0.0), "0");
/// ```
pub fn format_numeric(v: f64) -> String {
    let s = format!("{v}");
    if !s.contains('.') {
        return s;
    }
    let trimmed = s.trim_end_matches('0').trim_end_matches('.');
    if trimmed.is_empty() || trimmed == "-" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Null-aware key for a single cell.
///
/// `Null` and NaN map to `None` so that two missing cells compare equal
/// regardless of the column dtype.
pub fn cell_key(value: AnyValue<'_>) -> Option<String> {
    match value {
        AnyValue::Null => None,
        AnyValue::Float32(v) if v.is_nan() => None,
        AnyValue::Float64(v) if v.is_nan() => None,
        other => Some(any_to_string(other)),
    }
}

/// Reads a string column as owned optional values.
///
/// # Errors
///
/// Fails when the column is missing or is not a string column.
pub fn string_cells(df: &DataFrame, name: &str) -> PolarsResult<Vec<Option<String>>> {
    let values = df.column(name)?.str()?;
    Ok(values
        .into_iter()
        .map(|value| value.map(str::to_string))
        .collect())
}
