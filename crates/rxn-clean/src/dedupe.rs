//! Empty-string normalization and exact-duplicate row removal.

use std::collections::HashSet;

use polars::prelude::{DataFrame, DataType, NamedFrom, PolarsResult, Series};
use rxn_common::cell_key;
use tracing::debug;

use crate::frame::filter_rows;

/// Replace empty and whitespace-only strings with null.
pub fn normalize_empty_strings(df: &DataFrame) -> PolarsResult<DataFrame> {
    let mut out = df.clone();
    for column in df.get_columns() {
        if column.dtype() != &DataType::String {
            continue;
        }
        let values = column.str()?;
        if !values.into_iter().flatten().any(|v| v.trim().is_empty()) {
            continue;
        }
        let cleaned: Vec<Option<&str>> = values
            .into_iter()
            .map(|value| value.filter(|v| !v.trim().is_empty()))
            .collect();
        out.with_column(Series::new(column.name().clone(), cleaned))?;
    }
    Ok(out)
}

/// Drop rows equal to an earlier row in every column.
///
/// Null and NaN compare equal to each other; the first occurrence is kept
/// and row order is preserved.
pub fn drop_duplicate_rows(df: &DataFrame) -> PolarsResult<DataFrame> {
    if df.height() < 2 {
        return Ok(df.clone());
    }
    let mut seen = HashSet::with_capacity(df.height());
    let mut keep = Vec::with_capacity(df.height());
    for row in 0..df.height() {
        let key = df
            .get_columns()
            .iter()
            .map(|column| column.get(row).map(cell_key))
            .collect::<PolarsResult<Vec<Option<String>>>>()?;
        keep.push(seen.insert(key));
    }
    debug!(
        duplicates = keep.iter().filter(|k| !**k).count(),
        "duplicate rows dropped"
    );
    filter_rows(df, &keep)
}
