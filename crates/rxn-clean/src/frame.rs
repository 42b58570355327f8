//! Column and row helpers shared by the cleaning stages.

use polars::prelude::{BooleanChunked, Column, DataFrame, DataType, NewChunkedArray, PolarsResult, Series};
use rxn_model::{ColumnGroup, column_sort_key, is_numeric_column, parse_column};

/// `(index, name)` of every column of a group, by ascending index.
pub(crate) fn group_columns(df: &DataFrame, group: ColumnGroup) -> Vec<(usize, String)> {
    let mut columns: Vec<(usize, String)> = df
        .get_column_names()
        .into_iter()
        .filter_map(|name| match parse_column(name.as_str()) {
            Some((found, index)) if found == group => Some((index, name.to_string())),
            _ => None,
        })
        .collect();
    columns.sort();
    columns
}

/// Column names in canonical table order.
pub(crate) fn sorted_names<'a>(names: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut names: Vec<String> = names.into_iter().map(str::to_string).collect();
    names.sort_by_cached_key(|name| column_sort_key(name));
    names.dedup();
    names
}

/// Dtype a column of the reaction table must have.
pub(crate) fn expected_dtype(name: &str) -> DataType {
    if is_numeric_column(name) {
        DataType::Float64
    } else {
        DataType::String
    }
}

/// All-null column with the dtype implied by its name.
pub(crate) fn null_column(name: &str, height: usize) -> Column {
    Series::full_null(name.into(), height, &expected_dtype(name)).into()
}

/// Per-row presence. NaN counts as missing in float columns.
pub(crate) fn present_mask(column: &Column) -> PolarsResult<Vec<bool>> {
    if column.dtype() == &DataType::Float64 {
        Ok(column
            .f64()?
            .into_iter()
            .map(|value| value.is_some_and(|v| !v.is_nan()))
            .collect())
    } else {
        Ok(column
            .as_materialized_series()
            .is_not_null()
            .into_iter()
            .map(|value| value.unwrap_or(false))
            .collect())
    }
}

/// Keep the rows whose mask entry is `true`.
pub(crate) fn filter_rows(df: &DataFrame, keep: &[bool]) -> PolarsResult<DataFrame> {
    if keep.iter().all(|&k| k) {
        return Ok(df.clone());
    }
    let mask = BooleanChunked::from_slice("keep".into(), keep);
    df.filter(&mask)
}

/// Drop columns by name.
pub(crate) fn drop_columns(mut df: DataFrame, names: &[String]) -> PolarsResult<DataFrame> {
    for name in names {
        df = df.drop(name)?;
    }
    Ok(df)
}
