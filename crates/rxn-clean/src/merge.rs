//! Stacking flattened batches into one table.

use polars::prelude::{Column, DataFrame, PolarsResult};
use tracing::debug;

use crate::frame::{expected_dtype, null_column, sorted_names};

/// Bring a batch onto the merged schema: missing columns become all-null,
/// present ones are cast to the table dtype.
fn align(df: &DataFrame, names: &[String]) -> PolarsResult<DataFrame> {
    let height = df.height();
    let columns = names
        .iter()
        .map(|name| match df.column(name) {
            Ok(column) => column.cast(&expected_dtype(name)),
            Err(_) => Ok(null_column(name, height)),
        })
        .collect::<PolarsResult<Vec<Column>>>()?;
    DataFrame::new(columns)
}

/// Concatenate batches whose column sets may differ.
///
/// The result holds the union of all columns in canonical table order.
pub fn merge_batches(batches: Vec<DataFrame>) -> PolarsResult<DataFrame> {
    let names = sorted_names(
        batches
            .iter()
            .flat_map(|df| df.get_column_names().into_iter().map(|name| name.as_str())),
    );
    let mut merged: Option<DataFrame> = None;
    for (index, batch) in batches.iter().enumerate() {
        let aligned = align(batch, &names)?;
        debug!(batch = index, rows = aligned.height(), "batch aligned");
        match merged.as_mut() {
            Some(existing) => {
                existing.vstack_mut(&aligned)?;
            }
            None => merged = Some(aligned),
        }
    }
    Ok(merged.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use polars::prelude::{DataType, NamedFrom, Series};

    use super::*;

    fn frame(columns: Vec<Series>) -> DataFrame {
        DataFrame::new(columns.into_iter().map(Column::from).collect()).unwrap()
    }

    #[test]
    fn unions_schemas_in_table_order() {
        let first = frame(vec![
            Series::new("product_0".into(), vec![Some("CC")]),
            Series::new("reactant_0".into(), vec![Some("C")]),
            Series::new("yield_0".into(), vec![Some(50.0)]),
        ]);
        let second = frame(vec![
            Series::new("reactant_0".into(), vec![Some("N"), Some("O")]),
            Series::new("solvent_0".into(), vec![Some("O"), None]),
            Series::new("reactant_1".into(), vec![None::<&str>, Some("S")]),
        ]);

        let merged = merge_batches(vec![first, second]).unwrap();

        let names: Vec<&str> = merged
            .get_column_names()
            .into_iter()
            .map(|n| n.as_str())
            .collect();
        assert_eq!(
            names,
            vec!["reactant_0", "reactant_1", "solvent_0", "product_0", "yield_0"]
        );
        assert_eq!(merged.height(), 3);
        assert_eq!(merged.column("yield_0").unwrap().dtype(), &DataType::Float64);
        assert_eq!(merged.column("solvent_0").unwrap().null_count(), 2);
        assert_eq!(merged.column("product_0").unwrap().str().unwrap().get(0), Some("CC"));
    }

    #[test]
    fn empty_input_gives_empty_frame() {
        let merged = merge_batches(Vec::new()).unwrap();
        assert_eq!(merged.height(), 0);
        assert_eq!(merged.width(), 0);
    }
}
