//! Yield consistency.

use polars::prelude::{DataFrame, PolarsResult};
use rxn_model::ColumnGroup;
use tracing::debug;

use crate::frame::{filter_rows, group_columns};

const MAX_YIELD: f64 = 100.0;

/// Drop rows whose yields are out of range or add up to more than 100%.
///
/// A missing or NaN yield is always acceptable and adds nothing to the sum.
pub fn filter_inconsistent_yields(df: &DataFrame) -> PolarsResult<DataFrame> {
    let columns = group_columns(df, ColumnGroup::Yield);
    if columns.is_empty() {
        return Ok(df.clone());
    }

    let height = df.height();
    let mut in_range = vec![true; height];
    let mut sums = vec![0.0_f64; height];
    for (_, name) in &columns {
        let values = df.column(name)?.f64()?;
        for (row, value) in values.into_iter().enumerate() {
            let Some(value) = value.filter(|v| !v.is_nan()) else {
                continue;
            };
            if !(0.0..=MAX_YIELD).contains(&value) {
                in_range[row] = false;
            }
            sums[row] += value;
        }
    }

    let keep: Vec<bool> = in_range
        .iter()
        .zip(&sums)
        .map(|(&ok, &sum)| ok && sum <= MAX_YIELD)
        .collect();
    debug!(
        removed = keep.iter().filter(|k| !**k).count(),
        "yield consistency checked"
    );
    filter_rows(df, &keep)
}

#[cfg(test)]
mod tests {
    use polars::prelude::{Column, NamedFrom, Series};

    use super::*;

    #[test]
    fn range_and_sum_are_both_enforced() {
        let df = DataFrame::new(vec![
            Column::from(Series::new(
                "product_0".into(),
                vec!["ok", "neg", "high", "sum", "nan", "null"],
            )),
            Column::from(Series::new(
                "yield_0".into(),
                vec![Some(40.0), Some(-1.0), Some(100.5), Some(60.0), Some(f64::NAN), None],
            )),
            Column::from(Series::new(
                "yield_1".into(),
                vec![Some(60.0), None, None, Some(41.0), Some(99.0), None],
            )),
        ])
        .unwrap();

        let out = filter_inconsistent_yields(&df).unwrap();
        let kept: Vec<Option<&str>> = out
            .column("product_0")
            .unwrap()
            .str()
            .unwrap()
            .into_iter()
            .collect();
        assert_eq!(kept, vec![Some("ok"), Some("nan"), Some("null")]);
    }
}
