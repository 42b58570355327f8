//! Removal of reactions that mention unresolvable names.

use std::collections::BTreeSet;

use polars::prelude::{DataFrame, DataType, PolarsResult};
use rxn_model::ColumnGroup;
use tracing::debug;

use crate::frame::{drop_columns, filter_rows, group_columns, present_mask};

/// Drop rows that carry an unresolved name or any value listed in `names`,
/// then drop the `unresolved_*` columns.
pub fn remove_unresolved_names(
    df: &DataFrame,
    names: &BTreeSet<String>,
) -> PolarsResult<DataFrame> {
    let unresolved: Vec<String> = group_columns(df, ColumnGroup::Unresolved)
        .into_iter()
        .map(|(_, name)| name)
        .collect();

    let mut keep = vec![true; df.height()];
    for name in &unresolved {
        let present = present_mask(df.column(name)?)?;
        for (slot, present) in keep.iter_mut().zip(present) {
            *slot &= !present;
        }
    }
    if !names.is_empty() {
        for column in df.get_columns() {
            if column.dtype() != &DataType::String {
                continue;
            }
            for (slot, value) in keep.iter_mut().zip(column.str()?) {
                if value.is_some_and(|v| names.contains(v)) {
                    *slot = false;
                }
            }
        }
    }

    debug!(
        listed = names.len(),
        removed = keep.iter().filter(|k| !**k).count(),
        "unresolved names removed"
    );
    let filtered = filter_rows(df, &keep)?;
    drop_columns(filtered, &unresolved)
}
