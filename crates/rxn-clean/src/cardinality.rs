//! Per-role column limits.

use polars::prelude::{DataFrame, PolarsResult};
use rxn_model::ColumnGroup;
use tracing::debug;

use crate::frame::{drop_columns, filter_rows, group_columns, present_mask};

/// Enforce at most `limit` columns for `group`.
///
/// Columns at index `limit` or beyond are spillover. A row with any value in
/// a spillover column holds more molecules of this role than allowed and is
/// removed; the spillover columns are then dropped from the schema.
pub fn enforce_max_columns(
    df: &DataFrame,
    group: ColumnGroup,
    limit: usize,
) -> PolarsResult<DataFrame> {
    let spillover: Vec<String> = group_columns(df, group)
        .into_iter()
        .filter(|(index, _)| *index >= limit)
        .map(|(_, name)| name)
        .collect();
    if spillover.is_empty() {
        return Ok(df.clone());
    }

    let mut keep = vec![true; df.height()];
    for name in &spillover {
        let present = present_mask(df.column(name)?)?;
        for (slot, present) in keep.iter_mut().zip(present) {
            *slot &= !present;
        }
    }
    let removed = keep.iter().filter(|k| !**k).count();
    debug!(
        group = %group,
        limit,
        spillover = spillover.len(),
        removed,
        "cardinality enforced"
    );
    let filtered = filter_rows(df, &keep)?;
    drop_columns(filtered, &spillover)
}
