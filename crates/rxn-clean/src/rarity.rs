//! Frequency-based filtering of solvent, agent, catalyst and reagent columns.
//!
//! Every pass reads one immutable snapshot and produces the next one. The
//! frequency index is rebuilt from the snapshot at the start of each pass, and
//! every column's verdicts are taken against that same index. Removing a row
//! lowers the counts of every molecule it held, so a single pass is not
//! enough in general; [`remove_rare_molecules`] repeats passes until one
//! changes nothing.

use std::collections::HashMap;

use polars::prelude::{DataFrame, NamedFrom, PolarsResult, Series};
use rxn_common::string_cells;
use rxn_model::{CleanOptions, OTHER_SENTINEL, parse_column};
use tracing::{debug, info};

use crate::error::CleanError;
use crate::frame::{filter_rows, sorted_names};

/// Passes allowed before the loop is declared non-convergent.
///
/// The last pass counted is the one that changes nothing, so a pass that only
/// rewrites values to the sentinel still uses up one pass of the budget.
pub const MAX_RARITY_PASSES: usize = 15;

/// What happens to a cell holding a molecule of a given frequency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Keep,
    /// Rewrite the cell to [`OTHER_SENTINEL`].
    Other,
    /// Remove the whole row.
    Remove,
}

/// Cutoffs used by a rarity pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RarityPolicy {
    pub primary: usize,
    pub secondary: usize,
    /// `Some(threshold)` rewrites molecules with a frequency in
    /// `[threshold, cutoff)` to the sentinel; `None` removes every row with a
    /// molecule below its cutoff.
    pub other_threshold: Option<usize>,
}

impl RarityPolicy {
    /// Policy for the given options, or `None` when rarity filtering is
    /// switched off.
    pub fn from_options(options: &CleanOptions) -> Option<Self> {
        options.rarity_enabled().then(|| Self {
            primary: options.min_frequency_of_occurance_primary,
            secondary: options.min_frequency_of_occurance_secondary,
            other_threshold: options
                .include_other_category
                .then_some(options.map_rare_to_other_threshold),
        })
    }

    /// Cutoff for a column index within its role.
    pub fn cutoff(&self, index: usize) -> usize {
        if index == 0 {
            self.primary
        } else {
            self.secondary
        }
    }

    pub fn verdict(&self, frequency: usize, index: usize) -> Verdict {
        let cutoff = self.cutoff(index);
        match self.other_threshold {
            Some(threshold) if frequency < threshold => Verdict::Remove,
            Some(_) if frequency < cutoff => Verdict::Other,
            Some(_) => Verdict::Keep,
            None if frequency < cutoff => Verdict::Remove,
            None => Verdict::Keep,
        }
    }
}

/// Result of a single pass.
#[derive(Debug, Clone)]
pub struct PassOutcome {
    pub table: DataFrame,
    pub rows_removed: usize,
    /// Cells rewritten to the sentinel in rows that survived the pass.
    pub values_rewritten: usize,
}

impl PassOutcome {
    pub fn is_fixed_point(&self) -> bool {
        self.rows_removed == 0 && self.values_rewritten == 0
    }
}

/// Totals over a full convergence loop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RarityReport {
    /// Passes run, including the final one that changed nothing.
    pub passes: usize,
    pub rows_removed: usize,
    pub values_rewritten: usize,
}

/// `(index, name)` of every rarity-filtered column, in table order.
fn rarity_columns(df: &DataFrame) -> Vec<(usize, String)> {
    let names = sorted_names(df.get_column_names().into_iter().map(|name| name.as_str()));
    names
        .into_iter()
        .filter_map(|name| match parse_column(&name) {
            Some((group, index)) if group.is_rarity_group() => Some((index, name)),
            _ => None,
        })
        .collect()
}

/// Occurrences of each value across all rarity-filtered columns together.
///
/// A value counts once per cell it occupies.
pub fn frequency_index(df: &DataFrame) -> PolarsResult<HashMap<String, usize>> {
    let mut counts = HashMap::new();
    for (_, name) in rarity_columns(df) {
        for value in df.column(&name)?.str()?.into_iter().flatten() {
            *counts.entry(value.to_string()).or_insert(0) += 1;
        }
    }
    Ok(counts)
}

/// Run one pass over a snapshot.
pub fn rarity_pass(df: &DataFrame, policy: &RarityPolicy) -> PolarsResult<PassOutcome> {
    let counts = frequency_index(df)?;
    let height = df.height();
    let mut keep = vec![true; height];
    let mut rewrites: Vec<(String, Vec<Option<String>>, Vec<usize>)> = Vec::new();

    for (index, name) in rarity_columns(df) {
        let mut cells = string_cells(df, &name)?;
        let mut rewritten = Vec::new();
        for (row, cell) in cells.iter_mut().enumerate() {
            let Some(value) = cell.as_deref() else {
                continue;
            };
            if value == OTHER_SENTINEL {
                continue;
            }
            let frequency = counts.get(value).copied().unwrap_or(0);
            match policy.verdict(frequency, index) {
                Verdict::Keep => {}
                Verdict::Other => {
                    *cell = Some(OTHER_SENTINEL.to_string());
                    rewritten.push(row);
                }
                Verdict::Remove => keep[row] = false,
            }
        }
        if !rewritten.is_empty() {
            rewrites.push((name, cells, rewritten));
        }
    }

    let mut table = df.clone();
    let mut values_rewritten = 0;
    for (name, cells, rows) in rewrites {
        values_rewritten += rows.iter().filter(|&&row| keep[row]).count();
        table.with_column(Series::new(name.as_str().into(), cells))?;
    }
    let table = filter_rows(&table, &keep)?;
    let rows_removed = height - table.height();
    Ok(PassOutcome {
        table,
        rows_removed,
        values_rewritten,
    })
}

/// Repeat rarity passes until one leaves the table unchanged.
///
/// # Errors
///
/// Returns [`CleanError::ConvergenceTimeout`] when more than
/// [`MAX_RARITY_PASSES`] passes would be needed. No partially filtered table
/// is returned in that case.
pub fn remove_rare_molecules(
    df: &DataFrame,
    policy: &RarityPolicy,
) -> Result<(DataFrame, RarityReport), CleanError> {
    let mut report = RarityReport::default();
    let mut snapshot = df.clone();
    loop {
        if report.passes == MAX_RARITY_PASSES {
            return Err(CleanError::ConvergenceTimeout {
                passes: MAX_RARITY_PASSES,
            });
        }
        report.passes += 1;
        let outcome = rarity_pass(&snapshot, policy)?;
        debug!(
            pass = report.passes,
            rows = outcome.table.height(),
            removed = outcome.rows_removed,
            rewritten = outcome.values_rewritten,
            "rarity pass"
        );
        let done = outcome.is_fixed_point();
        report.rows_removed += outcome.rows_removed;
        report.values_rewritten += outcome.values_rewritten;
        snapshot = outcome.table;
        if done {
            break;
        }
    }
    info!(
        passes = report.passes,
        removed = report.rows_removed,
        rewritten = report.values_rewritten,
        "rarity filter converged"
    );
    Ok((snapshot, report))
}

#[cfg(test)]
mod tests {
    use super::*;

    const POLICY_A: RarityPolicy = RarityPolicy {
        primary: 15,
        secondary: 10,
        other_threshold: Some(3),
    };

    #[test]
    fn verdicts_with_other_category() {
        assert_eq!(POLICY_A.verdict(2, 0), Verdict::Remove);
        assert_eq!(POLICY_A.verdict(3, 0), Verdict::Other);
        assert_eq!(POLICY_A.verdict(14, 0), Verdict::Other);
        assert_eq!(POLICY_A.verdict(15, 0), Verdict::Keep);
        assert_eq!(POLICY_A.verdict(10, 1), Verdict::Keep);
    }

    #[test]
    fn verdicts_without_other_category() {
        let policy = RarityPolicy {
            other_threshold: None,
            ..POLICY_A
        };
        assert_eq!(policy.verdict(3, 0), Verdict::Remove);
        assert_eq!(policy.verdict(14, 0), Verdict::Remove);
        assert_eq!(policy.verdict(15, 0), Verdict::Keep);
        assert_eq!(policy.verdict(9, 2), Verdict::Remove);
    }

    #[test]
    fn no_policy_when_both_cutoffs_are_zero() {
        let options = CleanOptions {
            min_frequency_of_occurance_primary: 0,
            min_frequency_of_occurance_secondary: 0,
            ..CleanOptions::default()
        };
        assert_eq!(RarityPolicy::from_options(&options), None);

        let policy = RarityPolicy::from_options(&CleanOptions::default()).expect("enabled");
        assert_eq!(policy.cutoff(0), 15);
        assert_eq!(policy.other_threshold, Some(3));
    }
}
