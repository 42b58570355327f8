//! Orchestration of the cleaning stages.

use std::time::Instant;

use polars::prelude::{DataFrame, PolarsResult};
use rxn_model::{CleanOptions, ColumnGroup};
use tracing::{debug, info, info_span};

use crate::cardinality::enforce_max_columns;
use crate::dedupe::{drop_duplicate_rows, normalize_empty_strings};
use crate::error::CleanError;
use crate::merge::merge_batches;
use crate::names::remove_unresolved_names;
use crate::rarity::{RarityPolicy, RarityReport, remove_rare_molecules};
use crate::yields::filter_inconsistent_yields;

/// Rows left after a stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageCount {
    pub stage: &'static str,
    pub rows: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanReport {
    pub stages: Vec<StageCount>,
    pub rarity: RarityReport,
}

impl CleanReport {
    fn record(&mut self, stage: &'static str, df: &DataFrame) {
        info!(stage, rows = df.height(), "stage complete");
        self.stages.push(StageCount {
            stage,
            rows: df.height(),
        });
    }

    /// Rows entering the first stage.
    pub fn input_rows(&self) -> usize {
        self.stages.first().map_or(0, |stage| stage.rows)
    }

    /// Rows in the final table.
    pub fn output_rows(&self) -> usize {
        self.stages.last().map_or(0, |stage| stage.rows)
    }
}

#[derive(Debug, Clone)]
pub struct CleanedTable {
    pub table: DataFrame,
    pub report: CleanReport,
}

/// Runs every cleaning stage in order over a set of flattened batches.
#[derive(Debug, Clone)]
pub struct Cleaner {
    options: CleanOptions,
}

impl Cleaner {
    /// # Errors
    ///
    /// Rejects options that violate the labelling or threshold contract
    /// before any table is touched.
    pub fn new(options: CleanOptions) -> Result<Self, CleanError> {
        options.validate()?;
        Ok(Self { options })
    }

    pub fn options(&self) -> &CleanOptions {
        &self.options
    }

    pub fn clean(&self, batches: Vec<DataFrame>) -> Result<CleanedTable, CleanError> {
        let start = Instant::now();
        let mut report = CleanReport::default();

        let merged = info_span!("merge", batches = batches.len())
            .in_scope(|| merge_batches(batches).and_then(|df| normalize_empty_strings(&df)))?;
        report.record("merge", &merged);

        let mut table = info_span!("cardinality").in_scope(|| self.enforce_limits(&merged))?;
        report.record("cardinality", &table);

        if self.options.consistent_yield {
            table = info_span!("yields").in_scope(|| filter_inconsistent_yields(&table))?;
            report.record("consistent_yield", &table);
        }

        if self.options.remove_unresolved {
            table = info_span!("unresolved").in_scope(|| {
                remove_unresolved_names(&table, &self.options.molecules_to_remove)
            })?;
            report.record("unresolved_names", &table);
        }

        if let Some(policy) = RarityPolicy::from_options(&self.options) {
            let (filtered, rarity) =
                info_span!("rarity").in_scope(|| remove_rare_molecules(&table, &policy))?;
            table = filtered;
            report.rarity = rarity;
            report.record("rarity", &table);
        }

        let table = info_span!("dedupe").in_scope(|| {
            normalize_empty_strings(&table).and_then(|df| drop_duplicate_rows(&df))
        })?;
        report.record("dedupe", &table);

        debug!(
            input_rows = report.input_rows(),
            output_rows = report.output_rows(),
            duration_ms = start.elapsed().as_millis(),
            "cleaning complete"
        );
        Ok(CleanedTable { table, report })
    }

    fn enforce_limits(&self, df: &DataFrame) -> PolarsResult<DataFrame> {
        let mut table = df.clone();
        for group in ColumnGroup::CARDINALITY_ORDER {
            if let Some(limit) = self.options.limits.limit(group) {
                table = enforce_max_columns(&table, group, limit)?;
            }
        }
        Ok(table)
    }
}
