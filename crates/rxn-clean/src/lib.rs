//! Batch-level cleaning of flattened reaction tables.
//!
//! Stages run in a fixed order, each reading the complete output of the
//! previous one: merge, per-role cardinality, yield consistency,
//! unresolved-name removal, rarity filtering to a fixed point, and final
//! deduplication. [`Cleaner`] runs them all.

pub mod cardinality;
pub mod cleaner;
pub mod dedupe;
pub mod error;
pub mod flatten;
mod frame;
pub mod merge;
pub mod names;
pub mod rarity;
pub mod yields;

pub use cardinality::enforce_max_columns;
pub use cleaner::{CleanReport, CleanedTable, Cleaner, StageCount};
pub use dedupe::{drop_duplicate_rows, normalize_empty_strings};
pub use error::CleanError;
pub use flatten::{RoleWidths, flatten};
pub use merge::merge_batches;
pub use names::remove_unresolved_names;
pub use rarity::{
    MAX_RARITY_PASSES, PassOutcome, RarityPolicy, RarityReport, Verdict, frequency_index, rarity_pass,
    remove_rare_molecules,
};
pub use yields::filter_inconsistent_yields;
