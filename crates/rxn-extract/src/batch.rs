//! Parallel resolution of a batch of records.

use std::any::Any;
use std::collections::BTreeSet;
use std::panic::{AssertUnwindSafe, catch_unwind};

use rayon::prelude::*;
use rxn_model::{RawReactionRecord, ResolvedReaction};
use tracing::{info, warn};

use crate::canonical::Canonicalizer;
use crate::error::ResolveError;
use crate::resolver::RoleResolver;

/// A record that could not be resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordFailure {
    /// Position of the record in the input batch.
    pub index: usize,
    pub reaction_id: Option<String>,
    pub error: ResolveError,
}

/// Resolved reactions of one batch, in source order.
#[derive(Debug, Clone, Default)]
pub struct BatchResolution {
    pub resolved: Vec<ResolvedReaction>,
    pub failures: Vec<RecordFailure>,
    /// Every unresolved name seen in the batch, sorted.
    pub unresolved_names: Vec<String>,
}

impl BatchResolution {
    pub fn record_count(&self) -> usize {
        self.resolved.len() + self.failures.len()
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Resolve one record, turning a panic inside the canonicalizer into a
/// record failure.
fn resolve_isolated<C: Canonicalizer>(
    resolver: &RoleResolver<C>,
    record: &RawReactionRecord,
) -> Result<ResolvedReaction, ResolveError> {
    catch_unwind(AssertUnwindSafe(|| resolver.resolve(record))).unwrap_or_else(|payload| {
        Err(ResolveError::CanonicalizerPanic {
            message: panic_message(payload.as_ref()),
        })
    })
}

/// Resolve records in parallel.
///
/// Failures are collected per record and never abort the batch.
pub fn resolve_batch<C: Canonicalizer>(
    records: &[RawReactionRecord],
    resolver: &RoleResolver<C>,
) -> BatchResolution {
    let outcomes: Vec<Result<ResolvedReaction, ResolveError>> = records
        .par_iter()
        .map(|record| resolve_isolated(resolver, record))
        .collect();

    let mut batch = BatchResolution::default();
    let mut names = BTreeSet::new();
    for (index, (record, outcome)) in records.iter().zip(outcomes).enumerate() {
        match outcome {
            Ok(reaction) => {
                names.extend(reaction.unresolved_names.iter().cloned());
                batch.resolved.push(reaction);
            }
            Err(error) => {
                warn!(
                    index,
                    reaction_id = record.reaction_id.as_deref().unwrap_or("-"),
                    error = %error,
                    "record skipped"
                );
                batch.failures.push(RecordFailure {
                    index,
                    reaction_id: record.reaction_id.clone(),
                    error,
                });
            }
        }
    }
    batch.unresolved_names = names.into_iter().collect();
    info!(
        records = records.len(),
        resolved = batch.resolved.len(),
        failed = batch.failures.len(),
        unresolved_names = batch.unresolved_names.len(),
        "batch resolved"
    );
    batch
}
