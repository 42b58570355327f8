//! Per-reaction extraction: turns a loosely typed [`RawReactionRecord`] into a
//! [`ResolvedReaction`] with every molecule assigned to exactly one role.
//!
//! [`RawReactionRecord`]: rxn_model::RawReactionRecord
//! [`ResolvedReaction`]: rxn_model::ResolvedReaction

pub mod batch;
pub mod canonical;
pub mod conditions;
pub mod error;
pub mod reaction_string;
pub mod reference;
pub mod resolver;
pub mod roles;
pub mod smiles;
pub mod yields;

pub use batch::{BatchResolution, RecordFailure, resolve_batch};
pub use canonical::{Canonicalizer, LookupCanonicalizer, SmilesSyntaxCanonicalizer};
pub use conditions::{duration_hours, temperature_celsius};
pub use error::{CanonicalizeError, ReferenceError, ResolveError};
pub use reaction_string::ReactionString;
pub use reference::ReferenceData;
pub use resolver::RoleResolver;
pub use roles::{DeclaredInputs, InputClass, MergedRoles, classify, merge_to_agents};
pub use yields::{MatchResult, match_yield_with_product};
