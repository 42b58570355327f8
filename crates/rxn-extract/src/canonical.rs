//! The canonicalization boundary.
//!
//! Role resolution never inspects structures itself; it asks a
//! [`Canonicalizer`] for a canonical string or a failure. Implementations
//! must be deterministic and free of side effects, since records are
//! resolved in parallel.

use std::collections::HashMap;

use crate::error::CanonicalizeError;
use crate::smiles;

/// Maps a raw molecule identifier to its canonical structure string.
pub trait Canonicalizer: Send + Sync {
    /// # Errors
    ///
    /// Returns a [`CanonicalizeError`] when the identifier is not a
    /// structure (a free-text name, or malformed syntax).
    fn canonicalize(&self, identifier: &str, is_mapped: bool) -> Result<String, CanonicalizeError>;
}

impl<C: Canonicalizer + ?Sized> Canonicalizer for &C {
    fn canonicalize(&self, identifier: &str, is_mapped: bool) -> Result<String, CanonicalizeError> {
        (**self).canonicalize(identifier, is_mapped)
    }
}

impl<C: Canonicalizer + ?Sized> Canonicalizer for Box<C> {
    fn canonicalize(&self, identifier: &str, is_mapped: bool) -> Result<String, CanonicalizeError> {
        (**self).canonicalize(identifier, is_mapped)
    }
}

/// Syntactic SMILES normalizer.
///
/// Accepts anything that scans as SMILES, trims surrounding whitespace and
/// drops atom-map numbers from mapped input. It does not reorder atoms, so
/// two spellings of one molecule stay distinct unless a lookup table maps
/// them together (see [`LookupCanonicalizer`]).
#[derive(Debug, Clone, Copy, Default)]
pub struct SmilesSyntaxCanonicalizer;

impl Canonicalizer for SmilesSyntaxCanonicalizer {
    fn canonicalize(&self, identifier: &str, is_mapped: bool) -> Result<String, CanonicalizeError> {
        let trimmed = identifier.trim();
        if trimmed.is_empty() {
            return Err(CanonicalizeError::Empty);
        }
        if trimmed.chars().any(char::is_whitespace) {
            return Err(CanonicalizeError::Whitespace {
                identifier: trimmed.to_string(),
            });
        }
        smiles::validate(trimmed)?;
        if is_mapped {
            Ok(smiles::strip_atom_maps(trimmed))
        } else {
            Ok(trimmed.to_string())
        }
    }
}

/// Precomputed `raw -> canonical` table in front of another canonicalizer.
///
/// Tables exported from an external toolkit let the pipeline reproduce true
/// canonical forms without linking that toolkit.
#[derive(Debug, Clone, Default)]
pub struct LookupCanonicalizer<C> {
    table: HashMap<String, String>,
    fallback: C,
}

impl<C: Canonicalizer> LookupCanonicalizer<C> {
    pub fn new(table: HashMap<String, String>, fallback: C) -> Self {
        Self { table, fallback }
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

impl<C: Canonicalizer> Canonicalizer for LookupCanonicalizer<C> {
    fn canonicalize(&self, identifier: &str, is_mapped: bool) -> Result<String, CanonicalizeError> {
        match self.table.get(identifier) {
            Some(canonical) => Ok(canonical.clone()),
            None => self.fallback.canonicalize(identifier, is_mapped),
        }
    }
}
