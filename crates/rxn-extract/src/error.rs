//! Error types for reaction extraction.

use thiserror::Error;

/// Why an identifier could not be turned into a structure string.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CanonicalizeError {
    #[error("empty identifier")]
    Empty,

    /// Free text such as `"ice water"`.
    #[error("identifier '{identifier}' contains whitespace")]
    Whitespace { identifier: String },

    #[error("identifier '{identifier}' has unexpected character '{character}' at {position}")]
    UnexpectedCharacter {
        identifier: String,
        character: char,
        position: usize,
    },

    #[error("identifier '{identifier}' has unbalanced '{delimiter}'")]
    Unbalanced { identifier: String, delimiter: char },

    #[error("identifier '{identifier}' has a malformed bracket atom '[{atom}]'")]
    BracketAtom { identifier: String, atom: String },

    #[error("identifier '{identifier}' contains no atoms")]
    NoAtoms { identifier: String },
}

/// A record the resolver refuses to guess about.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ResolveError {
    /// The reaction string does not split into reactants, agents and products.
    #[error(
        "reaction string '{reaction_string}' has {sections} section(s), expected reactants>agents>products"
    )]
    ReactionStringArity {
        reaction_string: String,
        sections: usize,
    },

    /// An empty yield list was supplied for a reaction that has products.
    #[error("empty yield list for {products} labelled product(s)")]
    YieldMismatch { products: usize },

    #[error("canonicalizer panicked: {message}")]
    CanonicalizerPanic { message: String },
}

/// Failures while reading reference tables.
#[derive(Debug, Error)]
pub enum ReferenceError {
    #[error("failed to read {table} table: {source}")]
    Csv {
        table: String,
        #[source]
        source: csv::Error,
    },

    #[error("{table} table has no '{column}' column")]
    MissingColumn { table: String, column: String },
}
