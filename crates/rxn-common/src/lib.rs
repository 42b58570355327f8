//! Shared utilities for the reaction cleaning crates.
//!
//! This crate provides Polars helpers used across the workspace: `AnyValue`
//! conversions and null-aware cell access for the wide reaction tables.

pub mod polars;

// Re-export commonly used functions at crate root for convenience
pub use polars::{any_to_string, cell_key, format_numeric, string_cells};
