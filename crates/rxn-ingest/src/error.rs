//! Error types for reading pipeline inputs.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while reading inputs.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Directory not found or not readable.
    #[error("directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// Input file not found.
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read directory entries.
    #[error("failed to read directory {path}: {source}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === Record Errors ===
    /// A record file is not valid JSON for the record schema.
    #[error("invalid record in {path} (line {line}): {source}")]
    RecordParse {
        path: PathBuf,
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    /// An unresolved-names file is not a JSON array of strings.
    #[error("invalid name list {path}: {source}")]
    NameListParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Unsupported input file extension.
    #[error("unsupported file type: {path}")]
    UnsupportedFormat { path: PathBuf },

    // === Reference Errors ===
    #[error("invalid reference table {path}: {source}")]
    Reference {
        path: PathBuf,
        #[source]
        source: rxn_extract::ReferenceError,
    },

    // === DataFrame Errors ===
    /// Failed to read a table with Polars.
    #[error("failed to read table {path}: {source}")]
    Table {
        path: PathBuf,
        #[source]
        source: polars::error::PolarsError,
    },
}

/// Result type for ingest operations.
pub type Result<T> = std::result::Result<T, IngestError>;
