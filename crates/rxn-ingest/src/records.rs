//! Raw reaction record files.
//!
//! A `.json` file holds an array of records; a `.jsonl` file holds one
//! record per line, blank lines ignored.

use std::path::Path;

use rxn_model::RawReactionRecord;
use tracing::debug;

use crate::error::{IngestError, Result};

/// Layout of a record file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordFormat {
    Json,
    JsonLines,
}

impl RecordFormat {
    pub const EXTENSIONS: [&'static str; 2] = ["json", "jsonl"];

    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?;
        if extension.eq_ignore_ascii_case("json") {
            Some(RecordFormat::Json)
        } else if extension.eq_ignore_ascii_case("jsonl") {
            Some(RecordFormat::JsonLines)
        } else {
            None
        }
    }
}

/// Parse records from text. `path` is only used in error messages.
pub fn read_records_from_str(
    text: &str,
    format: RecordFormat,
    path: &Path,
) -> Result<Vec<RawReactionRecord>> {
    let parse_error = |line, source| IngestError::RecordParse {
        path: path.to_path_buf(),
        line,
        source,
    };
    match format {
        RecordFormat::Json => {
            serde_json::from_str(text).map_err(|e| parse_error(e.line(), e))
        }
        RecordFormat::JsonLines => text
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(idx, line)| serde_json::from_str(line).map_err(|e| parse_error(idx + 1, e)))
            .collect(),
    }
}

/// Read every record in a `.json` or `.jsonl` file.
pub fn read_records(path: &Path) -> Result<Vec<RawReactionRecord>> {
    let format = RecordFormat::from_path(path).ok_or_else(|| IngestError::UnsupportedFormat {
        path: path.to_path_buf(),
    })?;
    if !path.is_file() {
        return Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let text = std::fs::read_to_string(path).map_err(|e| IngestError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    let records = read_records_from_str(&text, format, path)?;
    debug!(path = %path.display(), records = records.len(), "records read");
    Ok(records)
}
