//! Input file discovery.

use std::path::{Path, PathBuf};

use crate::error::{IngestError, Result};

/// Which files in an input directory are picked up.
#[derive(Debug, Clone, Default)]
pub struct FileFilter {
    /// Accepted extensions, compared case-insensitively.
    pub extensions: Vec<String>,
    /// Keep only file names containing this substring.
    pub name_contains: Option<String>,
    /// Invert `name_contains`: drop matching names instead.
    pub exclude_matching: bool,
}

impl FileFilter {
    pub fn new(extensions: &[&str]) -> Self {
        Self {
            extensions: extensions.iter().map(|ext| (*ext).to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn with_name_contains(mut self, substring: impl Into<String>, exclude_matching: bool) -> Self {
        self.name_contains = Some(substring.into());
        self.exclude_matching = exclude_matching;
        self
    }

    pub fn matches(&self, path: &Path) -> bool {
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            return false;
        };
        if name.starts_with('.') {
            return false;
        }
        let extension_ok = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)));
        if !extension_ok {
            return false;
        }
        match &self.name_contains {
            Some(substring) => name.contains(substring.as_str()) != self.exclude_matching,
            None => true,
        }
    }
}

/// Lists matching files in a directory (not recursive).
///
/// Hidden files are skipped. Returns files sorted by filename.
pub fn list_files(dir: &Path, filter: &FileFilter) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(IngestError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }

    let entries = std::fs::read_dir(dir).map_err(|e| IngestError::DirectoryRead {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let mut files = Vec::new();
    for entry_result in entries {
        let entry = entry_result.map_err(|e| IngestError::DirectoryRead {
            path: dir.to_path_buf(),
            source: e,
        })?;
        let path = entry.path();
        if path.is_file() && filter.matches(&path) {
            files.push(path);
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}
