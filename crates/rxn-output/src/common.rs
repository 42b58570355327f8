use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rxn_model::TableFormat;

/// Create `dir` (and parents) if needed.
pub fn ensure_output_dir(dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir.to_path_buf())
}

/// `<dir>/<stem>.<ext>` for a table format.
pub fn table_path(dir: &Path, stem: &str, format: TableFormat) -> PathBuf {
    dir.join(format!("{stem}.{}", format.extension()))
}
