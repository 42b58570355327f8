use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

use crate::common::ensure_output_dir;

/// File name of the unresolved-name list inside an extract output directory.
pub const UNRESOLVED_NAMES_FILE: &str = "unresolved_names.json";

/// Write `names` as a pretty JSON array to `<dir>/unresolved_names.json`.
pub fn write_unresolved_names(dir: &Path, names: &[String]) -> Result<PathBuf> {
    let path = ensure_output_dir(dir)?.join(UNRESOLVED_NAMES_FILE);
    let file = File::create(&path).with_context(|| format!("create {}", path.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), names)
        .with_context(|| format!("write {}", path.display()))?;
    info!(path = %path.display(), count = names.len(), "unresolved names written");
    Ok(path)
}
