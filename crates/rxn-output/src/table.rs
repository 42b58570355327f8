//! Reaction table writers.

use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use polars::prelude::{CsvWriter, DataFrame, ParquetWriter, SerWriter};
use rxn_model::TableFormat;
use tracing::info;

use crate::common::{ensure_output_dir, table_path};

/// Write one table to `path`.
pub fn write_table(df: &mut DataFrame, path: &Path, format: TableFormat) -> Result<()> {
    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    match format {
        TableFormat::Parquet => {
            ParquetWriter::new(file)
                .finish(df)
                .with_context(|| format!("write parquet {}", path.display()))?;
        }
        TableFormat::Csv => {
            CsvWriter::new(file)
                .include_header(true)
                .finish(df)
                .with_context(|| format!("write csv {}", path.display()))?;
        }
    }
    info!(path = %path.display(), rows = df.height(), columns = df.width(), "table written");
    Ok(())
}

/// Write named tables into `dir`, one file per table.
///
/// Returns the written paths in input order.
pub fn write_table_outputs(
    dir: &Path,
    tables: &mut [(String, DataFrame)],
    format: TableFormat,
) -> Result<Vec<PathBuf>> {
    let dir = ensure_output_dir(dir)?;
    let mut outputs = Vec::with_capacity(tables.len());
    for (stem, df) in tables.iter_mut() {
        let path = table_path(&dir, stem, format);
        write_table(df, &path, format)?;
        outputs.push(path);
    }
    Ok(outputs)
}
