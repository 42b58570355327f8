//! Flattened reaction tables written by the extract stage.

use std::fs::File;
use std::path::{Path, PathBuf};

use polars::prelude::*;
use rxn_model::{TableFormat, is_numeric_column};
use tracing::debug;

use crate::discovery::{FileFilter, list_files};
use crate::error::{IngestError, Result};

/// Restore the column dtypes a CSV round trip loses: numeric columns to
/// `Float64`, everything else to `String`.
fn restore_dtypes(df: &mut DataFrame) -> PolarsResult<()> {
    let names: Vec<PlSmallStr> = df.get_column_names_owned();
    for name in names {
        let target = if is_numeric_column(name.as_str()) {
            DataType::Float64
        } else {
            DataType::String
        };
        let column = df.column(name.as_str())?;
        if column.dtype() != &target {
            let cast = column.cast(&target)?;
            df.with_column(cast)?;
        }
    }
    Ok(())
}

/// Read one table, choosing the reader from the file extension.
pub fn read_table(path: &Path) -> Result<DataFrame> {
    let format = path
        .extension()
        .and_then(|ext| ext.to_str())
        .and_then(TableFormat::from_extension)
        .ok_or_else(|| IngestError::UnsupportedFormat {
            path: path.to_path_buf(),
        })?;
    let table_error = |source| IngestError::Table {
        path: path.to_path_buf(),
        source,
    };

    let mut df = match format {
        TableFormat::Parquet => {
            let file = File::open(path).map_err(|e| IngestError::FileRead {
                path: path.to_path_buf(),
                source: e,
            })?;
            ParquetReader::new(file).finish().map_err(table_error)?
        }
        TableFormat::Csv => CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(Some(0))
            .try_into_reader_with_file_path(Some(path.to_path_buf()))
            .map_err(table_error)?
            .finish()
            .map_err(table_error)?,
    };
    restore_dtypes(&mut df).map_err(table_error)?;
    debug!(path = %path.display(), rows = df.height(), columns = df.width(), "table read");
    Ok(df)
}

/// Read every Parquet and CSV table in a directory, sorted by filename.
pub fn read_tables(dir: &Path) -> Result<Vec<(PathBuf, DataFrame)>> {
    let filter = FileFilter::new(&[TableFormat::Parquet.extension(), TableFormat::Csv.extension()]);
    list_files(dir, &filter)?
        .into_iter()
        .map(|path| {
            let df = read_table(&path)?;
            Ok((path, df))
        })
        .collect()
}
