//! Stage functions shared by the `extract`, `clean` and `run` commands.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use polars::prelude::DataFrame;
use tracing::{debug, info, info_span};

use rxn_clean::{CleanedTable, Cleaner, RoleWidths, flatten};
use rxn_extract::{RecordFailure, ReferenceData, RoleResolver, resolve_batch};
use rxn_ingest::{
    FileFilter, RecordFormat, ReferencePaths, list_files, load_reference_data, read_records,
    read_tables, read_unresolved_names,
};
use rxn_model::{CleanOptions, ExtractOptions};
use rxn_output::UNRESOLVED_NAMES_FILE;

/// One record file after role resolution and flattening.
#[derive(Debug)]
pub struct ExtractedFile {
    pub source: PathBuf,
    /// Output file stem, taken from the source file name.
    pub stem: String,
    pub records: usize,
    pub failures: Vec<RecordFailure>,
    pub unresolved_names: Vec<String>,
    pub table: DataFrame,
}

/// Reference data with overrides, wrapped in a resolver for the given
/// labelling.
pub fn build_resolver(
    options: &ExtractOptions,
    paths: &ReferencePaths,
) -> Result<RoleResolver> {
    let reference = load_reference_data(paths).context("load reference data")?;
    info!(
        solvents = reference.solvents.len(),
        metals = reference.metals.len(),
        replacements = reference.replacements.len(),
        force_invalid = reference.force_invalid.len(),
        "reference data loaded"
    );
    Ok(RoleResolver::with_syntax_canonicalizer(
        reference,
        options.strategy(),
    ))
}

/// Record files in `dir` selected by the extract options.
pub fn discover_record_files(dir: &Path, options: &ExtractOptions) -> Result<Vec<PathBuf>> {
    let mut filter = FileFilter::new(&RecordFormat::EXTENSIONS);
    if let Some(substring) = &options.name_contains {
        filter = filter.with_name_contains(substring.clone(), options.exclude_matching);
    }
    let files = list_files(dir, &filter).with_context(|| format!("list {}", dir.display()))?;
    info!(dir = %dir.display(), file_count = files.len(), "record files discovered");
    Ok(files)
}

/// Resolve and flatten every record of one file.
///
/// Per-record failures are kept in the result; only unreadable files fail.
pub fn extract_file(path: &Path, resolver: &RoleResolver) -> Result<ExtractedFile> {
    let source_file = path.display().to_string();
    let span = info_span!("extract_file", source_file = %source_file);
    let _guard = span.enter();
    let start = Instant::now();

    let records = read_records(path).with_context(|| format!("read {source_file}"))?;
    let batch = resolve_batch(&records, resolver);
    let widths = RoleWidths::observed(&batch.resolved);
    let table = flatten(&batch.resolved, &widths)
        .with_context(|| format!("flatten {source_file}"))?;
    debug!(
        records = records.len(),
        rows = table.height(),
        columns = table.width(),
        duration_ms = start.elapsed().as_millis(),
        "file extracted"
    );

    let stem = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("records")
        .to_string();
    Ok(ExtractedFile {
        source: path.to_path_buf(),
        stem,
        records: records.len(),
        failures: batch.failures,
        unresolved_names: batch.unresolved_names,
        table,
    })
}

/// Names that disqualify a reaction during cleaning: every unresolved name
/// seen during extraction plus the force-invalid set.
pub fn molecules_to_remove<I>(unresolved: I, reference: &ReferenceData) -> BTreeSet<String>
where
    I: IntoIterator<Item = String>,
{
    unresolved
        .into_iter()
        .chain(reference.force_invalid.iter().cloned())
        .collect()
}

/// Unresolved names recorded next to extracted tables, if any.
pub fn read_extracted_names(table_dir: &Path) -> Result<BTreeSet<String>> {
    let path = table_dir.join(UNRESOLVED_NAMES_FILE);
    if !path.is_file() {
        debug!(path = %path.display(), "no unresolved-name list");
        return Ok(BTreeSet::new());
    }
    read_unresolved_names(&path).with_context(|| format!("read {}", path.display()))
}

/// Every extracted table in a directory.
pub fn read_extracted_tables(table_dir: &Path) -> Result<Vec<DataFrame>> {
    let tables = read_tables(table_dir)
        .with_context(|| format!("read tables in {}", table_dir.display()))?;
    info!(dir = %table_dir.display(), table_count = tables.len(), "extracted tables read");
    Ok(tables.into_iter().map(|(_, df)| df).collect())
}

/// Validate options, then run every cleaning stage.
pub fn clean_tables(tables: Vec<DataFrame>, options: CleanOptions) -> Result<CleanedTable> {
    let cleaner = Cleaner::new(options).context("check cleaning options")?;
    let span = info_span!("clean", batches = tables.len());
    let _guard = span.enter();
    cleaner.clean(tables).context("clean reaction table")
}
