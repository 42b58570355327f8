use std::collections::{BTreeSet, HashSet};
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result, bail};
use comfy_table::Table;
use polars::prelude::DataFrame;
use tracing::{info, info_span, warn};

use rxn_clean::CleanedTable;
use rxn_cli::pipeline::{
    build_resolver, clean_tables, discover_record_files, extract_file, molecules_to_remove,
    read_extracted_names, read_extracted_tables,
};
use rxn_extract::ReferenceData;
use rxn_ingest::{ReferencePaths, load_reference_data};
use rxn_model::{CleanOptions, ExtractOptions, TableFormat};
use rxn_output::{ensure_output_dir, table_path, write_table, write_unresolved_names};

use crate::cli::{CleanArgs, ExtractArgs, ExtractOptionArgs, ReferenceArgs, ReferenceTableArg, RunArgs};
use crate::progress::FileProgress;
use crate::summary::apply_table_style;
use crate::types::{CleanResult, ExtractResult, FileSummary, RunResult};

/// File stem of the cleaned table.
const CLEANED_STEM: &str = "reactions";

/// Everything the extract stage produced, kept in memory for `run`.
struct Extraction {
    result: ExtractResult,
    tables: Vec<DataFrame>,
    names: BTreeSet<String>,
    reference: ReferenceData,
}

pub fn run_extract(args: &ExtractArgs) -> Result<ExtractResult> {
    let output_dir = args
        .output_dir
        .clone()
        .unwrap_or_else(|| args.input_dir.join("extracted"));
    let extraction = extract_directory(&args.input_dir, &output_dir, &args.extract)?;
    Ok(extraction.result)
}

pub fn run_clean(args: &CleanArgs) -> Result<CleanResult> {
    let mut options = args.clean.options(args.trust_labelling);
    options.validate().context("check cleaning options")?;
    let output_dir = args
        .output_dir
        .clone()
        .unwrap_or_else(|| args.table_dir.join("cleaned"));

    let reference = load_reference_data(&ReferencePaths {
        force_invalid: args.force_invalid.clone(),
        ..ReferencePaths::default()
    })
    .context("load force-invalid names")?;
    let names = read_extracted_names(&args.table_dir)?;
    let tables = read_extracted_tables(&args.table_dir)?;
    if tables.is_empty() {
        bail!("no extracted tables in {}", args.table_dir.display());
    }
    options.molecules_to_remove = molecules_to_remove(names, &reference);
    clean_and_write(tables, options, &output_dir, args.format.into())
}

pub fn run_pipeline(args: &RunArgs) -> Result<RunResult> {
    let output_dir = args
        .output_dir
        .clone()
        .unwrap_or_else(|| args.input_dir.join("output"));
    let extract_options = args.extract.options();
    let mut options = args.clean.options(extract_options.trust_labelling);
    options.validate().context("check cleaning options")?;

    let extraction =
        extract_directory(&args.input_dir, &output_dir.join("extracted"), &args.extract)?;
    if extraction.tables.is_empty() {
        bail!("no record files in {}", args.input_dir.display());
    }
    options.molecules_to_remove = molecules_to_remove(extraction.names, &extraction.reference);
    let clean = clean_and_write(
        extraction.tables,
        options,
        &output_dir.join("cleaned"),
        extract_options.output_format,
    )?;
    Ok(RunResult {
        extract: extraction.result,
        clean,
    })
}

pub fn run_reference(args: &ReferenceArgs) -> Result<()> {
    let reference = load_reference_data(&args.reference.paths()).context("load reference data")?;
    let mut table = Table::new();
    apply_table_style(&mut table);
    match args.list {
        None => {
            table.set_header(vec!["Table", "Entries"]);
            table.add_row(vec!["solvents".to_string(), reference.solvents.len().to_string()]);
            table.add_row(vec!["metals".to_string(), reference.metals.len().to_string()]);
            table.add_row(vec![
                "replacements".to_string(),
                reference.replacements.len().to_string(),
            ]);
            table.add_row(vec![
                "force-invalid".to_string(),
                reference.force_invalid.len().to_string(),
            ]);
        }
        Some(ReferenceTableArg::Replacements) => {
            table.set_header(vec!["Raw", "Canonical"]);
            let mut pairs: Vec<_> = reference.replacements.iter().collect();
            pairs.sort();
            for (raw, canonical) in pairs {
                table.add_row(vec![raw.clone(), canonical.clone()]);
            }
        }
        Some(ReferenceTableArg::Solvents) => list_entries(&mut table, "Solvent", &reference.solvents),
        Some(ReferenceTableArg::Metals) => list_entries(&mut table, "Metal", &reference.metals),
        Some(ReferenceTableArg::ForceInvalid) => {
            list_entries(&mut table, "Name", &reference.force_invalid);
        }
    }
    println!("{table}");
    Ok(())
}

fn list_entries(table: &mut Table, header: &str, entries: &HashSet<String>) {
    table.set_header(vec![header]);
    let mut entries: Vec<&String> = entries.iter().collect();
    entries.sort();
    for entry in entries {
        table.add_row(vec![entry.clone()]);
    }
}

fn extract_directory(
    input_dir: &Path,
    output_dir: &Path,
    args: &ExtractOptionArgs,
) -> Result<Extraction> {
    let options: ExtractOptions = args.options();
    let span = info_span!("extract", input_dir = %input_dir.display());
    let _guard = span.enter();
    let start = Instant::now();

    let resolver = build_resolver(&options, &args.reference.paths())?;
    let files = discover_record_files(input_dir, &options)?;
    let output_dir = ensure_output_dir(output_dir)?;
    let format = options.output_format;

    let progress = FileProgress::new(files.len());
    let mut summaries = Vec::with_capacity(files.len());
    let mut tables = Vec::with_capacity(files.len());
    let mut names = BTreeSet::new();
    let mut errors = Vec::new();
    for path in &files {
        progress.start(&path.display().to_string());
        match extract_file(path, &resolver) {
            Ok(mut extracted) => {
                let output = table_path(&output_dir, &extracted.stem, format);
                write_table(&mut extracted.table, &output, format)?;
                names.extend(extracted.unresolved_names);
                summaries.push(FileSummary {
                    source: extracted.source,
                    records: extracted.records,
                    resolved: extracted.table.height(),
                    failures: extracted.failures.len(),
                    output,
                });
                tables.push(extracted.table);
            }
            Err(error) => {
                warn!(source_file = %path.display(), error = %format!("{error:#}"), "file skipped");
                errors.push(format!("{}: {error:#}", path.display()));
            }
        }
        progress.advance();
    }
    progress.finish();

    let name_list: Vec<String> = names.iter().cloned().collect();
    let unresolved_names = write_unresolved_names(&output_dir, &name_list)?;
    info!(
        file_count = files.len(),
        table_count = tables.len(),
        unresolved = name_list.len(),
        duration_ms = start.elapsed().as_millis(),
        "extract complete"
    );
    Ok(Extraction {
        result: ExtractResult {
            output_dir,
            files: summaries,
            unresolved_names,
            unresolved_count: name_list.len(),
            errors,
        },
        tables,
        names,
        reference: resolver.reference().clone(),
    })
}

fn clean_and_write(
    tables: Vec<DataFrame>,
    options: CleanOptions,
    output_dir: &Path,
    format: TableFormat,
) -> Result<CleanResult> {
    let batches = tables.len();
    let CleanedTable { mut table, report } = clean_tables(tables, options)?;
    let output_dir = ensure_output_dir(output_dir)?;
    let output: PathBuf = table_path(&output_dir, CLEANED_STEM, format);
    write_table(&mut table, &output, format)?;
    Ok(CleanResult {
        output,
        batches,
        columns: table.width(),
        report,
    })
}

#[cfg(test)]
mod tests {
    use clap::ValueEnum;

    use super::*;
    use crate::cli::ReferencePathArgs;

    #[test]
    fn every_reference_table_can_be_listed() {
        for kind in ReferenceTableArg::value_variants() {
            let args = ReferenceArgs {
                list: Some(*kind),
                reference: ReferencePathArgs::default(),
            };
            assert!(run_reference(&args).is_ok());
        }
    }

    #[test]
    fn listed_entries_are_sorted() {
        let entries: HashSet<String> = ["liquid", "solution"].map(String::from).into();
        let mut table = Table::new();

        list_entries(&mut table, "Name", &entries);

        let rendered = table.to_string();
        let liquid = rendered.find("liquid").expect("liquid listed");
        let solution = rendered.find("solution").expect("solution listed");
        assert!(liquid < solution);
    }
}
