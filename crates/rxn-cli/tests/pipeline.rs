//! Integration tests for the pipeline module.

use std::fs;
use std::path::Path;

use rxn_cli::pipeline::{
    build_resolver, clean_tables, discover_record_files, extract_file, molecules_to_remove,
    read_extracted_names,
};
use rxn_ingest::ReferencePaths;
use rxn_model::{CleanOptions, ExtractOptions};
use tempfile::TempDir;

fn write(path: &Path, contents: &str) {
    fs::write(path, contents).expect("write fixture");
}

fn records_json() -> String {
    serde_json::json!([
        {
            "reaction_id": "r1",
            "inputs": [
                {"identifier": "CCO", "role": "reactant"},
                {"identifier": "CC(=O)O", "role": "reactant"},
                {"identifier": "O", "role": "solvent"},
                {"identifier": "solution", "role": "solvent"}
            ],
            "products": ["CCOC(C)=O"],
            "yields": [71.0]
        },
        {
            "reaction_id": "r2",
            "inputs": [
                {"identifier": "Brc1ccccc1", "role": "reactant"},
                {"identifier": "[Pd]", "role": "catalyst"},
                {"identifier": "ClCCl", "role": "solvent"}
            ],
            "products": ["c1ccccc1"],
            "yields": [88.5]
        },
        {
            "reaction_id": "r3",
            "inputs": [{"identifier": "CC", "role": "reactant"}],
            "products": ["CC", "C"],
            "yields": []
        }
    ])
    .to_string()
}

fn no_rarity() -> CleanOptions {
    CleanOptions {
        min_frequency_of_occurance_primary: 0,
        min_frequency_of_occurance_secondary: 0,
        ..CleanOptions::default()
    }
}

#[test]
fn test_discover_record_files_with_name_filter() {
    let dir = TempDir::new().expect("tempdir");
    for name in ["batch_a.json", "skip_b.jsonl", ".hidden.json", "notes.txt"] {
        write(&dir.path().join(name), "[]");
    }

    let all = discover_record_files(dir.path(), &ExtractOptions::default()).expect("list");
    assert_eq!(all.len(), 2);

    let options = ExtractOptions {
        name_contains: Some("skip".to_string()),
        exclude_matching: true,
        ..ExtractOptions::default()
    };
    let kept = discover_record_files(dir.path(), &options).expect("list");
    assert_eq!(kept, vec![dir.path().join("batch_a.json")]);
}

#[test]
fn test_extract_file_keeps_failures_per_record() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("batch.json");
    write(&path, &records_json());
    let resolver =
        build_resolver(&ExtractOptions::default(), &ReferencePaths::default()).expect("resolver");

    let extracted = extract_file(&path, &resolver).expect("extract");

    assert_eq!(extracted.stem, "batch");
    assert_eq!(extracted.records, 3);
    assert_eq!(extracted.failures.len(), 1);
    assert_eq!(extracted.failures[0].reaction_id.as_deref(), Some("r3"));
    assert_eq!(extracted.table.height(), 2);
    assert_eq!(extracted.unresolved_names, vec!["solution".to_string()]);
    let agents = extracted.table.column("agent_0").expect("agent column");
    assert_eq!(agents.str().expect("strings").get(1), Some("[Pd]"));
}

#[test]
fn test_clean_drops_reactions_with_unresolved_names() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("batch.json");
    write(&path, &records_json());
    let resolver =
        build_resolver(&ExtractOptions::default(), &ReferencePaths::default()).expect("resolver");
    let extracted = extract_file(&path, &resolver).expect("extract");

    let names = molecules_to_remove(extracted.unresolved_names, resolver.reference());
    assert!(names.contains("solution"));
    assert!(names.contains("liquid"));
    let options = CleanOptions {
        molecules_to_remove: names,
        ..no_rarity()
    };

    let cleaned = clean_tables(vec![extracted.table], options).expect("clean");

    assert_eq!(cleaned.table.height(), 1);
    assert!(cleaned.table.column("unresolved_0").is_err());
    assert_eq!(cleaned.report.input_rows(), 2);
    assert_eq!(cleaned.report.output_rows(), 1);
}

#[test]
fn test_clean_rejects_conflicting_options_before_reading() {
    let options = no_rarity().with_trust_labelling(true);

    let error = clean_tables(Vec::new(), options).expect_err("agents with trusted labels");

    assert!(format!("{error:#}").contains("trust_labelling"));
}

#[test]
fn test_missing_name_list_is_empty() {
    let dir = TempDir::new().expect("tempdir");

    let names = read_extracted_names(dir.path()).expect("names");

    assert!(names.is_empty());
}
