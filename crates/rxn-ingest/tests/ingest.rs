use std::fs;
use std::io::Write;
use std::path::Path;

use polars::prelude::{DataType, ParquetWriter};
use polars::df;
use rxn_ingest::{
    FileFilter, IngestError, ReferencePaths, list_files, load_reference_data, read_records,
    read_table, read_tables, read_unresolved_names,
};
use tempfile::TempDir;

fn write(path: &Path, contents: &str) {
    let mut file = fs::File::create(path).expect("create");
    file.write_all(contents.as_bytes()).expect("write");
}

#[test]
fn lists_record_files_sorted_without_dotfiles() {
    let dir = TempDir::new().expect("tempdir");
    write(&dir.path().join("b.jsonl"), "");
    write(&dir.path().join("a.json"), "[]");
    write(&dir.path().join(".a.json"), "[]");
    write(&dir.path().join("readme.md"), "");
    fs::create_dir(dir.path().join("nested.json")).expect("mkdir");

    let files = list_files(dir.path(), &FileFilter::new(&["json", "jsonl"])).expect("list");
    let names: Vec<_> = files
        .iter()
        .map(|p| p.file_name().and_then(|n| n.to_str()).unwrap_or_default())
        .collect();
    assert_eq!(names, vec!["a.json", "b.jsonl"]);
}

#[test]
fn missing_directory_is_reported() {
    let dir = TempDir::new().expect("tempdir");
    let err = list_files(&dir.path().join("absent"), &FileFilter::new(&["json"])).unwrap_err();
    assert!(matches!(err, IngestError::DirectoryNotFound { .. }));
}

#[test]
fn reads_json_array_records() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("batch.json");
    write(
        &path,
        r#"[
            {"reaction_id": "r1", "inputs": [{"identifier": "CCO", "role": "reactant"}], "products": ["CC=O"], "yields": [50.0]},
            {"reaction_id": "r2", "reaction_string": "CCO>>CC=O", "is_mapped": false}
        ]"#,
    );
    let records = read_records(&path).expect("records");
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].yields, Some(vec![Some(50.0)]));
    assert_eq!(records[1].reaction_string.as_deref(), Some("CCO>>CC=O"));
}

#[test]
fn reference_overrides_replace_builtin_tables() {
    let dir = TempDir::new().expect("tempdir");
    let solvents = dir.path().join("solvents.csv");
    write(&solvents, "name,smiles\nwater,O\nsulfolane,O=S1(=O)CCCC1\n");
    let names = dir.path().join("force_invalid.txt");
    write(&names, "# free text\nsolution\n\nmixture\n");

    let reference = load_reference_data(&ReferencePaths {
        solvents: Some(solvents),
        force_invalid: Some(names),
        ..ReferencePaths::default()
    })
    .expect("reference");
    assert_eq!(reference.solvents.len(), 2);
    assert!(reference.is_force_invalid("mixture"));
    assert!(!reference.is_solvent("CCO"));
    assert_eq!(reference.replace("water"), "O");
}

#[test]
fn unresolved_names_file_is_a_json_array() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("unresolved_names.json");
    write(&path, r#"["solution", "brine", "solution"]"#);

    let names = read_unresolved_names(&path).expect("names");
    assert_eq!(names.into_iter().collect::<Vec<_>>(), vec!["brine", "solution"]);

    write(&path, r#"{"names": []}"#);
    let err = read_unresolved_names(&path).expect_err("object is rejected");
    assert!(matches!(err, IngestError::NameListParse { .. }));
}

#[test]
fn csv_tables_restore_numeric_columns() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("batch.csv");
    write(
        &path,
        "rxn_str,reactant_0,temperature,product_0,yield_0\n,CCO,25,CC=O,65.5\n,CCN,,CC=N,\n",
    );
    let df = read_table(&path).expect("table");
    assert_eq!(df.column("yield_0").expect("yield").dtype(), &DataType::Float64);
    assert_eq!(df.column("temperature").expect("temp").dtype(), &DataType::Float64);
    assert_eq!(df.column("reactant_0").expect("reactant").dtype(), &DataType::String);
    let yields = df.column("yield_0").expect("yield").f64().expect("f64");
    assert_eq!(yields.get(0), Some(65.5));
    assert_eq!(yields.get(1), None);
}

#[test]
fn reads_every_table_in_a_directory() {
    let dir = TempDir::new().expect("tempdir");
    let mut first = df!(
        "reactant_0" => ["CCO"],
        "yield_0" => [Some(50.0)],
    )
    .expect("df");
    let file = fs::File::create(dir.path().join("a.parquet")).expect("create");
    ParquetWriter::new(file).finish(&mut first).expect("write parquet");
    write(&dir.path().join("b.csv"), "reactant_0,yield_0\nCCN,\n");
    write(&dir.path().join("notes.txt"), "ignored");

    let tables = read_tables(dir.path()).expect("tables");
    assert_eq!(tables.len(), 2);
    assert_eq!(tables[0].1.height(), 1);
    assert_eq!(
        tables[1].1.column("yield_0").expect("yield").dtype(),
        &DataType::Float64
    );
}
