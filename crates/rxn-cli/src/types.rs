use std::path::PathBuf;

use rxn_clean::CleanReport;

#[derive(Debug)]
pub struct ExtractResult {
    pub output_dir: PathBuf,
    pub files: Vec<FileSummary>,
    pub unresolved_names: PathBuf,
    pub unresolved_count: usize,
    /// Files that could not be read at all.
    pub errors: Vec<String>,
}

impl ExtractResult {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

#[derive(Debug)]
pub struct FileSummary {
    pub source: PathBuf,
    pub records: usize,
    pub resolved: usize,
    pub failures: usize,
    pub output: PathBuf,
}

#[derive(Debug)]
pub struct CleanResult {
    pub output: PathBuf,
    pub batches: usize,
    pub columns: usize,
    pub report: CleanReport,
}

#[derive(Debug)]
pub struct RunResult {
    pub extract: ExtractResult,
    pub clean: CleanResult,
}
