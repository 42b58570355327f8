//! Reference-table overrides loaded from disk.

use std::collections::{BTreeSet, HashSet};
use std::fs::File;
use std::path::{Path, PathBuf};

use rxn_extract::ReferenceData;
use rxn_extract::reference::{replacements_from_csv, solvents_from_csv};
use tracing::info;

use crate::error::{IngestError, Result};

/// Optional files replacing the built-in reference tables.
#[derive(Debug, Clone, Default)]
pub struct ReferencePaths {
    /// CSV with a `smiles` column.
    pub solvents: Option<PathBuf>,
    /// CSV with `raw` and `canonical` columns.
    pub replacements: Option<PathBuf>,
    /// Name list (one per line) of metal symbols or molecules.
    pub metals: Option<PathBuf>,
    /// Name list of identifiers always treated as unresolved.
    pub force_invalid: Option<PathBuf>,
}

fn open(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IngestError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IngestError::FileRead {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })
}

/// Read a plain-text list: one entry per line, `#` starts a comment line.
pub fn read_name_list(path: &Path) -> Result<HashSet<String>> {
    let text = std::fs::read_to_string(path).map_err(|e| IngestError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect())
}

/// Read an unresolved-names file written by the extract stage.
pub fn read_unresolved_names(path: &Path) -> Result<BTreeSet<String>> {
    let file = open(path)?;
    let names: Vec<String> =
        serde_json::from_reader(std::io::BufReader::new(file)).map_err(|source| {
            IngestError::NameListParse {
                path: path.to_path_buf(),
                source,
            }
        })?;
    Ok(names.into_iter().collect())
}

/// Built-in reference data with any configured overrides applied.
pub fn load_reference_data(paths: &ReferencePaths) -> Result<ReferenceData> {
    let mut reference = ReferenceData::builtin().map_err(|source| IngestError::Reference {
        path: PathBuf::from("<builtin>"),
        source,
    })?;

    if let Some(path) = &paths.solvents {
        let table = path.display().to_string();
        let solvents = solvents_from_csv(open(path)?, &table).map_err(|source| {
            IngestError::Reference {
                path: path.clone(),
                source,
            }
        })?;
        info!(path = %path.display(), count = solvents.len(), "solvent table loaded");
        reference = reference.with_solvents(solvents);
    }
    if let Some(path) = &paths.replacements {
        let table = path.display().to_string();
        let replacements = replacements_from_csv(open(path)?, &table).map_err(|source| {
            IngestError::Reference {
                path: path.clone(),
                source,
            }
        })?;
        info!(path = %path.display(), count = replacements.len(), "replacement table loaded");
        reference = reference.with_replacements(replacements);
    }
    if let Some(path) = &paths.metals {
        reference = reference.with_metals(read_name_list(path)?);
    }
    if let Some(path) = &paths.force_invalid {
        reference = reference.with_force_invalid(read_name_list(path)?);
    }
    Ok(reference)
}
