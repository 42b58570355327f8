//! Read-only reference tables shared by every record of a batch.

use std::collections::{HashMap, HashSet};
use std::io::Read;

use csv::ReaderBuilder;

use crate::error::ReferenceError;
use crate::smiles::{bracket_atoms, element_symbol};

const BUILTIN_SOLVENTS: &str = include_str!("../data/solvents.csv");
const BUILTIN_REPLACEMENTS: &str = include_str!("../data/replacements.csv");

/// Transition metals (Ti-Cu, Zr-Ag, Hf-Au) plus the alkali, alkaline-earth
/// and main-group metals common in reagents.
const METAL_SYMBOLS: &[&str] = &[
    "Ti", "V", "Cr", "Mn", "Fe", "Co", "Ni", "Cu", "Zr", "Nb", "Mo", "Tc", "Ru", "Rh", "Pd",
    "Ag", "Hf", "Ta", "W", "Re", "Os", "Ir", "Pt", "Au", "Li", "Na", "K", "Rb", "Cs", "Be",
    "Mg", "Ca", "Sr", "Ba", "Zn", "Cd", "Hg", "Al", "Ga", "In", "Sn", "Tl", "Pb", "Bi", "Sc",
    "Y", "La", "Ce", "Sm", "Yb",
];

/// Names that look like molecules but only ever come from split free text.
const FORCE_INVALID: &[&str] = &["solution", "liquid"];

/// Reference sets consulted by the role resolver.
#[derive(Debug, Clone, Default)]
pub struct ReferenceData {
    /// Canonical strings of known solvents.
    pub solvents: HashSet<String>,
    /// Metal element symbols or whole canonical strings.
    pub metals: HashSet<String>,
    /// Historical spellings mapped to a canonical string.
    pub replacements: HashMap<String, String>,
    /// Identifiers always treated as unresolved names.
    pub force_invalid: HashSet<String>,
}

impl ReferenceData {
    /// Built-in tables shipped with the crate.
    ///
    /// # Errors
    ///
    /// Fails only if the embedded CSV files are malformed.
    pub fn builtin() -> Result<Self, ReferenceError> {
        Ok(Self {
            solvents: solvents_from_csv(BUILTIN_SOLVENTS.as_bytes(), "builtin solvents")?,
            metals: default_metals(),
            replacements: replacements_from_csv(
                BUILTIN_REPLACEMENTS.as_bytes(),
                "builtin replacements",
            )?,
            force_invalid: FORCE_INVALID.iter().map(|s| (*s).to_string()).collect(),
        })
    }

    pub fn with_solvents(mut self, solvents: HashSet<String>) -> Self {
        self.solvents = solvents;
        self
    }

    pub fn with_metals(mut self, metals: HashSet<String>) -> Self {
        self.metals = metals;
        self
    }

    pub fn with_replacements(mut self, replacements: HashMap<String, String>) -> Self {
        self.replacements = replacements;
        self
    }

    pub fn with_force_invalid(mut self, names: HashSet<String>) -> Self {
        self.force_invalid = names;
        self
    }

    pub fn is_solvent(&self, identifier: &str) -> bool {
        self.solvents.contains(identifier)
    }

    /// Whether the molecule is, or contains, a metal atom.
    pub fn is_metal_bearing(&self, identifier: &str) -> bool {
        self.metals.contains(identifier)
            || bracket_atoms(identifier)
                .filter_map(element_symbol)
                .any(|symbol| self.metals.contains(symbol))
    }

    /// Apply the replacement table, returning the input when no entry exists.
    pub fn replace<'a>(&'a self, identifier: &'a str) -> &'a str {
        self.replacements
            .get(identifier)
            .map_or(identifier, String::as_str)
    }

    pub fn is_force_invalid(&self, identifier: &str) -> bool {
        self.force_invalid.contains(identifier)
    }
}

/// The built-in metal symbol set.
pub fn default_metals() -> HashSet<String> {
    METAL_SYMBOLS.iter().map(|s| (*s).to_string()).collect()
}

/// Read a solvent table. The `smiles` column holds canonical strings; any
/// other columns are ignored.
///
/// # Errors
///
/// Fails on malformed CSV or when the `smiles` column is missing.
pub fn solvents_from_csv<R: Read>(reader: R, table: &str) -> Result<HashSet<String>, ReferenceError> {
    let mut reader = ReaderBuilder::new().has_headers(true).from_reader(reader);
    let csv_error = |source| ReferenceError::Csv {
        table: table.to_string(),
        source,
    };
    let headers = reader.headers().map_err(csv_error)?.clone();
    let column = headers
        .iter()
        .position(|h| h.trim_matches('\u{feff}').trim().eq_ignore_ascii_case("smiles"))
        .ok_or_else(|| ReferenceError::MissingColumn {
            table: table.to_string(),
            column: "smiles".to_string(),
        })?;

    let mut solvents = HashSet::new();
    for record in reader.records() {
        let record = record.map_err(csv_error)?;
        if let Some(value) = record.get(column).map(str::trim)
            && !value.is_empty()
        {
            solvents.insert(value.to_string());
        }
    }
    Ok(solvents)
}

/// Read a `raw,canonical` replacement table.
///
/// # Errors
///
/// Fails on malformed CSV or when either column is missing.
pub fn replacements_from_csv<R: Read>(
    reader: R,
    table: &str,
) -> Result<HashMap<String, String>, ReferenceError> {
    let mut reader = ReaderBuilder::new().has_headers(true).from_reader(reader);
    let csv_error = |source| ReferenceError::Csv {
        table: table.to_string(),
        source,
    };
    let headers = reader.headers().map_err(csv_error)?.clone();
    let position = |name: &str| {
        headers
            .iter()
            .position(|h| h.trim_matches('\u{feff}').trim() == name)
            .ok_or_else(|| ReferenceError::MissingColumn {
                table: table.to_string(),
                column: name.to_string(),
            })
    };
    let raw_column = position("raw")?;
    let canonical_column = position("canonical")?;

    let mut replacements = HashMap::new();
    for record in reader.records() {
        let record = record.map_err(csv_error)?;
        let raw = record.get(raw_column).unwrap_or_default();
        let canonical = record.get(canonical_column).unwrap_or_default().trim();
        if raw.is_empty() || canonical.is_empty() {
            continue;
        }
        replacements.insert(raw.to_string(), canonical.to_string());
    }
    Ok(replacements)
}
