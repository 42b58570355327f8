//! Resolved reactions: the unit of truth produced once per raw record.

use serde::{Deserialize, Serialize};

use crate::role::ColumnGroup;

/// A product paired with its declared yield (percent).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductYield {
    pub identifier: String,
    pub yield_percent: Option<f64>,
}

impl ProductYield {
    pub fn new(identifier: impl Into<String>, yield_percent: Option<f64>) -> Self {
        Self {
            identifier: identifier.into(),
            yield_percent,
        }
    }
}

/// A reaction whose molecules have been assigned to exactly one role each.
///
/// Bags keep repeated identifiers: a repeat encodes stoichiometry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResolvedReaction {
    pub reaction_id: Option<String>,
    pub reactants: Vec<String>,
    pub agents: Vec<String>,
    pub solvents: Vec<String>,
    pub catalysts: Vec<String>,
    pub reagents: Vec<String>,
    pub products: Vec<ProductYield>,
    /// Free-text identifiers that could not be treated as structures.
    pub unresolved_names: Vec<String>,
    pub temperature_celsius: Option<f64>,
    pub duration_hours: Option<f64>,
    pub reaction_string: Option<String>,
    pub procedure_details: Option<String>,
}

impl ResolvedReaction {
    /// Molecules for a string-valued column group.
    ///
    /// Returns an empty list for [`ColumnGroup::Yield`]; yields are numeric
    /// and read through [`ResolvedReaction::yields`].
    pub fn molecules(&self, group: ColumnGroup) -> Vec<&str> {
        match group {
            ColumnGroup::Reactant => self.reactants.iter().map(String::as_str).collect(),
            ColumnGroup::Agent => self.agents.iter().map(String::as_str).collect(),
            ColumnGroup::Solvent => self.solvents.iter().map(String::as_str).collect(),
            ColumnGroup::Catalyst => self.catalysts.iter().map(String::as_str).collect(),
            ColumnGroup::Reagent => self.reagents.iter().map(String::as_str).collect(),
            ColumnGroup::Unresolved => self.unresolved_names.iter().map(String::as_str).collect(),
            ColumnGroup::Product => self
                .products
                .iter()
                .map(|product| product.identifier.as_str())
                .collect(),
            ColumnGroup::Yield => Vec::new(),
        }
    }

    /// Number of entries this reaction holds for a column group.
    pub fn count(&self, group: ColumnGroup) -> usize {
        match group {
            ColumnGroup::Yield => self.products.len(),
            other => self.molecules(other).len(),
        }
    }

    pub fn yields(&self) -> Vec<Option<f64>> {
        self.products
            .iter()
            .map(|product| product.yield_percent)
            .collect()
    }
}
