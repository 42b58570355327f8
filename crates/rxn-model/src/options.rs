//! Configuration options for role resolution and cleaning.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::role::ColumnGroup;

/// Whether the source's catalyst/reagent labels are kept apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LabellingStrategy {
    /// Keep catalysts and reagents as separate bags; no agents are produced.
    TrustLabelling,
    /// Merge catalysts and reagents into agents.
    #[default]
    NoTrustLabelling,
}

impl LabellingStrategy {
    pub fn from_trust(trust_labelling: bool) -> Self {
        if trust_labelling {
            Self::TrustLabelling
        } else {
            Self::NoTrustLabelling
        }
    }
}

/// Maximum number of columns kept per role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleLimits {
    pub reactant: usize,
    pub product: usize,
    pub solvent: usize,
    pub agent: usize,
    pub catalyst: usize,
    pub reagent: usize,
}

impl Default for RoleLimits {
    fn default() -> Self {
        Self {
            reactant: 5,
            product: 5,
            solvent: 2,
            agent: 3,
            catalyst: 0,
            reagent: 0,
        }
    }
}

impl RoleLimits {
    /// Column limit for a group. Yield columns track product columns.
    ///
    /// Unresolved-name columns have no limit; they are removed by their own
    /// stage.
    pub fn limit(&self, group: ColumnGroup) -> Option<usize> {
        match group {
            ColumnGroup::Reactant => Some(self.reactant),
            ColumnGroup::Product | ColumnGroup::Yield => Some(self.product),
            ColumnGroup::Solvent => Some(self.solvent),
            ColumnGroup::Agent => Some(self.agent),
            ColumnGroup::Catalyst => Some(self.catalyst),
            ColumnGroup::Reagent => Some(self.reagent),
            ColumnGroup::Unresolved => None,
        }
    }
}

/// Options controlling the batch cleaning stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleanOptions {
    pub limits: RoleLimits,

    /// Drop reactions whose yields fall outside [0, 100] or sum above 100.
    pub consistent_yield: bool,

    /// Cutoff for the first column of a role (`solvent_0`, `agent_0`, ...).
    pub min_frequency_of_occurance_primary: usize,

    /// Cutoff for every later column of a role.
    pub min_frequency_of_occurance_secondary: usize,

    /// Rewrite infrequent molecules to `"other"` instead of dropping the row.
    pub include_other_category: bool,

    /// Below this frequency a molecule always removes its row.
    pub map_rare_to_other_threshold: usize,

    /// Must match the labelling used during extraction.
    pub trust_labelling: bool,

    /// Drop reactions that mention a molecule only by an unresolvable name.
    pub remove_unresolved: bool,

    /// Names that disqualify any reaction mentioning them.
    #[serde(default)]
    pub molecules_to_remove: BTreeSet<String>,
}

impl Default for CleanOptions {
    fn default() -> Self {
        Self {
            limits: RoleLimits::default(),
            consistent_yield: true,
            min_frequency_of_occurance_primary: 15,
            min_frequency_of_occurance_secondary: 15,
            include_other_category: true,
            map_rare_to_other_threshold: 3,
            trust_labelling: false,
            remove_unresolved: true,
            molecules_to_remove: BTreeSet::new(),
        }
    }
}

impl CleanOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limits(mut self, limits: RoleLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn with_trust_labelling(mut self, trust: bool) -> Self {
        self.trust_labelling = trust;
        self
    }

    pub fn with_other_category(mut self, include: bool) -> Self {
        self.include_other_category = include;
        self
    }

    pub fn with_molecules_to_remove(mut self, names: BTreeSet<String>) -> Self {
        self.molecules_to_remove = names;
        self
    }

    /// Whether rarity filtering runs at all.
    pub fn rarity_enabled(&self) -> bool {
        self.min_frequency_of_occurance_primary != 0
            || self.min_frequency_of_occurance_secondary != 0
    }

    /// Check the option contract.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::LabellingConflict`] when the role limits do not
    /// match the labelling mode: trusted labels need catalyst or reagent
    /// columns and no agent columns, untrusted labels the reverse, and [`ConfigError::ThresholdOrder`] when a
    /// rarity cutoff does not exceed the "other" threshold.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let limits = &self.limits;
        let split = limits.catalyst + limits.reagent;
        // Exactly one side of agent vs catalyst+reagent may be non-zero.
        let conflict = if self.trust_labelling {
            limits.agent != 0 || split == 0
        } else {
            split != 0 || limits.agent == 0
        };
        if conflict {
            return Err(ConfigError::LabellingConflict {
                trust_labelling: self.trust_labelling,
                num_agent: limits.agent,
                num_catalyst: limits.catalyst,
                num_reagent: limits.reagent,
            });
        }
        if self.rarity_enabled() {
            let threshold = self.map_rare_to_other_threshold;
            for (which, value) in [
                ("primary", self.min_frequency_of_occurance_primary),
                ("secondary", self.min_frequency_of_occurance_secondary),
            ] {
                if value <= threshold {
                    return Err(ConfigError::ThresholdOrder {
                        which,
                        value,
                        threshold,
                    });
                }
            }
        }
        Ok(())
    }
}

/// Options for the extract stage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractOptions {
    /// Must match [`CleanOptions::trust_labelling`] of the later clean run.
    pub trust_labelling: bool,

    /// Only read input files whose name contains this substring.
    #[serde(default)]
    pub name_contains: Option<String>,

    /// Invert `name_contains`: skip the matching files instead.
    #[serde(default)]
    pub exclude_matching: bool,

    #[serde(default)]
    pub output_format: TableFormat,
}

impl ExtractOptions {
    pub fn strategy(&self) -> LabellingStrategy {
        LabellingStrategy::from_trust(self.trust_labelling)
    }
}

/// On-disk format of flattened reaction tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableFormat {
    #[default]
    Parquet,
    Csv,
}

impl TableFormat {
    pub const fn extension(self) -> &'static str {
        match self {
            TableFormat::Parquet => "parquet",
            TableFormat::Csv => "csv",
        }
    }

    /// Format implied by a file extension (case-insensitive).
    pub fn from_extension(extension: &str) -> Option<Self> {
        if extension.eq_ignore_ascii_case("parquet") {
            Some(TableFormat::Parquet)
        } else if extension.eq_ignore_ascii_case("csv") {
            Some(TableFormat::Csv)
        } else {
            None
        }
    }
}
