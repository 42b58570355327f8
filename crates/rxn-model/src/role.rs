//! Molecule roles and the wide-table column layout derived from them.

use serde::{Deserialize, Serialize};

/// Placeholder written over infrequent-but-not-rare molecules.
pub const OTHER_SENTINEL: &str = "other";

/// Raw reaction SMILES column.
pub const RXN_STR_COLUMN: &str = "rxn_str";
/// Reaction temperature in degrees Celsius.
pub const TEMPERATURE_COLUMN: &str = "temperature";
/// Reaction duration in hours.
pub const RXN_TIME_COLUMN: &str = "rxn_time";
/// Free-text procedure description.
pub const PROCEDURE_COLUMN: &str = "procedure_details";

/// Coarse role attached to an input molecule by the source schema.
///
/// Only `Reactant` is trusted as-is; every other participating role is
/// reconciled by the role resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleHint {
    Reactant,
    Reagent,
    Solvent,
    Catalyst,
    Agent,
    Workup,
    InternalStandard,
    #[default]
    #[serde(other)]
    Unspecified,
}

/// Family of indexed columns in the flattened reaction table.
///
/// Columns are named `<prefix>_<index>`, e.g. `solvent_0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnGroup {
    Reactant,
    Agent,
    Solvent,
    Catalyst,
    Reagent,
    Unresolved,
    Product,
    Yield,
}

impl ColumnGroup {
    /// Every group, in table column order.
    pub const ALL: [ColumnGroup; 8] = [
        ColumnGroup::Reactant,
        ColumnGroup::Agent,
        ColumnGroup::Solvent,
        ColumnGroup::Catalyst,
        ColumnGroup::Reagent,
        ColumnGroup::Unresolved,
        ColumnGroup::Product,
        ColumnGroup::Yield,
    ];

    /// Order in which column limits are enforced. Yield follows product so
    /// both are trimmed identically.
    pub const CARDINALITY_ORDER: [ColumnGroup; 7] = [
        ColumnGroup::Reactant,
        ColumnGroup::Product,
        ColumnGroup::Yield,
        ColumnGroup::Solvent,
        ColumnGroup::Agent,
        ColumnGroup::Catalyst,
        ColumnGroup::Reagent,
    ];

    /// Groups whose values are subject to rarity filtering.
    pub const RARITY_GROUPS: [ColumnGroup; 4] = [
        ColumnGroup::Solvent,
        ColumnGroup::Agent,
        ColumnGroup::Catalyst,
        ColumnGroup::Reagent,
    ];

    pub const fn prefix(self) -> &'static str {
        match self {
            ColumnGroup::Reactant => "reactant",
            ColumnGroup::Agent => "agent",
            ColumnGroup::Solvent => "solvent",
            ColumnGroup::Catalyst => "catalyst",
            ColumnGroup::Reagent => "reagent",
            ColumnGroup::Unresolved => "unresolved",
            ColumnGroup::Product => "product",
            ColumnGroup::Yield => "yield",
        }
    }

    /// Column name for position `index` of this group.
    pub fn column(self, index: usize) -> String {
        format!("{}_{index}", self.prefix())
    }

    /// Yield columns hold floats; every other group holds strings.
    pub const fn is_numeric(self) -> bool {
        matches!(self, ColumnGroup::Yield)
    }

    pub fn is_rarity_group(self) -> bool {
        Self::RARITY_GROUPS.contains(&self)
    }

    fn rank(self) -> u8 {
        match self {
            ColumnGroup::Reactant => 1,
            ColumnGroup::Agent => 2,
            ColumnGroup::Solvent => 3,
            ColumnGroup::Catalyst => 4,
            ColumnGroup::Reagent => 5,
            ColumnGroup::Unresolved => 6,
            ColumnGroup::Product => 9,
            ColumnGroup::Yield => 10,
        }
    }
}

impl std::fmt::Display for ColumnGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.prefix())
    }
}

/// Parse an indexed column name such as `reagent_2`.
///
/// The prefix must match a group exactly, so `reagent_0` is never mistaken
/// for an `agent` column.
pub fn parse_column(name: &str) -> Option<(ColumnGroup, usize)> {
    let (prefix, index) = name.rsplit_once('_')?;
    if index.is_empty() || !index.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let index = index.parse().ok()?;
    ColumnGroup::ALL
        .into_iter()
        .find(|group| group.prefix() == prefix)
        .map(|group| (group, index))
}

/// Whether a column of the reaction table is stored as `Float64`.
pub fn is_numeric_column(name: &str) -> bool {
    match parse_column(name) {
        Some((group, _)) => group.is_numeric(),
        None => name == TEMPERATURE_COLUMN || name == RXN_TIME_COLUMN,
    }
}

/// Sort key placing columns in canonical table order.
pub fn column_sort_key(name: &str) -> (u8, usize, String) {
    if let Some((group, index)) = parse_column(name) {
        return (group.rank(), index, String::new());
    }
    let rank = match name {
        RXN_STR_COLUMN => 0,
        TEMPERATURE_COLUMN => 7,
        RXN_TIME_COLUMN => 8,
        PROCEDURE_COLUMN => 11,
        _ => 12,
    };
    (rank, 0, name.to_string())
}
