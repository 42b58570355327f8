//! Raw reaction records as delivered by the external source reader.

use serde::{Deserialize, Serialize};

use crate::role::RoleHint;

/// One input molecule mention with the role the source assigned to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawInput {
    pub identifier: String,
    #[serde(default)]
    pub role: RoleHint,
}

impl RawInput {
    pub fn new(identifier: impl Into<String>, role: RoleHint) -> Self {
        Self {
            identifier: identifier.into(),
            role,
        }
    }
}

/// A physical quantity from the reaction conditions (temperature setpoint,
/// duration, ...). The unit decides what the value means.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionMeasurement {
    pub value: f64,
    pub unit: String,
}

impl ConditionMeasurement {
    pub fn new(value: f64, unit: impl Into<String>) -> Self {
        Self {
            value,
            unit: unit.into(),
        }
    }
}

/// One unresolved reaction.
///
/// `yields` is positionally associated with `products`. `None` means the
/// source carried no yield data at all, which is different from an empty
/// list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawReactionRecord {
    #[serde(default)]
    pub reaction_id: Option<String>,
    #[serde(default)]
    pub inputs: Vec<RawInput>,
    #[serde(default)]
    pub products: Vec<String>,
    #[serde(default)]
    pub yields: Option<Vec<Option<f64>>>,
    #[serde(default)]
    pub reaction_string: Option<String>,
    #[serde(default)]
    pub is_mapped: bool,
    #[serde(default)]
    pub procedure_details: Option<String>,
    #[serde(default)]
    pub conditions: Vec<ConditionMeasurement>,
}

impl RawReactionRecord {
    /// Identifiers of the inputs carrying the given hint, in source order.
    pub fn inputs_with_role(&self, role: RoleHint) -> impl Iterator<Item = &str> {
        self.inputs
            .iter()
            .filter(move |input| input.role == role)
            .map(|input| input.identifier.as_str())
    }
}
