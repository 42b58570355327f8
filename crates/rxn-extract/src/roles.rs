//! Reconciling the source's unreliable non-reactant labels.
//!
//! Every non-reactant input is classified with [`classify`] and routed by a
//! [`LabellingStrategy`]; string containment never decides a role.

use std::collections::HashSet;

use rxn_model::LabellingStrategy;

use crate::reference::ReferenceData;

/// Coarse class of a non-reactant input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputClass {
    Solvent,
    Agent,
}

/// Total classification: anything not in the solvent set is an agent.
pub fn classify(identifier: &str, solvents: &HashSet<String>) -> InputClass {
    if solvents.contains(identifier) {
        InputClass::Solvent
    } else {
        InputClass::Agent
    }
}

/// Non-reactant inputs grouped by the role the source declared.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeclaredInputs {
    pub agents: Vec<String>,
    pub catalysts: Vec<String>,
    pub solvents: Vec<String>,
    pub reagents: Vec<String>,
}

impl DeclaredInputs {
    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
            && self.catalysts.is_empty()
            && self.solvents.is_empty()
            && self.reagents.is_empty()
    }

    pub fn len(&self) -> usize {
        self.agents.len() + self.catalysts.len() + self.solvents.len() + self.reagents.len()
    }
}

/// Output bags of [`merge_to_agents`].
///
/// Untrusted labelling fills only `agents` and `solvents`; trusted labelling
/// fills only `solvents`, `catalysts` and `reagents`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergedRoles {
    pub agents: Vec<String>,
    pub solvents: Vec<String>,
    pub catalysts: Vec<String>,
    pub reagents: Vec<String>,
}

#[derive(Clone, Copy)]
enum Declared {
    Agent,
    Catalyst,
    Solvent,
    Reagent,
}

/// Assign every declared non-reactant input to exactly one output bag.
///
/// Repeated identifiers are kept. Solvents are sorted by identifier; the
/// other bags list metal-bearing molecules first, then sort by identifier,
/// so the result does not depend on the order of the input bags.
pub fn merge_to_agents(
    declared: &DeclaredInputs,
    reference: &ReferenceData,
    strategy: LabellingStrategy,
) -> MergedRoles {
    let tagged = declared
        .agents
        .iter()
        .map(|id| (Declared::Agent, id))
        .chain(declared.catalysts.iter().map(|id| (Declared::Catalyst, id)))
        .chain(declared.solvents.iter().map(|id| (Declared::Solvent, id)))
        .chain(declared.reagents.iter().map(|id| (Declared::Reagent, id)));

    let mut merged = MergedRoles::default();
    for (source, identifier) in tagged {
        let bag = match (classify(identifier, &reference.solvents), strategy) {
            (InputClass::Solvent, _) => &mut merged.solvents,
            (InputClass::Agent, LabellingStrategy::NoTrustLabelling) => &mut merged.agents,
            (InputClass::Agent, LabellingStrategy::TrustLabelling) => match source {
                Declared::Catalyst => &mut merged.catalysts,
                Declared::Agent | Declared::Solvent | Declared::Reagent => &mut merged.reagents,
            },
        };
        bag.push(identifier.clone());
    }

    merged.solvents.sort();
    for bag in [
        &mut merged.agents,
        &mut merged.catalysts,
        &mut merged.reagents,
    ] {
        bag.sort_by_cached_key(|id| (!reference.is_metal_bearing(id), id.clone()));
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_string()).collect()
    }

    fn reference() -> ReferenceData {
        ReferenceData::builtin().expect("builtin")
    }

    #[test]
    fn classify_is_total() {
        let solvents = HashSet::from(["O".to_string()]);
        assert_eq!(classify("O", &solvents), InputClass::Solvent);
        assert_eq!(classify("[Pd]", &solvents), InputClass::Agent);
        assert_eq!(classify("", &solvents), InputClass::Agent);
    }

    #[test]
    fn untrusted_labels_split_into_agents_and_solvents() {
        let declared = DeclaredInputs {
            agents: strings(&["c1ccccc1", "Cc1ccc(S(=O)(=O)O)cc1", "O"]),
            catalysts: strings(&["[Pd]"]),
            solvents: strings(&["O", "CCO"]),
            reagents: strings(&["O=C([O-])[O-]"]),
        };
        let merged = merge_to_agents(&declared, &reference(), LabellingStrategy::NoTrustLabelling);
        assert_eq!(
            merged.agents,
            strings(&["[Pd]", "Cc1ccc(S(=O)(=O)O)cc1", "O=C([O-])[O-]"])
        );
        assert_eq!(merged.solvents, strings(&["CCO", "O", "O", "c1ccccc1"]));
        assert!(merged.catalysts.is_empty());
        assert!(merged.reagents.is_empty());
    }

    #[test]
    fn metal_bearing_agents_come_first() {
        let declared = DeclaredInputs {
            catalysts: strings(&[
                "c1ccc(P(c2ccccc2)c2ccccc2)cc1",
                "O=C(/C=C/c1ccccc1)/C=C/c1ccccc1",
                "[Pd]",
            ]),
            reagents: strings(&["O=C([O-])[O-]", "[Cs+]"]),
            ..DeclaredInputs::default()
        };
        let merged = merge_to_agents(&declared, &reference(), LabellingStrategy::NoTrustLabelling);
        assert_eq!(
            merged.agents,
            strings(&[
                "[Cs+]",
                "[Pd]",
                "O=C(/C=C/c1ccccc1)/C=C/c1ccccc1",
                "O=C([O-])[O-]",
                "c1ccc(P(c2ccccc2)c2ccccc2)cc1",
            ])
        );
    }

    #[test]
    fn trusted_labels_keep_catalysts_apart() {
        let declared = DeclaredInputs {
            agents: strings(&["CCN(CC)CC", "Cl"]),
            catalysts: strings(&["[Pd]", "O"]),
            solvents: strings(&["C1CCOC1", "ClCCl", "[Li+].[Cl-]"]),
            reagents: strings(&["O=C([O-])[O-].[K+].[K+]"]),
        };
        let merged = merge_to_agents(&declared, &reference(), LabellingStrategy::TrustLabelling);
        assert!(merged.agents.is_empty());
        assert_eq!(merged.catalysts, strings(&["[Pd]"]));
        assert_eq!(merged.solvents, strings(&["C1CCOC1", "CCN(CC)CC", "ClCCl", "O"]));
        assert_eq!(
            merged.reagents,
            strings(&["O=C([O-])[O-].[K+].[K+]", "[Li+].[Cl-]", "Cl"])
        );
    }
}
