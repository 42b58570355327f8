//! Per-record role resolution.

use rxn_model::{LabellingStrategy, RawReactionRecord, ResolvedReaction, RoleHint};
use tracing::trace;

use crate::canonical::{Canonicalizer, SmilesSyntaxCanonicalizer};
use crate::conditions::{duration_hours, temperature_celsius};
use crate::error::ResolveError;
use crate::reaction_string::ReactionString;
use crate::reference::ReferenceData;
use crate::roles::{DeclaredInputs, merge_to_agents};
use crate::smiles::has_atom_map;
use crate::yields::match_yield_with_product;

/// Resolves raw records against a fixed set of reference tables.
///
/// The resolver is immutable after construction and can be shared across
/// threads.
#[derive(Debug, Clone)]
pub struct RoleResolver<C = SmilesSyntaxCanonicalizer> {
    canonicalizer: C,
    reference: ReferenceData,
    strategy: LabellingStrategy,
}

/// Free-text names seen in one record, without repeats.
#[derive(Default)]
struct UnresolvedNames(Vec<String>);

impl UnresolvedNames {
    fn push(&mut self, name: &str) {
        if !self.0.iter().any(|seen| seen == name) {
            self.0.push(name.to_string());
        }
    }

    fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|seen| seen == name)
    }
}

impl<C: Canonicalizer> RoleResolver<C> {
    pub fn new(canonicalizer: C, reference: ReferenceData, strategy: LabellingStrategy) -> Self {
        Self {
            canonicalizer,
            reference,
            strategy,
        }
    }

    pub fn reference(&self) -> &ReferenceData {
        &self.reference
    }

    /// Replacement lookup, force-invalid check, then canonicalization.
    ///
    /// Returns `None` for blank identifiers and for identifiers routed to
    /// `names`.
    fn identify(&self, raw: &str, is_mapped: bool, names: &mut UnresolvedNames) -> Option<String> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        let replaced = self.reference.replace(raw);
        if self.reference.is_force_invalid(raw) || self.reference.is_force_invalid(replaced) {
            trace!(identifier = raw, "forced to unresolved names");
            names.push(raw);
            return None;
        }
        match self.canonicalizer.canonicalize(replaced, is_mapped) {
            Ok(canonical) => Some(canonical),
            Err(err) => {
                trace!(identifier = raw, error = %err, "not a structure");
                names.push(raw);
                None
            }
        }
    }

    /// Assign every molecule of `record` to exactly one role.
    ///
    /// # Errors
    ///
    /// Fails when the reaction string does not have three sections, or when
    /// an empty yield list accompanies labelled products.
    pub fn resolve(&self, record: &RawReactionRecord) -> Result<ResolvedReaction, ResolveError> {
        let is_mapped = record.is_mapped;
        let reaction = record
            .reaction_string
            .as_deref()
            .map(ReactionString::parse)
            .transpose()?;

        let mut names = UnresolvedNames::default();
        let mut declared = DeclaredInputs::default();
        let mut reactants = Vec::new();
        let mut reaction_products = Vec::new();

        if let Some(reaction) = &reaction {
            for molecule in &reaction.reactants {
                let Some(canonical) = self.identify(molecule, is_mapped, &mut names) else {
                    continue;
                };
                // An unmapped molecule contributes no atoms to the product.
                if is_mapped && !has_atom_map(molecule) {
                    declared.agents.push(canonical);
                } else {
                    reactants.push(canonical);
                }
            }
            for molecule in &reaction.agents {
                if let Some(canonical) = self.identify(molecule, is_mapped, &mut names) {
                    declared.agents.push(canonical);
                }
            }
            for molecule in &reaction.products {
                if let Some(canonical) = self.identify(molecule, is_mapped, &mut names) {
                    reaction_products.push(canonical);
                }
            }
        }

        for input in &record.inputs {
            let bag = match input.role {
                RoleHint::Reactant if reaction.is_some() => continue,
                RoleHint::Reactant => &mut reactants,
                RoleHint::Solvent => &mut declared.solvents,
                RoleHint::Catalyst => &mut declared.catalysts,
                RoleHint::Reagent => &mut declared.reagents,
                RoleHint::Agent | RoleHint::Unspecified => &mut declared.agents,
                RoleHint::Workup | RoleHint::InternalStandard => {
                    trace!(identifier = %input.identifier, role = ?input.role, "skipping non-participant");
                    continue;
                }
            };
            if let Some(canonical) = self.identify(&input.identifier, is_mapped, &mut names) {
                bag.push(canonical);
            }
        }

        let labelled: Vec<String> = record
            .products
            .iter()
            .map(|product| {
                self.identify(product, is_mapped, &mut names)
                    .unwrap_or_else(|| product.trim().to_string())
            })
            .collect();
        let mut products =
            match_yield_with_product(&reaction_products, &labelled, record.yields.as_deref())
                .into_pairs()?;
        products.retain(|pair| !pair.identifier.is_empty() && !names.contains(&pair.identifier));

        let merged = merge_to_agents(&declared, &self.reference, self.strategy);

        Ok(ResolvedReaction {
            reaction_id: record.reaction_id.clone(),
            reactants,
            agents: merged.agents,
            solvents: merged.solvents,
            catalysts: merged.catalysts,
            reagents: merged.reagents,
            products,
            unresolved_names: names.0,
            temperature_celsius: temperature_celsius(&record.conditions),
            duration_hours: duration_hours(&record.conditions),
            reaction_string: record.reaction_string.clone(),
            procedure_details: record
                .procedure_details
                .clone()
                .filter(|details| !details.trim().is_empty()),
        })
    }
}

impl RoleResolver<SmilesSyntaxCanonicalizer> {
    /// Resolver over the built-in syntax canonicalizer.
    pub fn with_syntax_canonicalizer(reference: ReferenceData, strategy: LabellingStrategy) -> Self {
        Self::new(SmilesSyntaxCanonicalizer, reference, strategy)
    }
}
