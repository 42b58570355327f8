use rxn_extract::{
    CanonicalizeError, Canonicalizer, ReferenceData, ResolveError, RoleResolver,
    SmilesSyntaxCanonicalizer, resolve_batch,
};
use rxn_model::{
    ConditionMeasurement, LabellingStrategy, ProductYield, RawInput, RawReactionRecord, RoleHint,
};

fn resolver(strategy: LabellingStrategy) -> RoleResolver {
    RoleResolver::with_syntax_canonicalizer(ReferenceData::builtin().expect("builtin"), strategy)
}

fn buchwald_record() -> RawReactionRecord {
    RawReactionRecord {
        reaction_id: Some("ord-0001".to_string()),
        inputs: vec![
            RawInput::new("CC(C)N1CCNCC1", RoleHint::Reactant),
            RawInput::new("CCOC(=O)c1cnc2cc(OCC)c(Br)cc2c1Nc1ccc(F)cc1F", RoleHint::Reactant),
            RawInput::new("C1COCCO1", RoleHint::Solvent),
            RawInput::new("O=C([O-])[O-].[Cs+].[Cs+]", RoleHint::Reagent),
            RawInput::new("[Pd]", RoleHint::Catalyst),
            RawInput::new("ice water", RoleHint::Workup),
        ],
        products: vec!["CCOC(=O)c1cnc2cc(OCC)c(N3CCN(C(C)C)CC3)cc2c1Nc1ccc(F)cc1F".to_string()],
        yields: Some(vec![Some(65.39)]),
        procedure_details: Some("Heated to 110 C overnight.".to_string()),
        conditions: vec![ConditionMeasurement::new(110.0, "C")],
        ..RawReactionRecord::default()
    }
}

#[test]
fn resolves_labelled_record_without_reaction_string() {
    let reaction = resolver(LabellingStrategy::NoTrustLabelling)
        .resolve(&buchwald_record())
        .expect("resolve");

    assert_eq!(reaction.reaction_id.as_deref(), Some("ord-0001"));
    assert_eq!(
        reaction.reactants,
        vec!["CC(C)N1CCNCC1", "CCOC(=O)c1cnc2cc(OCC)c(Br)cc2c1Nc1ccc(F)cc1F"]
    );
    assert_eq!(reaction.agents, vec!["O=C([O-])[O-].[Cs+].[Cs+]", "[Pd]"]);
    assert_eq!(reaction.solvents, vec!["C1COCCO1"]);
    assert!(reaction.catalysts.is_empty());
    assert!(reaction.reagents.is_empty());
    assert_eq!(reaction.yields(), vec![Some(65.39)]);
    assert_eq!(reaction.temperature_celsius, Some(110.0));
    assert_eq!(reaction.duration_hours, None);
    assert!(reaction.unresolved_names.is_empty());
}

#[test]
fn trusted_labels_keep_catalyst_and_reagent() {
    let reaction = resolver(LabellingStrategy::TrustLabelling)
        .resolve(&buchwald_record())
        .expect("resolve");
    assert!(reaction.agents.is_empty());
    assert_eq!(reaction.catalysts, vec!["[Pd]"]);
    assert_eq!(reaction.reagents, vec!["O=C([O-])[O-].[Cs+].[Cs+]"]);
    assert_eq!(reaction.solvents, vec!["C1COCCO1"]);
}

#[test]
fn free_text_goes_to_unresolved_names() {
    let record = RawReactionRecord {
        inputs: vec![
            RawInput::new("CCO", RoleHint::Reactant),
            RawInput::new("water", RoleHint::Solvent),
            RawInput::new("solution", RoleHint::Solvent),
            RawInput::new("brine", RoleHint::Reagent),
            RawInput::new("brine", RoleHint::Agent),
        ],
        products: vec!["CC=O".to_string()],
        ..RawReactionRecord::default()
    };
    let reaction = resolver(LabellingStrategy::NoTrustLabelling)
        .resolve(&record)
        .expect("resolve");
    // "water" is a known spelling and maps to a structure.
    assert_eq!(reaction.solvents, vec!["O"]);
    assert_eq!(reaction.unresolved_names, vec!["solution", "brine"]);
    assert!(reaction.agents.is_empty());
    assert_eq!(reaction.products, vec![ProductYield::new("CC=O", None)]);
}

#[test]
fn unresolvable_product_loses_its_yield() {
    let record = RawReactionRecord {
        inputs: vec![RawInput::new("CCO", RoleHint::Reactant)],
        products: vec!["white solid".to_string(), "CC=O".to_string()],
        yields: Some(vec![Some(10.0), Some(70.0)]),
        ..RawReactionRecord::default()
    };
    let reaction = resolver(LabellingStrategy::NoTrustLabelling)
        .resolve(&record)
        .expect("resolve");
    assert_eq!(reaction.products, vec![ProductYield::new("CC=O", Some(70.0))]);
    assert_eq!(reaction.unresolved_names, vec!["white solid"]);
}

#[test]
fn reaction_string_supplies_reactants_agents_and_product_filter() {
    let record = RawReactionRecord {
        inputs: vec![
            RawInput::new("ignored-reactant-label", RoleHint::Reactant),
            RawInput::new("C1CCOC1", RoleHint::Solvent),
        ],
        reaction_string: Some("[CH3:1][OH:2].[Na+]>[H-]>[CH3:1][O-:2].[H][H]".to_string()),
        is_mapped: true,
        products: vec!["[CH3][O-]".to_string(), "[Na+]".to_string()],
        yields: Some(vec![Some(90.0), Some(5.0)]),
        ..RawReactionRecord::default()
    };
    let reaction = resolver(LabellingStrategy::NoTrustLabelling)
        .resolve(&record)
        .expect("resolve");
    assert_eq!(reaction.reactants, vec!["[CH3][OH]"]);
    assert_eq!(reaction.agents, vec!["[Na+]", "[H-]"]);
    assert_eq!(reaction.solvents, vec!["C1CCOC1"]);
    assert_eq!(reaction.products, vec![ProductYield::new("[CH3][O-]", Some(90.0))]);
    assert!(reaction.unresolved_names.is_empty());
}

#[test]
fn malformed_reaction_string_is_a_hard_failure() {
    let record = RawReactionRecord {
        reaction_string: Some("CCO>CC=O".to_string()),
        ..RawReactionRecord::default()
    };
    let err = resolver(LabellingStrategy::NoTrustLabelling)
        .resolve(&record)
        .unwrap_err();
    assert!(matches!(err, ResolveError::ReactionStringArity { sections: 2, .. }));
}

#[test]
fn empty_yields_with_products_is_a_hard_failure() {
    let record = RawReactionRecord {
        products: vec!["CC=O".to_string()],
        yields: Some(Vec::new()),
        ..RawReactionRecord::default()
    };
    let err = resolver(LabellingStrategy::NoTrustLabelling)
        .resolve(&record)
        .unwrap_err();
    assert_eq!(err, ResolveError::YieldMismatch { products: 1 });
}

struct PanickingCanonicalizer;

impl Canonicalizer for PanickingCanonicalizer {
    fn canonicalize(&self, identifier: &str, is_mapped: bool) -> Result<String, CanonicalizeError> {
        if identifier == "boom" {
            panic!("toolkit crashed on {identifier}");
        }
        SmilesSyntaxCanonicalizer.canonicalize(identifier, is_mapped)
    }
}

#[test]
fn batch_isolates_failures_and_keeps_order() {
    let resolver = RoleResolver::new(
        PanickingCanonicalizer,
        ReferenceData::builtin().expect("builtin"),
        LabellingStrategy::NoTrustLabelling,
    );
    let ok = |id: &str, reactant: &str| RawReactionRecord {
        reaction_id: Some(id.to_string()),
        inputs: vec![
            RawInput::new(reactant, RoleHint::Reactant),
            RawInput::new("brine", RoleHint::Solvent),
        ],
        ..RawReactionRecord::default()
    };
    let records = vec![
        ok("a", "CCO"),
        RawReactionRecord {
            reaction_id: Some("b".to_string()),
            inputs: vec![RawInput::new("boom", RoleHint::Reactant)],
            ..RawReactionRecord::default()
        },
        RawReactionRecord {
            reaction_id: Some("c".to_string()),
            reaction_string: Some("CCO".to_string()),
            ..RawReactionRecord::default()
        },
        ok("d", "CCN"),
    ];

    let batch = resolve_batch(&records, &resolver);
    assert_eq!(batch.record_count(), 4);
    let ids: Vec<_> = batch
        .resolved
        .iter()
        .map(|r| r.reaction_id.as_deref().unwrap_or_default())
        .collect();
    assert_eq!(ids, vec!["a", "d"]);
    assert_eq!(batch.failures.len(), 2);
    assert_eq!(batch.failures[0].index, 1);
    assert!(matches!(
        batch.failures[0].error,
        ResolveError::CanonicalizerPanic { .. }
    ));
    assert_eq!(batch.failures[1].reaction_id.as_deref(), Some("c"));
    assert_eq!(batch.unresolved_names, vec!["brine"]);
}
