use std::collections::BTreeMap;

use proptest::prelude::*;
use rxn_extract::{DeclaredInputs, ReferenceData, merge_to_agents};
use rxn_model::LabellingStrategy;

const POOL: &[&str] = &[
    "O",
    "CCO",
    "C1CCOC1",
    "ClCCl",
    "[Pd]",
    "[Cs+]",
    "O=C([O-])[O-]",
    "CCN(CC)CC",
    "Cc1ccc(S(=O)(=O)O)cc1",
    "Cl[Pd]Cl",
    "[Na+].[OH-]",
];

fn molecules() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(prop::sample::select(POOL), 0..6)
        .prop_map(|items| items.into_iter().map(str::to_string).collect())
}

fn declared() -> impl Strategy<Value = DeclaredInputs> {
    (molecules(), molecules(), molecules(), molecules()).prop_map(
        |(agents, catalysts, solvents, reagents)| DeclaredInputs {
            agents,
            catalysts,
            solvents,
            reagents,
        },
    )
}

fn counts<'a>(items: impl IntoIterator<Item = &'a String>) -> BTreeMap<&'a str, usize> {
    let mut counts = BTreeMap::new();
    for item in items {
        *counts.entry(item.as_str()).or_default() += 1;
    }
    counts
}

fn reversed(declared: &DeclaredInputs) -> DeclaredInputs {
    let rev = |bag: &Vec<String>| bag.iter().rev().cloned().collect::<Vec<_>>();
    DeclaredInputs {
        agents: rev(&declared.reagents),
        catalysts: rev(&declared.catalysts),
        solvents: rev(&declared.solvents),
        reagents: rev(&declared.agents),
    }
}

proptest! {
    #[test]
    fn untrusted_merge_preserves_every_occurrence(input in declared()) {
        let reference = ReferenceData::builtin().expect("builtin");
        let merged = merge_to_agents(&input, &reference, LabellingStrategy::NoTrustLabelling);

        let expected = counts(
            input.agents.iter()
                .chain(&input.catalysts)
                .chain(&input.solvents)
                .chain(&input.reagents),
        );
        prop_assert_eq!(counts(merged.agents.iter().chain(&merged.solvents)), expected);
        prop_assert!(merged.catalysts.is_empty());
        prop_assert!(merged.reagents.is_empty());
        for agent in &merged.agents {
            prop_assert!(!merged.solvents.contains(agent));
        }
    }

    #[test]
    fn untrusted_merge_ignores_input_order(input in declared()) {
        let reference = ReferenceData::builtin().expect("builtin");
        let forward = merge_to_agents(&input, &reference, LabellingStrategy::NoTrustLabelling);
        let backward = merge_to_agents(&reversed(&input), &reference, LabellingStrategy::NoTrustLabelling);
        prop_assert_eq!(forward, backward);
    }

    #[test]
    fn trusted_merge_never_produces_agents(input in declared()) {
        let reference = ReferenceData::builtin().expect("builtin");
        let merged = merge_to_agents(&input, &reference, LabellingStrategy::TrustLabelling);
        prop_assert!(merged.agents.is_empty());
        prop_assert_eq!(
            merged.solvents.len() + merged.catalysts.len() + merged.reagents.len(),
            input.len()
        );
        for catalyst in &merged.catalysts {
            prop_assert!(input.catalysts.contains(catalyst));
        }
    }
}

#[test]
fn repeated_molecules_are_kept() {
    let reference = ReferenceData::builtin().expect("builtin");
    let input = DeclaredInputs {
        solvents: vec!["O".to_string(), "O".to_string()],
        ..DeclaredInputs::default()
    };
    let merged = merge_to_agents(&input, &reference, LabellingStrategy::NoTrustLabelling);
    assert_eq!(merged.solvents, vec!["O".to_string(), "O".to_string()]);
}
