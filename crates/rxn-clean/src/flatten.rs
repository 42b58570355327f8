//! Resolved reactions to fixed-width table rows.

use polars::prelude::{Column, DataFrame, NamedFrom, PolarsResult, Series};
use rxn_model::{
    ColumnGroup, PROCEDURE_COLUMN, RXN_STR_COLUMN, RXN_TIME_COLUMN, ResolvedReaction,
    TEMPERATURE_COLUMN,
};

/// Number of columns emitted per role.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoleWidths {
    pub reactant: usize,
    pub agent: usize,
    pub solvent: usize,
    pub catalyst: usize,
    pub reagent: usize,
    pub unresolved: usize,
    pub product: usize,
}

impl RoleWidths {
    /// Widths that emit every molecule of every reaction.
    pub fn observed(reactions: &[ResolvedReaction]) -> Self {
        let widest = |group| {
            reactions
                .iter()
                .map(|reaction| reaction.count(group))
                .max()
                .unwrap_or(0)
        };
        Self {
            reactant: widest(ColumnGroup::Reactant),
            agent: widest(ColumnGroup::Agent),
            solvent: widest(ColumnGroup::Solvent),
            catalyst: widest(ColumnGroup::Catalyst),
            reagent: widest(ColumnGroup::Reagent),
            unresolved: widest(ColumnGroup::Unresolved),
            product: widest(ColumnGroup::Product),
        }
    }

    /// Width of a group. Yield columns mirror product columns.
    pub fn width(&self, group: ColumnGroup) -> usize {
        match group {
            ColumnGroup::Reactant => self.reactant,
            ColumnGroup::Agent => self.agent,
            ColumnGroup::Solvent => self.solvent,
            ColumnGroup::Catalyst => self.catalyst,
            ColumnGroup::Reagent => self.reagent,
            ColumnGroup::Unresolved => self.unresolved,
            ColumnGroup::Product | ColumnGroup::Yield => self.product,
        }
    }
}

fn string_group(reactions: &[ResolvedReaction], group: ColumnGroup, width: usize) -> Vec<Column> {
    let bags: Vec<Vec<&str>> = reactions.iter().map(|r| r.molecules(group)).collect();
    (0..width)
        .map(|index| {
            let values: Vec<Option<&str>> = bags.iter().map(|bag| bag.get(index).copied()).collect();
            Series::new(group.column(index).into(), values).into()
        })
        .collect()
}

fn yield_group(reactions: &[ResolvedReaction], width: usize) -> Vec<Column> {
    let yields: Vec<Vec<Option<f64>>> = reactions.iter().map(ResolvedReaction::yields).collect();
    (0..width)
        .map(|index| {
            let values: Vec<Option<f64>> = yields
                .iter()
                .map(|row| row.get(index).copied().flatten())
                .collect();
            Series::new(ColumnGroup::Yield.column(index).into(), values).into()
        })
        .collect()
}

/// Flatten reactions into one row each.
///
/// Molecules beyond a role's width are not emitted; absent positions are
/// null. Columns appear in canonical table order.
pub fn flatten(reactions: &[ResolvedReaction], widths: &RoleWidths) -> PolarsResult<DataFrame> {
    let rxn_str: Vec<Option<&str>> = reactions.iter().map(|r| r.reaction_string.as_deref()).collect();
    let temperature: Vec<Option<f64>> = reactions.iter().map(|r| r.temperature_celsius).collect();
    let rxn_time: Vec<Option<f64>> = reactions.iter().map(|r| r.duration_hours).collect();
    let procedure: Vec<Option<&str>> = reactions
        .iter()
        .map(|r| r.procedure_details.as_deref())
        .collect();

    let mut columns: Vec<Column> = vec![Series::new(RXN_STR_COLUMN.into(), rxn_str).into()];
    for group in [
        ColumnGroup::Reactant,
        ColumnGroup::Agent,
        ColumnGroup::Solvent,
        ColumnGroup::Catalyst,
        ColumnGroup::Reagent,
        ColumnGroup::Unresolved,
    ] {
        columns.extend(string_group(reactions, group, widths.width(group)));
    }
    columns.push(Series::new(TEMPERATURE_COLUMN.into(), temperature).into());
    columns.push(Series::new(RXN_TIME_COLUMN.into(), rxn_time).into());
    columns.extend(string_group(reactions, ColumnGroup::Product, widths.product));
    columns.extend(yield_group(reactions, widths.product));
    columns.push(Series::new(PROCEDURE_COLUMN.into(), procedure).into());

    DataFrame::new(columns)
}

#[cfg(test)]
mod tests {
    use rxn_model::ProductYield;

    use super::*;

    fn reaction() -> ResolvedReaction {
        ResolvedReaction {
            reactants: vec!["CCO".into(), "CC(=O)O".into(), "[H+]".into()],
            solvents: vec!["O".into()],
            products: vec![ProductYield::new("CCOC(C)=O", Some(72.0))],
            temperature_celsius: Some(78.0),
            ..ResolvedReaction::default()
        }
    }

    #[test]
    fn truncates_to_width_and_pads_with_null() {
        let widths = RoleWidths {
            reactant: 2,
            solvent: 2,
            product: 1,
            ..RoleWidths::default()
        };
        let df = flatten(&[reaction()], &widths).unwrap();
        let names: Vec<&str> = df.get_column_names().into_iter().map(|n| n.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "rxn_str",
                "reactant_0",
                "reactant_1",
                "solvent_0",
                "solvent_1",
                "temperature",
                "rxn_time",
                "product_0",
                "yield_0",
                "procedure_details",
            ]
        );
        assert_eq!(df.column("reactant_1").unwrap().str().unwrap().get(0), Some("CC(=O)O"));
        assert_eq!(df.column("solvent_1").unwrap().str().unwrap().get(0), None);
        assert_eq!(df.column("yield_0").unwrap().f64().unwrap().get(0), Some(72.0));
    }

    #[test]
    fn observed_widths_cover_every_molecule() {
        let widths = RoleWidths::observed(&[reaction(), ResolvedReaction::default()]);
        assert_eq!(widths.reactant, 3);
        assert_eq!(widths.solvent, 1);
        assert_eq!(widths.agent, 0);
        assert_eq!(widths.width(ColumnGroup::Yield), 1);
    }
}
