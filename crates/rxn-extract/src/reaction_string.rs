//! `reactants>agents>products` reaction strings.

use crate::error::ResolveError;

/// A reaction string split into its three molecule lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReactionString<'a> {
    pub reactants: Vec<&'a str>,
    pub agents: Vec<&'a str>,
    pub products: Vec<&'a str>,
}

impl<'a> ReactionString<'a> {
    /// Split a reaction string. Molecules within a section are separated by
    /// `.`; empty sections are allowed (`A.B>>C`). Anything after the first
    /// whitespace is an extension block (`|f:1.2|`) and is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::ReactionStringArity`] unless the string has
    /// exactly two `>` separators.
    pub fn parse(reaction_string: &'a str) -> Result<Self, ResolveError> {
        let body = reaction_string
            .split_whitespace()
            .next()
            .unwrap_or_default();
        let sections: Vec<&str> = body.split('>').collect();
        let [reactants, agents, products] = sections.as_slice() else {
            return Err(ResolveError::ReactionStringArity {
                reaction_string: reaction_string.to_string(),
                sections: sections.len(),
            });
        };
        Ok(Self {
            reactants: molecules(reactants),
            agents: molecules(agents),
            products: molecules(products),
        })
    }
}

fn molecules(section: &str) -> Vec<&str> {
    section
        .split('.')
        .map(str::trim)
        .filter(|molecule| !molecule.is_empty())
        .collect()
}
