//! Positional pairing of products with their declared yields.

use rxn_model::ProductYield;

use crate::error::ResolveError;

/// Outcome of [`match_yield_with_product`].
#[derive(Debug, Clone, PartialEq)]
pub enum MatchResult {
    /// Every kept product had a yield slot (possibly `null`), or no yield
    /// data existed at all.
    Matched(Vec<ProductYield>),
    /// The yield list ran out before the products did; `unmatched` kept
    /// products received `null`.
    Truncated {
        pairs: Vec<ProductYield>,
        unmatched: usize,
    },
    /// The record cannot be paired without guessing.
    Invalid(ResolveError),
}

impl MatchResult {
    /// The pairs, or the reason the record was rejected.
    ///
    /// # Errors
    ///
    /// Returns the carried error for [`MatchResult::Invalid`].
    pub fn into_pairs(self) -> Result<Vec<ProductYield>, ResolveError> {
        match self {
            MatchResult::Matched(pairs) | MatchResult::Truncated { pairs, .. } => Ok(pairs),
            MatchResult::Invalid(err) => Err(err),
        }
    }
}

/// Pair labelled products with yields by position.
///
/// Product `i` receives yield `i`. `yields = None` gives every product a
/// `null` yield; an empty yield list for a non-empty product list is
/// rejected. When `reaction_string_products` is non-empty only labelled
/// products also present in it are kept, and the yields of dropped products
/// go with them.
pub fn match_yield_with_product<R, L>(
    reaction_string_products: &[R],
    labelled_products: &[L],
    yields: Option<&[Option<f64>]>,
) -> MatchResult
where
    R: AsRef<str>,
    L: AsRef<str>,
{
    if let Some([]) = yields
        && !labelled_products.is_empty()
    {
        return MatchResult::Invalid(ResolveError::YieldMismatch {
            products: labelled_products.len(),
        });
    }

    let paired = labelled_products.iter().enumerate().map(|(index, product)| {
        let slot = yields.map(|values| values.get(index).copied());
        (ProductYield::new(product.as_ref(), slot.flatten().flatten()), slot)
    });

    let mut pairs = Vec::with_capacity(labelled_products.len());
    let mut unmatched = 0;
    for (pair, slot) in paired {
        let confirmed = reaction_string_products.is_empty()
            || reaction_string_products
                .iter()
                .any(|product| product.as_ref() == pair.identifier);
        if !confirmed {
            continue;
        }
        if matches!(slot, Some(None)) {
            unmatched += 1;
        }
        pairs.push(pair);
    }

    if unmatched > 0 {
        MatchResult::Truncated { pairs, unmatched }
    } else {
        MatchResult::Matched(pairs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NO_PRODUCTS: [&str; 0] = [];

    fn identifiers(pairs: &[ProductYield]) -> Vec<&str> {
        pairs.iter().map(|pair| pair.identifier.as_str()).collect()
    }

    fn yields(pairs: &[ProductYield]) -> Vec<Option<f64>> {
        pairs.iter().map(|pair| pair.yield_percent).collect()
    }

    #[test]
    fn pairs_by_position() {
        let result = match_yield_with_product(&NO_PRODUCTS, &["A", "B"], Some(&[Some(1.0), Some(2.0)]));
        let MatchResult::Matched(pairs) = result else {
            panic!("expected a full match, got {result:?}");
        };
        assert_eq!(identifiers(&pairs), vec!["A", "B"]);
        assert_eq!(yields(&pairs), vec![Some(1.0), Some(2.0)]);
    }

    #[test]
    fn missing_yield_data_gives_nulls() {
        let result = match_yield_with_product(&NO_PRODUCTS, &["A", "B"], None);
        assert_eq!(
            result,
            MatchResult::Matched(vec![ProductYield::new("A", None), ProductYield::new("B", None)])
        );
    }

    #[test]
    fn short_yield_list_truncates() {
        let result = match_yield_with_product(&NO_PRODUCTS, &["A", "B", "C"], Some(&[Some(40.0)]));
        let MatchResult::Truncated { pairs, unmatched } = result else {
            panic!("expected truncation");
        };
        assert_eq!(unmatched, 2);
        assert_eq!(yields(&pairs), vec![Some(40.0), None, None]);
    }

    #[test]
    fn declared_null_yields_are_a_full_match() {
        let result = match_yield_with_product(&NO_PRODUCTS, &["A"], Some(&[None]));
        assert_eq!(result, MatchResult::Matched(vec![ProductYield::new("A", None)]));
    }

    #[test]
    fn empty_yield_list_is_invalid() {
        let result = match_yield_with_product(&NO_PRODUCTS, &["A"], Some(&[]));
        assert_eq!(
            result,
            MatchResult::Invalid(ResolveError::YieldMismatch { products: 1 })
        );
        assert!(result.into_pairs().is_err());

        let empty = match_yield_with_product(&NO_PRODUCTS, &NO_PRODUCTS, Some(&[]));
        assert_eq!(empty, MatchResult::Matched(Vec::new()));
    }

    #[test]
    fn reaction_string_products_filter_labelled_products() {
        let result = match_yield_with_product(
            &["P"],
            &["[Na+]", "P", "Q"],
            Some(&[Some(10.0), Some(80.0), Some(5.0)]),
        );
        assert_eq!(result, MatchResult::Matched(vec![ProductYield::new("P", Some(80.0))]));

        let disjoint = match_yield_with_product(&["X"], &["[Na+]", "[Na+]"], Some(&[None, None]));
        assert_eq!(disjoint, MatchResult::Matched(Vec::new()));
    }
}
