//! Lightweight SMILES syntax scanning.
//!
//! Only the surface grammar is checked: the atom alphabet, bracket atoms,
//! branches and bond symbols. Valence and aromaticity are left to a real
//! cheminformatics toolkit behind [`crate::Canonicalizer`].

use crate::error::CanonicalizeError;

/// Organic-subset atoms that may appear outside brackets.
const ORGANIC_ATOMS: &[char] = &['B', 'C', 'N', 'O', 'P', 'S', 'F', 'I', 'b', 'c', 'n', 'o', 'p', 's', '*'];

const BOND_SYMBOLS: &[char] = &['-', '=', '#', '$', ':', '/', '\\', '.'];

/// Contents of each bracket atom, without the brackets.
pub fn bracket_atoms(smiles: &str) -> impl Iterator<Item = &str> {
    smiles
        .split('[')
        .skip(1)
        .filter_map(|rest| rest.split_once(']').map(|(atom, _)| atom))
}

/// Element symbol of a bracket atom, skipping any isotope prefix.
///
/// `"13CH4"` gives `"C"`, `"Cs+"` gives `"Cs"`, `"nH"` gives `"n"`.
pub fn element_symbol(atom: &str) -> Option<&str> {
    let rest = atom.trim_start_matches(|c: char| c.is_ascii_digit());
    let mut chars = rest.chars();
    let first = chars.next()?;
    let len = match first {
        '*' => 1,
        c if c.is_ascii_uppercase() => match chars.next() {
            Some(second) if second.is_ascii_lowercase() => 2,
            _ => 1,
        },
        c if c.is_ascii_lowercase() => {
            if rest.starts_with("se") || rest.starts_with("as") {
                2
            } else {
                1
            }
        }
        _ => return None,
    };
    Some(&rest[..len])
}

/// Atom-map number of a bracket atom (`"CH3:4"` gives `Some("4")`).
pub fn atom_map(atom: &str) -> Option<&str> {
    let (_, number) = atom.rsplit_once(':')?;
    (!number.is_empty() && number.bytes().all(|b| b.is_ascii_digit())).then_some(number)
}

/// Whether any atom carries an atom-map number.
pub fn has_atom_map(smiles: &str) -> bool {
    bracket_atoms(smiles).any(|atom| atom_map(atom).is_some())
}

/// Remove `:n` atom-map suffixes from bracket atoms.
pub fn strip_atom_maps(smiles: &str) -> String {
    let mut out = String::with_capacity(smiles.len());
    let mut rest = smiles;
    while let Some(open) = rest.find('[') {
        out.push_str(&rest[..=open]);
        rest = &rest[open + 1..];
        let Some(close) = rest.find(']') else {
            break;
        };
        let atom = &rest[..close];
        match atom_map(atom) {
            Some(number) => out.push_str(&atom[..atom.len() - number.len() - 1]),
            None => out.push_str(atom),
        }
        rest = &rest[close..];
    }
    out.push_str(rest);
    out
}

fn bracket_atom_is_valid(atom: &str) -> bool {
    let Some(symbol) = element_symbol(atom) else {
        return false;
    };
    let isotope = atom.len() - atom.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    atom[isotope + symbol.len()..]
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '@' | '+' | '-' | ':'))
}

/// Check the surface syntax of a SMILES string.
///
/// # Errors
///
/// Returns the first syntax problem found, scanning left to right.
pub fn validate(smiles: &str) -> Result<(), CanonicalizeError> {
    let chars: Vec<char> = smiles.chars().collect();
    let identifier = || smiles.to_string();
    let mut depth = 0usize;
    let mut atoms = 0usize;
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        match c {
            '[' => {
                let Some(len) = chars[i + 1..].iter().position(|&c| c == ']') else {
                    return Err(CanonicalizeError::Unbalanced {
                        identifier: identifier(),
                        delimiter: '[',
                    });
                };
                let atom: String = chars[i + 1..i + 1 + len].iter().collect();
                if atom.contains('[') || !bracket_atom_is_valid(&atom) {
                    return Err(CanonicalizeError::BracketAtom {
                        identifier: identifier(),
                        atom,
                    });
                }
                atoms += 1;
                i += len + 2;
                continue;
            }
            ']' => {
                return Err(CanonicalizeError::Unbalanced {
                    identifier: identifier(),
                    delimiter: ']',
                });
            }
            '(' => depth += 1,
            ')' => {
                if depth == 0 {
                    return Err(CanonicalizeError::Unbalanced {
                        identifier: identifier(),
                        delimiter: ')',
                    });
                }
                depth -= 1;
            }
            'C' if chars.get(i + 1) == Some(&'l') => {
                atoms += 1;
                i += 2;
                continue;
            }
            'B' if chars.get(i + 1) == Some(&'r') => {
                atoms += 1;
                i += 2;
                continue;
            }
            '%' => {
                let two_digits = chars
                    .get(i + 1..i + 3)
                    .is_some_and(|digits| digits.iter().all(char::is_ascii_digit));
                if !two_digits {
                    return Err(CanonicalizeError::UnexpectedCharacter {
                        identifier: identifier(),
                        character: c,
                        position: i,
                    });
                }
                i += 3;
                continue;
            }
            c if ORGANIC_ATOMS.contains(&c) => atoms += 1,
            c if c.is_ascii_digit() || BOND_SYMBOLS.contains(&c) => {}
            _ => {
                return Err(CanonicalizeError::UnexpectedCharacter {
                    identifier: identifier(),
                    character: c,
                    position: i,
                });
            }
        }
        i += 1;
    }
    if depth != 0 {
        return Err(CanonicalizeError::Unbalanced {
            identifier: identifier(),
            delimiter: '(',
        });
    }
    if atoms == 0 {
        return Err(CanonicalizeError::NoAtoms {
            identifier: identifier(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn element_symbols() {
        assert_eq!(element_symbol("Pd"), Some("Pd"));
        assert_eq!(element_symbol("Cs+"), Some("Cs"));
        assert_eq!(element_symbol("CH3:4"), Some("C"));
        assert_eq!(element_symbol("13CH4"), Some("C"));
        assert_eq!(element_symbol("nH"), Some("n"));
        assert_eq!(element_symbol("se"), Some("se"));
        assert_eq!(element_symbol("+"), None);
    }

    #[test]
    fn atom_maps_are_detected_and_stripped() {
        let mapped = "[CH3:1][C:2](=[O:3])[OH:4]";
        assert!(has_atom_map(mapped));
        assert_eq!(strip_atom_maps(mapped), "[CH3][C](=[O])[OH]");
        assert!(!has_atom_map("CC(=O)O"));
        assert_eq!(strip_atom_maps("[Na+].[Cl-]"), "[Na+].[Cl-]");
    }

    #[test]
    fn accepts_structures() {
        for smiles in [
            "O",
            "CCO",
            "ClCCl",
            "c1ccccc1Br",
            "O=C([O-])[O-].[Cs+].[Cs+]",
            "C[C@H](N)C(=O)O",
            "F/C=C/F",
            "C%10CCCCC%10",
            "[2H]C([2H])([2H])Cl",
        ] {
            assert_eq!(validate(smiles), Ok(()), "{smiles}");
        }
    }

    #[test]
    fn rejects_names_and_broken_syntax() {
        assert!(matches!(
            validate("water"),
            Err(CanonicalizeError::UnexpectedCharacter { character: 'w', .. })
        ));
        assert!(validate("solution").is_err());
        assert!(validate("TEA").is_err());
        assert!(matches!(
            validate("CC(C"),
            Err(CanonicalizeError::Unbalanced { delimiter: '(', .. })
        ));
        assert!(matches!(
            validate("[CC(=O)[O-].[Rh+3]]"),
            Err(CanonicalizeError::BracketAtom { .. })
        ));
        assert!(matches!(validate("..."), Err(CanonicalizeError::NoAtoms { .. })));
    }
}
