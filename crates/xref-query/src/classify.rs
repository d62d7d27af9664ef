//! Atom classification.
//!
//! Turns a single atom (already split out of its AND group) into a typed predicate. The
//! comparison pattern is tried first, then the range pattern, and anything else is a literal.

use std::sync::LazyLock;

use regex::Regex;

use crate::{
    ast::{CompareOp, Predicate},
    normalize::{NormalizedText, normalize},
};

/// A number with `.` or `,` as the decimal separator.
const NUMBER: &str = r"[0-9]+(?:[.,][0-9]+)?";

/// A unit token: a letter, `%` or `°`, followed by letters, digits, `%` or `°`.
const UNIT: &str = r"[\p{L}%°][\p{L}\p{N}%°]*";

/// Anchored comparison atom: `[op] number [unit]`.
static COMPARISON: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"^\s*(>=|<=|>|<|=)?\s*({NUMBER})\s*({UNIT})?\s*$"))
        .expect("comparison pattern is valid")
});

/// Anchored range atom: `number - number [unit]`.
static RANGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"^\s*({NUMBER})\s*-\s*({NUMBER})\s*({UNIT})?\s*$"))
        .expect("range pattern is valid")
});

/// Unanchored scanner for `number [unit]` occurrences inside cell text.
static QUANTITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"({NUMBER})\s*({UNIT})?")).expect("quantity pattern is valid")
});

/// A number found in free text, with the unit token that followed it.
#[derive(Debug, Clone, PartialEq)]
pub struct Quantity<'a> {
    /// The parsed value.
    pub value: f64,
    /// The raw unit token, if one directly followed the number.
    pub unit: Option<&'a str>,
}

/// Parses a number that may use `,` as its decimal separator.
///
/// Returns `None` for anything that does not parse to a finite value.
pub fn parse_number(text: &str) -> Option<f64> {
    let value: f64 = text.trim().replace(',', ".").parse().ok()?;
    value.is_finite().then_some(value)
}

/// Normalizes a captured unit token, treating a unit that normalizes to nothing as absent.
fn unit_requirement(raw: Option<&str>) -> Option<NormalizedText> {
    raw.map(normalize).filter(|unit| !unit.is_empty())
}

/// Classifies one atom into a predicate.
///
/// Never fails: an atom that matches a numeric pattern but whose numbers do not parse becomes
/// a literal of the whole atom.
pub fn classify(atom: &str) -> Predicate {
    if let Some(caps) = COMPARISON.captures(atom) {
        let op = caps
            .get(1)
            .and_then(|m| CompareOp::from_symbol(m.as_str()))
            .unwrap_or(CompareOp::Eq);
        return match parse_number(&caps[2]) {
            Some(value) => Predicate::Compare {
                op,
                value,
                unit: unit_requirement(caps.get(3).map(|m| m.as_str())),
            },
            None => Predicate::Literal(normalize(atom)),
        };
    }

    if let Some(caps) = RANGE.captures(atom) {
        return match (parse_number(&caps[1]), parse_number(&caps[2])) {
            (Some(a), Some(b)) => {
                Predicate::range(a, b, unit_requirement(caps.get(3).map(|m| m.as_str())))
            }
            _ => Predicate::Literal(normalize(atom)),
        };
    }

    Predicate::Literal(normalize(atom))
}

/// Scans text for every `number [unit]` occurrence, in order.
///
/// Occurrences whose number fails to parse are skipped.
pub fn quantities(text: &str) -> impl Iterator<Item = Quantity<'_>> {
    QUANTITY.captures_iter(text).filter_map(|caps| {
        let value = parse_number(caps.get(1)?.as_str())?;
        Some(Quantity {
            value,
            unit: caps.get(2).map(|m| m.as_str()),
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit(s: &str) -> Option<NormalizedText> {
        Some(normalize(s))
    }

    #[test]
    fn comparison_with_unit() {
        assert_eq!(
            classify(">=48A"),
            Predicate::Compare {
                op: CompareOp::Ge,
                value: 48.0,
                unit: unit("A"),
            }
        );
        assert_eq!(
            classify("< 2,5 mm"),
            Predicate::Compare {
                op: CompareOp::Lt,
                value: 2.5,
                unit: unit("MM"),
            }
        );
    }

    #[test]
    fn all_operators() {
        for (text, op) in [
            (">1", CompareOp::Gt),
            ("<1", CompareOp::Lt),
            (">=1", CompareOp::Ge),
            ("<=1", CompareOp::Le),
            ("=1", CompareOp::Eq),
        ] {
            assert_eq!(
                classify(text),
                Predicate::Compare {
                    op,
                    value: 1.0,
                    unit: None
                },
                "{text}"
            );
        }
    }

    #[test]
    fn bare_number_is_equality() {
        assert_eq!(
            classify("16"),
            Predicate::Compare {
                op: CompareOp::Eq,
                value: 16.0,
                unit: None,
            }
        );
        assert_eq!(
            classify("220V"),
            Predicate::Compare {
                op: CompareOp::Eq,
                value: 220.0,
                unit: unit("v"),
            }
        );
    }

    #[test]
    fn range_is_order_independent() {
        assert_eq!(classify("10-20"), classify("20-10"));
        assert_eq!(classify("10 - 20 V"), Predicate::range(10.0, 20.0, unit("V")));
        assert_eq!(classify("1,5-0.5"), Predicate::range(0.5, 1.5, None));
    }

    #[test]
    fn comparison_takes_precedence_over_range() {
        // Neither anchored numeric pattern accepts an operator before a range, so the
        // comparison attempt fails first, the range attempt fails second, and the atom is a
        // literal.
        assert_eq!(classify(">=10-20"), Predicate::Literal(normalize("10-20")));
    }

    #[test]
    fn words_are_literals() {
        assert_eq!(classify("Router"), Predicate::Literal(normalize("ROUTER")));
        assert_eq!(classify("CAT6"), Predicate::Literal(normalize("CAT6")));
        assert_eq!(classify("cisco systems"), Predicate::Literal(normalize("CISCO SYSTEMS")));
    }

    #[test]
    fn symbol_only_unit_is_dropped() {
        assert_eq!(
            classify("90°"),
            Predicate::Compare {
                op: CompareOp::Eq,
                value: 90.0,
                unit: None,
            }
        );
    }

    #[test]
    fn number_parsing() {
        assert_eq!(parse_number("4,5"), Some(4.5));
        assert_eq!(parse_number(" 12 "), Some(12.0));
        assert_eq!(parse_number("1.2.3"), None);
        assert_eq!(parse_number("abc"), None);
    }

    #[test]
    fn scans_all_quantities() {
        let found: Vec<_> = quantities("Fonte 12V 2,5A, 10-20 W e 48 A").collect();
        assert_eq!(
            found,
            vec![
                Quantity { value: 12.0, unit: Some("V") },
                Quantity { value: 2.5, unit: Some("A") },
                Quantity { value: 10.0, unit: None },
                Quantity { value: 20.0, unit: Some("W") },
                Quantity { value: 48.0, unit: Some("A") },
            ]
        );
    }

    #[test]
    fn scan_without_numbers() {
        assert_eq!(quantities("no numbers here").count(), 0);
    }
}
