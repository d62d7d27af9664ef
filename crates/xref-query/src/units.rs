//! Unit resolution.
//!
//! The resolver maps raw unit tokens to canonical units. It is seeded from one column of the
//! dictionary table, where every distinct non-empty value is its own canonical unit, and can be
//! extended with explicit synonym groups.

use std::{collections::HashMap, fmt};

use crate::normalize::{NormalizedText, normalize};

/// The canonical representative of a set of unit synonyms.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CanonicalUnit(NormalizedText);

impl CanonicalUnit {
    /// Returns the canonical unit as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for CanonicalUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Synonym table from normalized unit tokens to canonical units.
///
/// Rebuilt wholesale whenever the dictionary is reloaded, never mutated while a search runs.
#[derive(Debug, Clone, Default)]
pub struct UnitResolver {
    /// Normalized synonym -> canonical unit.
    synonyms: HashMap<NormalizedText, CanonicalUnit>,
}

impl UnitResolver {
    /// Creates an empty resolver that recognizes no units.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a resolver where each distinct non-empty normalized value is self-canonical.
    pub fn from_values<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut resolver = Self::new();
        for value in values {
            let unit = normalize(value.as_ref());
            if unit.is_empty() {
                continue;
            }
            resolver
                .synonyms
                .entry(unit.clone())
                .or_insert(CanonicalUnit(unit));
        }
        resolver
    }

    /// Registers `synonyms` (and `canonical` itself) as resolving to `canonical`.
    ///
    /// Existing entries are overwritten, so explicit groups take precedence over values seeded
    /// from the dictionary.
    pub fn add_synonyms<S: AsRef<str>>(&mut self, canonical: &str, synonyms: &[S]) {
        let canonical = normalize(canonical);
        if canonical.is_empty() {
            return;
        }
        let unit = CanonicalUnit(canonical.clone());
        self.synonyms.insert(canonical, unit.clone());
        for synonym in synonyms {
            let key = normalize(synonym.as_ref());
            if !key.is_empty() {
                self.synonyms.insert(key, unit.clone());
            }
        }
    }

    /// Resolves a raw unit token to its canonical unit, or `None` if unrecognized.
    pub fn resolve(&self, raw_unit: &str) -> Option<CanonicalUnit> {
        let key = normalize(raw_unit);
        self.synonyms.get(&key).cloned()
    }

    /// Number of recognized unit tokens.
    pub fn len(&self) -> usize {
        self.synonyms.len()
    }

    /// Returns true if no unit is recognized.
    pub fn is_empty(&self) -> bool {
        self.synonyms.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_are_self_canonical() {
        let resolver = UnitResolver::from_values(["v", "A", "", "  ", "Volts"]);
        assert_eq!(resolver.len(), 3);
        assert_eq!(resolver.resolve("V").unwrap().as_str(), "V");
        assert_eq!(resolver.resolve("volts").unwrap().as_str(), "VOLTS");
        assert!(resolver.resolve("W").is_none());
    }

    #[test]
    fn duplicates_collapse() {
        let resolver = UnitResolver::from_values(["mm", "MM", "Mm "]);
        assert_eq!(resolver.len(), 1);
    }

    #[test]
    fn resolution_is_accent_and_case_insensitive() {
        let resolver = UnitResolver::from_values(["Ω"]);
        // Ω is outside the normalized charset, so it cannot be a unit on its own.
        assert!(resolver.is_empty());

        let resolver = UnitResolver::from_values(["métro"]);
        assert_eq!(resolver.resolve("METRO").unwrap().as_str(), "METRO");
    }

    #[test]
    fn synonym_groups_map_to_canonical() {
        let mut resolver = UnitResolver::from_values(["V", "VOLTS"]);
        resolver.add_synonyms("V", &["volt", "Volts"]);
        assert_eq!(resolver.resolve("volts").unwrap().as_str(), "V");
        assert_eq!(resolver.resolve("VOLT").unwrap().as_str(), "V");
        assert_eq!(resolver.resolve("v").unwrap().as_str(), "V");
    }

    #[test]
    fn empty_canonical_is_ignored() {
        let mut resolver = UnitResolver::new();
        resolver.add_synonyms("%%", &["x"]);
        assert!(resolver.is_empty());
    }
}
