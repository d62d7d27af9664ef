//! Parameter types for cross-reference search.

use std::collections::BTreeMap;

/// Default minimum length of a term extracted from dictionary rows.
pub const DEFAULT_MIN_TERM_LENGTH: usize = 2;

/// Default tolerance for numeric equality.
pub const DEFAULT_EPSILON: f64 = 1e-9;

/// Parameters controlling a [`SearchContext`](crate::SearchContext).
#[derive(Debug, Clone, PartialEq)]
pub struct SearchParams {
    /// Glob patterns selecting the dictionary columns to search. Empty means all.
    pub dictionary_columns: Vec<String>,
    /// Glob patterns selecting the description columns to search. Empty means all.
    pub description_columns: Vec<String>,
    /// Index of the dictionary column whose values seed the unit resolver.
    pub unit_column: usize,
    /// Extra unit synonyms, keyed by canonical unit.
    pub unit_synonyms: BTreeMap<String, Vec<String>>,
    /// Extracted terms shorter than this many characters are discarded. Default: 2.
    pub min_term_length: usize,
    /// Tolerance for numeric equality. Default: 1e-9.
    pub epsilon: f64,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            dictionary_columns: vec!["*".to_string()],
            description_columns: vec!["*".to_string()],
            unit_column: 0,
            unit_synonyms: BTreeMap::new(),
            min_term_length: DEFAULT_MIN_TERM_LENGTH,
            epsilon: DEFAULT_EPSILON,
        }
    }
}

impl SearchParams {
    /// Adds synonyms for a canonical unit.
    pub fn with_unit_synonyms(mut self, canonical: &str, synonyms: &[&str]) -> Self {
        self.unit_synonyms.insert(
            canonical.to_string(),
            synonyms.iter().map(|s| (*s).to_string()).collect(),
        );
        self
    }
}
