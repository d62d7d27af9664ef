//! Search outcomes.

use xref_query::QueryError;

/// Which path a submitted query takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchMode {
    /// Dictionary stage, term extraction, then the description stage.
    #[default]
    ViaDictionary,
    /// Evaluate the query straight against the descriptions.
    Direct,
}

/// The terminal state of one search.
///
/// Row indices refer to the unfiltered source tables and are always ascending.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// The query was empty; every description row is returned.
    ShowAll {
        /// All description rows.
        rows: Vec<usize>,
    },
    /// The description stage produced rows.
    Matched {
        /// Candidate dictionary rows.
        dictionary_rows: Vec<usize>,
        /// Terms extracted from the candidates.
        terms: Vec<String>,
        /// Matching description rows.
        rows: Vec<usize>,
    },
    /// Dictionary rows matched but yielded no usable terms.
    NoTermsExtracted {
        /// Candidate dictionary rows.
        dictionary_rows: Vec<usize>,
    },
    /// No dictionary row matched.
    DictionaryNoMatch,
    /// Dictionary rows matched but no description row did.
    DescriptionNoMatch {
        /// Candidate dictionary rows.
        dictionary_rows: Vec<usize>,
        /// Terms extracted from the candidates.
        terms: Vec<String>,
    },
    /// A direct search found rows.
    DirectMatched {
        /// Matching description rows.
        rows: Vec<usize>,
    },
    /// A direct search found nothing.
    DirectNoMatch,
    /// The query could not be understood.
    InvalidQuery {
        /// What went wrong while parsing.
        diagnostics: Vec<QueryError>,
    },
}

impl SearchOutcome {
    /// Description rows to display; empty for every no-match state.
    pub fn rows(&self) -> &[usize] {
        match self {
            Self::ShowAll { rows } | Self::Matched { rows, .. } | Self::DirectMatched { rows } => {
                rows
            }
            _ => &[],
        }
    }

    /// Candidate dictionary rows, if the dictionary stage ran and matched.
    pub fn dictionary_rows(&self) -> &[usize] {
        match self {
            Self::Matched {
                dictionary_rows, ..
            }
            | Self::NoTermsExtracted { dictionary_rows }
            | Self::DescriptionNoMatch {
                dictionary_rows, ..
            } => dictionary_rows,
            _ => &[],
        }
    }

    /// Terms extracted from the dictionary, if any.
    pub fn terms(&self) -> &[String] {
        match self {
            Self::Matched { terms, .. } | Self::DescriptionNoMatch { terms, .. } => terms,
            _ => &[],
        }
    }

    /// Returns true if the caller should offer a direct search instead.
    pub fn offers_fallback(&self) -> bool {
        matches!(self, Self::DictionaryNoMatch | Self::NoTermsExtracted { .. })
    }

    /// Returns true if the outcome carries at least one description row.
    pub fn has_rows(&self) -> bool {
        !self.rows().is_empty()
    }

    /// Stable machine-readable name of the state.
    pub fn status(&self) -> &'static str {
        match self {
            Self::ShowAll { .. } => "show_all",
            Self::Matched { .. } => "matched",
            Self::NoTermsExtracted { .. } => "no_terms_extracted",
            Self::DictionaryNoMatch => "dictionary_no_match",
            Self::DescriptionNoMatch { .. } => "description_no_match",
            Self::DirectMatched { .. } => "direct_matched",
            Self::DirectNoMatch => "direct_no_match",
            Self::InvalidQuery { .. } => "invalid_query",
        }
    }
}
