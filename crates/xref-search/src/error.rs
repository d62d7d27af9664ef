//! Error types for the xref-search crate.

use thiserror::Error;

/// Errors that abort a search.
///
/// Zero matches and unparseable queries are not errors; they are reported as
/// [`SearchOutcome`](crate::SearchOutcome) values.
#[derive(Debug, Error)]
pub enum SearchError {
    /// Target-column selection resolved to no columns.
    #[error("no {table} columns match {patterns:?}")]
    NoTargetColumns {
        /// Which table was searched ("dictionary" or "descriptions").
        table: &'static str,
        /// The patterns that matched nothing.
        patterns: Vec<String>,
    },

    /// A column pattern is not a valid glob.
    #[error("invalid column pattern '{pattern}': {source}")]
    InvalidColumnPattern {
        /// The invalid pattern.
        pattern: String,
        /// Underlying glob error.
        source: globset::Error,
    },

    /// An unexpected internal failure while evaluating a predicate.
    #[error("evaluation failed: {message}")]
    Evaluation {
        /// Error message.
        message: String,
    },
}

impl SearchError {
    /// Returns true for errors caused by column configuration rather than evaluation.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::NoTargetColumns { .. } | Self::InvalidColumnPattern { .. }
        )
    }

    /// Creates an `Evaluation` error from a regex build failure.
    pub(crate) fn regex(source: &regex::Error) -> Self {
        Self::Evaluation {
            message: source.to_string(),
        }
    }
}
