//! Query diagnostics.
//!
//! Decomposition never fails outright; problems are recorded as [`QueryError`] values on the
//! parsed query so callers can show them while the rest of the query still evaluates.

use std::{error::Error, fmt};

use thiserror::Error as ThisError;

/// The specific kind of query problem.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum QueryErrorKind {
    /// A `"` was opened and never closed; the rest of the input was taken as the phrase.
    #[error("unclosed quote")]
    UnclosedQuote,

    /// A `#` was not followed by a word or phrase.
    #[error("empty negation")]
    EmptyNegation,

    /// An atom normalized to nothing and was dropped from its group.
    #[error("term {atom:?} has no searchable characters")]
    EmptyAtom {
        /// The atom as written.
        atom: String,
    },

    /// An OR segment had no classifiable atoms and matches nothing.
    #[error("segment {index} has no searchable terms")]
    InvalidSegment {
        /// Zero-based segment index.
        index: usize,
    },
}

/// A query problem with optional position information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryError {
    /// The kind of problem.
    pub kind: QueryErrorKind,
    /// Byte position in the query, when known.
    pub position: Option<usize>,
    /// The original query string.
    pub query: String,
}

impl QueryError {
    /// Creates a diagnostic for `query`.
    pub fn new(kind: QueryErrorKind, position: Option<usize>, query: impl Into<String>) -> Self {
        Self {
            kind,
            position,
            query: query.into(),
        }
    }

    /// Returns the message without context.
    pub fn message(&self) -> String {
        self.kind.to_string()
    }

    /// Returns a suggestion for common problems.
    pub fn suggestion(&self) -> Option<&'static str> {
        match &self.kind {
            QueryErrorKind::UnclosedQuote => Some("Add a closing quote (\") to complete the phrase"),
            QueryErrorKind::EmptyNegation => {
                Some("Write the excluded term right after '#', e.g. '#cisco' or '#\"power supply\"'")
            }
            QueryErrorKind::EmptyAtom { .. } => {
                Some("Terms may only use letters, digits, spaces and . - _ /")
            }
            QueryErrorKind::InvalidSegment { .. } => {
                Some("Each side of '|' needs at least one term, e.g. 'router | switch'")
            }
        }
    }
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "query warning: {}", self.kind)?;
        writeln!(f, "  {}", self.query)?;
        if let Some(pos) = self.position {
            let mut clamped = pos.min(self.query.len());
            while !self.query.is_char_boundary(clamped) {
                clamped -= 1;
            }
            let column = self.query[..clamped].chars().count();
            writeln!(f, "  {}^", " ".repeat(column))?;
        }
        if let Some(suggestion) = self.suggestion() {
            write!(f, "hint: {suggestion}")?;
        }
        Ok(())
    }
}

impl Error for QueryError {}
