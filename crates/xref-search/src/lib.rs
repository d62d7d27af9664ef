//! Cross-reference search for xref.
//!
//! Queries are first matched against a *dictionary* table. The words of every matching
//! dictionary row become an OR query that is matched against a *descriptions* table, so a
//! short code or synonym finds every description mentioning any of its related words.
//!
//! This crate provides:
//! - [`RowMask`], a boolean row selection combined with AND / OR / subtraction
//! - [`Evaluator`], which evaluates parsed predicates against selected table columns
//! - [`SearchContext`], which owns both tables and runs the two-stage search or a direct
//!   search against the descriptions
//!
//! # Example
//!
//! ```
//! use xref_search::{SearchContext, SearchOutcome, SearchParams};
//! use xref_table::Table;
//!
//! let dictionary = Table::from_rows(["term"], [vec!["Router"], vec!["Switch"]]).unwrap();
//! let descriptions = Table::from_rows(
//!     ["description"],
//!     [vec!["Cisco Router 16 ports"], vec!["Managed Switch"], vec!["Cable"]],
//! )
//! .unwrap();
//!
//! let ctx = SearchContext::new(dictionary, descriptions, SearchParams::default());
//! let outcome = ctx.search("router").unwrap();
//! assert!(matches!(outcome, SearchOutcome::Matched { .. }));
//! assert_eq!(outcome.rows(), &[0]);
//! ```

#![warn(missing_docs)]

mod columns;
mod context;
mod error;
mod evaluate;
mod extract;
mod mask;
mod outcome;
mod params;

pub use columns::select_columns;
pub use context::SearchContext;
pub use error::SearchError;
pub use evaluate::Evaluator;
pub use extract::extract_terms;
pub use mask::RowMask;
pub use outcome::{SearchMode, SearchOutcome};
pub use params::{DEFAULT_EPSILON, DEFAULT_MIN_TERM_LENGTH, SearchParams};
