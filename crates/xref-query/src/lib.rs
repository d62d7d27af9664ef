//! Query language for xref cross-reference search.
//!
//! Queries combine atoms with two operators and a negation prefix:
//!
//! - **Terms**: `router` - whole-word, case- and accent-insensitive
//! - **Phrases**: `"power supply"` - quoted text kept as one atom
//! - **AND**: `router + cisco` - both must match (spaces around `+` required)
//! - **OR**: `router | switch` or `router/switch` - either may match
//! - **Negation**: `#cisco`, `#"power supply"` - rows matching are removed afterwards
//! - **Numbers**: `>=48A`, `<2,5mm`, `220V` - compared against numbers found in cells
//! - **Ranges**: `10-20V` - inclusive, bounds in any order
//!
//! # Example
//!
//! ```
//! use xref_query::{Predicate, parse};
//!
//! let query = parse("router + >=16 | switch #cisco");
//! assert!(matches!(query.positive, Some(Predicate::Or(_))));
//! assert_eq!(query.negations.len(), 1);
//! ```

#![warn(missing_docs)]

mod ast;
mod classify;
mod decompose;
mod error;
mod normalize;
mod parser;
mod units;

pub use ast::{CompareOp, Predicate, approx_eq};
pub use classify::{Quantity, classify, parse_number, quantities};
pub use decompose::{Decomposition, SplitMode, decompose};
pub use error::{QueryError, QueryErrorKind};
pub use normalize::{NormalizedText, normalize};
pub use parser::{Query, or_query, parse};
pub use units::{CanonicalUnit, UnitResolver};
