//! Query parsing.
//!
//! Combines decomposition and atom classification into a [`Query`]: a positive predicate tree
//! plus a flat set of negated predicates applied afterwards as a post-filter.
//!
//! # Failure model
//!
//! Parsing is total. An atom that normalizes to nothing is dropped from its AND group; a
//! segment left with no atoms is invalid and contributes no rows. When every segment is
//! invalid the query as a whole is invalid, which callers report distinctly from "no rows
//! matched".

use tracing::{debug, warn};

use crate::{
    ast::Predicate,
    classify::classify,
    decompose::{SplitMode, decompose},
    error::{QueryError, QueryErrorKind},
};

/// A fully parsed query.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    /// The query as submitted.
    pub raw: String,
    /// The positive predicate tree, `None` if there is no valid positive part.
    pub positive: Option<Predicate>,
    /// Negated predicates, duplicates removed.
    pub negations: Vec<Predicate>,
    /// How the positive part was split.
    pub mode: SplitMode,
    /// Number of non-empty positive segments found.
    pub segment_count: usize,
    /// Indices of segments that had no classifiable atoms.
    pub invalid_segments: Vec<usize>,
    /// Problems found while parsing.
    pub diagnostics: Vec<QueryError>,
}

impl Query {
    /// Returns true if the raw query is empty or whitespace-only.
    pub fn is_empty(&self) -> bool {
        self.raw.trim().is_empty()
    }

    /// Returns true if the query has negations and no positive text at all.
    pub fn is_purely_negative(&self) -> bool {
        self.segment_count == 0 && !self.negations.is_empty()
    }

    /// Returns true if a non-empty query could not be understood.
    ///
    /// Either every positive segment was invalid, or the query had neither positive segments
    /// nor negations (e.g. a lone `#`).
    pub fn is_invalid(&self) -> bool {
        if self.is_empty() {
            return false;
        }
        if self.segment_count > 0 {
            self.positive.is_none()
        } else {
            self.negations.is_empty()
        }
    }
}

/// Classifies every atom of an AND group, dropping atoms that normalize to nothing.
fn classify_group(atoms: &[String], raw: &str, diagnostics: &mut Vec<QueryError>) -> Vec<Predicate> {
    let mut predicates = Vec::with_capacity(atoms.len());
    for atom in atoms {
        let predicate = classify(atom);
        if predicate.is_degenerate() {
            diagnostics.push(QueryError::new(
                QueryErrorKind::EmptyAtom { atom: atom.clone() },
                raw.find(atom.as_str()),
                raw,
            ));
            continue;
        }
        predicates.push(predicate);
    }
    predicates
}

/// Parses a raw query string.
pub fn parse(input: &str) -> Query {
    let decomposition = decompose(input);
    let mut diagnostics = decomposition.diagnostics;

    let mut negations: Vec<Predicate> = Vec::new();
    for atom in &decomposition.negations {
        let predicate = classify(atom);
        if predicate.is_degenerate() {
            diagnostics.push(QueryError::new(
                QueryErrorKind::EmptyAtom { atom: atom.clone() },
                input.find(atom.as_str()),
                input,
            ));
        } else if !negations.contains(&predicate) {
            negations.push(predicate);
        }
    }

    let mut valid_segments = Vec::new();
    let mut invalid_segments = Vec::new();
    for (index, atoms) in decomposition.segments.iter().enumerate() {
        let group = classify_group(atoms, input, &mut diagnostics);
        if group.is_empty() {
            warn!(index, "query segment has no classifiable atoms");
            diagnostics.push(QueryError::new(
                QueryErrorKind::InvalidSegment { index },
                None,
                input,
            ));
            invalid_segments.push(index);
        } else {
            valid_segments.push(Predicate::and(group));
        }
    }

    let positive = match (decomposition.mode, valid_segments.is_empty()) {
        (_, true) => None,
        (SplitMode::And, false) => Some(Predicate::and(valid_segments)),
        (SplitMode::Or, false) => Some(Predicate::or(valid_segments)),
    };

    let query = Query {
        raw: input.to_string(),
        positive,
        negations,
        mode: decomposition.mode,
        segment_count: decomposition.segments.len(),
        invalid_segments,
        diagnostics,
    };
    debug!(
        query = %query.raw,
        segments = query.segment_count,
        negations = query.negations.len(),
        invalid = query.invalid_segments.len(),
        "parsed query"
    );
    query
}

/// Builds an OR query string from individual terms.
///
/// Terms containing whitespace or an OR separator are quoted so they survive splitting.
pub fn or_query<I, S>(terms: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    terms
        .into_iter()
        .map(|term| {
            let term = term.as_ref();
            if term.contains(char::is_whitespace) || term.contains(['|', '/']) {
                format!("\"{term}\"")
            } else {
                term.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("|")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ast::CompareOp, normalize::normalize};

    fn lit(s: &str) -> Predicate {
        Predicate::Literal(normalize(s))
    }

    #[test]
    fn single_literal() {
        let q = parse("router");
        assert_eq!(q.positive, Some(lit("ROUTER")));
        assert!(q.negations.is_empty());
        assert!(!q.is_invalid());
    }

    #[test]
    fn and_of_atoms() {
        let q = parse("switch + >=24");
        assert_eq!(
            q.positive,
            Some(Predicate::And(vec![
                lit("switch"),
                Predicate::Compare {
                    op: CompareOp::Ge,
                    value: 24.0,
                    unit: None
                },
            ]))
        );
    }

    #[test]
    fn or_of_and_groups() {
        let q = parse("router + cisco | switch");
        assert_eq!(
            q.positive,
            Some(Predicate::Or(vec![
                Predicate::And(vec![lit("router"), lit("cisco")]),
                lit("switch"),
            ]))
        );
        assert_eq!(q.mode, SplitMode::Or);
    }

    #[test]
    fn negations_are_classified() {
        let q = parse("cable #>10m #\"patch cord\"");
        assert_eq!(
            q.negations,
            vec![
                Predicate::Compare {
                    op: CompareOp::Gt,
                    value: 10.0,
                    unit: Some(normalize("m"))
                },
                lit("patch cord"),
            ]
        );
    }

    #[test]
    fn negations_dedupe_after_normalization() {
        let q = parse("#Cisco #cisco #CÍSCO");
        assert_eq!(q.negations, vec![lit("cisco")]);
        assert!(q.is_purely_negative());
        assert!(!q.is_invalid());
    }

    #[test]
    fn empty_atoms_are_dropped_from_groups() {
        let q = parse("router + %%%");
        assert_eq!(q.positive, Some(lit("router")));
        assert!(
            q.diagnostics
                .iter()
                .any(|d| matches!(d.kind, QueryErrorKind::EmptyAtom { .. }))
        );
    }

    #[test]
    fn invalid_segment_does_not_abort_others() {
        let q = parse("router | %%%");
        assert_eq!(q.positive, Some(lit("router")));
        assert_eq!(q.invalid_segments, vec![1]);
        assert!(!q.is_invalid());
    }

    #[test]
    fn all_segments_invalid() {
        let q = parse("%%% | ***");
        assert_eq!(q.positive, None);
        assert_eq!(q.invalid_segments, vec![0, 1]);
        assert!(q.is_invalid());
    }

    #[test]
    fn lone_hash_is_invalid() {
        let q = parse("#");
        assert!(q.is_invalid());
        assert!(!q.is_purely_negative());
    }

    #[test]
    fn empty_query_is_not_invalid() {
        let q = parse("  ");
        assert!(q.is_empty());
        assert!(!q.is_invalid());
        assert_eq!(q.positive, None);
    }

    #[test]
    fn or_query_quotes_when_needed() {
        assert_eq!(or_query(["CISCO", "ROUTER", "PORTS"]), "CISCO|ROUTER|PORTS");
        assert_eq!(or_query(["A B", "TCP/IP", "X"]), "\"A B\"|\"TCP/IP\"|X");
        assert_eq!(or_query(Vec::<String>::new()), "");
    }

    #[test]
    fn or_query_round_trips_through_parse() {
        let q = parse(&or_query(["TCP/IP", "ROUTER"]));
        assert_eq!(q.positive, Some(Predicate::Or(vec![lit("TCP/IP"), lit("ROUTER")])));
    }
}
