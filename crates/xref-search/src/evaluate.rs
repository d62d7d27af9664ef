//! Predicate evaluation over table rows.
//!
//! An [`Evaluator`] binds a table, its target columns, a unit resolver and a numeric
//! tolerance. Every predicate evaluates to a [`RowMask`] with one flag per row.
//!
//! - **Literals** match when the normalized needle occurs in a normalized cell as a whole
//!   word: bounded by the cell edges or by a character outside `[A-Z0-9_]`.
//! - **Comparisons and ranges** scan the raw cell text for `number [unit]` occurrences. A
//!   cell matches if any occurrence satisfies the bound and passes the unit check.
//! - **AND / OR** intersect and unite child masks.

use std::cell::OnceCell;

use regex::Regex;
use tracing::trace;
use xref_query::{
    CanonicalUnit, CompareOp, NormalizedText, Predicate, Query, UnitResolver, normalize,
    quantities,
};
use xref_table::Table;

use crate::{RowMask, SearchError};

/// Builds the whole-word matcher for a normalized needle.
fn word_pattern(needle: &str) -> Result<Regex, SearchError> {
    let pattern = format!(
        "(?:^|[^A-Z0-9_]){}(?:$|[^A-Z0-9_])",
        regex::escape(needle)
    );
    Regex::new(&pattern).map_err(|e| SearchError::regex(&e))
}

/// The numeric bound of a comparison or range predicate.
#[derive(Debug, Clone, Copy)]
enum Bound {
    /// `value <op> target`.
    Compare(CompareOp, f64),
    /// `low <= value <= high`, tolerant at both ends.
    Range(f64, f64),
}

impl Bound {
    /// Tests a found value against the bound.
    fn holds(self, value: f64, epsilon: f64) -> bool {
        match self {
            Self::Compare(op, target) => op.holds(value, target, epsilon),
            Self::Range(low, high) => {
                CompareOp::Ge.holds(value, low, epsilon)
                    && CompareOp::Le.holds(value, high, epsilon)
            }
        }
    }
}

/// The unit a numeric predicate requires, resolved once per evaluation.
struct UnitCheck<'a> {
    /// Normalized required unit; `None` accepts any occurrence.
    required: Option<&'a NormalizedText>,
    /// Canonical form of the required unit, if the resolver knows it.
    canonical: Option<CanonicalUnit>,
}

impl<'a> UnitCheck<'a> {
    /// Prepares the check for a predicate's unit.
    fn new(required: Option<&'a NormalizedText>, units: &UnitResolver) -> Self {
        Self {
            required,
            canonical: required.and_then(|u| units.resolve(u)),
        }
    }

    /// Returns true if an occurrence with unit token `found` is acceptable.
    fn accepts(&self, found: Option<&str>, units: &UnitResolver) -> bool {
        let Some(required) = self.required else {
            return true;
        };
        let Some(found) = found else {
            return false;
        };
        if let Some(canonical) = &self.canonical
            && units.resolve(found).as_ref() == Some(canonical)
        {
            return true;
        }
        normalize(found) == *required
    }
}

/// Evaluates predicates against the target columns of one table.
pub struct Evaluator<'a> {
    /// The table being searched.
    table: &'a Table,
    /// Indices of the columns searched.
    columns: Vec<usize>,
    /// Known units.
    units: &'a UnitResolver,
    /// Numeric equality tolerance.
    epsilon: f64,
    /// Normalized target cells, computed on first literal evaluation; `[column][row]`.
    normalized: OnceCell<Vec<Vec<NormalizedText>>>,
}

impl<'a> Evaluator<'a> {
    /// Creates an evaluator over `columns` of `table`.
    pub fn new(
        table: &'a Table,
        columns: Vec<usize>,
        units: &'a UnitResolver,
        epsilon: f64,
    ) -> Self {
        Self {
            table,
            columns,
            units,
            epsilon,
            normalized: OnceCell::new(),
        }
    }

    /// Number of rows in the underlying table.
    pub fn row_count(&self) -> usize {
        self.table.row_count()
    }

    /// The normalized target cells, built once.
    fn normalized(&self) -> &[Vec<NormalizedText>] {
        self.normalized.get_or_init(|| {
            trace!(
                columns = self.columns.len(),
                rows = self.table.row_count(),
                "normalizing target cells"
            );
            self.columns
                .iter()
                .filter_map(|&c| self.table.column_at(c))
                .map(|column| column.cells.iter().map(|cell| normalize(cell)).collect())
                .collect()
        })
    }

    /// Evaluates a predicate to a row mask.
    pub fn evaluate(&self, predicate: &Predicate) -> Result<RowMask, SearchError> {
        let rows = self.row_count();
        match predicate {
            Predicate::Literal(needle) => self.literal(needle),
            Predicate::Compare { op, value, unit } => {
                Ok(self.numeric(Bound::Compare(*op, *value), unit.as_ref()))
            }
            Predicate::Range { low, high, unit } => {
                Ok(self.numeric(Bound::Range(*low, *high), unit.as_ref()))
            }
            Predicate::And(children) => {
                if children.is_empty() {
                    return Ok(RowMask::none(rows));
                }
                let mut mask = RowMask::all(rows);
                for child in children {
                    mask.and_assign(&self.evaluate(child)?);
                    if mask.none_selected() {
                        break;
                    }
                }
                Ok(mask)
            }
            Predicate::Or(children) => {
                let mut mask = RowMask::none(rows);
                for child in children {
                    mask.or_assign(&self.evaluate(child)?);
                }
                Ok(mask)
            }
        }
    }

    /// Rows matching any of the predicates.
    pub fn evaluate_any(&self, predicates: &[Predicate]) -> Result<RowMask, SearchError> {
        let mut mask = RowMask::none(self.row_count());
        for predicate in predicates {
            mask.or_assign(&self.evaluate(predicate)?);
        }
        Ok(mask)
    }

    /// Evaluates a parsed query: the positive part minus the union of its negations.
    ///
    /// A purely negative query starts from every row. A query with no valid positive part
    /// matches nothing.
    pub fn evaluate_query(&self, query: &Query) -> Result<RowMask, SearchError> {
        let mut mask = match &query.positive {
            Some(positive) => self.evaluate(positive)?,
            None if query.is_purely_negative() => RowMask::all(self.row_count()),
            None => RowMask::none(self.row_count()),
        };
        if !query.negations.is_empty() && !mask.none_selected() {
            mask.subtract(&self.evaluate_any(&query.negations)?);
        }
        Ok(mask)
    }

    /// Whole-word literal match over normalized cells.
    fn literal(&self, needle: &NormalizedText) -> Result<RowMask, SearchError> {
        let rows = self.row_count();
        if needle.is_empty() {
            return Ok(RowMask::none(rows));
        }
        let pattern = word_pattern(needle)?;
        let mut mask = RowMask::none(rows);
        for column in self.normalized() {
            for (row, cell) in column.iter().enumerate() {
                if !mask.get(row) && pattern.is_match(cell) {
                    mask.set(row);
                }
            }
        }
        trace!(needle = %needle, matched = mask.count(), "literal");
        Ok(mask)
    }

    /// Numeric match over raw cells.
    fn numeric(&self, bound: Bound, unit: Option<&NormalizedText>) -> RowMask {
        let check = UnitCheck::new(unit, self.units);
        let mut mask = RowMask::none(self.row_count());
        for column in self.columns.iter().filter_map(|&c| self.table.column_at(c)) {
            for (row, cell) in column.cells.iter().enumerate() {
                if mask.get(row) {
                    continue;
                }
                let hit = quantities(cell).any(|q| {
                    bound.holds(q.value, self.epsilon) && check.accepts(q.unit, self.units)
                });
                if hit {
                    mask.set(row);
                }
            }
        }
        trace!(?bound, matched = mask.count(), "numeric");
        mask
    }
}
