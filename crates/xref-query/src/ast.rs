//! Predicate tree.
//!
//! A parsed query is a small closed tree: literals, numeric comparisons and ranges at the
//! leaves, AND/OR groups above them. Negation is not part of the tree; it is carried beside it
//! and applied as a post-filter.

use std::fmt;

use crate::normalize::NormalizedText;

/// Numeric comparison operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    /// Strictly greater than.
    Gt,
    /// Strictly less than.
    Lt,
    /// Greater than or equal.
    Ge,
    /// Less than or equal.
    Le,
    /// Equal (within epsilon).
    Eq,
}

impl CompareOp {
    /// Parses an operator symbol (`>`, `<`, `>=`, `<=`, `=`).
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            ">" => Some(Self::Gt),
            "<" => Some(Self::Lt),
            ">=" => Some(Self::Ge),
            "<=" => Some(Self::Le),
            "=" => Some(Self::Eq),
            _ => None,
        }
    }

    /// Returns the operator symbol.
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Gt => ">",
            Self::Lt => "<",
            Self::Ge => ">=",
            Self::Le => "<=",
            Self::Eq => "=",
        }
    }

    /// Tests `value <op> target`, treating values within `epsilon` as equal.
    pub fn holds(self, value: f64, target: f64, epsilon: f64) -> bool {
        let equal = approx_eq(value, target, epsilon);
        match self {
            Self::Gt => value > target && !equal,
            Self::Lt => value < target && !equal,
            Self::Ge => value > target || equal,
            Self::Le => value < target || equal,
            Self::Eq => equal,
        }
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Float equality with an absolute tolerance.
pub fn approx_eq(a: f64, b: f64, epsilon: f64) -> bool {
    (a - b).abs() <= epsilon
}

/// A search predicate over table rows.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// Matches rows where a target column contains the text as a whole word.
    Literal(NormalizedText),

    /// Matches rows where a target column contains a number satisfying the comparison.
    Compare {
        /// Comparison operator.
        op: CompareOp,
        /// Right-hand side of the comparison.
        value: f64,
        /// Required unit, normalized but not yet resolved.
        unit: Option<NormalizedText>,
    },

    /// Matches rows where a target column contains a number within `[low, high]`.
    Range {
        /// Inclusive lower bound (always `<= high`).
        low: f64,
        /// Inclusive upper bound.
        high: f64,
        /// Required unit, normalized but not yet resolved.
        unit: Option<NormalizedText>,
    },

    /// Conjunction: all children must match.
    And(Vec<Self>),

    /// Disjunction: at least one child must match.
    Or(Vec<Self>),
}

impl Predicate {
    /// Creates an And predicate, flattening nested Ands and unwrapping single children.
    pub fn and(predicates: Vec<Self>) -> Self {
        let mut flattened: Vec<Self> = predicates
            .into_iter()
            .flat_map(|p| match p {
                Self::And(inner) => inner,
                other => vec![other],
            })
            .collect();

        if flattened.len() == 1 {
            flattened.remove(0)
        } else {
            Self::And(flattened)
        }
    }

    /// Creates an Or predicate, flattening nested Ors and unwrapping single children.
    pub fn or(predicates: Vec<Self>) -> Self {
        let mut flattened: Vec<Self> = predicates
            .into_iter()
            .flat_map(|p| match p {
                Self::Or(inner) => inner,
                other => vec![other],
            })
            .collect();

        if flattened.len() == 1 {
            flattened.remove(0)
        } else {
            Self::Or(flattened)
        }
    }

    /// Creates a range predicate with bounds sorted ascending.
    pub fn range(a: f64, b: f64, unit: Option<NormalizedText>) -> Self {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        Self::Range { low, high, unit }
    }

    /// Returns true if this predicate can never be evaluated meaningfully.
    ///
    /// An empty literal (an atom that normalized to nothing) or an empty group.
    pub fn is_degenerate(&self) -> bool {
        match self {
            Self::Literal(text) => text.is_empty(),
            Self::And(children) | Self::Or(children) => children.is_empty(),
            Self::Compare { .. } | Self::Range { .. } => false,
        }
    }

    /// Formats the predicate as an indented tree.
    fn fmt_tree(&self, f: &mut fmt::Formatter<'_>, indent: usize) -> fmt::Result {
        let prefix = "  ".repeat(indent);
        match self {
            Self::Literal(text) => writeln!(f, "{prefix}Literal({:?})", text.as_str()),
            Self::Compare { op, value, unit } => {
                writeln!(f, "{prefix}Compare({op} {value}{})", unit_suffix(unit.as_ref()))
            }
            Self::Range { low, high, unit } => {
                writeln!(f, "{prefix}Range({low}..={high}{})", unit_suffix(unit.as_ref()))
            }
            Self::And(children) => {
                writeln!(f, "{prefix}And")?;
                for child in children {
                    child.fmt_tree(f, indent + 1)?;
                }
                Ok(())
            }
            Self::Or(children) => {
                writeln!(f, "{prefix}Or")?;
                for child in children {
                    child.fmt_tree(f, indent + 1)?;
                }
                Ok(())
            }
        }
    }

    /// Renders the predicate back into query syntax.
    pub fn to_query_string(&self) -> String {
        match self {
            Self::Literal(text) if text.contains(' ') => format!("\"{text}\""),
            Self::Literal(text) => text.to_string(),
            Self::Compare { op, value, unit } => {
                let unit = unit.as_ref().map_or("", |u| u.as_str());
                match op {
                    CompareOp::Eq => format!("{value}{unit}"),
                    _ => format!("{op}{value}{unit}"),
                }
            }
            Self::Range { low, high, unit } => {
                let unit = unit.as_ref().map_or("", |u| u.as_str());
                format!("{low}-{high}{unit}")
            }
            Self::And(children) => children
                .iter()
                .map(Self::to_query_string)
                .collect::<Vec<_>>()
                .join(" + "),
            Self::Or(children) => children
                .iter()
                .map(Self::to_query_string)
                .collect::<Vec<_>>()
                .join(" | "),
        }
    }
}

/// Renders an optional unit as ` UNIT`.
fn unit_suffix(unit: Option<&NormalizedText>) -> String {
    unit.map(|u| format!(" {u}")).unwrap_or_default()
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_tree(f, 0)
    }
}
