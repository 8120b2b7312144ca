//! Prefilter tree: a disjunction of conjunctions of polynomial constraints.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::ColumnRef;
use crate::lexicon::ComparisonOp;

/// Constraint comparator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Comparator {
    #[default]
    #[serde(rename = "=")]
    Eq,
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = "<=")]
    Le,
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = ">=")]
    Ge,
    #[serde(rename = "!=")]
    Ne,
}

impl Comparator {
    pub const ALL: [Comparator; 6] = [
        Comparator::Eq,
        Comparator::Lt,
        Comparator::Le,
        Comparator::Gt,
        Comparator::Ge,
        Comparator::Ne,
    ];

    pub fn symbol(&self) -> &'static str {
        match self {
            Comparator::Eq => "=",
            Comparator::Lt => "<",
            Comparator::Le => "<=",
            Comparator::Gt => ">",
            Comparator::Ge => ">=",
            Comparator::Ne => "!=",
        }
    }

    pub fn from_symbol(symbol: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.symbol() == symbol)
    }

    /// The lexicon operation a column must permit for this comparator.
    pub fn operation(&self) -> ComparisonOp {
        match self {
            Comparator::Eq => ComparisonOp::Eq,
            Comparator::Lt => ComparisonOp::Lt,
            Comparator::Le => ComparisonOp::Le,
            Comparator::Gt => ComparisonOp::Gt,
            Comparator::Ge => ComparisonOp::Ge,
            Comparator::Ne => ComparisonOp::Ne,
        }
    }
}

impl fmt::Display for Comparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// `column ^ exponent`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Term {
    pub column: ColumnRef,
    pub exponent: i32,
}

impl Term {
    pub fn new(column: ColumnRef) -> Self {
        Self {
            column,
            exponent: 1,
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.exponent == 1 {
            write!(f, "{}", self.column.column)
        } else {
            write!(f, "{}^{}", self.column.column, self.exponent)
        }
    }
}

/// `coefficient * Π factors`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Monomial {
    #[serde(serialize_with = "super::number::serialize")]
    pub coefficient: f64,
    /// Non-empty.
    pub factors: Vec<Term>,
}

impl Monomial {
    pub fn new(column: ColumnRef) -> Self {
        Self {
            coefficient: 1.0,
            factors: vec![Term::new(column)],
        }
    }

    /// Render without the sign, which belongs to the enclosing sum.
    fn fmt_unsigned(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let magnitude = self.coefficient.abs();
        if magnitude != 1.0 {
            write!(f, "{} * ", magnitude)?;
        }
        write!(f, "(")?;
        for (i, term) in self.factors.iter().enumerate() {
            if i > 0 {
                write!(f, " * ")?;
            }
            write!(f, "{}", term)?;
        }
        write!(f, ")")
    }
}

/// `Σ lhs comparator rhs`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Constraint {
    /// Non-empty.
    pub lhs: Vec<Monomial>,
    pub comparator: Comparator,
    #[serde(serialize_with = "super::number::serialize")]
    pub rhs: f64,
}

impl Constraint {
    /// `column = 1`.
    pub fn new(column: ColumnRef) -> Self {
        Self {
            lhs: vec![Monomial::new(column)],
            comparator: Comparator::Eq,
            rhs: 1.0,
        }
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, monomial) in self.lhs.iter().enumerate() {
            let negative = monomial.coefficient < 0.0;
            match (i, negative) {
                (0, true) => write!(f, "-")?,
                (0, false) => {}
                (_, true) => write!(f, " - ")?,
                (_, false) => write!(f, " + ")?,
            }
            monomial.fmt_unsigned(f)?;
        }
        write!(f, " {} {}", self.comparator, self.rhs)
    }
}

/// Conjunction of constraints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrClause {
    pub constraints: Vec<Constraint>,
}

impl OrClause {
    pub fn new(column: ColumnRef) -> Self {
        Self {
            constraints: vec![Constraint::new(column)],
        }
    }
}

impl fmt::Display for OrClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.constraints.is_empty() {
            return write!(f, "(TRUE)");
        }
        write!(f, "(")?;
        for (i, constraint) in self.constraints.iter().enumerate() {
            if i > 0 {
                write!(f, " AND ")?;
            }
            write!(f, "{}", constraint)?;
        }
        write!(f, ")")
    }
}

/// Disjunction of [`OrClause`]s over one vertical's fields.
///
/// An empty disjunction places no constraint on the vertical.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VerticalFilter {
    pub clauses: Vec<OrClause>,
}

impl VerticalFilter {
    /// One clause, one `column = 1` constraint.
    pub fn minimal(column: ColumnRef) -> Self {
        Self {
            clauses: vec![OrClause::new(column)],
        }
    }

    /// Every column reference in the tree, in traversal order.
    pub fn column_refs(&self) -> impl Iterator<Item = &ColumnRef> {
        self.clauses
            .iter()
            .flat_map(|c| &c.constraints)
            .flat_map(|c| &c.lhs)
            .flat_map(|m| &m.factors)
            .map(|t| &t.column)
    }
}

impl fmt::Display for VerticalFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.clauses.is_empty() {
            return write!(f, "TRUE");
        }
        for (i, clause) in self.clauses.iter().enumerate() {
            if i > 0 {
                write!(f, " OR ")?;
            }
            write!(f, "{}", clause)?;
        }
        Ok(())
    }
}
