//! Join clauses linking fields across verticals.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::ColumnRef;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum JoinKind {
    #[default]
    Inner,
    Outer,
    Left,
    Right,
}

impl fmt::Display for JoinKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            JoinKind::Inner => "INNER",
            JoinKind::Outer => "OUTER",
            JoinKind::Left => "LEFT",
            JoinKind::Right => "RIGHT",
        };
        write!(f, "{}", s)
    }
}

/// Which operand of a predicate an edit targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinSide {
    Left,
    Right,
}

/// One side of a join predicate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JoinOperand {
    pub column: ColumnRef,
    /// `(scale, offset)`. Carried for the executor; the builder never reads it.
    #[serde(serialize_with = "super::number::serialize_pair")]
    pub transform: (f64, f64),
}

impl JoinOperand {
    pub const DEFAULT_TRANSFORM: (f64, f64) = (1.0, 1.0);

    pub fn new(column: ColumnRef) -> Self {
        Self {
            column,
            transform: Self::DEFAULT_TRANSFORM,
        }
    }
}

/// `left = right`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JoinPredicate {
    pub left: JoinOperand,
    pub right: JoinOperand,
}

impl JoinPredicate {
    pub fn operand(&self, side: JoinSide) -> &JoinOperand {
        match side {
            JoinSide::Left => &self.left,
            JoinSide::Right => &self.right,
        }
    }

    pub fn operand_mut(&mut self, side: JoinSide) -> &mut JoinOperand {
        match side {
            JoinSide::Left => &mut self.left,
            JoinSide::Right => &mut self.right,
        }
    }
}

impl fmt::Display for JoinPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.left.column, self.right.column)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JoinClause {
    pub kind: JoinKind,
    /// Exactly one predicate is produced by the builder.
    pub predicates: Vec<JoinPredicate>,
}

impl JoinClause {
    pub fn new(kind: JoinKind, left: ColumnRef, right: ColumnRef) -> Self {
        Self {
            kind,
            predicates: vec![JoinPredicate {
                left: JoinOperand::new(left),
                right: JoinOperand::new(right),
            }],
        }
    }

    pub fn column_refs(&self) -> impl Iterator<Item = &ColumnRef> {
        self.predicates
            .iter()
            .flat_map(|p| [&p.left.column, &p.right.column])
    }
}

impl fmt::Display for JoinClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} JOIN ", self.kind)?;
        for (i, predicate) in self.predicates.iter().enumerate() {
            if i > 0 {
                write!(f, " AND ")?;
            }
            write!(f, "{}", predicate)?;
        }
        Ok(())
    }
}
