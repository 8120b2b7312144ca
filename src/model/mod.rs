//! Query expression model.
//!
//! ```text
//! QueryDocument
//! ├── verticalAssignment: [VerticalId]          (unique)
//! ├── preFilters:         [VerticalFilter]      (index-aligned with the above)
//! │                        └── OR  [OrClause]
//! │                             └── AND [Constraint]   Σ lhs <cmp> rhs
//! │                                  └── + [Monomial]  coefficient * Π factors
//! │                                       └── * [Term] field ^ exponent
//! ├── joins:              [JoinClause]
//! └── function:           QueryFunction         (Order | Moment | regression family)
//! ```

pub mod document;
pub mod filter;
pub mod function;
pub mod join;
mod number;

pub use document::QueryDocument;
pub use filter::{Comparator, Constraint, Monomial, OrClause, Term, VerticalFilter};
pub use function::{
    FunctionKind, MomentFunction, MomentKind, OrderFunction, QueryFunction, RegressionFunction,
};
pub use join::{JoinClause, JoinKind, JoinOperand, JoinPredicate, JoinSide};

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{BuildError, BuildResult};
use crate::lexicon::{Lexicon, VerticalId};

/// Reference to a field of a vertical.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColumnRef {
    pub vertical: VerticalId,
    pub column: String,
}

impl ColumnRef {
    pub fn new(vertical: &str, column: &str) -> Self {
        Self {
            vertical: vertical.into(),
            column: column.into(),
        }
    }

    /// Reference to the first field of `vertical`.
    pub fn first_of(lexicon: &Lexicon, vertical: &str) -> BuildResult<Self> {
        let field = lexicon
            .first_field(vertical)
            .ok_or_else(|| BuildError::UnknownVertical(vertical.to_string()))?;
        Ok(Self::new(vertical, field))
    }

    /// Default reference: first field of the first lexicon vertical.
    pub fn lexicon_default(lexicon: &Lexicon) -> BuildResult<Self> {
        let vertical = lexicon
            .verticals()
            .first()
            .ok_or(BuildError::InsufficientVerticals {
                required: 1,
                available: 0,
            })?;
        Self::first_of(lexicon, &vertical.id)
    }

    /// Apply an edit, re-snapping the column when the vertical changes.
    pub(crate) fn apply(&mut self, lexicon: &Lexicon, change: &ColumnChange) -> BuildResult<()> {
        match change {
            ColumnChange::Vertical(vertical) => {
                *self = Self::first_of(lexicon, vertical)?;
            }
            ColumnChange::Column(field) => {
                if !lexicon.has_field(&self.vertical, field) {
                    return Err(BuildError::UnknownField {
                        vertical: self.vertical.clone(),
                        field: field.clone(),
                    });
                }
                self.column = field.clone();
            }
        }
        Ok(())
    }

    pub fn is_valid_in(&self, lexicon: &Lexicon) -> bool {
        lexicon.has_field(&self.vertical, &self.column)
    }

    /// Whether the referenced field permits comparisons with `comparator`.
    pub fn permits(&self, lexicon: &Lexicon, comparator: Comparator) -> bool {
        lexicon
            .vertical(&self.vertical)
            .and_then(|v| v.field(&self.column))
            .is_some_and(|field| field.permits(comparator.operation()))
    }
}

impl fmt::Display for ColumnRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.vertical, self.column)
    }
}

/// An edit to a [`ColumnRef`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnChange {
    /// Point at another vertical; the column resets to its first field.
    Vertical(VerticalId),
    /// Pick another field of the current vertical.
    Column(String),
}

impl ColumnChange {
    pub fn vertical(id: &str) -> Self {
        ColumnChange::Vertical(id.into())
    }

    pub fn column(name: &str) -> Self {
        ColumnChange::Column(name.into())
    }
}
