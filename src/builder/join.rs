//! Join builder.
//!
//! Only the internal well-typedness of each clause is maintained here;
//! duplicate or cyclic joins are left for the executor to reject.

use log::debug;

use crate::error::{BuildError, BuildResult};
use crate::lexicon::Lexicon;
use crate::model::{
    ColumnChange, ColumnRef, JoinClause, JoinKind, JoinPredicate, JoinSide, QueryDocument,
};

impl QueryDocument {
    /// Append an INNER join between the first two lexicon verticals, each on
    /// its first field.
    pub fn add_join(&self, lexicon: &Lexicon) -> BuildResult<Self> {
        let [first, second, ..] = lexicon.verticals() else {
            return Err(BuildError::InsufficientVerticals {
                required: 2,
                available: lexicon.len(),
            });
        };
        let left = ColumnRef::first_of(lexicon, &first.id)?;
        let right = ColumnRef::first_of(lexicon, &second.id)?;

        let mut next = self.clone();
        next.joins.push(JoinClause::new(JoinKind::Inner, left, right));
        debug!("added join {}", next.joins.len() - 1);
        Ok(next)
    }

    pub fn remove_join(&self, join: usize) -> BuildResult<Self> {
        self.join(join)?;
        let mut next = self.clone();
        next.joins.remove(join);
        Ok(next)
    }

    pub fn update_join_kind(&self, join: usize, kind: JoinKind) -> BuildResult<Self> {
        let mut next = self.clone();
        next.join_mut(join)?.kind = kind;
        Ok(next)
    }

    /// Point one operand at another vertical; its column snaps to that
    /// vertical's first field.
    pub fn update_operand_vertical(
        &self,
        lexicon: &Lexicon,
        join: usize,
        side: JoinSide,
        vertical: &str,
    ) -> BuildResult<Self> {
        self.update_operand(lexicon, join, side, ColumnChange::vertical(vertical))
    }

    pub fn update_operand_column(
        &self,
        lexicon: &Lexicon,
        join: usize,
        side: JoinSide,
        field: &str,
    ) -> BuildResult<Self> {
        self.update_operand(lexicon, join, side, ColumnChange::column(field))
    }

    fn update_operand(
        &self,
        lexicon: &Lexicon,
        join: usize,
        side: JoinSide,
        change: ColumnChange,
    ) -> BuildResult<Self> {
        let mut next = self.clone();
        next.predicate_mut(join)?
            .operand_mut(side)
            .column
            .apply(lexicon, &change)?;
        Ok(next)
    }

    fn join(&self, join: usize) -> BuildResult<&JoinClause> {
        self.joins.get(join).ok_or(BuildError::IndexOutOfRange {
            what: "join",
            index: join,
            len: self.joins.len(),
        })
    }

    fn join_mut(&mut self, join: usize) -> BuildResult<&mut JoinClause> {
        let len = self.joins.len();
        self.joins.get_mut(join).ok_or(BuildError::IndexOutOfRange {
            what: "join",
            index: join,
            len,
        })
    }

    /// The predicate edits address; the builder keeps exactly one per clause.
    fn predicate_mut(&mut self, join: usize) -> BuildResult<&mut JoinPredicate> {
        self.join_mut(join)?
            .predicates
            .first_mut()
            .ok_or_else(|| BuildError::StalePath {
                path: format!("join[{}].predicate[0]", join),
            })
    }
}
