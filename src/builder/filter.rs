//! Filter-tree builder: prefilter slots and the nodes beneath them.

use std::fmt::Display;

use log::debug;

use super::finite;
use super::path::{ConstraintPath, MonomialPath, OrPath, TermPath};
use crate::error::{BuildError, BuildResult};
use crate::lexicon::Lexicon;
use crate::model::{
    ColumnChange, ColumnRef, Comparator, Constraint, Monomial, OrClause, QueryDocument, Term,
    VerticalFilter,
};

fn stale(path: impl Display) -> BuildError {
    BuildError::StalePath {
        path: path.to_string(),
    }
}

fn check_permits(lexicon: &Lexicon, column: &ColumnRef, comparator: Comparator) -> BuildResult<()> {
    if column.permits(lexicon, comparator) {
        Ok(())
    } else {
        Err(BuildError::UnsupportedComparator {
            column: column.to_string(),
            comparator,
        })
    }
}

fn remove_at<T>(items: &mut Vec<T>, index: usize, path: impl Display) -> BuildResult<T> {
    if index < items.len() {
        Ok(items.remove(index))
    } else {
        Err(stale(path))
    }
}

/// Remove from a list that must keep at least one entry.
fn remove_keeping_one<T>(
    items: &mut Vec<T>,
    index: usize,
    node: &'static str,
    path: impl Display,
) -> BuildResult<T> {
    if index >= items.len() {
        return Err(stale(path));
    }
    if items.len() == 1 {
        return Err(BuildError::WouldEmpty {
            node,
            path: path.to_string(),
        });
    }
    Ok(items.remove(index))
}

impl QueryDocument {
    // =========================================================================
    // Prefilter slots
    // =========================================================================

    /// Assign the first unassigned lexicon vertical to a new slot seeded with
    /// the minimal filter.
    pub fn add_vertical(&self, lexicon: &Lexicon) -> BuildResult<Self> {
        let vertical = self
            .unused_verticals(lexicon, None)
            .first()
            .copied()
            .ok_or(BuildError::NoVerticalAvailable {
                assigned: self.vertical_assignment.len(),
            })?;
        let seed = ColumnRef::first_of(lexicon, vertical)?;
        check_permits(lexicon, &seed, Comparator::Eq)?;

        let mut next = self.clone();
        next.vertical_assignment.push(vertical.to_string());
        next.pre_filters.push(VerticalFilter::minimal(seed));
        debug!("added prefilter slot {} for vertical {}", next.pre_filters.len() - 1, vertical);
        Ok(next)
    }

    /// Drop slot `index`; later slots shift down by one.
    pub fn remove_vertical(&self, index: usize) -> BuildResult<Self> {
        self.assigned(index)?;

        let mut next = self.clone();
        let vertical = next.vertical_assignment.remove(index);
        next.pre_filters.remove(index);
        debug!("removed prefilter slot {} ({})", index, vertical);
        Ok(next)
    }

    /// Point slot `index` at another vertical, resetting its filter.
    ///
    /// Old column references are meaningless for the new vertical, so the
    /// whole subtree is replaced by the minimal filter.
    pub fn reassign_vertical(
        &self,
        lexicon: &Lexicon,
        index: usize,
        vertical: &str,
    ) -> BuildResult<Self> {
        self.assigned(index)?;
        if let Some(existing) = self.assignment_of(vertical).filter(|&i| i != index) {
            return Err(BuildError::DuplicateVertical {
                vertical: vertical.to_string(),
                existing,
            });
        }
        let seed = ColumnRef::first_of(lexicon, vertical)?;
        check_permits(lexicon, &seed, Comparator::Eq)?;

        let mut next = self.clone();
        next.vertical_assignment[index] = vertical.to_string();
        next.pre_filters[index] = VerticalFilter::minimal(seed);
        debug!("reassigned prefilter slot {} to {}", index, vertical);
        Ok(next)
    }

    // =========================================================================
    // Structural edits
    // =========================================================================

    pub fn add_or_clause(&self, lexicon: &Lexicon, vertical: usize) -> BuildResult<Self> {
        let seed = self.seed(lexicon, vertical)?;
        check_permits(lexicon, &seed, Comparator::Eq)?;
        let mut next = self.clone();
        next.filter_mut(vertical)?.clauses.push(OrClause::new(seed));
        Ok(next)
    }

    /// Remove an OR clause. The slot may be left with none, which places no
    /// constraint on the vertical.
    pub fn remove_or_clause(&self, path: OrPath) -> BuildResult<Self> {
        let mut next = self.clone();
        remove_at(&mut next.filter_mut(path.vertical)?.clauses, path.or_clause, path)?;
        debug!("removed {}", path);
        Ok(next)
    }

    pub fn add_and_clause(&self, lexicon: &Lexicon, path: OrPath) -> BuildResult<Self> {
        let seed = self.seed(lexicon, path.vertical)?;
        check_permits(lexicon, &seed, Comparator::Eq)?;
        let mut next = self.clone();
        next.or_clause_mut(path)?
            .constraints
            .push(Constraint::new(seed));
        Ok(next)
    }

    pub fn remove_and_clause(&self, path: ConstraintPath) -> BuildResult<Self> {
        let mut next = self.clone();
        let clause = next.or_clause_mut(path.or_path())?;
        remove_keeping_one(&mut clause.constraints, path.constraint, "constraint", path)?;
        debug!("removed {}", path);
        Ok(next)
    }

    pub fn add_monomial(&self, lexicon: &Lexicon, path: ConstraintPath) -> BuildResult<Self> {
        let seed = self.seed(lexicon, path.vertical)?;
        let mut next = self.clone();
        let constraint = next.constraint_mut(path)?;
        check_permits(lexicon, &seed, constraint.comparator)?;
        constraint.lhs.push(Monomial::new(seed));
        Ok(next)
    }

    pub fn remove_monomial(&self, path: MonomialPath) -> BuildResult<Self> {
        let mut next = self.clone();
        let constraint = next.constraint_mut(path.constraint_path())?;
        remove_keeping_one(&mut constraint.lhs, path.monomial, "monomial", path)?;
        debug!("removed {}", path);
        Ok(next)
    }

    pub fn add_term(&self, lexicon: &Lexicon, path: MonomialPath) -> BuildResult<Self> {
        let seed = self.seed(lexicon, path.vertical)?;
        let mut next = self.clone();
        let comparator = next.constraint_mut(path.constraint_path())?.comparator;
        check_permits(lexicon, &seed, comparator)?;
        next.monomial_mut(path)?.factors.push(Term::new(seed));
        Ok(next)
    }

    pub fn remove_term(&self, path: TermPath) -> BuildResult<Self> {
        let mut next = self.clone();
        let monomial = next.monomial_mut(path.monomial_path())?;
        remove_keeping_one(&mut monomial.factors, path.term, "term", path)?;
        debug!("removed {}", path);
        Ok(next)
    }

    // =========================================================================
    // Field updates
    // =========================================================================

    /// Change a constraint's comparator. Every field on its left-hand side
    /// must permit the new one.
    pub fn update_comparator(
        &self,
        lexicon: &Lexicon,
        path: ConstraintPath,
        comparator: Comparator,
    ) -> BuildResult<Self> {
        let mut next = self.clone();
        let constraint = next.constraint_mut(path)?;
        for monomial in &constraint.lhs {
            for term in &monomial.factors {
                check_permits(lexicon, &term.column, comparator)?;
            }
        }
        constraint.comparator = comparator;
        Ok(next)
    }

    pub fn update_rhs(&self, path: ConstraintPath, rhs: f64) -> BuildResult<Self> {
        let rhs = finite("rhs", rhs)?;
        let mut next = self.clone();
        next.constraint_mut(path)?.rhs = rhs;
        Ok(next)
    }

    pub fn update_coefficient(&self, path: MonomialPath, coefficient: f64) -> BuildResult<Self> {
        let coefficient = finite("coefficient", coefficient)?;
        let mut next = self.clone();
        next.monomial_mut(path)?.coefficient = coefficient;
        Ok(next)
    }

    /// Pick another field of the slot's vertical for a term.
    pub fn update_column(
        &self,
        lexicon: &Lexicon,
        path: TermPath,
        field: &str,
    ) -> BuildResult<Self> {
        let mut next = self.clone();
        let comparator = next.constraint_mut(path.monomial_path().constraint_path())?.comparator;
        let column = &mut next.term_mut(path)?.column;
        column.apply(lexicon, &ColumnChange::column(field))?;
        check_permits(lexicon, column, comparator)?;
        Ok(next)
    }

    pub fn update_exponent(&self, path: TermPath, exponent: i32) -> BuildResult<Self> {
        let mut next = self.clone();
        next.term_mut(path)?.exponent = exponent;
        Ok(next)
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    /// First field of the vertical assigned to slot `vertical`.
    fn seed(&self, lexicon: &Lexicon, vertical: usize) -> BuildResult<ColumnRef> {
        ColumnRef::first_of(lexicon, self.assigned(vertical)?)
    }

    fn filter_mut(&mut self, vertical: usize) -> BuildResult<&mut VerticalFilter> {
        let len = self.pre_filters.len();
        self.pre_filters
            .get_mut(vertical)
            .ok_or(BuildError::IndexOutOfRange {
                what: "vertical",
                index: vertical,
                len,
            })
    }

    fn or_clause_mut(&mut self, path: OrPath) -> BuildResult<&mut OrClause> {
        self.filter_mut(path.vertical)?
            .clauses
            .get_mut(path.or_clause)
            .ok_or_else(|| stale(path))
    }

    fn constraint_mut(&mut self, path: ConstraintPath) -> BuildResult<&mut Constraint> {
        self.or_clause_mut(path.or_path())?
            .constraints
            .get_mut(path.constraint)
            .ok_or_else(|| stale(path))
    }

    fn monomial_mut(&mut self, path: MonomialPath) -> BuildResult<&mut Monomial> {
        self.constraint_mut(path.constraint_path())?
            .lhs
            .get_mut(path.monomial)
            .ok_or_else(|| stale(path))
    }

    fn term_mut(&mut self, path: TermPath) -> BuildResult<&mut Term> {
        self.monomial_mut(path.monomial_path())?
            .factors
            .get_mut(path.term)
            .ok_or_else(|| stale(path))
    }
}
