//! The query document and its cross-component consistency rules.

use log::debug;

use super::{ColumnRef, FunctionKind, JoinClause, QueryFunction, VerticalFilter};
use crate::error::{BuildError, BuildResult};
use crate::lexicon::{Lexicon, VerticalId};
use crate::render::{to_canonical_form, CanonicalQuery};
use crate::validation::{self, ValidationError};

/// A complete, always-consistent query.
///
/// Documents are values: every builder operation takes `&self` and returns
/// a new document, leaving the receiver untouched. The invariants below hold
/// for every document reachable through the builders:
///
/// - `pre_filters.len() == vertical_assignment.len()`
/// - assigned vertical ids are pairwise distinct
/// - every [`ColumnRef`] names a lexicon vertical and one of its fields
#[derive(Debug, Clone, PartialEq)]
pub struct QueryDocument {
    pub(crate) pre_filters: Vec<VerticalFilter>,
    pub(crate) vertical_assignment: Vec<VerticalId>,
    pub(crate) joins: Vec<JoinClause>,
    pub(crate) function: QueryFunction,
}

impl QueryDocument {
    /// Initial document: no prefilters, no joins, default `Order` function.
    pub fn new(lexicon: &Lexicon) -> BuildResult<Self> {
        let target = ColumnRef::lexicon_default(lexicon)?;
        debug!("new query document anchored on {}", target);
        Ok(Self {
            pre_filters: Vec::new(),
            vertical_assignment: Vec::new(),
            joins: Vec::new(),
            function: QueryFunction::default_for(FunctionKind::Order, target),
        })
    }

    /// Discard everything and return the initial document.
    pub fn clear(&self, lexicon: &Lexicon) -> BuildResult<Self> {
        Self::new(lexicon)
    }

    /// Rebuild a document from its canonical form, validating it first.
    pub fn from_canonical(query: CanonicalQuery, lexicon: &Lexicon) -> BuildResult<Self> {
        validation::validate(&query, lexicon).map_err(BuildError::InvalidDocument)?;
        Ok(Self {
            pre_filters: query.pre_filters,
            vertical_assignment: query.vertical_assignment,
            joins: query.joins,
            function: query.function,
        })
    }

    /// Check the document against a (possibly newer) lexicon.
    pub fn validate(&self, lexicon: &Lexicon) -> Result<(), Vec<ValidationError>> {
        validation::validate(&to_canonical_form(self), lexicon)
    }

    pub fn pre_filters(&self) -> &[VerticalFilter] {
        &self.pre_filters
    }

    pub fn vertical_assignment(&self) -> &[VerticalId] {
        &self.vertical_assignment
    }

    pub fn joins(&self) -> &[JoinClause] {
        &self.joins
    }

    pub fn function(&self) -> &QueryFunction {
        &self.function
    }

    /// Prefilter slot `index` with its assigned vertical.
    pub fn slot(&self, index: usize) -> Option<(&str, &VerticalFilter)> {
        let vertical = self.vertical_assignment.get(index)?;
        let filter = self.pre_filters.get(index)?;
        Some((vertical.as_str(), filter))
    }

    /// Index of the slot holding `vertical`.
    pub fn assignment_of(&self, vertical: &str) -> Option<usize> {
        self.vertical_assignment.iter().position(|v| v == vertical)
    }

    /// Verticals selectable for slot `current` (or for a new slot when
    /// `None`): those not yet assigned plus the slot's own, in lexicon order.
    pub fn unused_verticals<'a>(
        &self,
        lexicon: &'a Lexicon,
        current: Option<usize>,
    ) -> Vec<&'a str> {
        let own = current.and_then(|i| self.vertical_assignment.get(i));
        lexicon
            .vertical_ids()
            .filter(|id| {
                own.is_some_and(|v| v == id) || !self.vertical_assignment.iter().any(|v| v == id)
            })
            .collect()
    }

    /// Whether another prefilter slot can be added.
    pub fn can_add_vertical(&self, lexicon: &Lexicon) -> bool {
        !self.unused_verticals(lexicon, None).is_empty()
    }

    /// Every column reference in the document: prefilters, joins, function.
    pub fn column_refs(&self) -> Vec<&ColumnRef> {
        self.pre_filters
            .iter()
            .flat_map(VerticalFilter::column_refs)
            .chain(self.joins.iter().flat_map(JoinClause::column_refs))
            .chain(self.function.column_refs())
            .collect()
    }

    /// Vertical id at a top-level slot.
    pub(crate) fn assigned(&self, index: usize) -> BuildResult<&VerticalId> {
        self.vertical_assignment
            .get(index)
            .ok_or(BuildError::IndexOutOfRange {
                what: "vertical",
                index,
                len: self.vertical_assignment.len(),
            })
    }
}
