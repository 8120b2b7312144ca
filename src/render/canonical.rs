//! Canonical (wire) form of a query document.
//!
//! Field names and nesting are a compatibility contract with the query
//! execution service:
//!
//! ```json
//! {
//!   "preFilters": [[[{
//!     "lhs": [{
//!       "coefficient": 1,
//!       "factors": [{"column": {"vertical": "V1", "column": "ssn"}, "exponent": 1}]
//!     }],
//!     "comparator": "=",
//!     "rhs": 1
//!   }]]],
//!   "verticalAssignment": ["V1"],
//!   "joins": [{
//!     "kind": "INNER",
//!     "predicates": [{"left": {"column": {..}, "transform": [1, 1]}, "right": {..}}]
//!   }],
//!   "function": {
//!     "kind": "Order",
//!     "target": {..},
//!     "isPercentile": true,
//!     "lowestFirst": false,
//!     "value": 0
//!   }
//! }
//! ```
//!
//! Integral numbers are written without a fractional part.

use serde::ser::Error as _;
use serde::{Deserialize, Serialize};
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::config::RenderSettings;
use crate::lexicon::VerticalId;
use crate::model::{JoinClause, QueryDocument, QueryFunction, VerticalFilter};

/// Plain-data projection of a [`QueryDocument`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalQuery {
    pub pre_filters: Vec<VerticalFilter>,
    pub vertical_assignment: Vec<VerticalId>,
    pub joins: Vec<JoinClause>,
    pub function: QueryFunction,
}

/// Project a document into its canonical form. Total and order-preserving.
pub fn to_canonical_form(doc: &QueryDocument) -> CanonicalQuery {
    CanonicalQuery {
        pre_filters: doc.pre_filters.clone(),
        vertical_assignment: doc.vertical_assignment.clone(),
        joins: doc.joins.clone(),
        function: doc.function.clone(),
    }
}

impl CanonicalQuery {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Serialize using the `[render]` settings.
    pub fn to_json_with(&self, settings: &RenderSettings) -> serde_json::Result<String> {
        if !settings.pretty_json {
            return self.to_json();
        }
        let indent = vec![b' '; settings.indent];
        let mut buf = Vec::new();
        let formatter = PrettyFormatter::with_indent(&indent);
        let mut serializer = Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut serializer)?;
        String::from_utf8(buf).map_err(serde_json::Error::custom)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

impl From<&QueryDocument> for CanonicalQuery {
    fn from(doc: &QueryDocument) -> Self {
        to_canonical_form(doc)
    }
}
