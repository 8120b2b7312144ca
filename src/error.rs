//! Error types for lexicon loading and query construction.
//!
//! Every builder operation is all-or-nothing: when one of these errors is
//! returned the input document is untouched and no partial edit is visible.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::model::{Comparator, FunctionKind};
use crate::validation::ValidationError;

/// Result type for builder operations.
pub type BuildResult<T> = Result<T, BuildError>;

/// Result type for lexicon loading.
pub type LexiconResult<T> = Result<T, LexiconError>;

/// Errors raised while editing a query document.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BuildError {
    /// Every lexicon vertical already has a prefilter slot.
    #[error("no unassigned vertical is available (all {assigned} are in use)")]
    NoVerticalAvailable { assigned: usize },

    /// The vertical is already assigned to another prefilter slot.
    #[error("vertical '{vertical}' is already assigned at index {existing}")]
    DuplicateVertical { vertical: String, existing: usize },

    /// A top-level index (prefilter slot, join, independent) is past the end.
    #[error("{what} index {index} is out of range (length {len})")]
    IndexOutOfRange {
        what: &'static str,
        index: usize,
        len: usize,
    },

    /// A nested path references a node that no longer exists.
    #[error("path {path} does not address an existing node")]
    StalePath { path: String },

    /// The lexicon has too few verticals for the operation.
    #[error("operation needs {required} vertical(s) but the lexicon has {available}")]
    InsufficientVerticals { required: usize, available: usize },

    /// The active query function does not carry the field.
    #[error("{kind} function has no '{field}' field")]
    WrongVariant {
        kind: FunctionKind,
        field: &'static str,
    },

    /// No lexicon is loaded, or the last fetch failed.
    #[error("lexicon unavailable: {0}")]
    LexiconUnavailable(String),

    /// The vertical id is not in the lexicon.
    #[error("unknown vertical '{0}'")]
    UnknownVertical(String),

    /// The field is not offered by the vertical.
    #[error("vertical '{vertical}' has no field '{field}'")]
    UnknownField { vertical: String, field: String },

    /// Removal would leave a list that must stay non-empty with no entries.
    #[error("cannot remove the last {node} at {path}")]
    WouldEmpty { node: &'static str, path: String },

    /// NaN and infinities have no wire representation.
    #[error("{field} must be a finite number")]
    NonFiniteNumber { field: &'static str },

    /// A field in the constraint does not permit the comparator.
    #[error("field {column} does not permit comparator '{comparator}'")]
    UnsupportedComparator {
        column: String,
        comparator: Comparator,
    },

    /// A document built outside the builders failed validation.
    #[error("invalid query document: {}", format_validation_errors(.0))]
    InvalidDocument(Vec<ValidationError>),
}

fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Errors raised while reading or parsing a lexicon.
#[derive(Error, Debug)]
pub enum LexiconError {
    #[error("failed to read lexicon file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse lexicon: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("lexicon has no verticals")]
    Empty,

    #[error("vertical '{0}' has no columns")]
    EmptyVertical(String),

    #[error("vertical '{0}' appears more than once")]
    DuplicateVertical(String),

    #[error("vertical '{vertical}' lists column '{column}' more than once")]
    DuplicateColumn { vertical: String, column: String },

    /// A plain column shares its name with a categorical group.
    #[error("vertical '{vertical}' uses '{field}' both as a column and as a categorical group")]
    FieldConflict { vertical: String, field: String },
}

impl From<LexiconError> for BuildError {
    fn from(err: LexiconError) -> Self {
        BuildError::LexiconUnavailable(err.to_string())
    }
}
