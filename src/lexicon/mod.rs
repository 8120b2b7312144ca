//! Lexicon module.
//!
//! The lexicon lists the verticals a query may reference and the typed
//! columns each one exposes. It is supplied by an external service and is
//! read-only to the rest of the crate.
//!
//! # Fields
//!
//! Builders never address physical columns directly. Each vertical exposes
//! *fields*: a non-categorical column is its own field, and all categorical
//! columns sharing a group name collapse into a single field named after the
//! group.
//!
//! ```text
//! columns: ssn(integer) gpa(real) math(cat:major) history(cat:major)
//! fields:  ssn          gpa       major
//! ```

mod provider;
mod types;

pub use provider::{FileLexiconProvider, LexiconProvider, StaticLexiconProvider};
pub use types::{Column, ColumnType, ComparisonOp, Field, Lexicon, Vertical, VerticalId};
