//! # Vertiquery
//!
//! Query expression model for composing statistical queries across
//! independently held datasets ("verticals").
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │            Lexicon (verticals and their fields)          │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [LexiconProvider]
//! ┌─────────────────────────────────────────────────────────┐
//! │                       Session                            │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [builders: filter, join, function]
//! ┌─────────────────────────────────────────────────────────┐
//! │          QueryDocument (always lexicon-consistent)       │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [render]
//! ┌──────────────────────────┐   ┌──────────────────────────┐
//! │  Canonical form (JSON)   │   │   Display expression     │
//! └──────────────────────────┘   └──────────────────────────┘
//! ```
//!
//! Every builder operation takes a document by reference and returns a new
//! one; a failed operation returns an error and nothing else.

pub mod builder;
pub mod config;
pub mod error;
pub mod lexicon;
pub mod model;
pub mod render;
pub mod session;
pub mod validation;

pub use error::{BuildError, BuildResult, LexiconError, LexiconResult};
pub use session::Session;

/// Re-exports for convenient usage.
pub mod prelude {
    pub use crate::builder::{ConstraintPath, MonomialPath, OrPath, TermPath};
    pub use crate::config::{RenderSettings, Settings};
    pub use crate::error::{BuildError, BuildResult, LexiconError, LexiconResult};
    pub use crate::lexicon::{
        Column, ColumnType, ComparisonOp, FileLexiconProvider, Lexicon, LexiconProvider,
        StaticLexiconProvider, Vertical, VerticalId,
    };
    pub use crate::model::{
        ColumnChange, ColumnRef, Comparator, FunctionKind, JoinKind, JoinSide, MomentKind,
        QueryDocument, QueryFunction,
    };
    pub use crate::render::{to_canonical_form, to_display_expression, CanonicalQuery};
    pub use crate::session::Session;
}
