//! Builder operations on [`QueryDocument`](crate::model::QueryDocument).
//!
//! Each operation takes the current document and the lexicon and returns a
//! new document, or an error with the input left untouched:
//!
//! ```ignore
//! let doc = QueryDocument::new(&lexicon)?
//!     .add_vertical(&lexicon)?
//!     .add_or_clause(&lexicon, 0)?
//!     .update_comparator(&lexicon, ConstraintPath::new(0, 1, 0), Comparator::Lt)?
//!     .add_join(&lexicon)?
//!     .set_function_kind(&lexicon, FunctionKind::LinearRegression)?;
//! ```
//!
//! Every `add_*` seeds a syntactically complete leaf on the owning
//! vertical's first field, so any reachable document renders. A constraint's
//! comparator must be permitted by every field it mentions; edits that would
//! break this fail with `UnsupportedComparator`.

mod filter;
mod function;
mod join;
mod path;

pub use path::{ConstraintPath, MonomialPath, OrPath, TermPath};

use crate::error::{BuildError, BuildResult};

/// Reject NaN and infinities, which the canonical form cannot carry.
fn finite(field: &'static str, value: f64) -> BuildResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(BuildError::NonFiniteNumber { field })
    }
}
