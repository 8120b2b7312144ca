//! Renderers: pure functions of a query document.
//!
//! - [`to_canonical_form`]: the machine-readable wire payload
//! - [`to_display_expression`]: the symbolic preview shown to analysts

mod canonical;
mod display;

pub use canonical::{to_canonical_form, CanonicalQuery};
pub use display::to_display_expression;
