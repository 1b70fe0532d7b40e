//! Placeholder resolution for scenario documents
//!
//! Strings in a document may reference shared settings with `{{ name }}`.
//! A [`Context`] holds the settings, resolved once in dependency order, and a
//! [`Resolver`] walks a document substituting every placeholder in a single
//! pass. Optionally the substituted text is coerced to a number when it is a
//! valid arithmetic expression (see [`Coercion`]).

mod context;
mod placeholder;
mod resolver;

pub use context::Context;
pub use placeholder::{placeholders, substitute};
pub use resolver::{Coercion, Resolver};

use thiserror::Error;

/// Placeholder resolution errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// A placeholder names a variable that is not in the context
    #[error("missing variable in context: {0}")]
    MissingVariable(String),
    /// Context variables reference each other in a loop
    #[error("cyclic placeholder reference: {}", .0.join(" -> "))]
    CyclicReference(Vec<String>),
}
