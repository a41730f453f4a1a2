//! Crate error type.

use thiserror::Error;

/// Errors surfaced by model operations and search entry points.
///
/// A domain becoming empty during search is *not* an error: it marks a
/// pruned branch and search treats it as such. The variants here are
/// caller/configuration bugs that abort the call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CspError {
    /// A value was assigned that is not in the variable's current domain.
    #[error("value {value} is not in variable {var}'s domain")]
    ValueNotInDomain {
        /// Variable index.
        var: usize,
        /// Debug rendering of the offending value.
        value: String,
    },

    /// An unrecognized propagation mode name was requested.
    #[error("unrecognized propagation mode: {0:?}")]
    UnknownPropagation(String),

    /// A configuration failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Local search was started on a problem with an empty domain.
    #[error("all variables must have non-empty domains")]
    EmptyDomain,

    /// Forward checking was requested for a variable with no assigned value.
    #[error("cannot forward check on unassigned variable {0}")]
    ForwardCheckOnUnassigned(usize),

    /// No bundled puzzle with the given name exists.
    #[error("no bundled puzzle named {0:?}")]
    UnknownPuzzle(String),
}
