//! Error types for trazar operations.

use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while resolving a plot command.
///
/// Every error is detected eagerly at the stage that produces it; no stage
/// substitutes a default when intent is ambiguous. Registration errors
/// surface at registration time, never during [`resolve`](crate::Registry::resolve).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// An attribute name that is neither a canonical key nor a known alias.
    #[error("unknown attribute `{name}`")]
    UnknownAttribute {
        /// The unrecognized name as supplied.
        name: String,
    },

    /// The same attribute was supplied through two different names.
    #[error("attribute `{canonical}` given through both `{first}` and `{second}`")]
    ConflictingAlias {
        /// Canonical key both names resolve to.
        canonical: String,
        /// First name encountered.
        first: String,
        /// Second, conflicting name.
        second: String,
    },

    /// A magic-argument tuple element matched no decomposition rule.
    #[error("magic argument `{group}` has component {component} matching no rule")]
    UnrecognizedMagicComponent {
        /// Name of the magic group being decomposed.
        group: String,
        /// Debug rendering of the offending element.
        component: String,
    },

    /// Recipe dispatch did not reach a fixpoint within the depth bound.
    ///
    /// This is a configuration error in the registered recipes, not a user
    /// input error.
    #[error("recipe fixpoint not reached after {max_depth} steps (stuck on descriptor `{descriptor}`)")]
    RecipeCycleDetected {
        /// Descriptor still matching a rule when the bound was hit.
        descriptor: String,
        /// The depth bound that was exceeded.
        max_depth: usize,
    },

    /// Conflicting re-registration in one of the extension registries.
    #[error("duplicate {registry} registration for `{entry}`")]
    DuplicateRegistration {
        /// Which registry rejected the entry (attribute, alias, magic group, recipe).
        registry: &'static str,
        /// The conflicting entry name.
        entry: String,
    },

    /// An attribute's arity is incompatible with the series count.
    #[error("attribute `{key}` has arity {got}, expected 1 or {expected}")]
    BroadcastShapeMismatch {
        /// The offending attribute key.
        key: String,
        /// The series count the value had to match.
        expected: usize,
        /// The arity actually supplied.
        got: usize,
    },

    /// The grouping key's length differs from the data row count.
    #[error("group key has {got} labels for {expected} data rows")]
    GroupKeyLengthMismatch {
        /// Number of data rows.
        expected: usize,
        /// Number of labels supplied.
        got: usize,
    },
}
