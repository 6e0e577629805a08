//! Error types.

use thiserror::Error;

/// Failures a caller can hit while building, normalizing or reasoning over
/// sentences.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FolError {
    /// Two terms could not be unified: their head symbols (or arities)
    /// disagree.
    #[error("cannot unify: mismatched heads")]
    UnificationMismatch,

    /// A variable would have to be bound to a term containing itself.
    #[error("occurs check failed: variable occurs within its own binding")]
    OccursCheckFailed,

    /// A clause offered to a backward-chaining knowledge base was not a
    /// definite (Horn, at-most-one-positive-literal) clause.
    #[error("clause is not a definite clause: {detail}")]
    NotADefiniteClause { detail: String },

    /// A sentence could not be interpreted as a single clause (still
    /// contains quantifiers, implications, or nested boolean structure after
    /// normalization was expected to remove them).
    #[error("sentence is not a clause: {detail}")]
    NotAClause { detail: String },

    /// A clause was told to a store that already contains it.
    #[error("clause already present in store")]
    DuplicateClause,

    /// The reasoning operation was cancelled cooperatively.
    #[error("operation was cancelled")]
    Cancelled,
}

/// Convenience alias used throughout the crate.
pub type FolResult<T> = Result<T, FolError>;
