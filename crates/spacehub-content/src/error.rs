//! Error types for content browser operations.

use thiserror::Error;

/// Errors that can occur while browsing or editing the content tree.
#[derive(Error, Debug)]
pub enum ContentError {
    /// Navigation or selection target does not exist.
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    /// The module or chapter a new entity should go under does not exist.
    #[error("parent {kind} not found: {id}")]
    ParentNotFound { kind: &'static str, id: String },

    /// Blank name or title.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Two entities of the same kind share an id in loaded data.
    #[error("duplicate {kind} id: {id}")]
    DuplicateId { kind: &'static str, id: String },

    /// The id sequence for this kind cannot go any higher.
    #[error("no {0} ids left")]
    IdsExhausted(&'static str),

    /// A breadcrumb path that could not be parsed.
    #[error("invalid path: {0}")]
    InvalidPath(String),

    /// Lock poisoned (thread panicked while holding lock).
    #[error("lock poisoned: {0}")]
    LockPoisoned(String),
}

impl ContentError {
    pub(crate) fn not_found(kind: &'static str, id: impl ToString) -> Self {
        ContentError::NotFound {
            kind,
            id: id.to_string(),
        }
    }

    pub(crate) fn parent_not_found(kind: &'static str, id: impl ToString) -> Self {
        ContentError::ParentNotFound {
            kind,
            id: id.to_string(),
        }
    }
}

/// Result type alias for content operations.
pub type Result<T> = std::result::Result<T, ContentError>;
