//! Error types for scheduling operations.

use spacehub_models::UnknownStatus;
use thiserror::Error;

/// Errors that can occur during scheduling operations.
#[derive(Error, Debug)]
pub enum ScheduleError {
    /// Event not found.
    #[error("event not found: {0}")]
    NotFound(String),

    /// Two seeded events share an id.
    #[error("duplicate event id: {0}")]
    DuplicateId(String),

    /// Submitted event data is not acceptable (e.g. blank title).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Status filter contained an unrecognised value.
    #[error(transparent)]
    UnknownStatus(#[from] UnknownStatus),

    /// Lock poisoned (thread panicked while holding lock).
    #[error("lock poisoned: {0}")]
    LockPoisoned(String),
}

/// Result type alias for scheduling operations.
pub type Result<T> = std::result::Result<T, ScheduleError>;
