//! Error types shared by the scheduling engine and the storage layer.

use thiserror::Error;

/// Failures of the scheduling rules themselves.
///
/// These are deterministic for a given input: callers reject the request,
/// they never retry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("invalid date '{0}': expected YYYYMMDD")]
    InvalidDate(String),

    #[error("repeat rule is not specified")]
    MissingRule,

    #[error("unsupported repeat rule: '{0}'")]
    UnsupportedRule(String),

    #[error("day interval {0} is out of range, expected 1 to 400")]
    RuleOutOfRange(i64),

    #[error("next occurrence falls after year 9999")]
    OutOfRange,

    #[error("invalid repeat rule: {0}")]
    InvalidRecurrenceRule(Box<ScheduleError>),
}

impl ScheduleError {
    /// Wraps an engine failure raised while validating a task write.
    pub fn into_recurrence_error(self) -> Self {
        match self {
            wrapped @ ScheduleError::InvalidRecurrenceRule(_) => wrapped,
            other => ScheduleError::InvalidRecurrenceRule(Box::new(other)),
        }
    }
}

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Database error")]
    Database(#[from] sqlx::Error),

    #[error("Migration error")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("IO error")]
    Io(#[from] std::io::Error),

    #[error("Task not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error(transparent)]
    Schedule(#[from] ScheduleError),
}

impl CoreError {
    /// Whether the failure was caused by the caller's input rather than storage.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            CoreError::InvalidInput(_) | CoreError::Schedule(_) | CoreError::NotFound(_)
        )
    }
}
