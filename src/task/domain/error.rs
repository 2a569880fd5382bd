//! Error types for task domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,

    /// The due date is not a `YYYY-MM-DD` calendar date.
    #[error("invalid due date '{0}', expected YYYY-MM-DD")]
    InvalidDueDate(String),

    /// The task identifier is not a valid UUID.
    #[error("invalid task identifier '{0}'")]
    InvalidTaskId(String),

    /// The status value is not one of the board statuses.
    #[error(transparent)]
    Status(#[from] ParseTaskStatusError),

    /// The priority value is not one of the known priorities.
    #[error(transparent)]
    Priority(#[from] ParsePriorityError),
}

/// Error returned while parsing task statuses from persistence or UI input.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);

/// Error returned while parsing task priorities.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task priority: {0}")]
pub struct ParsePriorityError(pub String);
