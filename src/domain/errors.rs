//! Domain errors for the Tidings planner.

use thiserror::Error;

/// Domain-level errors that can occur in the planner.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Person not found: {0}")]
    PersonNotFound(i64),

    #[error("Gift idea not found: {0}")]
    GiftIdeaNotFound(i64),

    #[error("Task not found: {0}")]
    TaskNotFound(i64),

    #[error("Milestone not found: {0}")]
    MilestoneNotFound(i64),

    #[error("Annual summary not found for {0}")]
    SummaryNotFound(i32),

    /// The year already has an annual summary. Callers surface this as a
    /// warning; nothing was changed.
    #[error("{0} has already been archived")]
    AlreadyArchived(i32),

    #[error("A person with the same {} already exists", .0.join(", "))]
    DuplicatePerson(Vec<String>),

    #[error("Subtask index {index} out of range for milestone {milestone_id} ({len} subtasks)")]
    SubtaskOutOfRange { milestone_id: i64, index: usize, len: usize },

    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl DomainError {
    /// True for outcomes the caller should report as a warning rather than a failure.
    pub fn is_benign(&self) -> bool {
        matches!(self, Self::AlreadyArchived(_) | Self::DuplicatePerson(_))
    }
}

pub type DomainResult<T> = Result<T, DomainError>;

impl From<sqlx::Error> for DomainError {
    fn from(err: sqlx::Error) -> Self {
        DomainError::DatabaseError(err.to_string())
    }
}

impl From<serde_json::Error> for DomainError {
    fn from(err: serde_json::Error) -> Self {
        DomainError::SerializationError(err.to_string())
    }
}

impl From<chrono::ParseError> for DomainError {
    fn from(err: chrono::ParseError) -> Self {
        DomainError::SerializationError(err.to_string())
    }
}
