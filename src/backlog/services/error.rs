//! Caller-facing refusal outcome for backlog operations.

use crate::backlog::{
    domain::{OwnerId, TaskListDomainError},
    ports::{TaskArchiveError, TaskListRepositoryError},
};
use thiserror::Error;

/// Specific reason an operation was refused.
#[derive(Debug, Error)]
pub enum RefusalCause {
    /// A domain rule rejected the operation.
    #[error(transparent)]
    Domain(#[from] TaskListDomainError),
    /// The repository failed to load or save the aggregate.
    #[error(transparent)]
    Repository(#[from] TaskListRepositoryError),
    /// The completed-task archive failed.
    #[error(transparent)]
    Archive(#[from] TaskArchiveError),
    /// The owner has no task list.
    #[error("no task list exists for owner {0}")]
    ListNotFound(OwnerId),
}

/// The single failure outcome of every service operation.
///
/// The cause is kept for logging and for building a message for the
/// caller.
#[derive(Debug, Error)]
#[error("operation refused: {cause}")]
pub struct OperationRefused {
    #[source]
    cause: RefusalCause,
}

impl OperationRefused {
    /// Wraps a refusal cause.
    #[must_use]
    pub const fn new(cause: RefusalCause) -> Self {
        Self { cause }
    }

    /// Returns the specific cause.
    #[must_use]
    pub const fn cause(&self) -> &RefusalCause {
        &self.cause
    }

    /// Consumes the refusal, returning its cause.
    #[must_use]
    pub fn into_cause(self) -> RefusalCause {
        self.cause
    }

    /// Human-readable reason suitable for a response body.
    #[must_use]
    pub fn message(&self) -> String {
        self.cause.to_string()
    }

    /// Returns the domain error behind the refusal, if any.
    #[must_use]
    pub const fn domain_error(&self) -> Option<&TaskListDomainError> {
        match &self.cause {
            RefusalCause::Domain(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RefusalCause> for OperationRefused {
    fn from(cause: RefusalCause) -> Self {
        Self::new(cause)
    }
}

impl From<TaskListDomainError> for OperationRefused {
    fn from(err: TaskListDomainError) -> Self {
        Self::new(err.into())
    }
}

impl From<TaskListRepositoryError> for OperationRefused {
    fn from(err: TaskListRepositoryError) -> Self {
        Self::new(err.into())
    }
}

impl From<TaskArchiveError> for OperationRefused {
    fn from(err: TaskArchiveError) -> Self {
        Self::new(err.into())
    }
}

/// Result type for backlog service operations.
pub type TaskListServiceResult<T> = Result<T, OperationRefused>;
