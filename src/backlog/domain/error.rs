//! Error types for backlog domain rules.

use super::TaskId;
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors returned when a backlog operation violates a domain rule.
///
/// Every variant is an expected outcome of the list rules. The operation
/// that returned it left the list untouched.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskListDomainError {
    /// No task with the given identifier exists in the list.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),

    /// Another task in the list already carries the same text.
    #[error("task '{0}' already exists")]
    DuplicateTask(String),

    /// The identifier is already assigned to a task in the list.
    #[error("task identifier already in use: {0}")]
    TaskIdInUse(TaskId),

    /// The active region has no free slot.
    #[error("active region is at capacity ({capacity})")]
    CapacityExceeded {
        /// Number of active slots the list allows.
        capacity: usize,
    },

    /// Displacement requires a full, bounded active region.
    #[error("active region is not full")]
    NotFull,

    /// The unlock window cannot be reopened yet.
    #[error("lock timer has not expired, next unlock available at {available_at}")]
    LockTimerNotExpired {
        /// Earliest instant at which unlocking succeeds.
        available_at: DateTime<Utc>,
    },

    /// A move was requested between the active and deferred regions.
    #[error("cannot move task {task_id} next to {target_id} in a different region")]
    CrossRegionMove {
        /// Task that was asked to move.
        task_id: TaskId,
        /// Task whose slot was the destination.
        target_id: TaskId,
    },

    /// Persisted list data violates a structural invariant.
    #[error("corrupt task list: {0}")]
    CorruptList(String),
}

/// Error returned when an owner identifier is blank.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("identifier must not be empty")]
pub struct EmptyIdentifierError;
