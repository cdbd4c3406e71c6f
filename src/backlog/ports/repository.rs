//! Repository port for loading and saving whole task list aggregates.

use crate::backlog::domain::{OwnerId, TaskList};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task list repository operations.
pub type TaskListRepositoryResult<T> = Result<T, TaskListRepositoryError>;

/// Task list persistence contract.
///
/// Aggregates are always read and written whole; there is no partial
/// update.
#[async_trait]
pub trait TaskListRepository: Send + Sync {
    /// Finds the task list owned by `owner_id`.
    ///
    /// Returns `None` when the owner has no list.
    async fn find(&self, owner_id: &OwnerId) -> TaskListRepositoryResult<Option<TaskList>>;

    /// Stores the aggregate, replacing any previous version for its owner.
    ///
    /// # Errors
    ///
    /// Returns [`TaskListRepositoryError::AbnormalModel`] when the store
    /// rejects the aggregate.
    async fn save(&self, task_list: &TaskList) -> TaskListRepositoryResult<()>;
}

/// Errors returned by task list repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskListRepositoryError {
    /// The store rejected or could not handle the aggregate.
    #[error("abnormal model: {0}")]
    AbnormalModel(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskListRepositoryError {
    /// Wraps a storage error.
    pub fn abnormal_model(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::AbnormalModel(Arc::new(err))
    }
}
