//! Archive port for completed tasks.

use crate::backlog::domain::{CompletedTask, OwnerId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for completed-task archive operations.
pub type TaskArchiveResult<T> = Result<T, TaskArchiveError>;

/// Append-only record of completed tasks per owner.
#[async_trait]
pub trait CompletedTaskArchive: Send + Sync {
    /// Records a completed task for the owner.
    async fn record(&self, owner_id: &OwnerId, task: &CompletedTask) -> TaskArchiveResult<()>;

    /// Returns the owner's completed tasks, oldest first.
    async fn find_all(&self, owner_id: &OwnerId) -> TaskArchiveResult<Vec<CompletedTask>>;
}

/// Errors returned by archive implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskArchiveError {
    /// Persistence-layer failure.
    #[error("archive persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskArchiveError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
