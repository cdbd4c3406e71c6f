//! In-memory repository for task list aggregates.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::backlog::{
    domain::{OwnerId, TaskList},
    ports::{TaskListRepository, TaskListRepositoryError, TaskListRepositoryResult},
};

/// Thread-safe in-memory task list repository keyed by owner.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskListRepository {
    state: Arc<RwLock<HashMap<OwnerId, TaskList>>>,
}

impl InMemoryTaskListRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TaskListRepository for InMemoryTaskListRepository {
    async fn find(&self, owner_id: &OwnerId) -> TaskListRepositoryResult<Option<TaskList>> {
        let state = self.state.read().map_err(|err| {
            TaskListRepositoryError::abnormal_model(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.get(owner_id).cloned())
    }

    async fn save(&self, task_list: &TaskList) -> TaskListRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            TaskListRepositoryError::abnormal_model(std::io::Error::other(err.to_string()))
        })?;
        state.insert(task_list.owner_id().clone(), task_list.clone());
        Ok(())
    }
}
