//! In-memory archive of completed tasks.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::backlog::{
    domain::{CompletedTask, OwnerId},
    ports::{CompletedTaskArchive, TaskArchiveError, TaskArchiveResult},
};

/// Thread-safe in-memory completed-task archive.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCompletedTaskArchive {
    state: Arc<RwLock<HashMap<OwnerId, Vec<CompletedTask>>>>,
}

impl InMemoryCompletedTaskArchive {
    /// Creates an empty archive.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CompletedTaskArchive for InMemoryCompletedTaskArchive {
    async fn record(&self, owner_id: &OwnerId, task: &CompletedTask) -> TaskArchiveResult<()> {
        let mut state = self.state.write().map_err(|err| {
            TaskArchiveError::persistence(std::io::Error::other(err.to_string()))
        })?;
        state.entry(owner_id.clone()).or_default().push(task.clone());
        Ok(())
    }

    async fn find_all(&self, owner_id: &OwnerId) -> TaskArchiveResult<Vec<CompletedTask>> {
        let state = self.state.read().map_err(|err| {
            TaskArchiveError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.get(owner_id).cloned().unwrap_or_default())
    }
}
