//! Service layer running the load, mutate and save cycle for task lists.

use crate::backlog::{
    config::{ConfigError, DEFAULT_FOCUS_CAPACITY, TaskListConfig},
    domain::{
        Capacity, CompletedTask, OwnerId, Task, TaskId, TaskList, TaskListDomainError,
        TaskListView, UNLOCK_DURATION,
    },
    ports::{CompletedTaskArchive, IdentityGenerator, TaskListRepository},
    services::{OperationRefused, RefusalCause, TaskListServiceResult},
};
use chrono::{DateTime, TimeDelta, Utc};
use mockable::Clock;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Updated list projection together with the operation's own result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListOutcome<T> {
    /// The list as saved after the operation.
    pub list: TaskListView,
    /// The value produced by the operation.
    pub value: T,
}

/// Entry point for every backlog operation.
///
/// Each call loads the owner's aggregate, applies exactly one domain
/// operation, saves the aggregate and returns a projection of it. Nothing
/// is cached between calls, and nothing is saved unless the domain
/// operation succeeded. Every failure is reported as [`OperationRefused`].
#[derive(Clone)]
pub struct TaskListService<R, A, I, C>
where
    R: TaskListRepository,
    A: CompletedTaskArchive,
    I: IdentityGenerator,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    archive: Arc<A>,
    ids: Arc<I>,
    clock: Arc<C>,
    capacity: Capacity,
    unlock_duration: TimeDelta,
}

impl<R, A, I, C> TaskListService<R, A, I, C>
where
    R: TaskListRepository,
    A: CompletedTaskArchive,
    I: IdentityGenerator,
    C: Clock + Send + Sync,
{
    /// Creates a service provisioning lists with the default settings.
    #[must_use]
    pub const fn new(repository: Arc<R>, archive: Arc<A>, ids: Arc<I>, clock: Arc<C>) -> Self {
        Self {
            repository,
            archive,
            ids,
            clock,
            capacity: DEFAULT_FOCUS_CAPACITY,
            unlock_duration: UNLOCK_DURATION,
        }
    }

    /// Applies provisioning settings from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the configuration is invalid.
    pub fn with_config(mut self, config: &TaskListConfig) -> Result<Self, ConfigError> {
        self.unlock_duration = config.unlock_duration()?;
        self.capacity = config.capacity();
        Ok(self)
    }

    /// Creates the owner's task list if it does not exist yet.
    ///
    /// Provisioning an owner that already has a list returns the existing
    /// list unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`OperationRefused`] when the repository fails.
    pub async fn provision(&self, owner_id: &OwnerId) -> TaskListServiceResult<TaskListView> {
        let result = self.try_provision(owner_id, self.clock.utc()).await;
        log_refusal(owner_id, "provision", result)
    }

    /// Returns the owner's task list.
    ///
    /// # Errors
    ///
    /// Returns [`OperationRefused`] when the owner has no list or the
    /// repository fails.
    pub async fn get(&self, owner_id: &OwnerId) -> TaskListServiceResult<TaskListView> {
        let now = self.clock.utc();
        let result = self.load(owner_id).await.map(|task_list| task_list.view(now));
        log_refusal(owner_id, "get", result)
    }

    /// Adds a task to the front of the active region.
    ///
    /// # Errors
    ///
    /// Returns [`OperationRefused`] for duplicate text, a full active
    /// region while locked, a missing list or a failed save.
    pub async fn add(
        &self,
        owner_id: &OwnerId,
        text: &str,
    ) -> TaskListServiceResult<ListOutcome<Task>> {
        let id = self.ids.next_id();
        self.apply(owner_id, "add", |task_list, now| {
            task_list.add(id, text, now)
        })
        .await
    }

    /// Appends a task to the deferred region.
    ///
    /// # Errors
    ///
    /// Returns [`OperationRefused`] for duplicate text, a missing list or a
    /// failed save.
    pub async fn add_deferred(
        &self,
        owner_id: &OwnerId,
        text: &str,
    ) -> TaskListServiceResult<ListOutcome<Task>> {
        let id = self.ids.next_id();
        self.apply(owner_id, "add_deferred", |task_list, _| {
            task_list.add_deferred(id, text)
        })
        .await
    }

    /// Deletes a task.
    ///
    /// # Errors
    ///
    /// Returns [`OperationRefused`] when the task or list is missing or the
    /// save fails.
    pub async fn delete(
        &self,
        owner_id: &OwnerId,
        task_id: &TaskId,
    ) -> TaskListServiceResult<ListOutcome<Task>> {
        self.apply(owner_id, "delete", |task_list, _| task_list.delete(task_id))
            .await
    }

    /// Puts a new task in front of a full active region, bumping the last
    /// active task to the deferred region.
    ///
    /// # Errors
    ///
    /// Returns [`OperationRefused`] when the active region is not full,
    /// the text is a duplicate, the list is missing or the save fails.
    pub async fn displace(
        &self,
        owner_id: &OwnerId,
        text: &str,
    ) -> TaskListServiceResult<ListOutcome<Task>> {
        let id = self.ids.next_id();
        self.apply(owner_id, "displace", |task_list, now| {
            task_list.displace(id, text, now)
        })
        .await
    }

    /// Replaces a task's text.
    ///
    /// # Errors
    ///
    /// Returns [`OperationRefused`] when the task or list is missing, the
    /// text belongs to another task or the save fails.
    pub async fn update(
        &self,
        owner_id: &OwnerId,
        task_id: &TaskId,
        text: &str,
    ) -> TaskListServiceResult<ListOutcome<Task>> {
        self.apply(owner_id, "update", |task_list, _| {
            task_list.update(task_id, text)
        })
        .await
    }

    /// Completes a task: removes it from the list and archives its text.
    ///
    /// The archive is written after the list has been saved. When the
    /// archive rejects the record, the list is saved back as it was before
    /// the call, so a refused completion leaves the task in place.
    ///
    /// # Errors
    ///
    /// Returns [`OperationRefused`] when the task or list is missing, the
    /// save fails or the archive rejects the record.
    pub async fn complete(
        &self,
        owner_id: &OwnerId,
        task_id: &TaskId,
    ) -> TaskListServiceResult<ListOutcome<CompletedTask>> {
        let result = self.try_complete(owner_id, task_id).await;
        log_refusal(owner_id, "complete", result)
    }

    /// Moves a task into the slot of another task in the same region.
    ///
    /// The outcome value lists every task whose position changed.
    ///
    /// # Errors
    ///
    /// Returns [`OperationRefused`] when either task or the list is
    /// missing, the tasks are in different regions or the save fails.
    pub async fn move_task(
        &self,
        owner_id: &OwnerId,
        task_id: &TaskId,
        target_id: &TaskId,
    ) -> TaskListServiceResult<ListOutcome<Vec<Task>>> {
        self.apply(owner_id, "move", |task_list, _| {
            task_list.move_task(task_id, target_id)
        })
        .await
    }

    /// Fills free active slots from the deferred region.
    ///
    /// The outcome value lists the promoted tasks in promotion order.
    ///
    /// # Errors
    ///
    /// Returns [`OperationRefused`] only when the list is missing or the
    /// save fails.
    pub async fn pull(&self, owner_id: &OwnerId) -> TaskListServiceResult<ListOutcome<Vec<Task>>> {
        self.apply(owner_id, "pull", |task_list, _| Ok(task_list.pull()))
            .await
    }

    /// Swaps the last active task with the first deferred task.
    ///
    /// # Errors
    ///
    /// Returns [`OperationRefused`] only when the list is missing or the
    /// save fails.
    pub async fn escalate(
        &self,
        owner_id: &OwnerId,
    ) -> TaskListServiceResult<ListOutcome<Vec<Task>>> {
        self.apply(owner_id, "escalate", |task_list, _| Ok(task_list.escalate()))
            .await
    }

    /// Suspends the capacity constraint for one unlock window.
    ///
    /// # Errors
    ///
    /// Returns [`OperationRefused`] while the previous window has not run
    /// its full length, or when the list is missing or the save fails.
    pub async fn unlock(&self, owner_id: &OwnerId) -> TaskListServiceResult<ListOutcome<()>> {
        let outcome = self
            .apply(owner_id, "unlock", |task_list, now| task_list.unlock(now))
            .await?;
        info!(
            owner = %owner_id,
            until = ?outcome.list.unlocked_until,
            "task list unlocked"
        );
        Ok(outcome)
    }

    /// Returns the owner's completed tasks, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`OperationRefused`] when the archive fails.
    pub async fn completed(&self, owner_id: &OwnerId) -> TaskListServiceResult<Vec<CompletedTask>> {
        let result = self
            .archive
            .find_all(owner_id)
            .await
            .map_err(OperationRefused::from);
        log_refusal(owner_id, "completed", result)
    }

    async fn load(&self, owner_id: &OwnerId) -> TaskListServiceResult<TaskList> {
        self.repository
            .find(owner_id)
            .await?
            .ok_or_else(|| RefusalCause::ListNotFound(owner_id.clone()).into())
    }

    async fn try_provision(
        &self,
        owner_id: &OwnerId,
        now: DateTime<Utc>,
    ) -> TaskListServiceResult<TaskListView> {
        if let Some(existing) = self.repository.find(owner_id).await? {
            return Ok(existing.view(now));
        }
        let task_list = TaskList::new(owner_id.clone(), self.capacity, self.unlock_duration);
        self.repository.save(&task_list).await?;
        info!(owner = %owner_id, capacity = self.capacity.as_raw(), "task list provisioned");
        Ok(task_list.view(now))
    }

    async fn try_complete(
        &self,
        owner_id: &OwnerId,
        task_id: &TaskId,
    ) -> TaskListServiceResult<ListOutcome<CompletedTask>> {
        let now = self.clock.utc();
        let original = self.load(owner_id).await?;
        let mut task_list = original.clone();
        let text = task_list.complete(task_id)?;
        let completed = CompletedTask::new(task_id.clone(), text, now);
        self.repository.save(&task_list).await?;

        if let Err(err) = self.archive.record(owner_id, &completed).await {
            if let Err(restore) = self.repository.save(&original).await {
                warn!(
                    owner = %owner_id,
                    task = %task_id,
                    cause = %restore,
                    "failed to restore task list after archive failure"
                );
            }
            return Err(err.into());
        }

        debug!(owner = %owner_id, operation = "complete", "task list operation applied");
        Ok(ListOutcome {
            list: task_list.view(now),
            value: completed,
        })
    }

    async fn apply<T, F>(
        &self,
        owner_id: &OwnerId,
        operation: &'static str,
        mutate: F,
    ) -> TaskListServiceResult<ListOutcome<T>>
    where
        F: FnOnce(&mut TaskList, DateTime<Utc>) -> Result<T, TaskListDomainError>,
    {
        let result = self.try_apply(owner_id, operation, mutate).await;
        log_refusal(owner_id, operation, result)
    }

    async fn try_apply<T, F>(
        &self,
        owner_id: &OwnerId,
        operation: &'static str,
        mutate: F,
    ) -> TaskListServiceResult<ListOutcome<T>>
    where
        F: FnOnce(&mut TaskList, DateTime<Utc>) -> Result<T, TaskListDomainError>,
    {
        let now = self.clock.utc();
        let mut task_list = self.load(owner_id).await?;
        let value = mutate(&mut task_list, now)?;
        self.repository.save(&task_list).await?;
        debug!(owner = %owner_id, operation, "task list operation applied");
        Ok(ListOutcome {
            list: task_list.view(now),
            value,
        })
    }
}

fn log_refusal<T>(
    owner_id: &OwnerId,
    operation: &'static str,
    result: TaskListServiceResult<T>,
) -> TaskListServiceResult<T> {
    if let Err(refusal) = &result {
        warn!(owner = %owner_id, operation, cause = %refusal.cause(), "operation refused");
    }
    result
}
