//! Per-owner task list aggregate root.

use super::{
    Capacity, LockTimer, OrderedTaskList, OwnerId, Task, TaskId, TaskListDomainError,
};
use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

/// Number of tasks exchanged across the boundary by one escalation.
const ESCALATION_STEP: usize = 1;

/// Task list aggregate root: one owner's ordered list and lock timer.
///
/// The aggregate is loaded and saved as a whole. Every operation either
/// succeeds completely or returns an error with the aggregate unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskList {
    owner_id: OwnerId,
    list: OrderedTaskList,
    timer: LockTimer,
}

impl TaskList {
    /// Creates an empty list for a new owner.
    #[must_use]
    pub fn new(owner_id: OwnerId, capacity: Capacity, unlock_duration: TimeDelta) -> Self {
        Self {
            owner_id,
            list: OrderedTaskList::new(capacity),
            timer: LockTimer::with_duration(unlock_duration),
        }
    }

    /// Reconstructs an aggregate from persisted parts.
    #[must_use]
    pub const fn from_persisted(owner_id: OwnerId, list: OrderedTaskList, timer: LockTimer) -> Self {
        Self {
            owner_id,
            list,
            timer,
        }
    }

    /// Returns the owning identity.
    #[must_use]
    pub const fn owner_id(&self) -> &OwnerId {
        &self.owner_id
    }

    /// Returns the ordered task sequence.
    #[must_use]
    pub const fn list(&self) -> &OrderedTaskList {
        &self.list
    }

    /// Returns the lock timer.
    #[must_use]
    pub const fn timer(&self) -> &LockTimer {
        &self.timer
    }

    /// Capacity enforced at `now`: unbounded while unlocked, structural
    /// otherwise.
    #[must_use]
    pub fn effective_capacity(&self, now: DateTime<Utc>) -> Capacity {
        if self.timer.is_unlocked(now) {
            Capacity::Unbounded
        } else {
            self.list.capacity()
        }
    }

    /// Adds a task to the front of the active region.
    ///
    /// # Errors
    ///
    /// See [`OrderedTaskList::add`]; the capacity check is skipped while
    /// the list is unlocked.
    pub fn add(
        &mut self,
        id: TaskId,
        text: &str,
        now: DateTime<Utc>,
    ) -> Result<Task, TaskListDomainError> {
        let capacity = self.effective_capacity(now);
        self.list.add_within(id, text, capacity)
    }

    /// Appends a task to the deferred region.
    ///
    /// # Errors
    ///
    /// See [`OrderedTaskList::add_deferred`].
    pub fn add_deferred(&mut self, id: TaskId, text: &str) -> Result<Task, TaskListDomainError> {
        self.list.add_deferred(id, text)
    }

    /// Removes a task.
    ///
    /// # Errors
    ///
    /// See [`OrderedTaskList::delete`].
    pub fn delete(&mut self, id: &TaskId) -> Result<Task, TaskListDomainError> {
        self.list.delete(id)
    }

    /// Puts a new task at the front of the full active region.
    ///
    /// # Errors
    ///
    /// See [`OrderedTaskList::displace`]. While unlocked the active region
    /// counts as unbounded, so displacement is refused with
    /// [`TaskListDomainError::NotFull`].
    pub fn displace(
        &mut self,
        id: TaskId,
        text: &str,
        now: DateTime<Utc>,
    ) -> Result<Task, TaskListDomainError> {
        let capacity = self.effective_capacity(now);
        self.list.displace_within(id, text, capacity)
    }

    /// Replaces a task's text.
    ///
    /// # Errors
    ///
    /// See [`OrderedTaskList::update`].
    pub fn update(&mut self, id: &TaskId, text: &str) -> Result<Task, TaskListDomainError> {
        self.list.update(id, text)
    }

    /// Removes a task and returns its text.
    ///
    /// # Errors
    ///
    /// See [`OrderedTaskList::complete`].
    pub fn complete(&mut self, id: &TaskId) -> Result<String, TaskListDomainError> {
        self.list.complete(id)
    }

    /// Moves a task to its target's slot within one region.
    ///
    /// # Errors
    ///
    /// Returns [`TaskListDomainError::TaskNotFound`] when either task is
    /// absent or [`TaskListDomainError::CrossRegionMove`] when they sit on
    /// different sides of the demarcation index.
    pub fn move_task(
        &mut self,
        id: &TaskId,
        target_id: &TaskId,
    ) -> Result<Vec<Task>, TaskListDomainError> {
        let region = self
            .list
            .region_of(id)
            .ok_or_else(|| TaskListDomainError::TaskNotFound(id.clone()))?;
        let target_region = self
            .list
            .region_of(target_id)
            .ok_or_else(|| TaskListDomainError::TaskNotFound(target_id.clone()))?;
        if region != target_region {
            return Err(TaskListDomainError::CrossRegionMove {
                task_id: id.clone(),
                target_id: target_id.clone(),
            });
        }
        self.list.move_task(id, target_id)
    }

    /// Fills free active slots from the front of the deferred region.
    ///
    /// Does nothing when the capacity is unbounded or already reached.
    pub fn pull(&mut self) -> Vec<Task> {
        match self.list.available_slots() {
            Some(free) if free > 0 => self.list.promote(free),
            _ => Vec::new(),
        }
    }

    /// Rotates focus by swapping the last active task with the first
    /// deferred task.
    ///
    /// Does nothing when either region is empty.
    pub fn escalate(&mut self) -> Vec<Task> {
        self.list.escalate(ESCALATION_STEP)
    }

    /// Opens an unlock window at `now`.
    ///
    /// # Errors
    ///
    /// See [`LockTimer::unlock`].
    pub fn unlock(&mut self, now: DateTime<Utc>) -> Result<(), TaskListDomainError> {
        self.timer.unlock(now)
    }

    /// Builds a read projection as seen at `now`.
    #[must_use]
    pub fn view(&self, now: DateTime<Utc>) -> TaskListView {
        TaskListView {
            owner_id: self.owner_id.clone(),
            active: self.list.active().to_vec(),
            deferred: self.list.deferred().to_vec(),
            demarcation_index: self.list.demarcation_index(),
            capacity: self.list.capacity(),
            unlocked: self.timer.is_unlocked(now),
            can_unlock: self.timer.can_unlock(now),
            unlocked_until: self.timer.unlocked_until(),
        }
    }
}

/// Read-only snapshot of a task list handed back to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskListView {
    /// Owning identity.
    pub owner_id: OwnerId,
    /// Active tasks in order.
    pub active: Vec<Task>,
    /// Deferred tasks in order.
    pub deferred: Vec<Task>,
    /// Offset separating the two regions.
    pub demarcation_index: usize,
    /// Structural active-region capacity.
    pub capacity: Capacity,
    /// Whether the capacity constraint is currently suspended.
    pub unlocked: bool,
    /// Whether a new unlock would succeed now.
    pub can_unlock: bool,
    /// End of the current or most recent unlock window.
    pub unlocked_until: Option<DateTime<Utc>>,
}
