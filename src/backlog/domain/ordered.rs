//! Ordered task sequence split into active and deferred regions.

use super::{Capacity, Region, Task, TaskId, TaskListDomainError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A single ordered sequence of tasks with a movable split point.
///
/// Offsets `[0, demarcation_index)` form the active region and offsets
/// `[demarcation_index, len)` the deferred region. Texts and identifiers are
/// unique across both regions, and every task's position equals its 1-based
/// offset.
///
/// Operations validate every failure condition before touching the
/// sequence, so an `Err` always leaves the list as it was.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "OrderedTaskListData")]
pub struct OrderedTaskList {
    items: Vec<Task>,
    demarcation_index: usize,
    capacity: Capacity,
}

/// Raw serde shape, validated on the way in.
#[derive(Deserialize)]
struct OrderedTaskListData {
    items: Vec<Task>,
    demarcation_index: usize,
    capacity: Capacity,
}

impl TryFrom<OrderedTaskListData> for OrderedTaskList {
    type Error = TaskListDomainError;

    fn try_from(data: OrderedTaskListData) -> Result<Self, Self::Error> {
        Self::from_parts(data.items, data.demarcation_index, data.capacity)
    }
}

impl OrderedTaskList {
    /// Creates an empty list with the given active-region capacity.
    #[must_use]
    pub const fn new(capacity: Capacity) -> Self {
        Self {
            items: Vec::new(),
            demarcation_index: 0,
            capacity,
        }
    }

    /// Reconstructs a list from persisted parts.
    ///
    /// The capacity bound is not checked here: an unlock window may have
    /// admitted more active tasks than the capacity allows.
    ///
    /// # Errors
    ///
    /// Returns [`TaskListDomainError::CorruptList`] when the demarcation
    /// index is out of range, an identifier or text repeats, or positions
    /// are not dense and 1-based.
    pub fn from_parts(
        items: Vec<Task>,
        demarcation_index: usize,
        capacity: Capacity,
    ) -> Result<Self, TaskListDomainError> {
        check_parts(&items, demarcation_index)?;
        Ok(Self {
            items,
            demarcation_index,
            capacity,
        })
    }

    /// Returns every task in list order.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.items
    }

    /// Returns the active region.
    #[must_use]
    pub fn active(&self) -> &[Task] {
        self.regions().0
    }

    /// Returns the deferred region.
    #[must_use]
    pub fn deferred(&self) -> &[Task] {
        self.regions().1
    }

    /// Returns the offset separating active from deferred tasks.
    #[must_use]
    pub const fn demarcation_index(&self) -> usize {
        self.demarcation_index
    }

    /// Returns the structural active-region capacity.
    #[must_use]
    pub const fn capacity(&self) -> Capacity {
        self.capacity
    }

    /// Number of active tasks.
    #[must_use]
    pub const fn active_len(&self) -> usize {
        self.demarcation_index
    }

    /// Number of deferred tasks.
    #[must_use]
    pub fn deferred_len(&self) -> usize {
        self.items.len().saturating_sub(self.demarcation_index)
    }

    /// Total number of tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` when the list holds no tasks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Reports whether the active region has no free slot.
    ///
    /// Always `false` for an unbounded list.
    #[must_use]
    pub const fn is_full(&self) -> bool {
        self.capacity.is_reached_by(self.active_len())
    }

    /// Free active slots, or `None` when unbounded.
    #[must_use]
    pub const fn available_slots(&self) -> Option<usize> {
        self.capacity.remaining(self.active_len())
    }

    /// Looks up a task by identifier.
    #[must_use]
    pub fn find(&self, id: &TaskId) -> Option<&Task> {
        self.items.iter().find(|task| task.id() == id)
    }

    /// Returns the region holding the task, if present.
    #[must_use]
    pub fn region_of(&self, id: &TaskId) -> Option<Region> {
        self.position_of(id).map(|offset| self.region_at(offset))
    }

    /// Reports whether any task carries exactly this text.
    #[must_use]
    pub fn contains_text(&self, text: &str) -> bool {
        self.items.iter().any(|task| task.text() == text)
    }

    /// Adds a task to the front of the active region.
    ///
    /// # Errors
    ///
    /// Returns [`TaskListDomainError::DuplicateTask`] when the text exists
    /// anywhere in the list, [`TaskListDomainError::TaskIdInUse`] when the
    /// identifier is taken, or [`TaskListDomainError::CapacityExceeded`]
    /// when the active region is full.
    pub fn add(&mut self, id: TaskId, text: &str) -> Result<Task, TaskListDomainError> {
        self.add_within(id, text, self.capacity)
    }

    /// Adds a task to the front of the active region, checking fullness
    /// against `capacity` rather than the structural capacity.
    pub(crate) fn add_within(
        &mut self,
        id: TaskId,
        text: &str,
        capacity: Capacity,
    ) -> Result<Task, TaskListDomainError> {
        self.ensure_insertable(&id, text)?;
        if let Capacity::Bounded(limit) = capacity
            && self.active_len() >= limit
        {
            return Err(TaskListDomainError::CapacityExceeded { capacity: limit });
        }

        let created = self.insert_at(0, Task::new(id, text));
        self.demarcation_index += 1;
        Ok(created)
    }

    /// Appends a task to the end of the deferred region.
    ///
    /// # Errors
    ///
    /// Returns [`TaskListDomainError::DuplicateTask`] or
    /// [`TaskListDomainError::TaskIdInUse`].
    pub fn add_deferred(&mut self, id: TaskId, text: &str) -> Result<Task, TaskListDomainError> {
        self.ensure_insertable(&id, text)?;
        Ok(self.insert_at(self.items.len(), Task::new(id, text)))
    }

    /// Removes a task, freeing an active slot when it was active.
    ///
    /// # Errors
    ///
    /// Returns [`TaskListDomainError::TaskNotFound`] when absent.
    pub fn delete(&mut self, id: &TaskId) -> Result<Task, TaskListDomainError> {
        let offset = self.offset_of(id)?;
        let removed = self.items.remove(offset);
        if offset < self.demarcation_index {
            self.demarcation_index -= 1;
        }
        self.renumber_from(offset);
        Ok(removed)
    }

    /// Removes a task and hands back its text for archival.
    ///
    /// # Errors
    ///
    /// Returns [`TaskListDomainError::TaskNotFound`] when absent.
    pub fn complete(&mut self, id: &TaskId) -> Result<String, TaskListDomainError> {
        self.delete(id).map(Task::into_text)
    }

    /// Puts a new task at the front of a full active region.
    ///
    /// The last active task is pushed out and appended to the deferred
    /// region with its identifier and text unchanged, so the active region
    /// keeps its size and the demarcation index stays where it is.
    ///
    /// # Errors
    ///
    /// Returns [`TaskListDomainError::NotFull`] unless the capacity is
    /// bounded, non-zero and the active region holds exactly that many
    /// tasks, then [`TaskListDomainError::DuplicateTask`]
    /// or [`TaskListDomainError::TaskIdInUse`].
    pub fn displace(&mut self, id: TaskId, text: &str) -> Result<Task, TaskListDomainError> {
        self.displace_within(id, text, self.capacity)
    }

    pub(crate) fn displace_within(
        &mut self,
        id: TaskId,
        text: &str,
        capacity: Capacity,
    ) -> Result<Task, TaskListDomainError> {
        let displaceable = matches!(
            capacity,
            Capacity::Bounded(limit) if limit > 0 && self.active_len() == limit
        );
        if !displaceable {
            return Err(TaskListDomainError::NotFull);
        }
        self.ensure_insertable(&id, text)?;

        let created = self.insert_at(0, Task::new(id, text));
        // The previous last active task now sits at the demarcation index.
        let bumped = self.items.remove(self.demarcation_index);
        self.items.push(bumped);
        self.renumber_from(0);
        Ok(created)
    }

    /// Replaces a task's text in place.
    ///
    /// Setting a task's text to its current value succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`TaskListDomainError::TaskNotFound`] when absent or
    /// [`TaskListDomainError::DuplicateTask`] when another task carries
    /// the text.
    pub fn update(&mut self, id: &TaskId, text: &str) -> Result<Task, TaskListDomainError> {
        let offset = self.offset_of(id)?;
        if self
            .items
            .iter()
            .any(|task| task.id() != id && task.text() == text)
        {
            return Err(TaskListDomainError::DuplicateTask(text.to_owned()));
        }
        let Some(task) = self.items.get_mut(offset) else {
            return Err(TaskListDomainError::TaskNotFound(id.clone()));
        };
        task.set_text(text);
        Ok(task.clone())
    }

    /// Relocates a task to the slot its target currently occupies.
    ///
    /// Tasks between the two slide by one to close the gap. Only list
    /// offsets are considered, so the demarcation index does not move.
    /// Returns every task whose position changed; empty when `id` and
    /// `target_id` are the same task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskListDomainError::TaskNotFound`] when either task is
    /// absent.
    pub fn move_task(
        &mut self,
        id: &TaskId,
        target_id: &TaskId,
    ) -> Result<Vec<Task>, TaskListDomainError> {
        let from = self.offset_of(id)?;
        let to = self.offset_of(target_id)?;
        if from == to {
            return Ok(Vec::new());
        }

        let task = self.items.remove(from);
        self.items.insert(to, task);
        let (low, high) = (from.min(to), from.max(to));
        self.renumber_from(low);
        Ok(self.cloned_range(low, high + 1))
    }

    /// Promotes up to `count` deferred tasks into the active region.
    ///
    /// Front-most deferred tasks go first. Promotion stops once the active
    /// region is full or the deferred region is empty, and never happens
    /// on an unbounded list. Returns the promoted tasks in order.
    pub fn promote(&mut self, count: usize) -> Vec<Task> {
        let Some(room) = self.available_slots() else {
            return Vec::new();
        };
        let promoted = count.min(room).min(self.deferred_len());
        let start = self.demarcation_index;
        self.demarcation_index += promoted;
        self.cloned_range(start, start + promoted)
    }

    /// Swaps up to `count` tasks across the demarcation index.
    ///
    /// The last `k` active tasks become the first `k` deferred tasks and
    /// the first `k` deferred tasks become the last `k` active tasks, where
    /// `k` is bounded by both region sizes. Each group keeps its relative
    /// order. Returns every task whose position changed.
    pub fn escalate(&mut self, count: usize) -> Vec<Task> {
        let exchanged = count.min(self.active_len()).min(self.deferred_len());
        if exchanged == 0 {
            return Vec::new();
        }
        let start = self.demarcation_index - exchanged;
        let end = self.demarcation_index + exchanged;
        if let Some(window) = self.items.get_mut(start..end) {
            window.rotate_left(exchanged);
        }
        self.renumber_from(start);
        self.cloned_range(start, end)
    }

    fn regions(&self) -> (&[Task], &[Task]) {
        self.items
            .split_at(self.demarcation_index.min(self.items.len()))
    }

    const fn region_at(&self, offset: usize) -> Region {
        if offset < self.demarcation_index {
            Region::Active
        } else {
            Region::Deferred
        }
    }

    fn position_of(&self, id: &TaskId) -> Option<usize> {
        self.items.iter().position(|task| task.id() == id)
    }

    fn offset_of(&self, id: &TaskId) -> Result<usize, TaskListDomainError> {
        self.position_of(id)
            .ok_or_else(|| TaskListDomainError::TaskNotFound(id.clone()))
    }

    fn ensure_insertable(&self, id: &TaskId, text: &str) -> Result<(), TaskListDomainError> {
        if self.contains_text(text) {
            return Err(TaskListDomainError::DuplicateTask(text.to_owned()));
        }
        if self.find(id).is_some() {
            return Err(TaskListDomainError::TaskIdInUse(id.clone()));
        }
        Ok(())
    }

    fn insert_at(&mut self, offset: usize, mut task: Task) -> Task {
        task.set_position(offset + 1);
        let created = task.clone();
        self.items.insert(offset, task);
        self.renumber_from(offset);
        created
    }

    fn renumber_from(&mut self, start: usize) {
        for (offset, task) in self.items.iter_mut().enumerate().skip(start) {
            task.set_position(offset + 1);
        }
    }

    fn cloned_range(&self, start: usize, end: usize) -> Vec<Task> {
        self.items
            .get(start..end)
            .map(<[Task]>::to_vec)
            .unwrap_or_default()
    }
}

fn check_parts(items: &[Task], demarcation_index: usize) -> Result<(), TaskListDomainError> {
    if demarcation_index > items.len() {
        return Err(TaskListDomainError::CorruptList(format!(
            "demarcation index {demarcation_index} exceeds {} tasks",
            items.len()
        )));
    }
    let mut ids = HashSet::with_capacity(items.len());
    let mut texts = HashSet::with_capacity(items.len());
    for (offset, task) in items.iter().enumerate() {
        if !ids.insert(task.id()) {
            return Err(TaskListDomainError::CorruptList(format!(
                "task identifier {} repeats",
                task.id()
            )));
        }
        if !texts.insert(task.text()) {
            return Err(TaskListDomainError::CorruptList(format!(
                "task text '{}' repeats",
                task.text()
            )));
        }
        if task.position() != offset + 1 {
            return Err(TaskListDomainError::CorruptList(format!(
                "task {} has position {}, expected {}",
                task.id(),
                task.position(),
                offset + 1
            )));
        }
    }
    Ok(())
}
