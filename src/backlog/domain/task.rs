//! Task entity and completed-task record.

use super::TaskId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single backlog entry.
///
/// The identifier is fixed at creation. The position is owned by the list
/// holding the task and always equals its 1-based offset in that list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    text: String,
    position: usize,
}

impl Task {
    pub(crate) fn new(id: TaskId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            position: 0,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> &TaskId {
        &self.id
    }

    /// Returns the task text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the 1-based position of the task in its list.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }

    pub(crate) fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub(crate) const fn set_position(&mut self, position: usize) {
        self.position = position;
    }

    pub(crate) fn into_text(self) -> String {
        self.text
    }
}

/// Archived record of a task that was completed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletedTask {
    id: TaskId,
    text: String,
    completed_at: DateTime<Utc>,
}

impl CompletedTask {
    /// Creates a completed-task record.
    #[must_use]
    pub fn new(id: TaskId, text: impl Into<String>, completed_at: DateTime<Utc>) -> Self {
        Self {
            id,
            text: text.into(),
            completed_at,
        }
    }

    /// Returns the archive identifier.
    #[must_use]
    pub const fn id(&self) -> &TaskId {
        &self.id
    }

    /// Returns the text the task carried when it was completed.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the completion timestamp.
    #[must_use]
    pub const fn completed_at(&self) -> DateTime<Utc> {
        self.completed_at
    }
}
