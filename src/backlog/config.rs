//! Configuration for newly provisioned task lists.

use crate::backlog::domain::{Capacity, UNLOCK_DURATION};
use chrono::TimeDelta;
use serde::Deserialize;
use thiserror::Error;

/// Default active-region capacity for a new list.
pub const DEFAULT_FOCUS_CAPACITY: Capacity = Capacity::Bounded(2);

/// Settings applied when a task list is provisioned.
///
/// Missing fields fall back to their defaults when deserialising.
///
/// # Examples
///
/// ```
/// use focuslist::backlog::{config::TaskListConfig, domain::Capacity};
///
/// let config = TaskListConfig::from_json_str(r#"{ "focus_capacity": 3 }"#)
///     .expect("valid configuration");
/// assert_eq!(config.capacity(), Capacity::Bounded(3));
/// assert_eq!(config.unlock_duration_secs, 1800);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TaskListConfig {
    /// Active-region capacity; negative means unbounded.
    pub focus_capacity: i64,
    /// Length of an unlock window in seconds.
    pub unlock_duration_secs: i64,
}

impl Default for TaskListConfig {
    fn default() -> Self {
        Self {
            focus_capacity: DEFAULT_FOCUS_CAPACITY.as_raw(),
            unlock_duration_secs: UNLOCK_DURATION.num_seconds(),
        }
    }
}

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The document is not valid JSON for this configuration.
    #[error("invalid task list configuration: {0}")]
    Parse(#[from] serde_json::Error),

    /// The unlock window is zero, negative or out of range.
    #[error("unlock duration must be a positive number of seconds, got {0}")]
    InvalidUnlockDuration(i64),
}

impl TaskListConfig {
    /// Parses and validates a JSON configuration document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON and
    /// [`ConfigError::InvalidUnlockDuration`] when validation fails.
    pub fn from_json_str(document: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(document)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that the settings describe a usable list.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidUnlockDuration`] when the unlock window
    /// is not a positive representable duration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.unlock_duration().map(|_| ())
    }

    /// Returns the configured capacity.
    #[must_use]
    pub fn capacity(&self) -> Capacity {
        Capacity::from_raw(self.focus_capacity)
    }

    /// Returns the configured unlock window.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidUnlockDuration`] when the value is not
    /// positive or does not fit a [`TimeDelta`].
    pub fn unlock_duration(&self) -> Result<TimeDelta, ConfigError> {
        if self.unlock_duration_secs <= 0 {
            return Err(ConfigError::InvalidUnlockDuration(self.unlock_duration_secs));
        }
        TimeDelta::try_seconds(self.unlock_duration_secs)
            .ok_or(ConfigError::InvalidUnlockDuration(self.unlock_duration_secs))
    }
}
