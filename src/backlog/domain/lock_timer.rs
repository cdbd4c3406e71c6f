//! Time-gated suspension of the active-region capacity.

use super::TaskListDomainError;
use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

/// Length of the window opened by a successful unlock.
pub const UNLOCK_DURATION: TimeDelta = TimeDelta::minutes(30);

/// Shortest window a timer accepts; shorter windows are raised to it.
pub const MIN_UNLOCK_DURATION: TimeDelta = TimeDelta::seconds(1);

/// Observable lock state at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockState {
    /// The capacity constraint applies.
    Locked,
    /// The capacity constraint is suspended.
    Unlocked {
        /// Instant the current window opened.
        since: DateTime<Utc>,
    },
}

/// Tracks when the list was last unlocked.
///
/// The state is never cached: every query derives it from the `now` it is
/// given, so the transition back to locked happens purely by time passing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockTimer {
    last_unlocked_at: Option<DateTime<Utc>>,
    #[serde(with = "duration_secs")]
    unlock_duration: TimeDelta,
}

impl Default for LockTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl LockTimer {
    /// Creates a never-unlocked timer using [`UNLOCK_DURATION`].
    #[must_use]
    pub const fn new() -> Self {
        Self {
            last_unlocked_at: None,
            unlock_duration: UNLOCK_DURATION,
        }
    }

    /// Creates a never-unlocked timer with a custom window length.
    ///
    /// Windows shorter than [`MIN_UNLOCK_DURATION`] are raised to it.
    #[must_use]
    pub fn with_duration(unlock_duration: TimeDelta) -> Self {
        Self::from_persisted(None, unlock_duration)
    }

    /// Reconstructs a timer from persisted storage.
    ///
    /// Windows shorter than [`MIN_UNLOCK_DURATION`] are raised to it.
    #[must_use]
    pub fn from_persisted(
        last_unlocked_at: Option<DateTime<Utc>>,
        unlock_duration: TimeDelta,
    ) -> Self {
        Self {
            last_unlocked_at,
            unlock_duration: unlock_duration.max(MIN_UNLOCK_DURATION),
        }
    }

    /// Returns the instant of the last successful unlock, if any.
    #[must_use]
    pub const fn last_unlocked_at(&self) -> Option<DateTime<Utc>> {
        self.last_unlocked_at
    }

    /// Returns the unlock window length.
    #[must_use]
    pub const fn unlock_duration(&self) -> TimeDelta {
        self.unlock_duration
    }

    /// Returns the instant the current or most recent window closes.
    #[must_use]
    pub fn unlocked_until(&self) -> Option<DateTime<Utc>> {
        self.last_unlocked_at.map(|at| {
            at.checked_add_signed(self.unlock_duration)
                .unwrap_or(DateTime::<Utc>::MAX_UTC)
        })
    }

    /// Reports whether a new unlock is allowed at `now`.
    ///
    /// An instant earlier than the last unlock never qualifies, so the
    /// unlock timestamp cannot move backwards.
    #[must_use]
    pub fn can_unlock(&self, now: DateTime<Utc>) -> bool {
        self.last_unlocked_at.is_none_or(|at| {
            now >= at && now.signed_duration_since(at) >= self.unlock_duration
        })
    }

    /// Reports whether the capacity constraint is suspended at `now`.
    #[must_use]
    pub fn is_unlocked(&self, now: DateTime<Utc>) -> bool {
        self.last_unlocked_at
            .is_some_and(|at| now.signed_duration_since(at) < self.unlock_duration)
    }

    /// Returns the lock state at `now`.
    #[must_use]
    pub fn state(&self, now: DateTime<Utc>) -> LockState {
        match self.last_unlocked_at {
            Some(since) if self.is_unlocked(now) => LockState::Unlocked { since },
            _ => LockState::Locked,
        }
    }

    /// Opens a new unlock window starting at `now`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskListDomainError::LockTimerNotExpired`] while the
    /// previous window has not run its full length, or when `now` is
    /// earlier than the last unlock.
    pub fn unlock(&mut self, now: DateTime<Utc>) -> Result<(), TaskListDomainError> {
        if !self.can_unlock(now) {
            return Err(TaskListDomainError::LockTimerNotExpired {
                available_at: self.unlocked_until().unwrap_or(now),
            });
        }
        self.last_unlocked_at = Some(now);
        Ok(())
    }
}

mod duration_secs {
    use super::MIN_UNLOCK_DURATION;
    use chrono::TimeDelta;
    use serde::{Deserialize, Deserializer, Serializer, de};

    pub(super) fn serialize<S: Serializer>(
        duration: &TimeDelta,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(duration.num_seconds())
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<TimeDelta, D::Error> {
        let seconds = i64::deserialize(deserializer)?;
        TimeDelta::try_seconds(seconds)
            .filter(|duration| *duration >= MIN_UNLOCK_DURATION)
            .ok_or_else(|| {
                de::Error::custom(format!("unlock duration {seconds}s must be positive"))
            })
    }
}
