//! Active-region capacity and region labels.

use serde::{Deserialize, Serialize};

/// Upper bound on the number of active tasks.
///
/// Persisted and configured as a signed integer where any negative value
/// stands for an unbounded active region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum Capacity {
    /// At most this many tasks may be active.
    Bounded(usize),
    /// The active region has no limit.
    Unbounded,
}

impl Capacity {
    /// Interprets a raw signed capacity.
    #[must_use]
    pub fn from_raw(raw: i64) -> Self {
        usize::try_from(raw).map_or(Self::Unbounded, Self::Bounded)
    }

    /// Returns the signed representation, `-1` for unbounded.
    #[must_use]
    pub fn as_raw(self) -> i64 {
        match self {
            Self::Bounded(limit) => i64::try_from(limit).unwrap_or(i64::MAX),
            Self::Unbounded => -1,
        }
    }

    /// Returns the limit, or `None` when unbounded.
    #[must_use]
    pub const fn limit(self) -> Option<usize> {
        match self {
            Self::Bounded(limit) => Some(limit),
            Self::Unbounded => None,
        }
    }

    /// Reports whether `active` tasks leave no free slot.
    #[must_use]
    pub const fn is_reached_by(self, active: usize) -> bool {
        match self {
            Self::Bounded(limit) => active >= limit,
            Self::Unbounded => false,
        }
    }

    /// Number of additional active tasks allowed, `None` when unbounded.
    #[must_use]
    pub const fn remaining(self, active: usize) -> Option<usize> {
        match self {
            Self::Bounded(limit) => Some(limit.saturating_sub(active)),
            Self::Unbounded => None,
        }
    }
}

impl From<i64> for Capacity {
    fn from(raw: i64) -> Self {
        Self::from_raw(raw)
    }
}

impl From<Capacity> for i64 {
    fn from(capacity: Capacity) -> Self {
        capacity.as_raw()
    }
}

/// Which side of the demarcation index a task sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Region {
    /// Tasks being worked now.
    Active,
    /// Postponed tasks.
    Deferred,
}
