//! Shared test helpers for in-memory backlog integration tests.

use chrono::{DateTime, Local, TimeDelta, TimeZone, Utc};
use focuslist::backlog::{
    adapters::memory::{InMemoryCompletedTaskArchive, InMemoryTaskListRepository},
    domain::{OwnerId, Task, TaskId},
    ports::IdentityGenerator,
    services::TaskListService,
};
use mockable::Clock;
use rstest::fixture;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

/// Service wired to in-memory adapters and a manual clock.
pub type TestService = TaskListService<
    InMemoryTaskListRepository,
    InMemoryCompletedTaskArchive,
    SequentialIds,
    ManualClock,
>;

/// Clock that only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    /// Moves the clock forward.
    pub fn advance(&self, delta: TimeDelta) {
        let mut now = self.now.lock().unwrap_or_else(PoisonError::into_inner);
        *now += delta;
    }
}

impl Clock for ManualClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Generates `task-1`, `task-2`, ...
#[derive(Debug, Default)]
pub struct SequentialIds {
    next: AtomicUsize,
}

impl IdentityGenerator for SequentialIds {
    fn next_id(&self) -> TaskId {
        let value = self.next.fetch_add(1, Ordering::Relaxed) + 1;
        TaskId::new(format!("task-{value}"))
    }
}

/// Fixed starting instant for the manual clock.
#[fixture]
pub fn start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0)
        .single()
        .expect("valid reference instant")
}

/// Provides a manual clock set to [`start`].
#[fixture]
pub fn clock(start: DateTime<Utc>) -> Arc<ManualClock> {
    Arc::new(ManualClock {
        now: Mutex::new(start),
    })
}

/// Provides a service sharing the given clock.
#[fixture]
pub fn service(clock: Arc<ManualClock>) -> TestService {
    TaskListService::new(
        Arc::new(InMemoryTaskListRepository::new()),
        Arc::new(InMemoryCompletedTaskArchive::new()),
        Arc::new(SequentialIds::default()),
        clock,
    )
}

/// Provides the owner used across the tests.
#[fixture]
pub fn owner() -> OwnerId {
    OwnerId::new("someone@example.com").expect("valid owner")
}

/// Texts of the given tasks, in order.
#[must_use]
pub fn texts(tasks: &[Task]) -> Vec<&str> {
    tasks.iter().map(Task::text).collect()
}

/// Positions of the given tasks, in order.
#[must_use]
pub fn positions(tasks: &[Task]) -> Vec<usize> {
    tasks.iter().map(Task::position).collect()
}
