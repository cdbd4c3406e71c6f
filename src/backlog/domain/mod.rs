//! Domain model for the task backlog.
//!
//! A backlog is one ordered sequence of tasks split by a demarcation index
//! into a capacity-bounded active region and an unbounded deferred region,
//! plus a lock timer that can suspend the capacity for a fixed window. The
//! domain takes the current time as a parameter and performs no I/O.

mod capacity;
mod error;
mod ids;
mod lock_timer;
mod ordered;
mod task;
mod task_list;

pub use capacity::{Capacity, Region};
pub use error::{EmptyIdentifierError, TaskListDomainError};
pub use ids::{OwnerId, TaskId};
pub use lock_timer::{LockState, LockTimer, MIN_UNLOCK_DURATION, UNLOCK_DURATION};
pub use ordered::OrderedTaskList;
pub use task::{CompletedTask, Task};
pub use task_list::{TaskList, TaskListView};
