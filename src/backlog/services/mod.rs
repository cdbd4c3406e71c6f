//! Application services for backlog orchestration.

mod error;
mod task_list;

pub use error::{OperationRefused, RefusalCause, TaskListServiceResult};
pub use task_list::{ListOutcome, TaskListService};
