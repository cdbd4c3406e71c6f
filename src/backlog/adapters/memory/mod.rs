//! In-memory adapters for tests and embedded use.

mod archive;
mod task_list;

pub use archive::InMemoryCompletedTaskArchive;
pub use task_list::InMemoryTaskListRepository;
