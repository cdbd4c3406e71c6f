//! Port contracts for backlog management.
//!
//! Ports define infrastructure-agnostic interfaces used by backlog services.

pub mod archive;
pub mod identity;
pub mod repository;

pub use archive::{CompletedTaskArchive, TaskArchiveError, TaskArchiveResult};
pub use identity::IdentityGenerator;
pub use repository::{TaskListRepository, TaskListRepositoryError, TaskListRepositoryResult};
