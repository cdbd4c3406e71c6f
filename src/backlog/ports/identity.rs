//! Identity generator port.

use crate::backlog::domain::TaskId;

/// Supplies fresh, never-reused task identifiers.
pub trait IdentityGenerator: Send + Sync {
    /// Returns the next identifier.
    fn next_id(&self) -> TaskId;
}
