//! UUID-backed task identifier generator.

use crate::backlog::{domain::TaskId, ports::IdentityGenerator};
use uuid::Uuid;

/// Mints task identifiers from random v4 UUIDs.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIdentityGenerator;

impl IdentityGenerator for UuidIdentityGenerator {
    fn next_id(&self) -> TaskId {
        TaskId::new(Uuid::new_v4().to_string())
    }
}
