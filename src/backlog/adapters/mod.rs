//! Adapter implementations for backlog ports.

pub mod memory;

mod identity;

pub use identity::UuidIdentityGenerator;
