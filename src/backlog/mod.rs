//! Focus backlog management.
//!
//! Each owner has one ordered task list split into an active region of
//! bounded capacity and an unbounded deferred region, plus a lock timer
//! that suspends the capacity for a fixed window. The module follows
//! hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]
//! - Provisioning settings in [`config`]

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
pub mod services;
