//! Focuslist: a personal task backlog with a bounded focus region.
//!
//! A backlog keeps every task in one ordered list. The front of the list is
//! the active region, capped at a small capacity so only a few tasks have
//! focus at a time; everything else waits in the deferred region. A lock
//! timer can lift the cap for a fixed window, after which it must run out
//! before the cap can be lifted again.
//!
//! # Architecture
//!
//! Focuslist follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for persistence and identity
//! - **Adapters**: Concrete implementations of ports
//! - **Services**: Load, mutate and save orchestration over the ports
//!
//! # Modules
//!
//! - [`backlog`]: Ordered task lists, the lock timer and their service

pub mod backlog;
