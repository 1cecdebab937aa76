//! Task list store and its change notifications.
//!
//! # Responsibility
//! - Hold all mutable task-list state for one session.
//! - Expose the transition operations presentation layers bind to.

pub mod listener;
pub mod task_list_store;
