//! Domain model for the task list.
//!
//! # Responsibility
//! - Define the task record and the edit-session overlay.
//! - Own the id generation seam used by the store.
//!
//! # Invariants
//! - A `Task` never holds text that is blank after trimming.
//! - `TaskId` values are unique and strictly increasing per generator.

pub mod edit_session;
pub mod id_gen;
pub mod task;
