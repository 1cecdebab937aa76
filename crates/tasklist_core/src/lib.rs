//! Core state machine for the in-memory task list.
//! This crate is the single source of truth for task and edit-session invariants.

pub mod logging;
pub mod model;
pub mod store;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::edit_session::{EditSession, EditState};
pub use model::id_gen::{SequentialIdGenerator, TaskIdGenerator, TimestampIdGenerator};
pub use model::task::{normalize_task_text, Task, TaskId};
pub use store::listener::{StoreEvent, StoreListener, SubscriptionId};
pub use store::task_list_store::{Rejection, StoreResult, StoreSnapshot, TaskListStore};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
