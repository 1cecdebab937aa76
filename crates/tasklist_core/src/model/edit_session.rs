//! Edit-session overlay on top of the task collection.
//!
//! At most one session exists per store. The draft is kept verbatim; trimming
//! only happens when the store commits it.

use crate::model::task::TaskId;
use serde::{Deserialize, Serialize};

/// In-progress edit of exactly one task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditSession {
    pub target_id: TaskId,
    pub draft_text: String,
}

impl EditSession {
    pub fn new(target_id: TaskId, draft_text: impl Into<String>) -> Self {
        Self {
            target_id,
            draft_text: draft_text.into(),
        }
    }
}

/// Borrowed view of the edit state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditState<'a> {
    /// No edit in progress.
    Idle,
    /// One task is being edited.
    Editing {
        target_id: TaskId,
        draft_text: &'a str,
    },
}

impl<'a> From<Option<&'a EditSession>> for EditState<'a> {
    fn from(value: Option<&'a EditSession>) -> Self {
        match value {
            None => Self::Idle,
            Some(session) => Self::Editing {
                target_id: session.target_id,
                draft_text: session.draft_text.as_str(),
            },
        }
    }
}

impl EditState<'_> {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }
}
