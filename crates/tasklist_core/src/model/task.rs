//! Task record and text normalization.
//!
//! # Invariants
//! - `Task::text` is stored trimmed and is never empty.
//! - `Task::id` does not change after construction.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Identifier of one task inside a store.
///
/// Serialized as a bare integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(u64);

impl TaskId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }
}

impl Display for TaskId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One to-do item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub text: String,
}

/// Trims `raw` and returns it as owned text, or `None` when nothing is left.
///
/// The trimmed set is the one browsers use for form input: Unicode
/// whitespace plus the byte-order mark, without NEL (U+0085).
pub fn normalize_task_text(raw: &str) -> Option<String> {
    let trimmed = raw.trim_matches(is_trimmed_char);
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn is_trimmed_char(c: char) -> bool {
    (c.is_whitespace() && c != '\u{85}') || c == '\u{FEFF}'
}
