//! Task id generation.
//!
//! # Invariants
//! - Every generator yields strictly increasing ids for its lifetime.
//! - `TimestampIdGenerator` follows wall-clock milliseconds but never repeats
//!   or goes backwards, even when the clock stalls or regresses.
//! - A generator that cannot produce a larger id returns `None` for good.

use crate::model::task::TaskId;
use std::time::{SystemTime, UNIX_EPOCH};

/// Source of fresh task ids for one store.
pub trait TaskIdGenerator {
    /// Returns `None` once the id space is used up.
    fn next_id(&mut self) -> Option<TaskId>;
}

/// Creation-time ids: Unix epoch milliseconds, bumped past the previous id
/// when two tasks are created within the same millisecond.
#[derive(Debug, Default)]
pub struct TimestampIdGenerator {
    last: Option<u64>,
}

impl TimestampIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Picks the id for a creation at `now_ms`, given the previous id.
    fn next_after(&mut self, now_ms: u64) -> Option<u64> {
        let next = match self.last {
            Some(last) if now_ms <= last => last.checked_add(1)?,
            _ => now_ms,
        };
        self.last = Some(next);
        Some(next)
    }
}

impl TaskIdGenerator for TimestampIdGenerator {
    fn next_id(&mut self) -> Option<TaskId> {
        self.next_after(epoch_millis()).map(TaskId::new)
    }
}

/// Deterministic ids `start, start + 1, ..., u64::MAX`.
#[derive(Debug)]
pub struct SequentialIdGenerator {
    next: Option<u64>,
}

impl SequentialIdGenerator {
    pub fn starting_at(start: u64) -> Self {
        Self { next: Some(start) }
    }
}

impl Default for SequentialIdGenerator {
    fn default() -> Self {
        Self::starting_at(1)
    }
}

impl TaskIdGenerator for SequentialIdGenerator {
    fn next_id(&mut self) -> Option<TaskId> {
        let id = self.next?;
        self.next = id.checked_add(1);
        Some(TaskId::new(id))
    }
}

fn epoch_millis() -> u64 {
    // A clock before 1970 degrades to "never advances"; ids still increase.
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX))
        .unwrap_or(0)
}
