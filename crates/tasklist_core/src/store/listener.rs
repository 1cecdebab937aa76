//! Change-notification registry for store observers.
//!
//! # Invariants
//! - Listeners are notified in subscription order.
//! - Subscription ids are never reused within one registry.

use crate::model::edit_session::EditSession;
use crate::model::task::{Task, TaskId};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::{Debug, Formatter};

/// One successful store mutation, emitted after the mutation is applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum StoreEvent {
    TaskAdded {
        task: Task,
    },
    TaskDeleted {
        id: TaskId,
        /// The deleted task was the edit target; the session is gone too.
        edit_cleared: bool,
    },
    EditStarted {
        session: EditSession,
        /// Target of the session this one overwrote, if any.
        replaced: Option<TaskId>,
    },
    DraftUpdated {
        target_id: TaskId,
    },
    EditCommitted {
        task: Task,
    },
    EditCancelled {
        target_id: TaskId,
    },
}

impl StoreEvent {
    /// Short stable name used in log lines.
    pub fn name(&self) -> &'static str {
        match self {
            Self::TaskAdded { .. } => "task_added",
            Self::TaskDeleted { .. } => "task_deleted",
            Self::EditStarted { .. } => "edit_started",
            Self::DraftUpdated { .. } => "draft_updated",
            Self::EditCommitted { .. } => "edit_committed",
            Self::EditCancelled { .. } => "edit_cancelled",
        }
    }
}

/// Observer contract for presentation bindings.
pub trait StoreListener {
    fn on_change(&mut self, event: &StoreEvent);
}

impl<F> StoreListener for F
where
    F: FnMut(&StoreEvent),
{
    fn on_change(&mut self, event: &StoreEvent) {
        self(event)
    }
}

/// Handle returned by `subscribe`, used to unsubscribe later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriptionId(u64);

/// Ordered set of listeners owned by one store.
#[derive(Default)]
pub(crate) struct ListenerRegistry {
    listeners: BTreeMap<SubscriptionId, Box<dyn StoreListener>>,
    next_id: u64,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, listener: Box<dyn StoreListener>) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.insert(id, listener);
        id
    }

    /// Returns `false` when `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.listeners.remove(&id).is_some()
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn notify(&mut self, event: &StoreEvent) {
        for listener in self.listeners.values_mut() {
            listener.on_change(event);
        }
    }
}

impl Debug for ListenerRegistry {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListenerRegistry")
            .field("listeners", &self.listeners.len())
            .field("next_id", &self.next_id)
            .finish()
    }
}
