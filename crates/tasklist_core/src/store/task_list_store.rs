//! In-memory task list with a single edit-session overlay.
//!
//! # Responsibility
//! - Own the ordered task collection and the optional edit session.
//! - Be the only mutation surface; re-validate every input.
//! - Notify listeners once per successful mutation.
//!
//! # Invariants
//! - Insertion order is preserved; edits replace text in place.
//! - At most one edit session exists, and its target is in the collection.
//! - Rejected operations leave state untouched and emit nothing.

use crate::model::edit_session::{EditSession, EditState};
use crate::model::id_gen::{TaskIdGenerator, TimestampIdGenerator};
use crate::model::task::{normalize_task_text, Task, TaskId};
use crate::store::listener::{ListenerRegistry, StoreEvent, StoreListener, SubscriptionId};
use log::debug;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Why an operation left the store unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// Text is blank after trimming.
    EmptyText,
    /// No task with this id is in the collection.
    TaskNotFound(TaskId),
    /// The operation needs an edit session and none is open.
    NoActiveEdit,
    /// The id generator cannot produce another unique id.
    IdsExhausted,
}

impl Display for Rejection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyText => write!(f, "task text must not be blank"),
            Self::TaskNotFound(id) => write!(f, "task not found: {id}"),
            Self::NoActiveEdit => write!(f, "no edit in progress"),
            Self::IdsExhausted => write!(f, "no task ids left"),
        }
    }
}

impl Error for Rejection {}

impl Rejection {
    /// Stable single-token code for `key=value` log lines.
    pub fn reason(&self) -> &'static str {
        match self {
            Self::EmptyText => "empty_text",
            Self::TaskNotFound(_) => "task_not_found",
            Self::NoActiveEdit => "no_active_edit",
            Self::IdsExhausted => "ids_exhausted",
        }
    }
}

pub type StoreResult<T> = Result<T, Rejection>;

/// Owned copy of the renderable state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreSnapshot {
    pub tasks: Vec<Task>,
    pub edit: Option<EditSession>,
}

/// Task collection plus edit-session state machine.
#[derive(Debug)]
pub struct TaskListStore<G: TaskIdGenerator = TimestampIdGenerator> {
    tasks: Vec<Task>,
    edit: Option<EditSession>,
    ids: G,
    listeners: ListenerRegistry,
}

impl TaskListStore<TimestampIdGenerator> {
    /// Creates an empty store with creation-time ids.
    pub fn new() -> Self {
        Self::with_id_generator(TimestampIdGenerator::new())
    }
}

impl Default for TaskListStore<TimestampIdGenerator> {
    fn default() -> Self {
        Self::new()
    }
}

impl<G: TaskIdGenerator> TaskListStore<G> {
    /// Creates an empty store that draws ids from `ids`.
    pub fn with_id_generator(ids: G) -> Self {
        Self {
            tasks: Vec::new(),
            edit: None,
            ids,
            listeners: ListenerRegistry::new(),
        }
    }

    /// Appends a task built from `raw_text`.
    ///
    /// # Contract
    /// - Stored text is `raw_text.trim()`.
    /// - Blank input is rejected with `Rejection::EmptyText`.
    /// - A spent id generator is rejected with `Rejection::IdsExhausted`.
    pub fn add(&mut self, raw_text: &str) -> StoreResult<Task> {
        let text =
            normalize_task_text(raw_text).ok_or_else(|| reject("add", Rejection::EmptyText))?;
        let id = self
            .ids
            .next_id()
            .ok_or_else(|| reject("add", Rejection::IdsExhausted))?;
        let task = Task { id, text };
        self.tasks.push(task.clone());

        debug!(
            "event=task_add module=store status=ok id={} text_len={} count={}",
            task.id,
            task.text.len(),
            self.tasks.len()
        );
        self.emit(StoreEvent::TaskAdded { task: task.clone() });
        Ok(task)
    }

    /// Removes the task `id`. Returns `false` when it was not present.
    ///
    /// Deleting the edit target also closes the edit session.
    pub fn delete(&mut self, id: TaskId) -> bool {
        let Some(index) = self.position(id) else {
            debug!("event=task_delete module=store status=noop id={id}");
            return false;
        };
        self.tasks.remove(index);

        let edit_cleared = self
            .edit
            .as_ref()
            .is_some_and(|session| session.target_id == id);
        if edit_cleared {
            self.edit = None;
        }

        debug!(
            "event=task_delete module=store status=ok id={id} edit_cleared={edit_cleared} count={}",
            self.tasks.len()
        );
        self.emit(StoreEvent::TaskDeleted { id, edit_cleared });
        true
    }

    /// Opens an edit session on `id`, overwriting any open session.
    pub fn begin_edit(&mut self, id: TaskId) -> StoreResult<EditSession> {
        let text = self
            .task(id)
            .map(|task| task.text.clone())
            .ok_or_else(|| reject("edit_begin", Rejection::TaskNotFound(id)))?;

        let session = EditSession::new(id, text);
        let replaced = self
            .edit
            .replace(session.clone())
            .map(|previous| previous.target_id);

        debug!(
            "event=edit_begin module=store status=ok id={id} replaced={}",
            replaced.map_or_else(|| "none".to_string(), |prev| prev.to_string())
        );
        self.emit(StoreEvent::EditStarted {
            session: session.clone(),
            replaced,
        });
        Ok(session)
    }

    /// Replaces the draft verbatim. Trimming waits for `commit_edit`.
    pub fn update_draft(&mut self, text: &str) -> StoreResult<()> {
        let session = self
            .edit
            .as_mut()
            .ok_or_else(|| reject("edit_draft", Rejection::NoActiveEdit))?;
        session.draft_text = text.to_string();
        let target_id = session.target_id;

        debug!(
            "event=edit_draft module=store status=ok id={target_id} draft_len={}",
            text.len()
        );
        self.emit(StoreEvent::DraftUpdated { target_id });
        Ok(())
    }

    /// Writes the trimmed draft into the target task and closes the session.
    ///
    /// # Contract
    /// - Blank drafts are rejected and the session stays open for a retry.
    /// - The task keeps its id and position.
    pub fn commit_edit(&mut self) -> StoreResult<Task> {
        let session = self
            .edit
            .as_ref()
            .ok_or_else(|| reject("edit_commit", Rejection::NoActiveEdit))?;
        let target_id = session.target_id;
        let text = normalize_task_text(&session.draft_text)
            .ok_or_else(|| reject("edit_commit", Rejection::EmptyText))?;
        let index = self
            .position(target_id)
            .ok_or_else(|| reject("edit_commit", Rejection::TaskNotFound(target_id)))?;

        let task = &mut self.tasks[index];
        task.text = text;
        let task = task.clone();
        self.edit = None;

        debug!(
            "event=edit_commit module=store status=ok id={target_id} text_len={}",
            task.text.len()
        );
        self.emit(StoreEvent::EditCommitted { task: task.clone() });
        Ok(task)
    }

    /// Drops the edit session without touching any task.
    ///
    /// Returns `false` when no session was open.
    pub fn cancel_edit(&mut self) -> bool {
        let Some(session) = self.edit.take() else {
            debug!("event=edit_cancel module=store status=noop");
            return false;
        };

        debug!(
            "event=edit_cancel module=store status=ok id={}",
            session.target_id
        );
        self.emit(StoreEvent::EditCancelled {
            target_id: session.target_id,
        });
        true
    }

    /// Tasks in insertion order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn edit_session(&self) -> Option<&EditSession> {
        self.edit.as_ref()
    }

    pub fn edit_state(&self) -> EditState<'_> {
        EditState::from(self.edit.as_ref())
    }

    /// Whether `id` is the task currently being edited.
    pub fn is_editing(&self, id: TaskId) -> bool {
        self.edit
            .as_ref()
            .is_some_and(|session| session.target_id == id)
    }

    pub fn snapshot(&self) -> StoreSnapshot {
        StoreSnapshot {
            tasks: self.tasks.clone(),
            edit: self.edit.clone(),
        }
    }

    /// Registers a listener for every later successful mutation.
    pub fn subscribe(&mut self, listener: impl StoreListener + 'static) -> SubscriptionId {
        self.listeners.subscribe(Box::new(listener))
    }

    /// Returns `false` when `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.listeners.unsubscribe(id)
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    fn position(&self, id: TaskId) -> Option<usize> {
        self.tasks.iter().position(|task| task.id == id)
    }

    fn emit(&mut self, event: StoreEvent) {
        self.listeners.notify(&event);
    }
}

fn reject(op: &str, rejection: Rejection) -> Rejection {
    debug!(
        "event={op} module=store status=rejected reason={}",
        rejection.reason()
    );
    rejection
}

#[cfg(test)]
mod tests {
    use super::{Rejection, TaskListStore};
    use crate::model::edit_session::EditState;
    use crate::model::id_gen::SequentialIdGenerator;
    use crate::model::task::TaskId;

    fn store() -> TaskListStore<SequentialIdGenerator> {
        TaskListStore::with_id_generator(SequentialIdGenerator::default())
    }

    #[test]
    fn default_store_starts_empty_and_idle() {
        let store = TaskListStore::new();
        assert!(store.is_empty());
        assert_eq!(store.edit_state(), EditState::Idle);
        assert!(store.edit_session().is_none());
    }

    #[test]
    fn rejection_messages_are_readable() {
        assert_eq!(Rejection::EmptyText.to_string(), "task text must not be blank");
        assert_eq!(
            Rejection::TaskNotFound(TaskId::new(4)).to_string(),
            "task not found: 4"
        );
        assert_eq!(Rejection::NoActiveEdit.to_string(), "no edit in progress");
        assert_eq!(Rejection::IdsExhausted.to_string(), "no task ids left");
    }

    #[test]
    fn rejection_reasons_are_single_log_tokens() {
        let all = [
            Rejection::EmptyText,
            Rejection::TaskNotFound(TaskId::new(9)),
            Rejection::NoActiveEdit,
            Rejection::IdsExhausted,
        ];
        for rejection in all {
            let reason = rejection.reason();
            assert!(!reason.is_empty());
            assert!(
                reason.chars().all(|c| c.is_ascii_lowercase() || c == '_'),
                "{reason}"
            );
        }
    }

    #[test]
    fn edit_state_tracks_draft() {
        let mut store = store();
        let task = store.add("write report").unwrap();
        store.begin_edit(task.id).unwrap();
        store.update_draft(" rewrite ").unwrap();

        assert_eq!(
            store.edit_state(),
            EditState::Editing {
                target_id: task.id,
                draft_text: " rewrite ",
            }
        );
        assert!(store.is_editing(task.id));
        assert!(!store.edit_state().is_idle());
    }

    #[test]
    fn commit_with_vanished_target_is_rejected() {
        // Only reachable by breaking the invariant from inside the module.
        let mut store = store();
        let task = store.add("gone soon").unwrap();
        store.begin_edit(task.id).unwrap();
        store.tasks.clear();

        assert_eq!(store.commit_edit(), Err(Rejection::TaskNotFound(task.id)));
        assert!(store.edit_session().is_some());
    }
}
