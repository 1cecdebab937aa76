use serde_json::json;
use std::cell::RefCell;
use std::rc::Rc;
use tasklist_core::{
    EditSession, SequentialIdGenerator, StoreEvent, StoreSnapshot, Task, TaskId, TaskListStore,
};

type Log = Rc<RefCell<Vec<StoreEvent>>>;

fn setup() -> (TaskListStore<SequentialIdGenerator>, Log) {
    let mut store = TaskListStore::with_id_generator(SequentialIdGenerator::default());
    let log: Log = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    store.subscribe(move |event: &StoreEvent| sink.borrow_mut().push(event.clone()));
    (store, log)
}

fn names(log: &Log) -> Vec<&'static str> {
    log.borrow().iter().map(StoreEvent::name).collect()
}

#[test]
fn each_successful_mutation_emits_exactly_one_event() {
    let (mut store, log) = setup();

    let task = store.add("write tests").unwrap();
    store.begin_edit(task.id).unwrap();
    store.update_draft("write more tests").unwrap();
    let updated = store.commit_edit().unwrap();
    store.begin_edit(task.id).unwrap();
    store.cancel_edit();
    store.delete(task.id);

    assert_eq!(
        names(&log),
        vec![
            "task_added",
            "edit_started",
            "draft_updated",
            "edit_committed",
            "edit_started",
            "edit_cancelled",
            "task_deleted",
        ]
    );
    assert_eq!(log.borrow()[3], StoreEvent::EditCommitted { task: updated });
}

#[test]
fn rejected_and_noop_operations_emit_nothing() {
    let (mut store, log) = setup();

    let _ = store.add("   ");
    let _ = store.begin_edit(TaskId::new(42));
    let _ = store.update_draft("orphan");
    let _ = store.commit_edit();
    assert!(!store.cancel_edit());
    assert!(!store.delete(TaskId::new(42)));
    assert!(log.borrow().is_empty());

    let task = store.add("real").unwrap();
    store.begin_edit(task.id).unwrap();
    store.update_draft(" ").unwrap();
    log.borrow_mut().clear();
    let _ = store.commit_edit();

    assert!(log.borrow().is_empty());
}

#[test]
fn replacing_a_session_reports_the_previous_target() {
    let (mut store, log) = setup();
    let first = store.add("first").unwrap();
    let second = store.add("second").unwrap();

    store.begin_edit(first.id).unwrap();
    store.begin_edit(second.id).unwrap();

    assert_eq!(
        log.borrow().last(),
        Some(&StoreEvent::EditStarted {
            session: EditSession::new(second.id, "second"),
            replaced: Some(first.id),
        })
    );
}

#[test]
fn deleting_the_edit_target_is_reported_in_one_event() {
    let (mut store, log) = setup();
    let task = store.add("target").unwrap();
    store.begin_edit(task.id).unwrap();
    log.borrow_mut().clear();

    store.delete(task.id);

    assert_eq!(
        *log.borrow(),
        vec![StoreEvent::TaskDeleted {
            id: task.id,
            edit_cleared: true,
        }]
    );
}

#[test]
fn unsubscribed_listener_hears_nothing_more() {
    let mut store = TaskListStore::with_id_generator(SequentialIdGenerator::default());
    let hits = Rc::new(RefCell::new(0_u32));
    let counter = Rc::clone(&hits);
    let subscription = store.subscribe(move |_: &StoreEvent| *counter.borrow_mut() += 1);

    store.add("heard").unwrap();
    assert!(store.unsubscribe(subscription));
    assert!(!store.unsubscribe(subscription));
    store.add("unheard").unwrap();

    assert_eq!(*hits.borrow(), 1);
}

#[test]
fn snapshot_serializes_with_expected_wire_fields() {
    let (mut store, _) = setup();
    let task = store.add("ship it").unwrap();
    assert_eq!(
        serde_json::to_value(store.snapshot()).unwrap(),
        json!({ "tasks": [{ "id": 1, "text": "ship it" }], "edit": null })
    );

    store.begin_edit(task.id).unwrap();
    store.update_draft("ship it now").unwrap();
    let snapshot = store.snapshot();
    assert_eq!(
        serde_json::to_value(&snapshot).unwrap(),
        json!({
            "tasks": [{ "id": 1, "text": "ship it" }],
            "edit": { "target_id": 1, "draft_text": "ship it now" }
        })
    );

    let wire = serde_json::to_value(&snapshot).unwrap();
    let decoded: StoreSnapshot = serde_json::from_value(wire).unwrap();
    assert_eq!(decoded, snapshot);
}

#[test]
fn events_serialize_with_a_tag() {
    let event = StoreEvent::TaskAdded {
        task: Task {
            id: TaskId::new(5),
            text: "tagged".to_string(),
        },
    };
    assert_eq!(
        serde_json::to_value(&event).unwrap(),
        json!({ "event": "task_added", "task": { "id": 5, "text": "tagged" } })
    );
}
