//! Interactive session: binds line commands to one `TaskListStore`.
//!
//! # Responsibility
//! - Translate each command into exactly one store operation.
//! - Re-render the list whenever the store reports a change.
//!
//! # Invariants
//! - Rendering is driven by store notifications, never by command type.
//! - Rejections print one line and leave state as it was.

use crate::command::{parse_command, Command, USAGE};
use log::{debug, info};
use std::cell::Cell;
use std::io::{self, BufRead, Write};
use std::rc::Rc;
use tasklist_core::{StoreEvent, TaskIdGenerator, TaskListStore};

/// Reads commands from `input` until EOF or `quit`, writing to `output`.
pub fn run_session<G, R, W>(
    store: &mut TaskListStore<G>,
    input: R,
    output: &mut W,
) -> io::Result<()>
where
    G: TaskIdGenerator,
    R: BufRead,
    W: Write,
{
    let dirty = Rc::new(Cell::new(false));
    let flag = Rc::clone(&dirty);
    let subscription = store.subscribe(move |_: &StoreEvent| flag.set(true));
    info!("event=session_start module=cli status=ok");

    let result = drive(store, &dirty, input, output);

    store.unsubscribe(subscription);
    info!(
        "event=session_end module=cli status={} tasks={} listeners={}",
        if result.is_ok() { "ok" } else { "error" },
        store.len(),
        store.listener_count()
    );
    result
}

fn drive<G, R, W>(
    store: &mut TaskListStore<G>,
    dirty: &Cell<bool>,
    input: R,
    output: &mut W,
) -> io::Result<()>
where
    G: TaskIdGenerator,
    R: BufRead,
    W: Write,
{
    for line in input.lines() {
        let line = line?;
        let command = match parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(err) => {
                writeln!(output, "error: {err}")?;
                continue;
            }
        };

        if command == Command::Quit {
            break;
        }
        apply(store, command, output)?;

        if dirty.replace(false) {
            render(store, output)?;
        }
    }
    Ok(())
}

fn apply<G: TaskIdGenerator, W: Write>(
    store: &mut TaskListStore<G>,
    command: Command,
    output: &mut W,
) -> io::Result<()> {
    let outcome = match command {
        Command::Add(text) => store.add(&text).map(|_| ()),
        Command::Delete(id) => {
            if !store.delete(id) {
                writeln!(output, "nothing to delete: {id}")?;
            }
            Ok(())
        }
        Command::Edit(id) => store.begin_edit(id).map(|_| ()),
        Command::Draft(text) => store.update_draft(&text),
        Command::Save => store.commit_edit().map(|_| ()),
        Command::Cancel => {
            if !store.cancel_edit() {
                writeln!(output, "no edit in progress")?;
            }
            Ok(())
        }
        Command::List => return render(store, output),
        Command::Json => {
            let json = serde_json::to_string_pretty(&store.snapshot())
                .map_err(io::Error::other)?;
            return writeln!(output, "{json}");
        }
        Command::Help => return writeln!(output, "{USAGE}"),
        Command::Quit => Ok(()),
    };

    if let Err(rejection) = outcome {
        debug!(
            "event=command module=cli status=rejected reason={}",
            rejection.reason()
        );
        writeln!(output, "rejected: {rejection}")?;
    }
    Ok(())
}

fn render<G: TaskIdGenerator, W: Write>(
    store: &TaskListStore<G>,
    output: &mut W,
) -> io::Result<()> {
    if store.is_empty() {
        return writeln!(output, "(no tasks)");
    }
    for task in store.tasks() {
        let marker = if store.is_editing(task.id) { '*' } else { ' ' };
        writeln!(output, "{marker} [{}] {}", task.id, task.text)?;
    }
    if let Some(session) = store.edit_session() {
        writeln!(
            output,
            "editing {}: {:?} (save | cancel)",
            session.target_id, session.draft_text
        )?;
    }
    Ok(())
}
