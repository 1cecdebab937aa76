//! Line command parser for the interactive task list.
//!
//! Text arguments are passed through untouched; the store does its own
//! trimming and validation.

use std::error::Error;
use std::fmt::{Display, Formatter};
use tasklist_core::TaskId;

pub const USAGE: &str = "commands:
  add <text>     add a task
  delete <id>    delete a task
  edit <id>      start editing a task
  draft <text>   replace the edit draft
  save           commit the edit draft
  cancel         discard the edit draft
  list           print tasks
  json           print state as JSON
  help           print this help
  quit           exit";

/// One parsed user gesture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add(String),
    Delete(TaskId),
    Edit(TaskId),
    Draft(String),
    Save,
    Cancel,
    List,
    Json,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    Unknown(String),
    MissingId(&'static str),
    InvalidId(String),
}

impl Display for CommandError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unknown(word) => write!(f, "unknown command `{word}`"),
            Self::MissingId(verb) => write!(f, "`{verb}` needs a task id"),
            Self::InvalidId(value) => write!(f, "not a task id: `{value}`"),
        }
    }
}

impl Error for CommandError {}

/// Parses one input line. Blank lines yield `Ok(None)`.
pub fn parse_command(line: &str) -> Result<Option<Command>, CommandError> {
    let line = line.trim_end_matches(['\n', '\r']);
    let trimmed = line.trim_start();
    if trimmed.trim().is_empty() {
        return Ok(None);
    }

    let (verb, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest),
        None => (trimmed, ""),
    };

    let command = match verb.to_ascii_lowercase().as_str() {
        "add" | "a" => Command::Add(rest.to_string()),
        "delete" | "del" | "rm" => Command::Delete(parse_id("delete", rest)?),
        "edit" | "e" => Command::Edit(parse_id("edit", rest)?),
        "draft" | "d" => Command::Draft(rest.to_string()),
        "save" => Command::Save,
        "cancel" => Command::Cancel,
        "list" | "ls" => Command::List,
        "json" => Command::Json,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(Some(command))
}

fn parse_id(verb: &'static str, raw: &str) -> Result<TaskId, CommandError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(CommandError::MissingId(verb));
    }
    raw.parse::<u64>()
        .map(TaskId::new)
        .map_err(|_| CommandError::InvalidId(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::{parse_command, Command, CommandError};
    use tasklist_core::TaskId;

    #[test]
    fn blank_lines_are_skipped() {
        assert_eq!(parse_command(""), Ok(None));
        assert_eq!(parse_command("   \n"), Ok(None));
    }

    #[test]
    fn text_arguments_are_kept_verbatim() {
        assert_eq!(
            parse_command("add   Buy milk  \n"),
            Ok(Some(Command::Add("  Buy milk  ".to_string())))
        );
        assert_eq!(
            parse_command("draft  x "),
            Ok(Some(Command::Draft(" x ".to_string())))
        );
        assert_eq!(parse_command("add"), Ok(Some(Command::Add(String::new()))));
    }

    #[test]
    fn verbs_split_on_any_whitespace() {
        assert_eq!(
            parse_command("add\tfoo"),
            Ok(Some(Command::Add("foo".to_string())))
        );
        assert_eq!(
            parse_command("edit\t5"),
            Ok(Some(Command::Edit(TaskId::new(5))))
        );
    }

    #[test]
    fn id_commands_parse_numbers() {
        assert_eq!(
            parse_command("EDIT 17"),
            Ok(Some(Command::Edit(TaskId::new(17))))
        );
        assert_eq!(
            parse_command("rm 3"),
            Ok(Some(Command::Delete(TaskId::new(3))))
        );
        assert_eq!(
            parse_command("delete"),
            Err(CommandError::MissingId("delete"))
        );
        assert_eq!(
            parse_command("edit abc"),
            Err(CommandError::InvalidId("abc".to_string()))
        );
    }

    #[test]
    fn bare_verbs_and_unknown_words() {
        assert_eq!(parse_command("save"), Ok(Some(Command::Save)));
        assert_eq!(parse_command(" cancel"), Ok(Some(Command::Cancel)));
        assert_eq!(parse_command("q"), Ok(Some(Command::Quit)));
        assert_eq!(
            parse_command("fly away"),
            Err(CommandError::Unknown("fly".to_string()))
        );
    }
}
