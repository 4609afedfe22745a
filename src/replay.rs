//! Replays a log of todo actions through a [`TodoStore`].
//!
//! Each non-empty line that does not start with `#` is either a JSON action
//! (`{"type":"ADD_TODO","id":0,"text":"Learn"}`) or a shorthand command that
//! goes through the action creators:
//!
//! ```text
//! add Learn Rust
//! toggle 0
//! filter SHOW_ACTIVE
//! ```

use std::io::{self, BufRead};

use serde_json::Value;
use thiserror::Error;

use crate::error::DispatchError;
use crate::mvi::Action;
use crate::todo::{
    IdsExhausted, TodoAction, TodoActions, TodoStore, UnknownFilter, VisibilityFilter,
};

/// Why a single line could not be turned into a dispatched action.
#[derive(Debug, Error)]
pub enum LineError {
    #[error("Line is not valid UTF-8: {0}")]
    Encoding(#[source] std::string::FromUtf8Error),

    #[error("Invalid JSON: {0}")]
    Json(#[source] serde_json::Error),

    #[error("Action has no \"type\" field")]
    MissingType,

    #[error("Unsupported action: {0}")]
    UnsupportedAction(#[source] serde_json::Error),

    #[error("Unknown command '{0}' (expected add, toggle or filter)")]
    UnknownCommand(String),

    #[error("Command '{command}' needs an argument")]
    MissingArgument { command: &'static str },

    #[error("Invalid todo id '{0}'")]
    InvalidId(String),

    #[error(transparent)]
    Filter(#[from] UnknownFilter),

    #[error(transparent)]
    Ids(#[from] IdsExhausted),

    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}

/// A line that was skipped, numbered from 1.
#[derive(Debug)]
pub struct RejectedLine {
    pub line: usize,
    pub error: LineError,
}

#[derive(Debug, Default)]
pub struct ReplaySummary {
    pub dispatched: usize,
    pub rejected: Vec<RejectedLine>,
}

/// Parses one line. `Ok(None)` for blank lines and comments.
///
/// JSON `ADD_TODO` ids are reported to `creators`, so later `add` commands
/// never reuse them.
pub fn parse_line(line: &str, creators: &TodoActions) -> Result<Option<TodoAction>, LineError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    if line.starts_with('{') {
        let value: Value = serde_json::from_str(line).map_err(LineError::Json)?;
        if value.action_type().is_none() {
            return Err(LineError::MissingType);
        }
        let action: TodoAction =
            serde_json::from_value(value).map_err(LineError::UnsupportedAction)?;
        if let TodoAction::AddTodo { id, .. } = &action {
            creators.mark_used(*id);
        }
        return Ok(Some(action));
    }

    let (command, argument) = match line.split_once(char::is_whitespace) {
        Some((command, argument)) => (command, argument.trim()),
        None => (line, ""),
    };

    let action = match command.to_ascii_lowercase().as_str() {
        "add" => {
            if argument.is_empty() {
                return Err(LineError::MissingArgument { command: "add" });
            }
            creators.add_todo(argument)?
        }
        "toggle" => {
            if argument.is_empty() {
                return Err(LineError::MissingArgument { command: "toggle" });
            }
            let id = argument
                .parse::<u64>()
                .map_err(|_| LineError::InvalidId(argument.to_string()))?;
            TodoActions::toggle_todo(id)
        }
        "filter" => {
            if argument.is_empty() {
                return Err(LineError::MissingArgument { command: "filter" });
            }
            TodoActions::set_visibility_filter(argument.parse::<VisibilityFilter>()?)
        }
        _ => return Err(LineError::UnknownCommand(command.to_string())),
    };
    Ok(Some(action))
}

/// Dispatches every line of `input` into `store`.
///
/// Bad lines, including lines that are not UTF-8, are collected in the
/// summary and skipped; only I/O errors abort the replay.
pub fn replay<R: BufRead>(
    store: &TodoStore,
    input: R,
    creators: &TodoActions,
) -> io::Result<ReplaySummary> {
    let mut summary = ReplaySummary::default();

    for (index, raw) in input.split(b'\n').enumerate() {
        let mut raw = raw?;
        if raw.last() == Some(&b'\r') {
            raw.pop();
        }
        let result = String::from_utf8(raw)
            .map_err(LineError::Encoding)
            .and_then(|line| parse_line(&line, creators))
            .and_then(|action| match action {
                Some(action) => store.dispatch(action).map(Some).map_err(LineError::from),
                None => Ok(None),
            });

        match result {
            Ok(Some(_)) => summary.dispatched += 1,
            Ok(None) => {}
            Err(error) => {
                tracing::warn!(line = index + 1, error = %error, "Rejected replay line");
                summary.rejected.push(RejectedLine {
                    line: index + 1,
                    error,
                });
            }
        }
    }

    tracing::info!(
        dispatched = summary.dispatched,
        rejected = summary.rejected.len(),
        "Replay finished"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::todo::{todo_store, Todo, TodoSnapshot};

    fn todo_texts(store: &TodoStore) -> Vec<String> {
        TodoSnapshot::from_state(&store.get_state())
            .expect("snapshot")
            .todos
            .into_iter()
            .map(|todo: Todo| todo.text)
            .collect()
    }

    #[test]
    fn invalid_utf8_line_is_rejected_and_skipped() {
        let store = todo_store(None).expect("store");
        let input: &[u8] = b"add a\n\xff\xfe\nadd b\n";

        let summary = replay(&store, input, &TodoActions::new()).expect("replay");

        assert_eq!(summary.dispatched, 2);
        assert_eq!(summary.rejected.len(), 1);
        assert_eq!(summary.rejected[0].line, 2);
        assert!(matches!(summary.rejected[0].error, LineError::Encoding(_)));
        assert_eq!(todo_texts(&store), vec!["a", "b"]);
    }

    #[test]
    fn crlf_line_endings_are_accepted() {
        let store = todo_store(None).expect("store");
        let input: &[u8] = b"add a\r\ntoggle 0\r\n";

        let summary = replay(&store, input, &TodoActions::new()).expect("replay");

        assert_eq!(summary.dispatched, 2);
        assert!(summary.rejected.is_empty());
        assert_eq!(todo_texts(&store), vec!["a"]);
    }

    #[test]
    fn largest_json_id_never_leads_to_reuse() {
        let store = todo_store(None).expect("store");
        let input = format!(
            "add first\n{{\"type\":\"ADD_TODO\",\"id\":{},\"text\":\"last\"}}\nadd again\n",
            u64::MAX
        );

        let summary = replay(&store, input.as_bytes(), &TodoActions::new()).expect("replay");

        assert_eq!(summary.dispatched, 2);
        assert_eq!(summary.rejected.len(), 1);
        assert!(matches!(summary.rejected[0].error, LineError::Ids(_)));
        let snapshot = TodoSnapshot::from_state(&store.get_state()).expect("snapshot");
        assert_eq!(
            snapshot.todos.iter().map(|todo| todo.id).collect::<Vec<_>>(),
            vec![0, u64::MAX]
        );
    }

    #[test]
    fn blank_and_comment_lines_are_skipped() {
        let creators = TodoActions::new();
        assert!(parse_line("", &creators).expect("ok").is_none());
        assert!(parse_line("   ", &creators).expect("ok").is_none());
        assert!(parse_line("# note", &creators).expect("ok").is_none());
    }

    #[test]
    fn shorthand_commands() {
        let creators = TodoActions::new();
        assert_eq!(
            parse_line("add Learn Rust", &creators).expect("ok"),
            Some(TodoAction::AddTodo {
                id: 0,
                text: "Learn Rust".to_string()
            })
        );
        assert_eq!(
            parse_line("toggle 0", &creators).expect("ok"),
            Some(TodoAction::ToggleTodo { id: 0 })
        );
        assert_eq!(
            parse_line("FILTER active", &creators).expect("ok"),
            Some(TodoAction::SetVisibilityFilter {
                filter: VisibilityFilter::ShowActive
            })
        );
    }

    #[test]
    fn json_ids_advance_creators() {
        let creators = TodoActions::new();
        parse_line(r#"{"type":"ADD_TODO","id":7,"text":"x"}"#, &creators).expect("ok");
        assert!(matches!(
            parse_line("add y", &creators).expect("ok"),
            Some(TodoAction::AddTodo { id: 8, .. })
        ));
    }

    #[test]
    fn json_without_type_is_missing_type() {
        let creators = TodoActions::new();
        let err = parse_line(r#"{"id":0}"#, &creators).unwrap_err();
        assert!(matches!(err, LineError::MissingType));
    }

    #[test]
    fn bad_lines_are_explained() {
        let creators = TodoActions::new();
        assert!(matches!(
            parse_line("{not json", &creators).unwrap_err(),
            LineError::Json(_)
        ));
        assert!(matches!(
            parse_line(r#"{"type":"REMOVE_TODO","id":0}"#, &creators).unwrap_err(),
            LineError::UnsupportedAction(_)
        ));
        assert!(matches!(
            parse_line("toggle zero", &creators).unwrap_err(),
            LineError::InvalidId(_)
        ));
        assert!(matches!(
            parse_line("add", &creators).unwrap_err(),
            LineError::MissingArgument { command: "add" }
        ));
        assert!(matches!(
            parse_line("filter none", &creators).unwrap_err(),
            LineError::Filter(_)
        ));
        assert!(matches!(
            parse_line("remove 1", &creators).unwrap_err(),
            LineError::UnknownCommand(_)
        ));
    }
}
