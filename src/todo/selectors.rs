//! Read-only views derived from the todo state.

use serde::Serialize;

use super::reducer::{TODOS_SLICE, VISIBILITY_FILTER_SLICE};
use super::state::{Todo, VisibilityFilter};
use crate::combine::CombinedState;

/// The todos `filter` lets through, in list order.
pub fn visible_todos(todos: &[Todo], filter: VisibilityFilter) -> Vec<Todo> {
    todos
        .iter()
        .filter(|todo| filter.admits(todo))
        .cloned()
        .collect()
}

/// Serializable picture of the whole todo state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TodoSnapshot {
    pub todos: Vec<Todo>,
    pub visibility_filter: VisibilityFilter,
    pub visible: Vec<Todo>,
}

impl TodoSnapshot {
    /// Reads both slices; `None` if either is missing.
    pub fn from_state(state: &CombinedState) -> Option<Self> {
        let todos = state.get::<Vec<Todo>>(TODOS_SLICE)?;
        let visibility_filter = *state.get::<VisibilityFilter>(VISIBILITY_FILTER_SLICE)?;
        Some(Self {
            visible: visible_todos(&todos, visibility_filter),
            todos: todos.to_vec(),
            visibility_filter,
        })
    }
}
