//! Actions for the todo application.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::state::VisibilityFilter;
use crate::mvi::{Action, ReservedAction};

pub const ADD_TODO: &str = "ADD_TODO";
pub const TOGGLE_TODO: &str = "TOGGLE_TODO";
pub const SET_VISIBILITY_FILTER: &str = "SET_VISIBILITY_FILTER";

/// Actions understood by the todo reducers.
///
/// On the wire these are JSON records tagged by `"type"`, for example
/// `{"type": "ADD_TODO", "id": 0, "text": "Learn"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TodoAction {
    AddTodo { id: u64, text: String },
    ToggleTodo { id: u64 },
    SetVisibilityFilter { filter: VisibilityFilter },
    /// Container-internal actions; never serialized.
    #[serde(skip)]
    Reserved(ReservedAction),
}

impl Action for TodoAction {
    fn action_type(&self) -> Option<&str> {
        Some(match self {
            TodoAction::AddTodo { .. } => ADD_TODO,
            TodoAction::ToggleTodo { .. } => TOGGLE_TODO,
            TodoAction::SetVisibilityFilter { .. } => SET_VISIBILITY_FILTER,
            TodoAction::Reserved(kind) => kind.action_type(),
        })
    }

    fn reserved(kind: ReservedAction) -> Self {
        TodoAction::Reserved(kind)
    }
}

/// Every todo id the creators could hand out is already taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("No todo ids left (ids up to {last} are taken)")]
pub struct IdsExhausted {
    pub last: u64,
}

/// Action creators.
///
/// Owns the id counter for new todos, so two independent stores can each
/// have their own sequence. Ids strictly increase and are never reused;
/// `u64::MAX` is never handed out.
#[derive(Debug, Default)]
pub struct TodoActions {
    next_id: AtomicU64,
}

impl TodoActions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creators whose first todo gets `id`.
    pub fn starting_at(id: u64) -> Self {
        Self {
            next_id: AtomicU64::new(id),
        }
    }

    /// `ADD_TODO` with the next free id.
    ///
    /// # Errors
    /// Returns [`IdsExhausted`] once the counter has reached `u64::MAX`.
    pub fn add_todo(&self, text: impl Into<String>) -> Result<TodoAction, IdsExhausted> {
        let id = self
            .next_id
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |next| {
                next.checked_add(1)
            })
            .map_err(|last| IdsExhausted { last })?;
        Ok(TodoAction::AddTodo {
            id,
            text: text.into(),
        })
    }

    pub fn toggle_todo(id: u64) -> TodoAction {
        TodoAction::ToggleTodo { id }
    }

    pub fn set_visibility_filter(filter: VisibilityFilter) -> TodoAction {
        TodoAction::SetVisibilityFilter { filter }
    }

    /// Records that `id` is taken, so later `add_todo` calls never reuse it.
    pub fn mark_used(&self, id: u64) {
        self.next_id
            .fetch_max(id.saturating_add(1), Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_todo_ids_increase() {
        let actions = TodoActions::new();
        let first = actions.add_todo("first").expect("id");
        let second = actions.add_todo("second").expect("id");
        assert_eq!(
            first,
            TodoAction::AddTodo {
                id: 0,
                text: "first".to_string()
            }
        );
        assert!(matches!(second, TodoAction::AddTodo { id: 1, .. }));
    }

    #[test]
    fn creators_are_independent() {
        let a = TodoActions::new();
        let b = TodoActions::starting_at(10);
        a.add_todo("x").expect("id");
        assert!(matches!(b.add_todo("y"), Ok(TodoAction::AddTodo { id: 10, .. })));
        assert!(matches!(a.add_todo("z"), Ok(TodoAction::AddTodo { id: 1, .. })));
    }

    #[test]
    fn mark_used_skips_taken_ids() {
        let actions = TodoActions::new();
        actions.mark_used(4);
        actions.mark_used(2);
        assert!(matches!(actions.add_todo("x"), Ok(TodoAction::AddTodo { id: 5, .. })));
    }

    #[test]
    fn taking_the_largest_id_exhausts_the_counter() {
        let actions = TodoActions::new();
        actions.add_todo("first").expect("id");
        actions.mark_used(u64::MAX);
        assert_eq!(
            actions.add_todo("second"),
            Err(IdsExhausted { last: u64::MAX })
        );
        // Still exhausted; the counter never wraps back to 0.
        assert!(actions.add_todo("third").is_err());
    }

    #[test]
    fn counter_stops_before_the_largest_id() {
        let actions = TodoActions::starting_at(u64::MAX - 1);
        assert!(matches!(
            actions.add_todo("last"),
            Ok(TodoAction::AddTodo { id, .. }) if id == u64::MAX - 1
        ));
        assert!(actions.add_todo("one more").is_err());
    }

    #[test]
    fn every_action_has_a_type() {
        assert_eq!(TodoActions::toggle_todo(3).action_type(), Some(TOGGLE_TODO));
        assert_eq!(
            TodoActions::set_visibility_filter(VisibilityFilter::ShowActive).action_type(),
            Some(SET_VISIBILITY_FILTER)
        );
        assert_eq!(
            TodoAction::reserved(ReservedAction::Init).action_type(),
            Some(crate::mvi::INIT_ACTION_TYPE)
        );
    }

    #[test]
    fn parses_tagged_json() {
        let action: TodoAction =
            serde_json::from_str(r#"{"type":"ADD_TODO","id":0,"text":"Learn"}"#).expect("parse");
        assert_eq!(
            action,
            TodoAction::AddTodo {
                id: 0,
                text: "Learn".to_string()
            }
        );

        let action: TodoAction =
            serde_json::from_str(r#"{"type":"SET_VISIBILITY_FILTER","filter":"SHOW_COMPLETED"}"#)
                .expect("parse");
        assert_eq!(
            action,
            TodoAction::SetVisibilityFilter {
                filter: VisibilityFilter::ShowCompleted
            }
        );
    }

    #[test]
    fn rejects_json_without_type() {
        let result = serde_json::from_str::<TodoAction>(r#"{"id":0,"text":"Learn"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn serializes_with_type_tag() {
        let json = serde_json::to_value(TodoActions::toggle_todo(2)).expect("serialize");
        assert_eq!(json, serde_json::json!({ "type": "TOGGLE_TODO", "id": 2 }));
    }
}
