//! Reducers for the todo application.

use std::sync::Arc;

use super::action::TodoAction;
use super::state::{Todo, VisibilityFilter};
use crate::combine::{Combination, CombinedState};
use crate::error::ConfigurationError;
use crate::mvi::Reducer;
use crate::store::Store;

/// Slice name of the todo list.
pub const TODOS_SLICE: &str = "todos";

/// Slice name of the visibility filter.
pub const VISIBILITY_FILTER_SLICE: &str = "visibility_filter";

/// Store running the [`todo_app`] composition.
pub type TodoStore = Store<Combination<TodoAction>>;

/// Owns the `todos` slice.
pub struct TodosReducer;

impl Reducer for TodosReducer {
    type State = Vec<Todo>;
    type Action = TodoAction;

    fn reduce(&self, state: Option<&Arc<Vec<Todo>>>, action: &TodoAction) -> Arc<Vec<Todo>> {
        let current = state.cloned().unwrap_or_default();

        match action {
            TodoAction::AddTodo { id, text } => {
                let mut todos = Vec::with_capacity(current.len() + 1);
                todos.extend(current.iter().cloned());
                todos.push(Todo::new(*id, text.as_str()));
                Arc::new(todos)
            }
            TodoAction::ToggleTodo { id } => {
                if !current.iter().any(|todo| todo.id == *id) {
                    return current;
                }
                Arc::new(current.iter().map(|todo| toggle(todo, *id)).collect())
            }
            TodoAction::SetVisibilityFilter { .. } | TodoAction::Reserved(_) => current,
        }
    }
}

/// Single-todo transition: flips `completed` when the id matches.
fn toggle(todo: &Todo, id: u64) -> Todo {
    if todo.id != id {
        return todo.clone();
    }
    Todo {
        completed: !todo.completed,
        ..todo.clone()
    }
}

/// Owns the `visibility_filter` slice.
pub struct VisibilityFilterReducer;

impl Reducer for VisibilityFilterReducer {
    type State = VisibilityFilter;
    type Action = TodoAction;

    fn reduce(
        &self,
        state: Option<&Arc<VisibilityFilter>>,
        action: &TodoAction,
    ) -> Arc<VisibilityFilter> {
        let current = state.cloned().unwrap_or_default();

        match action {
            TodoAction::SetVisibilityFilter { filter } if *filter != *current => Arc::new(*filter),
            TodoAction::SetVisibilityFilter { .. }
            | TodoAction::AddTodo { .. }
            | TodoAction::ToggleTodo { .. }
            | TodoAction::Reserved(_) => current,
        }
    }
}

/// Root reducer of the todo application.
pub fn todo_app() -> Result<Combination<TodoAction>, ConfigurationError> {
    Combination::builder()
        .slice(TODOS_SLICE, TodosReducer)
        .slice(VISIBILITY_FILTER_SLICE, VisibilityFilterReducer)
        .build()
}

/// A store running [`todo_app`], optionally starting from `preloaded`.
pub fn todo_store(preloaded: Option<CombinedState>) -> Result<TodoStore, ConfigurationError> {
    Store::create(todo_app()?, preloaded)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn todo(id: u64, text: &str, completed: bool) -> Todo {
        Todo {
            id,
            text: text.to_string(),
            completed,
        }
    }

    #[test]
    fn add_todo_appends() {
        let before = Arc::new(Vec::new());
        let action = TodoAction::AddTodo {
            id: 0,
            text: "Learn Redux".to_string(),
        };
        let after = TodosReducer.reduce(Some(&before), &action);
        assert_eq!(*after, vec![todo(0, "Learn Redux", false)]);
        assert!(before.is_empty());
    }

    #[test]
    fn toggle_todo_flips_only_matching() {
        let before = Arc::new(vec![
            todo(0, "Learn Redux", false),
            todo(1, "Go shopping", false),
        ]);
        let snapshot = (*before).clone();
        let after = TodosReducer.reduce(Some(&before), &TodoAction::ToggleTodo { id: 1 });
        assert_eq!(
            *after,
            vec![todo(0, "Learn Redux", false), todo(1, "Go shopping", true)]
        );
        assert_eq!(*before, snapshot);
    }

    #[test]
    fn toggle_missing_id_keeps_identity() {
        let before = Arc::new(vec![todo(0, "a", false)]);
        let after = TodosReducer.reduce(Some(&before), &TodoAction::ToggleTodo { id: 9 });
        assert!(Arc::ptr_eq(&before, &after));
    }

    #[test]
    fn todos_default_is_empty() {
        let state = TodosReducer.reduce(
            None,
            &TodoAction::SetVisibilityFilter {
                filter: VisibilityFilter::ShowActive,
            },
        );
        assert!(state.is_empty());
    }

    #[test]
    fn filter_changes_and_keeps_identity_when_equal() {
        let all = Arc::new(VisibilityFilter::ShowAll);
        let set_all = TodoAction::SetVisibilityFilter {
            filter: VisibilityFilter::ShowAll,
        };
        let same = VisibilityFilterReducer.reduce(Some(&all), &set_all);
        assert!(Arc::ptr_eq(&all, &same));

        let set_done = TodoAction::SetVisibilityFilter {
            filter: VisibilityFilter::ShowCompleted,
        };
        let done = VisibilityFilterReducer.reduce(Some(&all), &set_done);
        assert_eq!(*done, VisibilityFilter::ShowCompleted);
    }

    #[test]
    fn todo_app_builds() {
        let app = todo_app().expect("valid composition");
        assert_eq!(
            app.slice_names().collect::<Vec<_>>(),
            vec![TODOS_SLICE, VISIBILITY_FILTER_SLICE]
        );
    }
}
