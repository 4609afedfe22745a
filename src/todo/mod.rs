//! Todo list application.
//!
//! The reference application for the container: a list of todos and a
//! visibility filter, each owned by its own slice reducer and combined into
//! one root reducer.
//!
//! # Architecture
//!
//! - `state.rs` - `Todo` records and the `VisibilityFilter` enum
//! - `action.rs` - `TodoAction` vocabulary and the `TodoActions` creators
//! - `reducer.rs` - Slice reducers and the `todo_app` composition (pure)
//! - `selectors.rs` - Derived views (`visible_todos`, `TodoSnapshot`)

mod action;
mod reducer;
mod selectors;
mod state;

pub use action::{
    IdsExhausted, TodoAction, TodoActions, ADD_TODO, SET_VISIBILITY_FILTER, TOGGLE_TODO,
};
pub use reducer::{
    todo_app, todo_store, TodoStore, TodosReducer, VisibilityFilterReducer, TODOS_SLICE,
    VISIBILITY_FILTER_SLICE,
};
pub use selectors::{visible_todos, TodoSnapshot};
pub use state::{Todo, UnknownFilter, VisibilityFilter};
