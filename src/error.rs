//! Error types surfaced by the container.
//!
//! Everything is reported synchronously at the call site; there is no
//! deferred error channel. Reducer and listener panics are not represented
//! here: they are logic defects and unwind through `dispatch` untouched.

use thiserror::Error;

/// Structurally invalid setup, detected while building a composition or a
/// store. The caller has to fix the setup and build again.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// The same slice name was registered twice in one composition.
    #[error("Slice '{slice}' is registered more than once")]
    DuplicateSlice { slice: String },

    /// A reducer produced an undefined value for a reserved action.
    #[error("Reducer for '{slice}' returned an undefined state for action '{action_type}'; reducers must return their initial state for unknown actions")]
    UndefinedInitialState { slice: String, action_type: String },

    /// A preloaded slice does not have the type its reducer owns.
    #[error("Preloaded slice '{slice}' does not hold a value of type {expected}")]
    SliceTypeMismatch { slice: String, expected: &'static str },
}

/// A single `dispatch` call failed. No state change and no notification
/// happened.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    /// The action carries no discriminant.
    #[error("Actions must have a type; got {action}")]
    InvalidAction { action: String },

    /// `dispatch` was called while the store's reducer was executing.
    #[error("Reducers may not dispatch actions (attempted to dispatch '{action_type}')")]
    NestedInReducer { action_type: String },

    /// The root reducer produced an undefined state.
    #[error("Reducer returned an undefined state for action '{action_type}'")]
    UndefinedState { action_type: String },
}

impl DispatchError {
    /// Short machine-readable name of the error kind.
    pub fn error_type(&self) -> &'static str {
        match self {
            DispatchError::InvalidAction { .. } => "invalid_action",
            DispatchError::NestedInReducer { .. } => "nested_in_reducer",
            DispatchError::UndefinedState { .. } => "undefined_state",
        }
    }
}
