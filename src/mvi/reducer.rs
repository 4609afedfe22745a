//! Reducer trait for unidirectional data flow.

use std::marker::PhantomData;
use std::sync::Arc;

use super::action::Action;
use super::state::State;
use crate::error::ConfigurationError;

/// Reducer transforms state based on actions.
///
/// The reducer is the only place where state transitions happen.
/// It must be a pure function: (State, Action) -> State
///
/// Contract:
/// - `None` state yields the initial value of this reducer's state
/// - an action it does not recognize yields the input `Arc` itself, so
///   callers can detect "nothing changed" with [`Arc::ptr_eq`]
/// - the same `(state, action)` pair always yields an equal result
pub trait Reducer: Send + Sync + 'static {
    /// The state type this reducer operates on.
    type State: State;

    /// The action type this reducer handles.
    type Action: Action;

    /// Process an action and return the new state.
    ///
    /// This should be a pure function with no side effects. Panicking is
    /// reserved for logic defects and propagates to the dispatcher.
    fn reduce(&self, state: Option<&Arc<Self::State>>, action: &Self::Action) -> Arc<Self::State>;

    /// Check that a preloaded value has a shape this reducer can own.
    fn validate(&self, _state: &Self::State) -> Result<(), ConfigurationError> {
        Ok(())
    }
}

/// A [`Reducer`] backed by a closure. Build one with [`reducer_fn`].
pub struct FnReducer<S, A, F> {
    f: F,
    _marker: PhantomData<fn(&S, &A)>,
}

/// Wraps a closure `(Option<&Arc<S>>, &A) -> Arc<S>` as a reducer.
///
/// ```
/// use std::sync::Arc;
/// use serde_json::Value;
/// use unistate::mvi::{reducer_fn, Action};
///
/// let counter = reducer_fn(|state: Option<&Arc<i64>>, action: &Value| {
///     let current = state.cloned().unwrap_or_default();
///     match action.action_type() {
///         Some("INCREMENT") => Arc::new(*current + 1),
///         Some("DECREMENT") => Arc::new(*current - 1),
///         _ => current,
///     }
/// });
/// # let _ = counter;
/// ```
pub fn reducer_fn<S, A, F>(f: F) -> FnReducer<S, A, F>
where
    S: State,
    A: Action,
    F: Fn(Option<&Arc<S>>, &A) -> Arc<S> + Send + Sync + 'static,
{
    FnReducer {
        f,
        _marker: PhantomData,
    }
}

impl<S, A, F> Reducer for FnReducer<S, A, F>
where
    S: State,
    A: Action,
    F: Fn(Option<&Arc<S>>, &A) -> Arc<S> + Send + Sync + 'static,
{
    type State = S;
    type Action = A;

    fn reduce(&self, state: Option<&Arc<S>>, action: &A) -> Arc<S> {
        (self.f)(state, action)
    }
}
