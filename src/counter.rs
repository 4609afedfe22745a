//! Counter application.
//!
//! The smallest complete reducer: one integer, two actions. Actions are
//! plain JSON records, so it also shows how untyped actions flow through the
//! container.
//!
//! ```
//! use unistate::counter::{counter_store, decrement, increment};
//!
//! let store = counter_store().unwrap();
//! store.dispatch(increment()).unwrap();
//! store.dispatch(increment()).unwrap();
//! store.dispatch(decrement()).unwrap();
//! assert_eq!(*store.get_state(), 1);
//! ```

use std::sync::Arc;

use serde_json::{json, Value};

use crate::error::ConfigurationError;
use crate::mvi::{Action, Reducer};
use crate::store::Store;

pub const INCREMENT: &str = "INCREMENT";
pub const DECREMENT: &str = "DECREMENT";

/// Counts `INCREMENT` and `DECREMENT` actions, starting from 0.
#[derive(Debug, Clone, Copy, Default)]
pub struct CounterReducer;

impl Reducer for CounterReducer {
    type State = i64;
    type Action = Value;

    fn reduce(&self, state: Option<&Arc<i64>>, action: &Value) -> Arc<i64> {
        let current = state.cloned().unwrap_or_default();
        match action.action_type() {
            Some(INCREMENT) => Arc::new(current.wrapping_add(1)),
            Some(DECREMENT) => Arc::new(current.wrapping_sub(1)),
            _ => current,
        }
    }
}

pub fn increment() -> Value {
    json!({ "type": INCREMENT })
}

pub fn decrement() -> Value {
    json!({ "type": DECREMENT })
}

/// A store running [`CounterReducer`] from 0.
pub fn counter_store() -> Result<Store<CounterReducer>, ConfigurationError> {
    Store::create(CounterReducer, None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_zero() {
        assert_eq!(*CounterReducer.reduce(None, &increment()), 1);
        assert_eq!(*CounterReducer.reduce(None, &json!({ "type": "@@unistate/INIT" })), 0);
    }

    #[test]
    fn increments_and_decrements() {
        let one = Arc::new(1);
        assert_eq!(*CounterReducer.reduce(Some(&one), &increment()), 2);
        assert_eq!(*CounterReducer.reduce(Some(&one), &decrement()), 0);
    }

    #[test]
    fn unknown_action_keeps_identity() {
        let state = Arc::new(5);
        let next = CounterReducer.reduce(Some(&state), &json!({ "type": "RESET" }));
        assert!(Arc::ptr_eq(&state, &next));
    }

    #[test]
    fn store_counts() {
        let store = counter_store().expect("store");
        store.dispatch(decrement()).expect("dispatch");
        store.dispatch(decrement()).expect("dispatch");
        assert_eq!(*store.get_state(), -2);
    }
}
