//! A unidirectional state container.
//!
//! One cell of application state that changes only through a pure
//! [`Reducer`] applied to an [`Action`], with listeners notified after every
//! change.
//!
//! ```
//! use unistate::todo::{todo_store, TodoActions, TodoSnapshot};
//!
//! let store = todo_store(None).unwrap();
//! let actions = TodoActions::new();
//! store.dispatch(actions.add_todo("Learn").unwrap()).unwrap();
//!
//! let snapshot = TodoSnapshot::from_state(&store.get_state()).unwrap();
//! assert_eq!(snapshot.todos[0].text, "Learn");
//! ```

pub mod combine;
pub mod config;
pub mod counter;
pub mod error;
pub mod logging;
pub mod mvi;
pub mod replay;
pub mod store;
pub mod todo;

pub use combine::{Combination, CombinationBuilder, CombinedState};
pub use error::{ConfigurationError, DispatchError};
pub use mvi::{reducer_fn, Action, Reducer, ReservedAction, State};
pub use store::{Listener, Store, Subscription};
