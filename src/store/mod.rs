//! The store: one cell of application state.
//!
//! A [`Store`] owns the current state, applies its root reducer to every
//! dispatched action and notifies listeners afterwards. It is a cheap handle;
//! clones share the same state and registrations. There is no global store:
//! build one explicitly and hand it to whoever needs it.
//!
//! # Notification protocol
//!
//! - Listeners run synchronously, in subscription order, before `dispatch`
//!   returns.
//! - Each pass iterates over the registrations that existed when that
//!   dispatch began. Subscribing or unsubscribing from inside a listener
//!   only affects later dispatches.
//! - A listener may dispatch again. The nested dispatch, including its own
//!   pass, completes before the outer pass moves on.
//! - A panicking listener aborts the rest of its pass and unwinds out of
//!   `dispatch`; the new state stays committed.
//!
//! # Threads
//!
//! Dispatches are serialized end to end (reducer call and notification) by
//! one re-entrant lock. [`Store::get_state`] only clones an `Arc` under a
//! short read lock.

mod listeners;

use std::cell::Cell;
use std::fmt;
use std::sync::Arc;

use parking_lot::{Mutex, ReentrantMutex, RwLock};

use crate::error::{ConfigurationError, DispatchError};
use crate::mvi::{Action, Reducer, ReservedAction, State};

pub use listeners::{Listener, Subscription};

use listeners::ListenerRegistry;

/// Name used in errors about the root reducer itself.
const ROOT_SLICE: &str = "<root>";

pub struct Store<R: Reducer> {
    inner: Arc<StoreInner<R>>,
}

struct StoreInner<R: Reducer> {
    reducer: R,
    current: RwLock<Arc<R::State>>,
    listeners: Arc<Mutex<ListenerRegistry>>,
    /// Serializes dispatches; the flag is set while the reducer runs.
    dispatching: ReentrantMutex<Cell<bool>>,
}

impl<R: Reducer> Clone for Store<R> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<R: Reducer> Store<R> {
    /// Builds a store around `reducer`.
    ///
    /// The reserved init action is reduced once before this returns, so the
    /// store is ready immediately. With `preloaded`, that value is checked
    /// with [`Reducer::validate`] and reduced against the init action instead
    /// of starting from nothing, which lets every slice reconcile its shape.
    ///
    /// # Errors
    /// Returns error if the preloaded value has the wrong shape or the
    /// reducer yields an undefined initial state.
    pub fn create(reducer: R, preloaded: Option<R::State>) -> Result<Self, ConfigurationError> {
        let init = R::Action::reserved(ReservedAction::Init);
        let preloaded_given = preloaded.is_some();

        let initial = match preloaded {
            Some(preloaded) => {
                reducer.validate(&preloaded)?;
                reducer.reduce(Some(&Arc::new(preloaded)), &init)
            }
            None => reducer.reduce(None, &init),
        };

        if initial.is_undefined() {
            return Err(ConfigurationError::UndefinedInitialState {
                slice: ROOT_SLICE.to_string(),
                action_type: ReservedAction::Init.action_type().to_string(),
            });
        }

        tracing::debug!(preloaded = preloaded_given, "Store created");

        Ok(Self {
            inner: Arc::new(StoreInner {
                reducer,
                current: RwLock::new(initial),
                listeners: Arc::new(Mutex::new(ListenerRegistry::default())),
                dispatching: ReentrantMutex::new(Cell::new(false)),
            }),
        })
    }

    /// The state produced by the last dispatch.
    pub fn get_state(&self) -> Arc<R::State> {
        Arc::clone(&*self.inner.current.read())
    }

    /// Applies `action` and notifies listeners. The only way to change state.
    ///
    /// Returns the action unchanged so callers can chain or inspect it.
    ///
    /// # Errors
    /// - [`DispatchError::InvalidAction`] if the action has no type
    /// - [`DispatchError::NestedInReducer`] if called while this store's
    ///   reducer is running
    /// - [`DispatchError::UndefinedState`] if the reducer yields an undefined
    ///   state
    ///
    /// In every error case the state is unchanged and no listener runs.
    ///
    /// # Panics
    /// A panicking reducer or listener unwinds through this call. When the
    /// reducer panics the previous state is kept.
    pub fn dispatch(&self, action: R::Action) -> Result<R::Action, DispatchError> {
        let Some(action_type) = action.action_type() else {
            return Err(DispatchError::InvalidAction {
                action: format!("{:?}", action),
            });
        };

        let dispatching = self.inner.dispatching.lock();
        if dispatching.get() {
            return Err(DispatchError::NestedInReducer {
                action_type: action_type.to_string(),
            });
        }

        let snapshot = self.inner.listeners.lock().snapshot();

        let next = {
            dispatching.set(true);
            let _reducing = scopeguard::guard(&*dispatching, |flag| flag.set(false));
            let prior = self.get_state();
            self.inner.reducer.reduce(Some(&prior), &action)
        };

        if next.is_undefined() {
            return Err(DispatchError::UndefinedState {
                action_type: action_type.to_string(),
            });
        }

        *self.inner.current.write() = next;

        tracing::debug!(action_type, listeners = snapshot.len(), "Action dispatched");

        for registration in snapshot.iter() {
            registration.notify();
        }

        drop(dispatching);
        Ok(action)
    }

    /// Registers `listener` to run after every dispatch.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.subscribe_shared(Arc::new(listener))
    }

    /// Registers an already shared listener.
    ///
    /// Registering the same `Arc` twice creates two independent
    /// registrations, each removed by its own [`Subscription`].
    pub fn subscribe_shared(&self, listener: Listener) -> Subscription {
        let id = self.inner.listeners.lock().insert(listener);
        tracing::trace!(subscription = id, "Listener subscribed");
        Subscription::new(id, &self.inner.listeners)
    }

    /// Number of live registrations.
    pub fn listener_count(&self) -> usize {
        self.inner.listeners.lock().len()
    }

    /// The root reducer this store applies.
    pub fn reducer(&self) -> &R {
        &self.inner.reducer
    }
}

impl<R: Reducer> fmt::Debug for Store<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("state", &std::any::type_name::<R::State>())
            .field("listeners", &self.listener_count())
            .finish()
    }
}
