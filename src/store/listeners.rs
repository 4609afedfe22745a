//! Listener registrations and the handles that remove them.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::Mutex;

/// Zero-argument callback invoked after every successful dispatch.
///
/// Listeners pull fresh state themselves through `Store::get_state`.
pub type Listener = Arc<dyn Fn() + Send + Sync>;

#[derive(Clone)]
pub(crate) struct Registration {
    id: u64,
    listener: Listener,
}

impl Registration {
    pub(crate) fn notify(&self) {
        (self.listener)()
    }
}

/// Ordered registrations, shared copy-on-write.
///
/// A notification pass holds a clone of `entries`; changes made while such a
/// snapshot is alive copy the list first, so the pass keeps iterating over
/// exactly the registrations it started with.
#[derive(Default)]
pub(crate) struct ListenerRegistry {
    next_id: u64,
    entries: Arc<Vec<Registration>>,
}

impl ListenerRegistry {
    pub(crate) fn insert(&mut self, listener: Listener) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        Arc::make_mut(&mut self.entries).push(Registration { id, listener });
        id
    }

    pub(crate) fn remove(&mut self, id: u64) -> bool {
        match self.entries.iter().position(|entry| entry.id == id) {
            Some(index) => {
                Arc::make_mut(&mut self.entries).remove(index);
                true
            }
            None => false,
        }
    }

    pub(crate) fn snapshot(&self) -> Arc<Vec<Registration>> {
        Arc::clone(&self.entries)
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Handle for one listener registration, returned by `Store::subscribe`.
///
/// Dropping the handle does not unsubscribe; call [`unsubscribe`](Self::unsubscribe)
/// when the observer goes away. The handle keeps no reference to the store.
#[derive(Debug)]
#[must_use = "keep the Subscription to be able to unsubscribe the listener"]
pub struct Subscription {
    id: u64,
    registry: Weak<Mutex<ListenerRegistry>>,
    active: AtomicBool,
}

impl Subscription {
    pub(crate) fn new(id: u64, registry: &Arc<Mutex<ListenerRegistry>>) -> Self {
        Self {
            id,
            registry: Arc::downgrade(registry),
            active: AtomicBool::new(true),
        }
    }

    /// Removes this registration. Calling it again is a no-op.
    ///
    /// Safe to call from inside a listener: the pass in flight still
    /// completes over the registrations it started with, and later
    /// dispatches no longer see this one.
    pub fn unsubscribe(&self) {
        if !self.active.swap(false, Ordering::AcqRel) {
            return;
        }
        if let Some(registry) = self.registry.upgrade() {
            let removed = registry.lock().remove(self.id);
            tracing::trace!(subscription = self.id, removed, "Listener unsubscribed");
        }
    }

    /// True until [`unsubscribe`](Self::unsubscribe) is called or the store is gone.
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire) && self.registry.strong_count() > 0
    }
}
