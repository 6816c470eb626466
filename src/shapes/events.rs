//! Change notification
//!
//! Generators own a `ChangeEmitter` and trigger it after any setter runs.
//! Whoever composes the generators subscribes to it and re-renders.
//! Everything here is single-threaded, so plain `Rc`/`Cell` is enough.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

/// Handle returned by [`ChangeEmitter::subscribe`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Subscription(u64);

type Listener = Rc<dyn Fn()>;

/// A payload-free broadcast
#[derive(Default)]
pub struct ChangeEmitter {
    listeners: RefCell<Vec<(Subscription, Listener)>>,
    next_id: Cell<u64>,
    dispatching: Cell<bool>,
}

impl ChangeEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener, called on every [`trigger`](Self::trigger)
    pub fn subscribe(&self, listener: impl Fn() + 'static) -> Subscription {
        let id = Subscription(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.listeners.borrow_mut().push((id, Rc::new(listener)));
        id
    }

    /// Remove a listener. Returns false if it was already gone.
    pub fn unsubscribe(&self, subscription: Subscription) -> bool {
        let mut listeners = self.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|(id, _)| *id != subscription);
        listeners.len() != before
    }

    pub fn len(&self) -> usize {
        self.listeners.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.borrow().is_empty()
    }

    /// Notify every listener
    ///
    /// A trigger issued by a listener while this emitter is already
    /// dispatching is dropped, so a listener that (indirectly) changes the
    /// same generator cannot recurse forever.
    pub fn trigger(&self) {
        if self.dispatching.get() {
            log::debug!("Ignoring re-entrant change notification");
            return;
        }

        // Snapshot so listeners may subscribe/unsubscribe while we iterate
        let listeners: Vec<Listener> = self
            .listeners
            .borrow()
            .iter()
            .map(|(_, l)| Rc::clone(l))
            .collect();

        self.dispatching.set(true);
        for listener in &listeners {
            listener();
        }
        self.dispatching.set(false);
    }
}

impl fmt::Debug for ChangeEmitter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangeEmitter")
            .field("listeners", &self.len())
            .finish()
    }
}
