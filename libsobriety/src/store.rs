//! Single owner of the authoritative state
//!
//! All changes go through [`Store::dispatch`]. Readers take an
//! `Arc<SobrietyState>` snapshot; a snapshot never changes after it is
//! handed out, so holding an old one is always safe.
//!
//! # Example
//!
//! ```
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use libsobriety::{Store, RelapseRecord, actions::add_relapse};
//!
//! let mut store = Store::new();
//! let seen = Rc::new(Cell::new(0));
//!
//! let counter = Rc::clone(&seen);
//! let subscription = store.subscribe(move || counter.set(counter.get() + 1));
//!
//! store.dispatch(add_relapse(RelapseRecord::new("1/1/2020")));
//! assert_eq!(seen.get(), 1);
//! assert_eq!(store.get_state().relapses.len(), 1);
//!
//! subscription.unsubscribe();
//! store.dispatch(add_relapse(RelapseRecord::new("1/2/2020")));
//! assert_eq!(seen.get(), 1);
//! ```

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};
use std::sync::Arc;

use crate::actions::Action;
use crate::clock::{Clock, SystemClock};
use crate::reducer::reduce_with_clock;
use crate::types::SobrietyState;

type Listener = Rc<dyn Fn()>;

#[derive(Default)]
struct Registry {
    next_id: u64,
    listeners: Vec<(u64, Listener)>,
}

impl Registry {
    fn remove(&mut self, id: u64) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }
}

/// State container with a subscriber registry
pub struct Store {
    state: Arc<SobrietyState>,
    clock: Box<dyn Clock>,
    registry: Rc<RefCell<Registry>>,
}

impl Store {
    /// Store holding the initial state, using the system clock
    pub fn new() -> Self {
        Self::with_state(SobrietyState::initial())
    }

    /// Store seeded with an existing state
    pub fn with_state(state: SobrietyState) -> Self {
        Self {
            state: Arc::new(state),
            clock: Box::new(SystemClock),
            registry: Rc::new(RefCell::new(Registry::default())),
        }
    }

    /// Replace the clock the reducer reads "now" from
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Current snapshot
    pub fn get_state(&self) -> Arc<SobrietyState> {
        Arc::clone(&self.state)
    }

    /// Reduce `action` into a new state, install it, then notify subscribers
    ///
    /// Subscribers run in registration order. The list is captured before
    /// the first callback runs, so (un)subscribing from inside a callback
    /// takes effect on the next dispatch.
    pub fn dispatch(&mut self, action: Action) {
        let tag = action.tag();
        let next = reduce_with_clock(&self.state, action, self.clock.as_ref());
        self.state = Arc::new(next);

        tracing::debug!(
            action = tag,
            relapses = self.state.relapses.len(),
            anchored = self.state.time_sober.is_some(),
            "Dispatched action"
        );

        let listeners: Vec<Listener> = self
            .registry
            .borrow()
            .listeners
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();

        for listener in listeners {
            listener();
        }
    }

    /// Register `callback` to run after every dispatch
    ///
    /// The callback receives nothing; read the new state with
    /// [`Store::get_state`].
    pub fn subscribe<F>(&mut self, callback: F) -> Subscription
    where
        F: Fn() + 'static,
    {
        let mut registry = self.registry.borrow_mut();
        let id = registry.next_id;
        registry.next_id += 1;
        registry.listeners.push((id, Rc::new(callback)));

        tracing::trace!(subscription = id, "Subscriber registered");

        Subscription {
            id,
            registry: Rc::downgrade(&self.registry),
        }
    }

    /// Number of registered subscribers
    pub fn subscriber_count(&self) -> usize {
        self.registry.borrow().listeners.len()
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Store {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("state", &self.state)
            .field("clock", &self.clock)
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

/// Handle returned by [`Store::subscribe`]
///
/// Dropping the handle leaves the callback registered. Call
/// [`Subscription::unsubscribe`] to remove it.
#[derive(Debug)]
pub struct Subscription {
    id: u64,
    registry: Weak<RefCell<Registry>>,
}

impl Subscription {
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Deregister the callback
    ///
    /// Returns false if it was already gone (or the store was dropped).
    pub fn unsubscribe(self) -> bool {
        match self.registry.upgrade() {
            Some(registry) => {
                let removed = registry.borrow_mut().remove(self.id);
                if removed {
                    tracing::trace!(subscription = self.id, "Subscriber removed");
                }
                removed
            }
            None => false,
        }
    }
}
