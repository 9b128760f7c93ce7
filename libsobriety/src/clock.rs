//! Time source abstraction
//!
//! The reducer needs "now" when a relapse restarts the streak. Reading it
//! through [`Clock`] keeps that reachable from tests with a pinned value.

use std::fmt::Debug;

use chrono::{DateTime, Utc};

#[cfg(any(test, feature = "testing"))]
use std::cell::Cell;

/// Provider of the current wall-clock time
pub trait Clock: Debug {
    fn now(&self) -> DateTime<Utc>;
}

/// Real system time via [`chrono::Utc`]
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock that returns a fixed instant until told otherwise
#[cfg(any(test, feature = "testing"))]
#[derive(Debug)]
pub struct FixedClock {
    now: Cell<DateTime<Utc>>,
}

#[cfg(any(test, feature = "testing"))]
impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self { now: Cell::new(now) }
    }

    pub fn set(&self, now: DateTime<Utc>) {
        self.now.set(now);
    }

    pub fn advance(&self, by: chrono::Duration) {
        self.now.set(self.now.get() + by);
    }
}

#[cfg(any(test, feature = "testing"))]
impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.now.get()
    }
}

impl<C: Clock + ?Sized> Clock for std::rc::Rc<C> {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}
