use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use chrono::{DateTime, Duration, FixedOffset, Local, NaiveDate, Utc};

use crate::progress::local_midnight;

/// Source of wall-clock time for the store.
///
/// `now` carries the offset in force right now. Week and month boundaries
/// can fall on dates with a different offset, so they go through `midnight`.
pub trait Clock: fmt::Debug {
    fn now(&self) -> DateTime<FixedOffset>;

    /// The instant local midnight began on `date`.
    ///
    /// The default reuses the current offset, which is only right for zones
    /// without daylight saving.
    fn midnight(&self, date: NaiveDate) -> DateTime<Utc> {
        local_midnight(&self.now().timezone(), date)
    }
}

/// The machine's local clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Local::now().into()
    }

    fn midnight(&self, date: NaiveDate) -> DateTime<Utc> {
        local_midnight(&Local, date)
    }
}

/// A clock that only moves when told to.
///
/// Clones share the same instant, so a test can keep one handle and give the
/// other to a store.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Rc<Cell<DateTime<FixedOffset>>>,
}

impl ManualClock {
    pub fn new(now: DateTime<FixedOffset>) -> Self {
        Self {
            now: Rc::new(Cell::new(now)),
        }
    }

    pub fn set(&self, now: DateTime<FixedOffset>) {
        self.now.set(now);
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<FixedOffset> {
        self.now.get()
    }
}
