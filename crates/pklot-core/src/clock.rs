//! # Clock Capability
//!
//! Time enters the system only through [`Clock`]. Gates hold an
//! `Arc<dyn Clock>` and stamp tickets with `clock.now()`, so a stay can be
//! simulated without touching the wall clock.
//!
//! | Clock | Behaviour |
//! |-------|-----------|
//! | [`SystemClock`] | Wall-clock UTC, truncated to seconds. |
//! | [`FixedClock`] | Always the same instant. |
//! | [`ManualClock`] | Starts at an instant; moved forward explicitly. |

use chrono::TimeDelta;
use parking_lot::Mutex;

use crate::temporal::Timestamp;

/// Source of the current instant.
pub trait Clock: Send + Sync + std::fmt::Debug {
    /// The current instant according to this clock.
    fn now(&self) -> Timestamp;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::now()
    }
}

/// A clock frozen at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub Timestamp);

impl Clock for FixedClock {
    fn now(&self) -> Timestamp {
        self.0
    }
}

/// A clock that only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    current: Mutex<Timestamp>,
}

impl ManualClock {
    pub fn new(start: Timestamp) -> Self {
        Self {
            current: Mutex::new(start),
        }
    }

    /// Jump to an absolute instant.
    pub fn set(&self, to: Timestamp) {
        *self.current.lock() = to;
    }

    /// Move forward by `delta`.
    ///
    /// A shift that would leave chrono's representable range is ignored and
    /// logged; the clock keeps its current instant.
    pub fn advance(&self, delta: TimeDelta) {
        let mut current = self.current.lock();
        match current.checked_add(delta) {
            Some(next) => *current = next,
            None => tracing::warn!(%delta, "manual clock advance out of range; ignored"),
        }
    }

    /// Move forward by whole hours.
    pub fn advance_hours(&self, hours: u32) {
        self.advance(TimeDelta::seconds(i64::from(hours) * 3600));
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        *self.current.lock()
    }
}
