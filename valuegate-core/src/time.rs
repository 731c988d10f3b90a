//! Time sources for cooperative timers
//!
//! The engine's periodic trigger is cooperative: elapsed time is checked
//! when a value is offered, never from an asynchronous callback. All the
//! registry needs is "now" in milliseconds, abstracted here so hosts can
//! plug in a hardware tick counter, an RTC, or a test clock.

#[cfg(not(feature = "std"))]
use alloc::rc::Rc;
#[cfg(feature = "std")]
use std::rc::Rc;

use core::cell::Cell;

/// Timestamp in milliseconds (since epoch, or device boot for tick counters)
pub type Timestamp = u64;

/// Source of time for the registry
pub trait TimeSource {
    /// Get current timestamp in milliseconds
    fn now(&self) -> Timestamp;

    /// Check if this source provides wall clock time (vs monotonic)
    fn is_wall_clock(&self) -> bool {
        false
    }
}

/// System time source (requires std)
#[cfg(feature = "std")]
#[derive(Debug, Clone)]
pub struct SystemClock;

#[cfg(feature = "std")]
impl TimeSource for SystemClock {
    fn now(&self) -> Timestamp {
        use std::time::{SystemTime, UNIX_EPOCH};

        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as Timestamp
    }

    fn is_wall_clock(&self) -> bool {
        true
    }
}

/// Externally advanced clock
///
/// Clones share one underlying counter, so the host (or a test) can keep a
/// handle and advance time while the registry owns another:
///
/// ```
/// use valuegate_core::time::{ManualClock, TimeSource};
///
/// let clock = ManualClock::new(0);
/// let registry_handle = clock.clone();
///
/// clock.advance(5_000);
/// assert_eq!(registry_handle.now(), 5_000);
/// ```
///
/// Also the natural fit for bare-metal hosts that bump the counter from a
/// tick interrupt.
#[derive(Debug, Clone)]
pub struct ManualClock(Rc<Cell<Timestamp>>);

impl ManualClock {
    /// Create a clock starting at the given timestamp
    pub fn new(start: Timestamp) -> Self {
        Self(Rc::new(Cell::new(start)))
    }

    /// Set the absolute time
    pub fn set(&self, timestamp: Timestamp) {
        self.0.set(timestamp);
    }

    /// Move time forward
    pub fn advance(&self, ms: u64) {
        self.0.set(self.0.get() + ms);
    }
}

impl TimeSource for ManualClock {
    fn now(&self) -> Timestamp {
        self.0.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_advances() {
        let clock = ManualClock::new(1000);
        assert_eq!(clock.now(), 1000);

        clock.advance(500);
        assert_eq!(clock.now(), 1500);
    }

    #[test]
    fn manual_clock_clones_share_time() {
        let a = ManualClock::new(0);
        let b = a.clone();

        a.advance(250);
        assert_eq!(b.now(), 250);

        b.set(9_000);
        assert_eq!(a.now(), 9_000);
    }

    #[cfg(feature = "std")]
    #[test]
    fn system_clock_is_wall_clock() {
        assert!(SystemClock.is_wall_clock());
        assert!(SystemClock.now() > 0);
    }
}
