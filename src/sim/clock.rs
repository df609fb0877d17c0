//! Monotonic time sources for lap timing

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

/// Source of monotonic timestamps, measured from an arbitrary origin
pub trait Clock {
    fn now(&self) -> Duration;
}

/// Simulated time, advanced by whoever owns the simulation
///
/// Stands still while the world is paused and follows its time scale, so lap
/// times measure driving time rather than wall time. Clones share a reading.
#[derive(Debug, Clone, Default)]
pub struct SimClock {
    elapsed: Rc<Cell<Duration>>,
}

impl SimClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one simulated step
    pub fn advance(&self, step: Duration) {
        self.elapsed.set(self.elapsed.get() + step);
    }
}

impl Clock for SimClock {
    fn now(&self) -> Duration {
        self.elapsed.get()
    }
}

/// Clock that only moves when told to
///
/// Clones share the same reading, so a test can keep one handle and give the
/// other to a [`LapTimer`](super::lap_timer::LapTimer).
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves the clock to an absolute reading in milliseconds
    pub fn set_ms(&self, ms: u64) {
        self.now.set(Duration::from_millis(ms));
    }

    /// Moves the clock forward
    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}
