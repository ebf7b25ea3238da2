//! Production implementation of FrameClock using the system monotonic clock.

use crate::FrameClock;
use std::time::{Duration, Instant};

/// Production clock backed by `Instant`.
///
/// This is the "real" implementation used when the animation is shown to a
/// person. Sleeping blocks the calling thread.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    /// Start time for monotonic duration calculations
    start: Instant,
}

impl SystemClock {
    /// Creates a new SystemClock starting at zero.
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock for SystemClock {
    fn now(&self) -> Duration {
        self.start.elapsed()
    }

    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}
