//! Virtual clock implementing FrameClock for deterministic playback.

use crate::FrameClock;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Virtual clock that advances only when told to.
///
/// `sleep` advances virtual time instead of blocking, so a playback that
/// would take minutes on a wall clock finishes immediately. Clones share the
/// same underlying time.
#[derive(Debug, Default)]
pub struct ManualClock {
    /// Current virtual time (nanoseconds since clock creation)
    virtual_time_ns: Arc<Mutex<u64>>,
}

impl ManualClock {
    /// Creates a new ManualClock at time zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Advances virtual time by the given duration.
    pub fn advance(&self, duration: Duration) {
        let mut time = self.lock();
        *time += duration.as_nanos() as u64;
    }

    /// Sets the virtual time to a specific value.
    pub fn set_time(&self, time: Duration) {
        let mut guard = self.lock();
        *guard = time.as_nanos() as u64;
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, u64> {
        // A poisoned clock still holds a valid counter.
        self.virtual_time_ns
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Clone for ManualClock {
    fn clone(&self) -> Self {
        Self {
            virtual_time_ns: Arc::clone(&self.virtual_time_ns),
        }
    }
}

impl FrameClock for ManualClock {
    fn now(&self) -> Duration {
        Duration::from_nanos(*self.lock())
    }

    fn sleep(&self, duration: Duration) {
        self.advance(duration);
    }
}
