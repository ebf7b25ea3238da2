//! Core clock trait for LunarView playback.

use std::time::Duration;

/// The central interface for time during playback.
///
/// This trait abstracts the "real world" so that the animation player can run
/// in both production (wall clock) and test (virtual clock) environments.
///
/// # Implementations
///
/// - **Production**: `SystemClock` - wraps `Instant` and `thread::sleep`
/// - **Simulation**: `ManualClock` - a virtual clock that only moves on `sleep`
pub trait FrameClock {
    /// Returns the monotonic time elapsed since the clock was created.
    ///
    /// In simulation, this is the virtual clock time.
    fn now(&self) -> Duration;

    /// Suspends the caller for the given duration.
    ///
    /// In production: blocks the current thread.
    /// In simulation: advances the virtual clock.
    fn sleep(&self, duration: Duration);
}

impl<C: FrameClock + ?Sized> FrameClock for &C {
    fn now(&self) -> Duration {
        (**self).now()
    }

    fn sleep(&self, duration: Duration) {
        (**self).sleep(duration)
    }
}
