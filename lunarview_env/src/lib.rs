//! LunarView Environment Abstraction Layer
//!
//! This crate provides the clock abstraction that lets the LunarView
//! playback loop run against **Reality** (the system monotonic clock) or a
//! **Simulation** (a virtual clock advanced by hand).
//!
//! # Core Concept
//!
//! The animation player never calls `std::thread::sleep` or `Instant::now`
//! directly. Every timing decision goes through a [`FrameClock`]:
//! - Time (`now()`)
//! - Waiting (`sleep()`)
//!
//! With a [`ManualClock`], a full playback of N frames completes instantly
//! and deterministically, which is what the test suites rely on.
//!
//! # Example
//!
//! ```
//! use lunarview_env::{FrameClock, ManualClock};
//! use std::time::Duration;
//!
//! let clock = ManualClock::new();
//! clock.sleep(Duration::from_millis(50));
//! assert_eq!(clock.now(), Duration::from_millis(50));
//! ```

mod clock;
mod manual;
mod system_impl;

pub use clock::FrameClock;
pub use manual::ManualClock;
pub use system_impl::SystemClock;
