//! LunarView Core - trajectory decimation and playback
//!
//! This library implements the two data stages of the LunarView pipeline:
//! 1. **Sampler/Rounder**: keeps every Nth row of a large position table and
//!    rounds each value to a fixed number of decimals
//! 2. **Trajectory Animator**: loads the rounded table, converts meters to
//!    kilometers and plays the points back one per frame against a fixed
//!    reference body at the origin

pub mod animation;
pub mod config;
pub mod error;
pub mod reference_body;
pub mod sampler;
pub mod table;
pub mod trajectory;
pub mod viewport;

#[cfg(feature = "dashboard")]
pub mod dashboard;

// Re-export key types for convenience
pub use animation::{AnimationState, FrameSink, PlaybackReport, Player, Scene};
pub use config::{AnimatorConfig, SamplerConfig};
pub use error::{LunarError, Result};
pub use reference_body::ReferenceBody;
pub use sampler::{RoundedRow, SampleReport, Sampler};
pub use trajectory::{Point, Trajectory};
pub use viewport::Viewport;
