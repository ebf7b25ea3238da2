//! LunarView pipeline driver
//!
//! This crate generates the raw orbit data and runs the stages of
//! `lunarview_core` end to end.
//!
//! # Data flow
//!
//! ```text
//! ┌──────────────┐ output.csv ┌──────────────┐ data_rounded.csv ┌──────────────┐
//! │   simulate   │───────────►│   decimate   │─────────────────►│   animate    │
//! │ (Verlet, m)  │  every     │ (1 in 500,   │  (x, y) in m     │ (km, 50 ms/  │
//! │              │  position  │  1 decimal)  │                  │  frame)      │
//! └──────────────┘            └──────────────┘                  └──────────────┘
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use lunarview_sim::{pipeline, LunarConfig};
//!
//! let config = LunarConfig::default();
//! pipeline::simulate(&config.simulation)?;
//! pipeline::decimate(&config.sampler)?;
//! pipeline::animate_headless(&config.animator, lunarview_env::SystemClock::new())?;
//! ```

mod config;
mod exporter;
mod headless;
pub mod orbit;
pub mod pipeline;

pub use config::{LunarConfig, SimulationConfig};
pub use exporter::{export_to_file, write_positions};
pub use headless::LogSink;
pub use orbit::{OrbitConfig, OrbitSimulator, OrbitState};
pub use pipeline::SimulationReport;
