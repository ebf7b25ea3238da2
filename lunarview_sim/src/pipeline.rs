//! The three pipeline stages as callable functions.
//!
//! `main` only parses arguments and reports; everything it runs lives here so
//! the integration tests can drive the same code.

use crate::config::SimulationConfig;
use crate::exporter::export_to_file;
use crate::headless::LogSink;
use crate::orbit::OrbitSimulator;
use lunarview_core::{
    AnimatorConfig, PlaybackReport, Player, Result, SampleReport, Sampler, SamplerConfig,
    Trajectory,
};
use lunarview_env::FrameClock;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::info;

/// Summary of an orbit generation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationReport {
    pub output: PathBuf,

    /// Rows written
    pub positions: usize,

    /// Simulated time covered by the rows (s)
    pub simulated_seconds: f64,

    /// Center coordinates [x, y] (m) where the bodies touched, if they did
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collision_m: Option<[f64; 2]>,
}

/// Generates the orbit and writes every position.
pub fn simulate(config: &SimulationConfig) -> Result<SimulationReport> {
    let mut simulator = OrbitSimulator::new(&config.orbit)?;
    let positions = export_to_file(&config.output_file, simulator.by_ref(), config.decimals)?;

    let report = SimulationReport {
        output: config.output_file.clone(),
        positions,
        simulated_seconds: simulator.time(),
        collision_m: simulator.collision().map(|p| [p.x, p.y]),
    };
    info!(
        "Wrote {} positions ({:.0} s simulated) to {}",
        report.positions,
        report.simulated_seconds,
        report.output.display()
    );
    Ok(report)
}

/// Decimates and rounds the configured input table.
pub fn decimate(config: &SamplerConfig) -> Result<SampleReport> {
    Sampler::new(config.clone()).run()
}

/// Loads the trajectory and plays it through the headless sink, returning
/// after the last frame.
pub fn animate_headless<C: FrameClock + Clone>(
    config: &AnimatorConfig,
    clock: C,
) -> Result<PlaybackReport> {
    let trajectory = Trajectory::load(&config.input_file, config.unit_divisor)?;
    let mut player = Player::new(clock.clone(), trajectory, config)?.exit_when_done(true);
    let mut sink = LogSink::new(clock);
    player.run(&mut sink)
}

/// Loads the trajectory and plays it in the terminal until the viewer closes.
#[cfg(feature = "dashboard")]
pub fn animate_interactive(config: &AnimatorConfig) -> Result<PlaybackReport> {
    use lunarview_core::dashboard::TrajectoryViewer;
    use lunarview_env::SystemClock;

    // Everything that can fail on bad input happens before the terminal
    // switches to the alternate screen.
    let trajectory = Trajectory::load(&config.input_file, config.unit_divisor)?;
    let mut player = Player::new(SystemClock::new(), trajectory, config)?;

    let mut viewer = TrajectoryViewer::open()?;
    let report = player.run(&mut viewer);
    viewer.close()?;
    report
}
