//! End-to-end runs of simulate -> decimate -> animate on temporary files.

use lunarview_core::{AnimatorConfig, LunarError, SamplerConfig, Trajectory};
use lunarview_env::{FrameClock, ManualClock, SystemClock};
use lunarview_sim::{pipeline, OrbitConfig, SimulationConfig};
use std::path::Path;
use std::time::Duration;
use tempfile::TempDir;

fn simulation(dir: &Path, steps: usize) -> SimulationConfig {
    SimulationConfig {
        orbit: OrbitConfig {
            steps,
            ..Default::default()
        },
        output_file: dir.join("output.csv"),
        decimals: 2,
    }
}

fn sampler(dir: &Path, interval: usize) -> SamplerConfig {
    SamplerConfig {
        input_file: dir.join("output.csv"),
        output_file: dir.join("data_rounded.csv"),
        sampling_interval: interval,
        precision: 1,
    }
}

#[test]
fn test_full_pipeline() {
    let dir = TempDir::new().unwrap();

    let sim = pipeline::simulate(&simulation(dir.path(), 100)).unwrap();
    assert_eq!(sim.positions, 100);
    assert!(sim.collision_m.is_none());
    assert_eq!(sim.simulated_seconds, 990.0);

    let raw = std::fs::read_to_string(dir.path().join("output.csv")).unwrap();
    assert_eq!(raw.lines().count(), 100);
    assert_eq!(raw.lines().next(), Some("384400000.00,0.00"));

    let sampled = pipeline::decimate(&sampler(dir.path(), 10)).unwrap();
    assert_eq!(sampled.rows_read, 100);
    assert_eq!(sampled.rows_written, 10);

    let rounded = std::fs::read_to_string(dir.path().join("data_rounded.csv")).unwrap();
    assert_eq!(rounded.lines().next(), Some("384400000.0,0.0"));

    let trajectory = Trajectory::load(&dir.path().join("data_rounded.csv"), 1000.0).unwrap();
    assert_eq!(trajectory.len(), 10);
    assert_eq!(trajectory.get(0).unwrap().x, 384400.0);

    let animator = AnimatorConfig {
        input_file: dir.path().join("data_rounded.csv"),
        ..Default::default()
    };
    let clock = ManualClock::new();
    let report = pipeline::animate_headless(&animator, clock.clone()).unwrap();

    assert_eq!(report.frames_shown, 10);
    assert!(report.completed);
    assert_eq!(clock.now(), Duration::from_millis(550));
}

#[test]
fn test_missing_input_creates_no_output() {
    let dir = TempDir::new().unwrap();
    let config = sampler(dir.path(), 500);

    let err = pipeline::decimate(&config).unwrap_err();

    assert!(matches!(err, LunarError::InputNotFound { .. }));
    assert!(!config.output_file.exists());
    assert_eq!(
        err.to_string(),
        format!("The file {} was not found.", config.input_file.display())
    );
}

#[test]
fn test_animate_rejects_missing_and_empty_tables() {
    let dir = TempDir::new().unwrap();
    let animator = AnimatorConfig {
        input_file: dir.path().join("data_rounded.csv"),
        ..Default::default()
    };

    let err = pipeline::animate_headless(&animator, ManualClock::new()).unwrap_err();
    assert!(matches!(err, LunarError::InputNotFound { .. }));

    std::fs::write(&animator.input_file, "\n\n").unwrap();
    let err = pipeline::animate_headless(&animator, ManualClock::new()).unwrap_err();
    assert!(matches!(err, LunarError::EmptyTrajectory));
}

#[test]
fn test_collision_stops_generation() {
    let dir = TempDir::new().unwrap();
    let mut config = simulation(dir.path(), 10_000);
    // Dropped from rest just above the surface
    config.orbit.initial_position_m = [9_000_000.0, 0.0];
    config.orbit.initial_speed_ms = 0.0;

    let report = pipeline::simulate(&config).unwrap();

    assert!(report.positions < 10_000);
    let [x, y] = report.collision_m.unwrap();
    assert!((x * x + y * y).sqrt() <= 6_378_137.0 + 1_737_400.0);
}

#[test]
fn test_headless_playback_on_system_clock() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("data_rounded.csv");
    std::fs::write(&input, "1000.0,2000.0\n3000.0,5000.0\n").unwrap();
    let animator = AnimatorConfig {
        input_file: input,
        frame_interval_ms: 1,
        ..Default::default()
    };

    let report = pipeline::animate_headless(&animator, SystemClock::new()).unwrap();

    assert_eq!(report.frames_shown, 2);
    assert!(report.completed);
}
