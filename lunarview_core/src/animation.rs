//! Frame-by-frame playback of a trajectory.
//!
//! # State machine
//!
//! ```text
//! hidden ──tick──► frame 0 ──tick──► frame 1 ── … ──► frame N-1
//!                                                      │
//!                     repeat: wraps to frame 0 ◄───────┤
//!                     otherwise: holds N-1, ticks are no-ops
//! ```
//!
//! [`AnimationState`] is the only mutable state. [`Player`] owns it together
//! with the immutable trajectory, reference body and viewport, and drives it
//! from a [`FrameClock`]. Drawing and waiting are delegated to a
//! [`FrameSink`] (terminal viewer, headless logger, test recorder).

use crate::config::AnimatorConfig;
use crate::error::{LunarError, Result};
use crate::reference_body::ReferenceBody;
use crate::trajectory::{Point, Trajectory};
use crate::viewport::Viewport;
use lunarview_env::FrameClock;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

/// Current frame of the animation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnimationState {
    /// Frame the next tick shows
    next_frame: usize,

    /// Frame on screen, `None` while the marker is hidden
    current_frame: Option<usize>,

    /// Position of the moving marker, `None` while hidden
    marker: Option<Point>,
}

impl AnimationState {
    /// Frame 0 pending, marker hidden.
    pub fn new() -> Self {
        Self::default()
    }

    /// Shows the next frame and returns its index.
    ///
    /// Past the last frame this wraps to 0 when `repeat` is set, otherwise
    /// it keeps the last frame on screen and returns `None`.
    pub fn tick(&mut self, trajectory: &Trajectory, repeat: bool) -> Option<usize> {
        if self.next_frame >= trajectory.len() {
            if !repeat || trajectory.is_empty() {
                return None;
            }
            self.next_frame = 0;
        }

        let frame = self.next_frame;
        self.marker = trajectory.get(frame);
        self.current_frame = Some(frame);
        self.next_frame += 1;
        Some(frame)
    }

    pub fn current_frame(&self) -> Option<usize> {
        self.current_frame
    }

    pub fn marker(&self) -> Option<Point> {
        self.marker
    }

    /// True once the last frame has been shown.
    pub fn is_finished(&self, trajectory: &Trajectory) -> bool {
        self.next_frame >= trajectory.len()
    }

    /// Back to the initial hidden state.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

/// Everything a sink needs to draw one frame.
#[derive(Debug, Clone, Copy)]
pub struct Scene<'a> {
    pub trajectory: &'a Trajectory,
    pub body: &'a ReferenceBody,
    pub viewport: &'a Viewport,
    pub state: &'a AnimationState,
}

impl Scene<'_> {
    /// Frame counter text, e.g. `"12/240"`, or `"-/240"` while hidden.
    pub fn frame_label(&self) -> String {
        match self.state.current_frame() {
            Some(frame) => format!("{}/{}", frame + 1, self.trajectory.len()),
            None => format!("-/{}", self.trajectory.len()),
        }
    }
}

/// A viewer the player draws into.
pub trait FrameSink {
    /// Presents the scene.
    fn draw(&mut self, scene: &Scene<'_>) -> Result<()>;

    /// Blocks for at most `timeout`. Returns `false` once the viewer has been
    /// closed, which ends playback.
    fn wait(&mut self, timeout: Duration) -> Result<bool>;
}

/// Outcome of a playback.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaybackReport {
    /// Ticks that put a point on screen
    pub frames_shown: usize,

    /// Whether the last frame was reached
    pub completed: bool,
}

/// Drives an [`AnimationState`] at a fixed frame interval.
pub struct Player<C: FrameClock> {
    clock: C,
    trajectory: Trajectory,
    body: ReferenceBody,
    viewport: Viewport,
    state: AnimationState,
    interval: Duration,
    repeat: bool,
    exit_when_done: bool,
}

impl<C: FrameClock> Player<C> {
    /// Prepares playback. The viewport and marker are computed here, once.
    pub fn new(clock: C, trajectory: Trajectory, config: &AnimatorConfig) -> Result<Self> {
        config.validate()?;
        let viewport = Viewport::around(&trajectory, config.viewport_padding)
            .ok_or(LunarError::EmptyTrajectory)?;

        Ok(Self {
            clock,
            trajectory,
            body: ReferenceBody::from_config(config),
            viewport,
            state: AnimationState::new(),
            interval: config.frame_interval(),
            repeat: config.repeat,
            exit_when_done: false,
        })
    }

    /// Return from [`Player::run`] after one full pass instead of waiting for
    /// the viewer to close.
    pub fn exit_when_done(mut self, exit: bool) -> Self {
        self.exit_when_done = exit;
        self
    }

    pub fn scene(&self) -> Scene<'_> {
        Scene {
            trajectory: &self.trajectory,
            body: &self.body,
            viewport: &self.viewport,
            state: &self.state,
        }
    }

    pub fn state(&self) -> &AnimationState {
        &self.state
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Plays the trajectory into `sink`.
    pub fn run<S: FrameSink>(&mut self, sink: &mut S) -> Result<PlaybackReport> {
        let mut report = PlaybackReport::default();
        info!(
            "Playing {} frames every {:?}",
            self.trajectory.len(),
            self.interval
        );

        sink.draw(&self.scene())?;
        let mut next_tick = self.clock.now() + self.interval;

        loop {
            let now = self.clock.now();
            if now < next_tick {
                if !sink.wait(next_tick - now)? {
                    debug!("Viewer closed at frame {:?}", self.state.current_frame());
                    break;
                }
                continue;
            }
            next_tick = now + self.interval;

            let wrapped = self.repeat && self.state.is_finished(&self.trajectory);
            if wrapped && !report.completed {
                report.completed = true;
                info!("Reached the last frame, starting over");
            }
            if wrapped && self.exit_when_done {
                break;
            }

            match self.state.tick(&self.trajectory, self.repeat) {
                Some(frame) => {
                    report.frames_shown += 1;
                    debug!("frame {}", frame);
                    sink.draw(&self.scene())?;
                }
                None => {
                    if !report.completed {
                        report.completed = true;
                        info!("Reached the last frame");
                    }
                    if self.exit_when_done {
                        break;
                    }
                }
            }
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lunarview_env::ManualClock;

    fn trajectory(n: usize) -> Trajectory {
        Trajectory::from_points((0..n).map(|i| Point::new(i as f64, -(i as f64))).collect())
    }

    /// Records every drawn marker and closes after `close_after` waits.
    struct RecordingSink {
        clock: ManualClock,
        drawn: Vec<Option<Point>>,
        waits: usize,
        close_after: Option<usize>,
    }

    impl RecordingSink {
        fn new(clock: ManualClock) -> Self {
            Self {
                clock,
                drawn: Vec::new(),
                waits: 0,
                close_after: None,
            }
        }
    }

    impl FrameSink for RecordingSink {
        fn draw(&mut self, scene: &Scene<'_>) -> Result<()> {
            self.drawn.push(scene.state.marker());
            Ok(())
        }

        fn wait(&mut self, timeout: Duration) -> Result<bool> {
            self.waits += 1;
            if self.close_after.is_some_and(|n| self.waits > n) {
                return Ok(false);
            }
            self.clock.sleep(timeout);
            Ok(true)
        }
    }

    #[test]
    fn test_initial_state_is_hidden() {
        let state = AnimationState::new();
        assert_eq!(state.current_frame(), None);
        assert_eq!(state.marker(), None);
    }

    #[test]
    fn test_tick_advances_one_point() {
        let trajectory = trajectory(3);
        let mut state = AnimationState::new();

        assert_eq!(state.tick(&trajectory, false), Some(0));
        assert_eq!(state.marker(), Some(Point::new(0.0, 0.0)));
        assert_eq!(state.tick(&trajectory, false), Some(1));
        assert_eq!(state.tick(&trajectory, false), Some(2));
        assert!(state.is_finished(&trajectory));

        // Holds the last frame.
        assert_eq!(state.tick(&trajectory, false), None);
        assert_eq!(state.current_frame(), Some(2));
        assert_eq!(state.marker(), Some(Point::new(2.0, -2.0)));
    }

    #[test]
    fn test_tick_wraps_when_repeating() {
        let trajectory = trajectory(2);
        let mut state = AnimationState::new();
        let frames: Vec<Option<usize>> = (0..5).map(|_| state.tick(&trajectory, true)).collect();
        assert_eq!(frames, vec![Some(0), Some(1), Some(0), Some(1), Some(0)]);
    }

    #[test]
    fn test_tick_on_empty_trajectory() {
        let mut state = AnimationState::new();
        assert_eq!(state.tick(&Trajectory::default(), true), None);
        assert_eq!(state.marker(), None);
    }

    #[test]
    fn test_reset() {
        let trajectory = trajectory(2);
        let mut state = AnimationState::new();
        state.tick(&trajectory, false);
        state.reset();
        assert_eq!(state, AnimationState::new());
    }

    #[test]
    fn test_player_rejects_empty_trajectory() {
        let result = Player::new(
            ManualClock::new(),
            Trajectory::default(),
            &AnimatorConfig::default(),
        );
        assert!(matches!(result, Err(LunarError::EmptyTrajectory)));
    }

    #[test]
    fn test_player_shows_every_frame_once() {
        let clock = ManualClock::new();
        let mut player = Player::new(clock.clone(), trajectory(4), &AnimatorConfig::default())
            .unwrap()
            .exit_when_done(true);
        let mut sink = RecordingSink::new(clock.clone());

        let report = player.run(&mut sink).unwrap();

        assert_eq!(report.frames_shown, 4);
        assert!(report.completed);
        assert_eq!(sink.drawn.len(), 5);
        assert_eq!(sink.drawn[0], None);
        assert_eq!(sink.drawn[4], Some(Point::new(3.0, -3.0)));
        // 4 frames plus the tick that finds the end, 50 ms apart.
        assert_eq!(clock.now(), Duration::from_millis(250));
    }

    #[test]
    fn test_closing_the_viewer_stops_playback() {
        let clock = ManualClock::new();
        let mut player = Player::new(clock.clone(), trajectory(100), &AnimatorConfig::default())
            .unwrap();
        let mut sink = RecordingSink::new(clock.clone());
        sink.close_after = Some(3);

        let report = player.run(&mut sink).unwrap();

        assert_eq!(report.frames_shown, 3);
        assert!(!report.completed);
        assert_eq!(player.state().current_frame(), Some(2));
    }

    #[test]
    fn test_finished_player_waits_for_close() {
        let clock = ManualClock::new();
        let mut player =
            Player::new(clock.clone(), trajectory(2), &AnimatorConfig::default()).unwrap();
        let mut sink = RecordingSink::new(clock.clone());
        sink.close_after = Some(10);

        let report = player.run(&mut sink).unwrap();

        assert_eq!(report.frames_shown, 2);
        assert!(report.completed);
        // No redraws after the last frame.
        assert_eq!(sink.drawn.len(), 3);
    }

    #[test]
    fn test_repeating_player_completes_one_pass() {
        let clock = ManualClock::new();
        let config = AnimatorConfig {
            repeat: true,
            frame_interval_ms: 20,
            ..Default::default()
        };
        let mut player = Player::new(clock.clone(), trajectory(3), &config)
            .unwrap()
            .exit_when_done(true);
        let mut sink = RecordingSink::new(clock.clone());

        let report = player.run(&mut sink).unwrap();

        assert_eq!(report.frames_shown, 3);
        assert!(report.completed);
        assert_eq!(clock.now(), Duration::from_millis(80));
    }

    #[test]
    fn test_scene_frame_label() {
        let clock = ManualClock::new();
        let mut player = Player::new(clock.clone(), trajectory(3), &AnimatorConfig::default())
            .unwrap()
            .exit_when_done(true);
        assert_eq!(player.scene().frame_label(), "-/3");

        let mut sink = RecordingSink::new(clock);
        player.run(&mut sink).unwrap();
        assert_eq!(player.scene().frame_label(), "3/3");
        assert_eq!(player.viewport().x_bounds, [-10.0, 12.0]);
    }
}
