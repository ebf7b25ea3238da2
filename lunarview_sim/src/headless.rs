//! Headless playback sink.
//!
//! Logs each frame through `tracing` instead of drawing it, and waits on the
//! player's clock. Used for `animate --headless` where no terminal is
//! available.

use lunarview_core::{FrameSink, Result, Scene};
use lunarview_env::FrameClock;
use std::time::Duration;
use tracing::{debug, info};

/// Frame sink that writes one log line per shown frame.
pub struct LogSink<C: FrameClock> {
    clock: C,
    /// Frame of the previous draw, `None` before the first one
    last_frame: Option<Option<usize>>,
    frames_logged: usize,
}

impl<C: FrameClock> LogSink<C> {
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            last_frame: None,
            frames_logged: 0,
        }
    }

    pub fn frames_logged(&self) -> usize {
        self.frames_logged
    }
}

impl<C: FrameClock> FrameSink for LogSink<C> {
    fn draw(&mut self, scene: &Scene<'_>) -> Result<()> {
        let frame = scene.state.current_frame();
        if self.last_frame == Some(frame) {
            return Ok(());
        }
        self.last_frame = Some(frame);

        match scene.state.marker() {
            Some(moon) => {
                self.frames_logged += 1;
                info!(
                    "frame {}: moon at ({:.1}, {:.1}) km",
                    scene.frame_label(),
                    moon.x,
                    moon.y
                );
            }
            None => debug!(
                "earth marker {:.1} pt² at origin, viewport x={:?} y={:?}",
                scene.body.marker_size(),
                scene.viewport.x_bounds,
                scene.viewport.y_bounds
            ),
        }
        Ok(())
    }

    fn wait(&mut self, timeout: Duration) -> Result<bool> {
        self.clock.sleep(timeout);
        Ok(true)
    }
}
