//! Fixed plot bounds around a trajectory.

use crate::trajectory::{Point, Trajectory};
use serde::{Deserialize, Serialize};

/// Axis bounds, computed once before playback and never updated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub x_bounds: [f64; 2],
    pub y_bounds: [f64; 2],
}

impl Viewport {
    /// Min/max of every point, padded by `padding` on each side.
    ///
    /// Returns `None` for an empty trajectory.
    pub fn around(trajectory: &Trajectory, padding: f64) -> Option<Self> {
        let (lo, hi) = trajectory.extent()?;
        Some(Self {
            x_bounds: [lo.x - padding, hi.x + padding],
            y_bounds: [lo.y - padding, hi.y + padding],
        })
    }

    pub fn width(&self) -> f64 {
        self.x_bounds[1] - self.x_bounds[0]
    }

    pub fn height(&self) -> f64 {
        self.y_bounds[1] - self.y_bounds[0]
    }

    pub fn contains(&self, point: &Point) -> bool {
        (self.x_bounds[0]..=self.x_bounds[1]).contains(&point.x)
            && (self.y_bounds[0]..=self.y_bounds[1]).contains(&point.y)
    }
}
