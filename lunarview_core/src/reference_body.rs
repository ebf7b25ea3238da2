//! The static reference body (Earth) drawn at the origin.
//!
//! Its marker size comes from two constants, the body diameter and a
//! reference distance, and never from the trajectory data.

use crate::config::AnimatorConfig;
use crate::trajectory::Point;
use crate::viewport::Viewport;

/// Nominal figure width the marker size is expressed against (10 in at 72 pt/in).
pub const FIGURE_WIDTH_PT: f64 = 720.0;

/// Fixed-position marker with a constant display size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferenceBody {
    /// Body diameter in output units (km)
    diameter: f64,

    /// Reference separation in output units (km)
    distance: f64,

    /// Visibility multiplier
    marker_scale: f64,
}

impl ReferenceBody {
    pub fn new(diameter: f64, distance: f64, marker_scale: f64) -> Self {
        Self {
            diameter,
            distance,
            marker_scale,
        }
    }

    /// Converts the configured constants into output units.
    pub fn from_config(config: &AnimatorConfig) -> Self {
        Self::new(
            2.0 * config.body_radius / config.unit_divisor,
            config.reference_distance / config.unit_divisor,
            config.marker_scale,
        )
    }

    pub fn diameter(&self) -> f64 {
        self.diameter
    }

    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// Marker area in pt², `diameter / distance * marker_scale`.
    pub fn marker_size(&self) -> f64 {
        self.diameter / self.distance * self.marker_scale
    }

    /// Always the origin.
    pub fn position(&self) -> Point {
        Point::zeros()
    }

    /// Marker radius in data units for a figure [`FIGURE_WIDTH_PT`] wide
    /// showing `viewport`.
    pub fn display_radius(&self, viewport: &Viewport) -> f64 {
        let radius_pt = self.marker_size().sqrt() / 2.0;
        radius_pt / FIGURE_WIDTH_PT * viewport.width()
    }
}

impl Default for ReferenceBody {
    fn default() -> Self {
        Self::from_config(&AnimatorConfig::default())
    }
}
