//! Stage configuration for the sampler and the animator.
//!
//! Every constant the pipeline uses lives here with its default, so entry
//! points inject a config instead of embedding literals.

use crate::error::{LunarError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Configuration for the Sampler/Rounder stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplerConfig {
    /// Table to decimate
    pub input_file: PathBuf,

    /// Table to create/overwrite with the kept rows
    pub output_file: PathBuf,

    /// Keep one row out of every `sampling_interval` read
    pub sampling_interval: usize,

    /// Decimal digits kept after rounding
    pub precision: usize,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            input_file: PathBuf::from("output.csv"),
            output_file: PathBuf::from("data_rounded.csv"),
            sampling_interval: 500,
            precision: 1,
        }
    }
}

impl SamplerConfig {
    /// Validates value ranges.
    pub fn validate(&self) -> Result<()> {
        if self.sampling_interval == 0 {
            return Err(LunarError::config("sampling_interval must be > 0"));
        }
        // f64 carries ~17 significant digits; more is never meaningful.
        if self.precision > 17 {
            return Err(LunarError::config(format!(
                "precision must be in [0, 17], got {}",
                self.precision
            )));
        }
        Ok(())
    }
}

/// Configuration for the Trajectory Animator stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimatorConfig {
    /// Table of (x, y) rows in meters
    pub input_file: PathBuf,

    /// Divisor applied to every input value (meters -> kilometers)
    pub unit_divisor: f64,

    /// Reference body (Earth) equatorial radius in input units
    pub body_radius: f64,

    /// Reference separation (Earth-Moon distance) in input units
    pub reference_distance: f64,

    /// Visibility multiplier applied to the diameter/distance ratio
    pub marker_scale: f64,

    /// Time between two animation ticks
    pub frame_interval_ms: u64,

    /// Margin added around the trajectory bounds, in output units
    pub viewport_padding: f64,

    /// Restart from frame 0 after the last frame instead of holding it
    pub repeat: bool,
}

impl Default for AnimatorConfig {
    fn default() -> Self {
        Self {
            input_file: PathBuf::from("data_rounded.csv"),
            unit_divisor: 1000.0,
            body_radius: 6_378_137.0,
            reference_distance: 3.8e8,
            marker_scale: 100_000.0,
            frame_interval_ms: 50,
            viewport_padding: 10.0,
            repeat: false,
        }
    }
}

impl AnimatorConfig {
    /// Validates value ranges.
    pub fn validate(&self) -> Result<()> {
        if !self.unit_divisor.is_finite() || self.unit_divisor == 0.0 {
            return Err(LunarError::config(format!(
                "unit_divisor must be finite and non-zero, got {}",
                self.unit_divisor
            )));
        }
        if !(self.body_radius > 0.0) || !(self.reference_distance > 0.0) {
            return Err(LunarError::config(
                "body_radius and reference_distance must be > 0",
            ));
        }
        if !(self.marker_scale > 0.0) {
            return Err(LunarError::config("marker_scale must be > 0"));
        }
        if self.frame_interval_ms == 0 {
            return Err(LunarError::config("frame_interval_ms must be > 0"));
        }
        if !(self.viewport_padding >= 0.0) {
            return Err(LunarError::config(format!(
                "viewport_padding must be >= 0, got {}",
                self.viewport_padding
            )));
        }
        Ok(())
    }

    /// Time between two animation ticks.
    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(SamplerConfig::default().validate().is_ok());
        assert!(AnimatorConfig::default().validate().is_ok());
    }

    #[test]
    fn test_sampler_defaults() {
        let config = SamplerConfig::default();
        assert_eq!(config.input_file, PathBuf::from("output.csv"));
        assert_eq!(config.output_file, PathBuf::from("data_rounded.csv"));
        assert_eq!(config.sampling_interval, 500);
        assert_eq!(config.precision, 1);
    }

    #[test]
    fn test_zero_interval_rejected() {
        let config = SamplerConfig {
            sampling_interval: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(LunarError::Config(_))));
    }

    #[test]
    fn test_bad_animator_values_rejected() {
        let zero_divisor = AnimatorConfig {
            unit_divisor: 0.0,
            ..Default::default()
        };
        assert!(zero_divisor.validate().is_err());

        let nan_padding = AnimatorConfig {
            viewport_padding: f64::NAN,
            ..Default::default()
        };
        assert!(nan_padding.validate().is_err());

        let no_interval = AnimatorConfig {
            frame_interval_ms: 0,
            ..Default::default()
        };
        assert!(no_interval.validate().is_err());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: AnimatorConfig = serde_json::from_str(r#"{"repeat": true}"#).unwrap();
        assert!(config.repeat);
        assert_eq!(config.frame_interval(), Duration::from_millis(50));
        assert_eq!(config.input_file, PathBuf::from("data_rounded.csv"));
    }
}
