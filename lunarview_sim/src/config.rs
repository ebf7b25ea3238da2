//! Pipeline configuration.
//!
//! One JSON document configures all three stages. Every field has a default,
//! so a file only needs the values it changes:
//!
//! ```json
//! { "sampler": { "sampling_interval": 100 }, "animator": { "repeat": true } }
//! ```

use crate::orbit::OrbitConfig;
use lunarview_core::{AnimatorConfig, LunarError, Result, SamplerConfig};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Orbit generator stage: physics plus where the positions go.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub orbit: OrbitConfig,

    /// Table written with every position (m)
    pub output_file: PathBuf,

    /// Decimals written per value
    pub decimals: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            orbit: OrbitConfig::default(),
            output_file: PathBuf::from("output.csv"),
            decimals: 2,
        }
    }
}

/// Configuration for a full pipeline run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LunarConfig {
    pub simulation: SimulationConfig,
    pub sampler: SamplerConfig,
    pub animator: AnimatorConfig,
}

impl LunarConfig {
    /// Validates every stage.
    pub fn validate(&self) -> Result<()> {
        self.simulation.orbit.validate()?;
        self.sampler.validate()?;
        self.animator.validate()?;
        Ok(())
    }

    /// Loads and validates a JSON config file.
    pub fn load(path: &Path) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).map_err(|e| LunarError::from_open(path, e))?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads `path` when given, otherwise the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Pretty JSON representation.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
