//! Configuration of a vehicle estimation run.
//!
//! All sections and keys are optional, missing values take their defaults.
//!
//! ```toml
//! [vehicle]
//! wheel_radius = 50.0
//! max_velocity = 400.0
//! max_angular_acceleration = 10.0
//!
//! [filter]
//! process_noise = [20.0, 20.0]
//! measurement_noise = 10.0
//!
//! [simulation]
//! dt = 0.016666666666666666
//! steps = 600
//! measurement_interval = 10
//! seed = 42
//! initial_variance = 100.0
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::error::EstimateError;
use crate::vehicle::{FilterTuning, VehicleParams};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid configuration: {0}")]
    Invalid(#[from] EstimateError),
}

/// Parameters of a simulation loop driving the reference model and the filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Tick length in seconds.
    pub dt: f64,
    pub steps: usize,
    /// A measurement is taken every `measurement_interval` ticks.
    pub measurement_interval: usize,
    pub seed: u64,
    /// Initial position and velocity variance of the estimate.
    pub initial_variance: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            dt: 1. / 60.,
            steps: 600,
            measurement_interval: 10,
            seed: 42,
            initial_variance: 100.,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub vehicle: VehicleParams,
    pub filter: FilterTuning,
    pub simulation: SimulationConfig,
}

impl Config {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let s = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&s)?;
        debug!(path = %path.display(), ?config, "loaded configuration");
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), EstimateError> {
        self.vehicle.validate()?;
        self.filter.validate()?;
        let sim = &self.simulation;
        if !(sim.dt > 0.) || !sim.dt.is_finite() {
            return Err(EstimateError::InvalidParameter("dt must be positive"));
        }
        if sim.measurement_interval == 0 {
            return Err(EstimateError::InvalidParameter("measurement_interval must be positive"));
        }
        if !(sim.initial_variance >= 0.) || !sim.initial_variance.is_finite() {
            return Err(EstimateError::InvalidParameter("initial_variance must be non negative"));
        }
        Ok(())
    }
}
