//! Simulation configuration.

use std::time::Duration;

use crate::error::{Result, SimError};

/// Parameters of the synthetic sensor model.
#[derive(Debug, Clone, PartialEq)]
pub struct SamplerConfig {
    /// Latitude of the base point positions are jittered around.
    pub base_lat: f64,
    /// Longitude of the base point positions are jittered around.
    pub base_lon: f64,
    /// Maximum absolute offset applied to latitude and longitude.
    pub position_jitter: f64,
    pub temp_mean: f64,
    pub temp_std_dev: f64,
    /// Per-reading probability of a cold-chain breach excursion.
    pub excursion_probability: f64,
    /// Lower bound of the excursion added on top of the sampled temperature.
    pub excursion_min: f64,
    /// Upper bound of the excursion added on top of the sampled temperature.
    pub excursion_max: f64,
    pub humidity_mean: f64,
    pub humidity_std_dev: f64,
    pub pressure_mean: f64,
    pub pressure_std_dev: f64,
    /// Per-reading probability of the tamper flag.
    pub tamper_probability: f64,
}

impl SamplerConfig {
    /// Check that probabilities, ranges, and deviations are usable.
    pub fn validate(&self) -> Result<()> {
        for (name, p) in [
            ("excursion_probability", self.excursion_probability),
            ("tamper_probability", self.tamper_probability),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(SimError::InvalidArgument(format!(
                    "{name} must be within [0, 1], got {p}"
                )));
            }
        }
        if !(self.excursion_min <= self.excursion_max) {
            return Err(SimError::InvalidArgument(format!(
                "excursion range {}..{} is empty",
                self.excursion_min, self.excursion_max
            )));
        }
        if !(self.position_jitter >= 0.0) {
            return Err(SimError::InvalidArgument(format!(
                "position_jitter must be non-negative, got {}",
                self.position_jitter
            )));
        }
        Ok(())
    }
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            base_lat: 12.9716,
            base_lon: 77.5946,
            position_jitter: 0.02,
            temp_mean: 20.0,
            temp_std_dev: 1.0,
            excursion_probability: 0.02,
            excursion_min: 6.0,
            excursion_max: 12.0,
            humidity_mean: 40.0,
            humidity_std_dev: 3.0,
            pressure_mean: 1008.0,
            pressure_std_dev: 2.0,
            tamper_probability: 0.01,
        }
    }
}

/// Configuration for the simulation controller.
#[derive(Debug, Clone)]
pub struct SimulationConfig {
    /// Roster size used when the caller does not specify one.
    pub default_shipment_count: usize,
    /// Tick interval used when the caller does not specify one.
    pub default_interval: Duration,
    /// Sensor model.
    pub sampler: SamplerConfig,
    /// Fixed RNG seed for reproducible runs; entropy-seeded when `None`.
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            default_shipment_count: 3,
            default_interval: Duration::from_secs(2),
            sampler: SamplerConfig::default(),
            seed: None,
        }
    }
}
