use serde::{Deserialize, Serialize};

use crate::api::error::{ensure_non_negative, ensure_positive};
use crate::core::orbit::OrbitModel;

/// Simulation-wide configuration, provided by the host.
/// Every field has a default, so a partial (or empty) JSON object is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Seed for the scene-owned PRNG (default: 42).
    pub seed: u64,
    /// Motion model for newly added orbiting bodies (default: constant rate).
    pub orbit_model: OrbitModel,
    /// Fixed simulation step in seconds of wall time (default: 1/60).
    pub fixed_dt: f64,
    /// Simulated seconds per wall-clock second (default: 1.0).
    pub time_scale: f64,
    /// Hard cap on live solar-wind particles per star (default: 10000).
    pub max_wind_particles: usize,
    /// Cap on particles emitted in a single update (default: 100).
    pub max_emission_per_frame: usize,
    /// Stellar mass represented by one wind particle, kg (default: 1e15).
    pub wind_mass_per_particle: f64,
    /// Cap on live starspots; the oldest is evicted on overflow (default: 100).
    pub max_spots: usize,
    /// Cap on live prominences; new spawns are dropped on overflow (default: 50).
    pub max_prominences: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            orbit_model: OrbitModel::ConstantRate,
            fixed_dt: 1.0 / 60.0,
            time_scale: 1.0,
            max_wind_particles: 10_000,
            max_emission_per_frame: 100,
            wind_mass_per_particle: 1e15,
            max_spots: 100,
            max_prominences: 50,
        }
    }
}

impl SimulationConfig {
    /// Parse a configuration from a JSON string.
    pub fn from_json(json: &str) -> crate::Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the clock or the wind pool cannot run with.
    pub fn validate(&self) -> crate::Result<()> {
        ensure_positive("fixed_dt", self.fixed_dt)?;
        ensure_non_negative("time_scale", self.time_scale)?;
        ensure_positive("wind_mass_per_particle", self.wind_mass_per_particle)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_orbit_model(mut self, model: OrbitModel) -> Self {
        self.orbit_model = model;
        self
    }

    pub fn with_max_wind_particles(mut self, max: usize) -> Self {
        self.max_wind_particles = max;
        self
    }

    pub fn with_time_scale(mut self, scale: f64) -> Self {
        self.time_scale = scale;
        self
    }
}
