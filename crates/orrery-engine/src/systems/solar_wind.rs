//! Solar-wind particle pool: bounded emission from the stellar surface,
//! ballistic integration, swap-remove expiry.

use glam::DVec3;

use crate::api::config::SimulationConfig;
use crate::core::constants::KILOMETER;
use crate::core::rng::Rng;
use crate::renderer::instance::{WindBuffer, WindParticleInstance};

/// Particle energy at emission, eV.
const EMISSION_ENERGY: f64 = 1000.0;

/// Emission limits for one star's wind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindSettings {
    /// Hard cap on live particles.
    pub max_particles: usize,
    /// Cap on particles emitted in a single update.
    pub max_per_frame: usize,
    /// Stellar mass represented by one particle, kg.
    pub mass_per_particle: f64,
}

impl Default for WindSettings {
    fn default() -> Self {
        Self::from_config(&SimulationConfig::default())
    }
}

impl WindSettings {
    pub fn from_config(config: &SimulationConfig) -> Self {
        Self {
            max_particles: config.max_wind_particles,
            max_per_frame: config.max_emission_per_frame,
            mass_per_particle: config.wind_mass_per_particle,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WindParticle {
    /// m
    pub position: DVec3,
    /// m/s
    pub velocity: DVec3,
    /// s
    pub lifetime: f64,
    /// s
    pub age: f64,
    /// eV
    pub energy: f64,
}

impl WindParticle {
    fn emit(origin: DVec3, radius: f64, rng: &mut Rng) -> Self {
        let direction = rng.unit_vector();
        let speed = rng.range(300.0, 500.0) * KILOMETER;
        WindParticle {
            position: origin + direction * radius,
            velocity: direction * speed,
            lifetime: rng.range(100.0, 200.0),
            age: 0.0,
            energy: EMISSION_ENERGY,
        }
    }

    /// Integrate by `dt`. Returns false once past its lifetime.
    pub fn tick(&mut self, dt: f64) -> bool {
        self.position += self.velocity * dt;
        self.age += dt;
        self.age <= self.lifetime
    }

    pub fn to_instance(&self) -> WindParticleInstance {
        WindParticleInstance {
            x: self.position.x as f32,
            y: self.position.y as f32,
            z: self.position.z as f32,
            energy: self.energy as f32,
            age_fraction: (self.age / self.lifetime).clamp(0.0, 1.0) as f32,
            ..Default::default()
        }
    }
}

/// The emitting star, as seen by the pool.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindSource {
    pub position: DVec3,
    /// m
    pub radius: f64,
    /// kg/s
    pub mass_loss_rate: f64,
}

/// Counts from one pool update.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WindReport {
    pub emitted: u64,
    /// Requested emissions refused by the per-frame or total cap.
    pub dropped: u64,
    pub expired: u64,
}

impl WindReport {
    pub fn merge(&mut self, other: &WindReport) {
        self.emitted = self.emitted.saturating_add(other.emitted);
        self.dropped = self.dropped.saturating_add(other.dropped);
        self.expired = self.expired.saturating_add(other.expired);
    }
}

#[derive(Debug, Clone)]
pub struct SolarWindPool {
    particles: Vec<WindParticle>,
    settings: WindSettings,
}

impl SolarWindPool {
    pub fn new(settings: WindSettings) -> Self {
        Self {
            particles: Vec::with_capacity(settings.max_particles.min(1024)),
            settings,
        }
    }

    pub fn settings(&self) -> &WindSettings {
        &self.settings
    }

    /// Replace the limits; excess live particles are discarded.
    pub fn set_settings(&mut self, settings: WindSettings) {
        self.settings = settings;
        self.particles.truncate(settings.max_particles);
    }

    /// Integrate live particles, retire expired ones, then emit.
    pub fn update(&mut self, dt: f64, source: &WindSource, rng: &mut Rng) -> WindReport {
        let mut report = WindReport::default();

        let mut i = 0;
        while i < self.particles.len() {
            if self.particles[i].tick(dt) {
                i += 1;
            } else {
                self.particles.swap_remove(i);
                report.expired += 1;
            }
        }

        let requested = self.requested_emissions(dt, source.mass_loss_rate);
        let room = self.settings.max_particles.saturating_sub(self.particles.len()) as u64;
        let emit = requested.min(self.settings.max_per_frame as u64).min(room);
        for _ in 0..emit {
            self.particles.push(WindParticle::emit(source.position, source.radius, rng));
        }
        report.emitted = emit;
        report.dropped = requested - emit;
        if report.dropped > 0 {
            log::trace!("solar wind dropped {} emissions (live {})", report.dropped, self.particles.len());
        }
        report
    }

    /// `floor(mass_loss_rate / mass_per_particle · dt)`, capped at one full
    /// pool plus one frame's worth so `dropped` stays a usable count.
    fn requested_emissions(&self, dt: f64, mass_loss_rate: f64) -> u64 {
        let expected = mass_loss_rate / self.settings.mass_per_particle * dt;
        if expected.is_nan() || expected <= 0.0 {
            return 0;
        }
        let ceiling = (self.settings.max_particles as u64).saturating_add(self.settings.max_per_frame as u64);
        expected.floor().min(ceiling as f64) as u64
    }

    pub fn particles(&self) -> &[WindParticle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Append every live particle to `buffer`.
    pub fn snapshot(&self, buffer: &mut WindBuffer) {
        for p in &self.particles {
            buffer.push(p.to_instance());
        }
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }
}
