//! Keplerian orbital mechanics: pure math, no scene dependencies.
//!
//! f64 throughout; positions are only narrowed to f32 when a model matrix
//! is handed to the renderer.
//!
//! Frame convention: the reference plane is X-Z with +Y as the polar axis.
//! A planar point at true anomaly ν sits at `(r cos ν, 0, r sin ν)` and is
//! oriented by `R_y(Ω) · R_x(i) · R_y(ω)`.

use glam::DVec3;
use serde::{Deserialize, Serialize};
use std::f64::consts::{PI, TAU};

use crate::api::error::{ensure_finite, ensure_positive, Result, SimError};
use crate::core::constants::{wrap_angle, C, G};

/// Smallest allowed conic denominator `1 + e·cos ν`.
const MIN_CONIC_DENOMINATOR: f64 = 1e-12;
/// Below this eccentricity the eccentric and true anomalies are treated as equal.
const NEAR_CIRCULAR: f64 = 1e-3;
/// Eccentricity clamp for the anomaly conversion.
const MAX_CONVERSION_ECCENTRICITY: f64 = 0.99;
const KEPLER_TOLERANCE: f64 = 1e-12;
const KEPLER_MAX_ITERATIONS: usize = 50;

/// How an orbiting body advances along its orbit each update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrbitModel {
    /// True anomaly advances at a constant angular rate `2π·dt/period`.
    /// Speed does not vary along eccentric orbits. Perturbations are
    /// recorded but not applied.
    #[default]
    ConstantRate,
    /// Mean anomaly advances uniformly and Kepler's equation is solved for
    /// the eccentric anomaly each update. Applies recorded perturbations.
    Kepler,
}

/// Classical orbital elements. Angles in radians, distances in metres,
/// period in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitalElements {
    semi_major_axis: f64,
    eccentricity: f64,
    inclination: f64,
    argument_of_periapsis: f64,
    longitude_ascending_node: f64,
    mean_anomaly_at_epoch: f64,
    orbital_period: f64,
}

impl OrbitalElements {
    /// Create an equatorial orbit with the given shape and period.
    pub fn new(semi_major_axis: f64, eccentricity: f64, orbital_period: f64) -> Result<Self> {
        let elements = Self {
            semi_major_axis,
            eccentricity,
            inclination: 0.0,
            argument_of_periapsis: 0.0,
            longitude_ascending_node: 0.0,
            mean_anomaly_at_epoch: 0.0,
            orbital_period,
        };
        elements.validate()?;
        Ok(elements)
    }

    /// Circular orbit of radius `radius`.
    pub fn circular(radius: f64, orbital_period: f64) -> Result<Self> {
        Self::new(radius, 0.0, orbital_period)
    }

    // -- Builder pattern --

    pub fn with_inclination(mut self, inclination: f64) -> Self {
        self.inclination = inclination;
        self
    }

    pub fn with_argument_of_periapsis(mut self, angle: f64) -> Self {
        self.argument_of_periapsis = angle;
        self
    }

    pub fn with_longitude_ascending_node(mut self, angle: f64) -> Self {
        self.longitude_ascending_node = angle;
        self
    }

    pub fn with_mean_anomaly_at_epoch(mut self, angle: f64) -> Self {
        self.mean_anomaly_at_epoch = angle;
        self
    }

    /// Check every element. Called by `new` and again when a body adopts the
    /// elements, so builder-set angles are covered too.
    pub fn validate(&self) -> Result<()> {
        ensure_positive("semi_major_axis", self.semi_major_axis)?;
        ensure_positive("orbital_period", self.orbital_period)?;
        if !(self.eccentricity.is_finite() && (0.0..1.0).contains(&self.eccentricity)) {
            return Err(SimError::invalid(
                "eccentricity",
                format!("must be in [0, 1), got {}", self.eccentricity),
            ));
        }
        ensure_finite("inclination", self.inclination)?;
        ensure_finite("argument_of_periapsis", self.argument_of_periapsis)?;
        ensure_finite("longitude_ascending_node", self.longitude_ascending_node)?;
        ensure_finite("mean_anomaly_at_epoch", self.mean_anomaly_at_epoch)?;
        Ok(())
    }

    pub fn semi_major_axis(&self) -> f64 {
        self.semi_major_axis
    }

    pub fn eccentricity(&self) -> f64 {
        self.eccentricity
    }

    pub fn inclination(&self) -> f64 {
        self.inclination
    }

    pub fn argument_of_periapsis(&self) -> f64 {
        self.argument_of_periapsis
    }

    pub fn longitude_ascending_node(&self) -> f64 {
        self.longitude_ascending_node
    }

    pub fn mean_anomaly_at_epoch(&self) -> f64 {
        self.mean_anomaly_at_epoch
    }

    pub fn orbital_period(&self) -> f64 {
        self.orbital_period
    }

    /// Mean motion `n = 2π / period`, rad/s.
    pub fn mean_motion(&self) -> f64 {
        TAU / self.orbital_period
    }

    /// Closest distance to the focus, `a(1−e)`.
    pub fn periapsis(&self) -> f64 {
        self.semi_major_axis * (1.0 - self.eccentricity)
    }

    /// Farthest distance from the focus, `a(1+e)`.
    pub fn apoapsis(&self) -> f64 {
        self.semi_major_axis * (1.0 + self.eccentricity)
    }

    /// True anomaly corresponding to the mean anomaly at epoch.
    pub fn true_anomaly_at_epoch(&self) -> f64 {
        mean_to_true_anomaly(self.mean_anomaly_at_epoch, self.eccentricity)
    }
}

/// Perturbation record attached to an orbiting body.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Perturbation {
    /// Parent oblateness coefficient (0 disables).
    pub j2_factor: f64,
    /// Fraction of general-relativistic periapsis precession, clamped to [0, 1].
    pub relativistic_factor: f64,
    /// Constant external force, N.
    pub external_force: DVec3,
}

/// Conic radius `r = a(1−e²)/(1+e·cos ν)`.
pub fn conic_radius(semi_major_axis: f64, eccentricity: f64, true_anomaly: f64) -> f64 {
    let p = semi_major_axis * (1.0 - eccentricity * eccentricity);
    let denom = (1.0 + eccentricity * true_anomaly.cos()).max(MIN_CONIC_DENOMINATOR);
    p / denom
}

/// Point in the orbital plane at distance `r` and true anomaly `nu`.
pub fn planar_position(r: f64, true_anomaly: f64) -> DVec3 {
    DVec3::new(r * true_anomaly.cos(), 0.0, r * true_anomaly.sin())
}

/// Rotate about the polar (Y) axis.
pub fn rotate_y(p: DVec3, angle: f64) -> DVec3 {
    let (s, c) = angle.sin_cos();
    DVec3::new(p.x * c - p.z * s, p.y, p.x * s + p.z * c)
}

/// Rotate about the reference X axis.
pub fn rotate_x(p: DVec3, angle: f64) -> DVec3 {
    let (s, c) = angle.sin_cos();
    DVec3::new(p.x, p.y * c - p.z * s, p.y * s + p.z * c)
}

/// Orient a planar point: argument of periapsis, then inclination, then
/// longitude of the ascending node.
pub fn orient(planar: DVec3, elements: &OrbitalElements) -> DVec3 {
    orient_with_periapsis(planar, elements, elements.argument_of_periapsis)
}

fn orient_with_periapsis(planar: DVec3, elements: &OrbitalElements, argument_of_periapsis: f64) -> DVec3 {
    let mut p = planar;
    if argument_of_periapsis != 0.0 {
        p = rotate_y(p, argument_of_periapsis);
    }
    p = rotate_x(p, elements.inclination);
    if elements.longitude_ascending_node != 0.0 {
        p = rotate_y(p, elements.longitude_ascending_node);
    }
    p
}

/// Position relative to the parent for a given true anomaly.
pub fn position_at_angle(elements: &OrbitalElements, true_anomaly: f64) -> DVec3 {
    let r = conic_radius(elements.semi_major_axis, elements.eccentricity, true_anomaly);
    orient(planar_position(r, true_anomaly), elements)
}

/// Constant-rate anomaly increment for a step of `dt` seconds.
pub fn constant_rate_step(elements: &OrbitalElements, dt: f64) -> f64 {
    TAU * dt / elements.orbital_period
}

/// Solve Kepler's equation `E − e·sin(E) = M` with Newton-Raphson.
/// `mean_anomaly` in radians; returns the eccentric anomaly in radians.
pub fn solve_kepler(mean_anomaly: f64, eccentricity: f64) -> f64 {
    let m = wrap_angle(mean_anomaly);
    // π is a safer start for very elongated orbits
    let mut ea = if eccentricity < 0.8 { m } else { PI };
    for _ in 0..KEPLER_MAX_ITERATIONS {
        let f = ea - eccentricity * ea.sin() - m;
        if f.abs() < KEPLER_TOLERANCE {
            break;
        }
        let derivative = 1.0 - eccentricity * ea.cos();
        let step = f / derivative;
        ea -= step.clamp(-1.0, 1.0);
    }
    ea
}

/// True anomaly from eccentric anomaly, wrapped to `[0, 2π)`.
pub fn eccentric_to_true_anomaly(eccentric_anomaly: f64, eccentricity: f64) -> f64 {
    if eccentricity < NEAR_CIRCULAR {
        return wrap_angle(eccentric_anomaly);
    }
    let e = eccentricity.min(MAX_CONVERSION_ECCENTRICITY);
    let k = ((1.0 + e) / (1.0 - e)).sqrt();
    let nu = 2.0 * (k * (eccentric_anomaly / 2.0).sin()).atan2((eccentric_anomaly / 2.0).cos());
    wrap_angle(nu)
}

/// Eccentric anomaly from true anomaly.
pub fn true_to_eccentric_anomaly(true_anomaly: f64, eccentricity: f64) -> f64 {
    if eccentricity < NEAR_CIRCULAR {
        return wrap_angle(true_anomaly);
    }
    let e = eccentricity.min(MAX_CONVERSION_ECCENTRICITY);
    let k = ((1.0 - e) / (1.0 + e)).sqrt();
    wrap_angle(2.0 * (k * (true_anomaly / 2.0).sin()).atan2((true_anomaly / 2.0).cos()))
}

pub fn mean_to_true_anomaly(mean_anomaly: f64, eccentricity: f64) -> f64 {
    eccentric_to_true_anomaly(solve_kepler(mean_anomaly, eccentricity), eccentricity)
}

pub fn true_to_mean_anomaly(true_anomaly: f64, eccentricity: f64) -> f64 {
    let ea = true_to_eccentric_anomaly(true_anomaly, eccentricity);
    wrap_angle(ea - eccentricity * ea.sin())
}

/// Periapsis advance per orbit from general relativity,
/// `6πGM / (c²·a·(1−e²))`, rad/orbit.
pub fn relativistic_precession_per_orbit(elements: &OrbitalElements, parent_mass: f64) -> f64 {
    let e2 = elements.eccentricity * elements.eccentricity;
    6.0 * PI * G * parent_mass / (C * C * elements.semi_major_axis * (1.0 - e2))
}

/// Oblateness correction of an oriented position relative to the parent.
/// Components are scaled by `1 + f/r` with
/// `f = 1.5·J2·R²/r² · (5z²/r² − k)`, k = 1 on the polar axis, 3 otherwise.
pub fn j2_correction(relative: DVec3, j2_factor: f64, parent_radius: f64) -> DVec3 {
    let r = relative.length();
    if r <= 0.0 || j2_factor <= 0.0 {
        return relative;
    }
    let r2 = r * r;
    let polar2 = relative.y * relative.y;
    let term = 1.5 * j2_factor * parent_radius * parent_radius / r2;
    let factor_polar = term * (5.0 * polar2 / r2 - 1.0);
    let factor_plane = term * (5.0 * polar2 / r2 - 3.0);
    DVec3::new(
        relative.x * (1.0 + factor_plane / r),
        relative.y * (1.0 + factor_polar / r),
        relative.z * (1.0 + factor_plane / r),
    )
}

/// Kepler-model position after `elapsed` seconds since epoch.
/// Returns (true anomaly, relative position) before J2/external corrections.
pub fn kepler_position(
    elements: &OrbitalElements,
    elapsed: f64,
    periapsis_advance: f64,
) -> (f64, DVec3) {
    let e = elements.eccentricity;
    let m = elements.mean_anomaly_at_epoch + elements.mean_motion() * elapsed;
    let ea = solve_kepler(m, e);
    let nu = eccentric_to_true_anomaly(ea, e);
    let r = elements.semi_major_axis * (1.0 - e * ea.cos());
    let omega = elements.argument_of_periapsis + periapsis_advance;
    (nu, orient_with_periapsis(planar_position(r, nu), elements, omega))
}

/// Sampled closed orbit path (relative to the parent) for orbit-line rendering.
pub fn orbit_path(elements: &OrbitalElements, samples: usize) -> Vec<DVec3> {
    (0..samples)
        .map(|i| {
            let nu = i as f64 / samples as f64 * TAU;
            position_at_angle(elements, nu)
        })
        .collect()
}
