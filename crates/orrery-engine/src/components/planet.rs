use glam::DVec3;

use crate::api::error::{ensure_finite, Result, SimError};
use crate::api::types::BodyId;
use crate::components::body::{BodyCore, BodyDesc};
use crate::components::material::Material;
use crate::components::ring::RingSpec;
use crate::core::constants::wrap_angle;
use crate::core::orbit::{
    constant_rate_step, j2_correction, kepler_position, position_at_angle,
    relativistic_precession_per_orbit, OrbitModel, OrbitalElements, Perturbation,
};

/// Snapshot of the parent body an orbiter is placed around.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParentFrame {
    pub position: DVec3,
    pub radius: f64,
    pub mass: f64,
}

/// Orbital state shared by planets and moons.
#[derive(Debug, Clone)]
pub struct Orbiter {
    elements: OrbitalElements,
    parent: Option<BodyId>,
    /// `None` means "use the scene's configured model".
    model: Option<OrbitModel>,
    /// True anomaly in [0, 2π).
    orbital_angle: f64,
    /// Time since epoch, folded into one period (Kepler model).
    elapsed: f64,
    /// Accumulated relativistic periapsis shift, rad.
    periapsis_shift: f64,
    /// Accumulated external-force displacement, m.
    drift: DVec3,
    perturbation: Perturbation,
}

impl Orbiter {
    pub fn new(elements: OrbitalElements, parent: Option<BodyId>) -> Result<Self> {
        elements.validate()?;
        Ok(Self {
            elements,
            parent,
            model: None,
            orbital_angle: elements.true_anomaly_at_epoch(),
            elapsed: 0.0,
            periapsis_shift: 0.0,
            drift: DVec3::ZERO,
            perturbation: Perturbation::default(),
        })
    }

    /// Advance along the orbit and return the new absolute position.
    pub fn advance(&mut self, dt: f64, mass: f64, parent: Option<&ParentFrame>) -> DVec3 {
        let origin = parent.map_or(DVec3::ZERO, |p| p.position);
        let relative = match self.model() {
            OrbitModel::ConstantRate => {
                self.orbital_angle = wrap_angle(self.orbital_angle + constant_rate_step(&self.elements, dt));
                position_at_angle(&self.elements, self.orbital_angle)
            }
            OrbitModel::Kepler => self.advance_kepler(dt, mass, parent),
        };
        origin + relative
    }

    fn advance_kepler(&mut self, dt: f64, mass: f64, parent: Option<&ParentFrame>) -> DVec3 {
        let period = self.elements.orbital_period();
        self.elapsed = (self.elapsed + dt).rem_euclid(period);

        let p = &self.perturbation;
        if let Some(frame) = parent {
            if p.relativistic_factor > 0.0 && self.elements.eccentricity() > 0.0 {
                let per_orbit = relativistic_precession_per_orbit(&self.elements, frame.mass);
                self.periapsis_shift =
                    wrap_angle(self.periapsis_shift + p.relativistic_factor * per_orbit * dt / period);
            }
        }
        if p.external_force != DVec3::ZERO {
            self.drift += p.external_force / mass * 0.5 * dt * dt;
        }

        let (nu, mut relative) = kepler_position(&self.elements, self.elapsed, self.periapsis_shift);
        self.orbital_angle = nu;
        if let Some(frame) = parent {
            relative = j2_correction(relative, self.perturbation.j2_factor, frame.radius);
        }
        relative + self.drift
    }

    pub fn elements(&self) -> &OrbitalElements {
        &self.elements
    }

    pub fn parent(&self) -> Option<BodyId> {
        self.parent
    }

    pub fn model(&self) -> OrbitModel {
        self.model.unwrap_or_default()
    }

    pub(crate) fn has_explicit_model(&self) -> bool {
        self.model.is_some()
    }

    pub fn set_model(&mut self, model: OrbitModel) {
        self.model = Some(model);
    }

    pub fn orbital_angle(&self) -> f64 {
        self.orbital_angle
    }

    pub fn perturbation(&self) -> &Perturbation {
        &self.perturbation
    }

    pub fn periapsis_shift(&self) -> f64 {
        self.periapsis_shift
    }

    /// Parent oblateness coefficient; negative values disable the correction.
    pub fn set_perturbation_j2(&mut self, j2: f64) -> Result<()> {
        ensure_finite("j2", j2)?;
        self.perturbation.j2_factor = j2.max(0.0);
        Ok(())
    }

    /// Fraction of general-relativistic precession applied, clamped to [0, 1].
    pub fn set_relativistic_factor(&mut self, factor: f64) -> Result<()> {
        ensure_finite("relativistic_factor", factor)?;
        self.perturbation.relativistic_factor = factor.clamp(0.0, 1.0);
        Ok(())
    }

    /// Add a constant force, N, to the external-force accumulator.
    pub fn apply_external_force(&mut self, force: DVec3) -> Result<()> {
        if !force.is_finite() {
            return Err(SimError::invalid("external_force", "must be finite"));
        }
        self.perturbation.external_force += force;
        Ok(())
    }
}

/// A body orbiting a star (or a fixed point), optionally ringed, with its
/// own satellites.
#[derive(Debug, Clone)]
pub struct Planet {
    core: BodyCore,
    orbit: Orbiter,
    satellites: Vec<BodyId>,
    rings: Option<RingSpec>,
    ring_generation: u32,
}

impl Planet {
    pub fn new(desc: BodyDesc, elements: OrbitalElements, parent: Option<BodyId>) -> Result<Self> {
        let core = BodyCore::new(desc)?;
        let orbit = Orbiter::new(elements, parent)?;
        let mut planet = Self {
            core,
            orbit,
            satellites: Vec::new(),
            rings: None,
            ring_generation: 0,
        };
        planet.update(0.0, None);
        Ok(planet)
    }

    pub fn with_orbit_model(mut self, model: OrbitModel) -> Self {
        self.orbit.set_model(model);
        self
    }

    /// Spin, then move along the orbit around `parent`. Satellites are
    /// updated afterwards by the scene.
    pub fn update(&mut self, dt: f64, parent: Option<&ParentFrame>) {
        self.core.update_rotation(dt);
        let position = self.orbit.advance(dt, self.core.mass(), parent);
        self.core.place(position, dt);
    }

    /// Record a satellite. Duplicates are ignored.
    pub fn add_satellite(&mut self, satellite: BodyId) {
        if !self.satellites.contains(&satellite) {
            self.satellites.push(satellite);
        }
    }

    /// Build (or rebuild) the ring annulus. Requires `outer > inner > 0`.
    pub fn enable_rings(&mut self, texture: u32, inner_radius: f64, outer_radius: f64) -> Result<()> {
        let generation = self.ring_generation + 1;
        let rings = RingSpec::new(texture, inner_radius, outer_radius, generation)?;
        self.ring_generation = generation;
        self.rings = Some(rings);
        log::info!(
            "rings enabled on {} ({:.3e}..{:.3e} m, generation {})",
            self.core.name(),
            inner_radius,
            outer_radius,
            generation
        );
        Ok(())
    }

    pub fn disable_rings(&mut self) {
        self.rings = None;
    }

    pub fn core(&self) -> &BodyCore {
        &self.core
    }

    pub fn orbit(&self) -> &Orbiter {
        &self.orbit
    }

    pub fn orbit_mut(&mut self) -> &mut Orbiter {
        &mut self.orbit
    }

    pub fn satellites(&self) -> &[BodyId] {
        &self.satellites
    }

    pub fn rings(&self) -> Option<&RingSpec> {
        self.rings.as_ref()
    }

    pub fn material(&self) -> Material {
        Material::new(self.core.color()).with_specular(0.5).with_shininess(50.0)
    }
}

/// A natural satellite. Orbits like a planet but carries no rings or
/// satellites of its own.
#[derive(Debug, Clone)]
pub struct Moon {
    core: BodyCore,
    orbit: Orbiter,
}

impl Moon {
    pub fn new(desc: BodyDesc, elements: OrbitalElements, parent: BodyId) -> Result<Self> {
        let core = BodyCore::new(desc)?;
        let orbit = Orbiter::new(elements, Some(parent))?;
        let mut moon = Self { core, orbit };
        moon.update(0.0, None);
        Ok(moon)
    }

    pub fn with_orbit_model(mut self, model: OrbitModel) -> Self {
        self.orbit.set_model(model);
        self
    }

    pub fn update(&mut self, dt: f64, parent: Option<&ParentFrame>) {
        self.core.update_rotation(dt);
        let position = self.orbit.advance(dt, self.core.mass(), parent);
        self.core.place(position, dt);
    }

    pub fn core(&self) -> &BodyCore {
        &self.core
    }

    pub fn orbit(&self) -> &Orbiter {
        &self.orbit
    }

    pub fn orbit_mut(&mut self) -> &mut Orbiter {
        &mut self.orbit
    }

    pub fn material(&self) -> Material {
        Material::new(self.core.color()).with_specular(0.5).with_shininess(10.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::constants::{AU, DAY, HOUR, SOLAR_MASS, YEAR};
    use std::f64::consts::{PI, TAU};

    fn sun_frame() -> ParentFrame {
        ParentFrame { position: DVec3::ZERO, radius: 6.957e8, mass: SOLAR_MASS }
    }

    fn earth(elements: OrbitalElements) -> Planet {
        let desc = BodyDesc::new("Earth", 5.972e24, 6.371e6).with_rotation(23.934 * HOUR, 0.409);
        Planet::new(desc, elements, Some(BodyId(0))).unwrap()
    }

    #[test]
    fn circular_orbit_keeps_one_au() {
        let mut planet = earth(OrbitalElements::circular(AU, YEAR).unwrap());
        for _ in 0..500 {
            planet.update(DAY, Some(&sun_frame()));
            let d = planet.core().position().length();
            assert!(((d - AU) / AU).abs() < 1e-4, "distance {d}");
        }
    }

    #[test]
    fn angles_stay_in_range() {
        let elements = OrbitalElements::new(AU, 0.3, YEAR).unwrap();
        for model in [OrbitModel::ConstantRate, OrbitModel::Kepler] {
            let mut planet = earth(elements).with_orbit_model(model);
            for i in 0..2_000 {
                planet.update(3.7 * DAY * (1 + i % 5) as f64, Some(&sun_frame()));
                let nu = planet.orbit().orbital_angle();
                assert!((0.0..TAU).contains(&nu), "{model:?} angle {nu}");
                assert!((0.0..TAU).contains(&planet.core().rotation_angle()));
            }
        }
    }

    #[test]
    fn radius_stays_between_apsides() {
        let elements = OrbitalElements::new(AU, 0.6, YEAR).unwrap();
        for model in [OrbitModel::ConstantRate, OrbitModel::Kepler] {
            let mut planet = earth(elements).with_orbit_model(model);
            for _ in 0..400 {
                planet.update(DAY, Some(&sun_frame()));
                let r = planet.core().position().length();
                assert!(r >= elements.periapsis() * (1.0 - 1e-9));
                assert!(r <= elements.apoapsis() * (1.0 + 1e-9));
            }
        }
    }

    #[test]
    fn position_follows_parent() {
        let elements = OrbitalElements::circular(3.844e8, 27.32 * DAY).unwrap();
        let desc = BodyDesc::new("Moon", 7.342e22, 1.737e6);
        let mut moon = Moon::new(desc, elements, BodyId(1)).unwrap();
        let parent = ParentFrame { position: DVec3::new(AU, 0.0, 0.0), radius: 6.371e6, mass: 5.972e24 };
        moon.update(HOUR, Some(&parent));
        let d = (moon.core().position() - parent.position).length();
        assert!((d - 3.844e8).abs() / 3.844e8 < 1e-9);
    }

    #[test]
    fn velocity_matches_circular_speed() {
        let mut planet = earth(OrbitalElements::circular(AU, YEAR).unwrap());
        planet.update(HOUR, Some(&sun_frame()));
        let expected = TAU * AU / YEAR;
        let v = planet.core().velocity().length();
        assert!((v - expected).abs() / expected < 1e-3, "v = {v}");
    }

    #[test]
    fn constant_rate_ignores_perturbations() {
        let elements = OrbitalElements::new(AU, 0.2, YEAR).unwrap();
        let mut plain = earth(elements);
        let mut perturbed = earth(elements);
        perturbed.orbit_mut().set_perturbation_j2(0.1).unwrap();
        perturbed.orbit_mut().set_relativistic_factor(1.0).unwrap();
        perturbed.orbit_mut().apply_external_force(DVec3::new(1e20, 0.0, 0.0)).unwrap();
        for _ in 0..50 {
            plain.update(DAY, Some(&sun_frame()));
            perturbed.update(DAY, Some(&sun_frame()));
        }
        assert_eq!(plain.core().position(), perturbed.core().position());
    }

    #[test]
    fn kepler_model_applies_precession() {
        let elements = OrbitalElements::new(5.79e10, 0.2056, 87.97 * DAY).unwrap();
        let mut planet = earth(elements).with_orbit_model(OrbitModel::Kepler);
        planet.orbit_mut().set_relativistic_factor(1.0).unwrap();
        for _ in 0..88 {
            planet.update(DAY, Some(&sun_frame()));
        }
        let shift = planet.orbit().periapsis_shift();
        // about 0.1 arcsec per Mercury orbit
        assert!(shift > 4e-7 && shift < 6e-7, "shift = {shift}");
    }

    #[test]
    fn kepler_model_applies_external_force() {
        let elements = OrbitalElements::circular(AU, YEAR).unwrap();
        let mut free = earth(elements).with_orbit_model(OrbitModel::Kepler);
        let mut pushed = earth(elements).with_orbit_model(OrbitModel::Kepler);
        pushed.orbit_mut().apply_external_force(DVec3::new(0.0, 5.972e24, 0.0)).unwrap();
        free.update(10.0, Some(&sun_frame()));
        pushed.update(10.0, Some(&sun_frame()));
        let offset = pushed.core().position() - free.core().position();
        assert!((offset.y - 50.0).abs() < 1e-6, "offset {offset:?}");
    }

    #[test]
    fn kepler_model_applies_j2_in_the_equatorial_plane() {
        let elements = OrbitalElements::circular(2.0, 100.0).unwrap();
        let parent = ParentFrame { position: DVec3::ZERO, radius: 1.0, mass: 1.0e3 };
        let mut free = earth(elements).with_orbit_model(OrbitModel::Kepler);
        let mut oblate = earth(elements).with_orbit_model(OrbitModel::Kepler);
        oblate.orbit_mut().set_perturbation_j2(0.1).unwrap();

        for _ in 0..7 {
            free.update(3.0, Some(&parent));
            oblate.update(3.0, Some(&parent));
            let base = free.core().position();
            let r = base.length();
            // y = 0, so k = 3 on both in-plane axes
            let scale = 1.0 + 1.5 * 0.1 * 1.0 / (r * r) * -3.0 / r;
            let expected = DVec3::new(base.x * scale, 0.0, base.z * scale);
            let got = oblate.core().position();
            assert!((got - expected).length() < 1e-12, "got {got:?}, expected {expected:?}");
            assert!(got.length() < base.length());
        }
    }

    #[test]
    fn j2_needs_a_parent() {
        let elements = OrbitalElements::circular(2.0, 100.0).unwrap();
        let mut free = earth(elements).with_orbit_model(OrbitModel::Kepler);
        let mut oblate = earth(elements).with_orbit_model(OrbitModel::Kepler);
        oblate.orbit_mut().set_perturbation_j2(0.1).unwrap();
        free.update(3.0, None);
        oblate.update(3.0, None);
        assert_eq!(free.core().position(), oblate.core().position());
    }

    #[test]
    fn relativistic_factor_is_clamped() {
        let mut planet = earth(OrbitalElements::circular(AU, YEAR).unwrap());
        planet.orbit_mut().set_relativistic_factor(5.0).unwrap();
        assert_eq!(planet.orbit().perturbation().relativistic_factor, 1.0);
        planet.orbit_mut().set_relativistic_factor(-1.0).unwrap();
        assert_eq!(planet.orbit().perturbation().relativistic_factor, 0.0);
        assert!(planet.orbit_mut().set_relativistic_factor(f64::NAN).is_err());
    }

    #[test]
    fn enable_rings_validates_and_bumps_generation() {
        let mut planet = earth(OrbitalElements::circular(AU, YEAR).unwrap());
        assert!(planet.enable_rings(1, 2.0e7, 1.0e7).is_err());
        assert!(planet.rings().is_none());
        planet.enable_rings(1, 1.0e7, 2.0e7).unwrap();
        assert_eq!(planet.rings().unwrap().geometry().generation(), 1);
        planet.enable_rings(2, 1.0e7, 3.0e7).unwrap();
        let rings = planet.rings().unwrap();
        assert_eq!(rings.geometry().generation(), 2);
        assert_eq!(rings.texture(), 2);

        planet.disable_rings();
        assert!(planet.rings().is_none());
        planet.enable_rings(3, 1.0e7, 2.0e7).unwrap();
        assert_eq!(planet.rings().unwrap().geometry().generation(), 3);
    }

    #[test]
    fn add_satellite_ignores_duplicates() {
        let mut planet = earth(OrbitalElements::circular(AU, YEAR).unwrap());
        planet.add_satellite(BodyId(3));
        planet.add_satellite(BodyId(3));
        planet.add_satellite(BodyId(4));
        assert_eq!(planet.satellites(), &[BodyId(3), BodyId(4)]);
    }

    #[test]
    fn initial_angle_comes_from_mean_anomaly() {
        let elements = OrbitalElements::circular(AU, YEAR).unwrap().with_mean_anomaly_at_epoch(PI / 2.0);
        let planet = earth(elements);
        assert!((planet.orbit().orbital_angle() - PI / 2.0).abs() < 1e-9);
        let p = planet.core().position();
        assert!(p.x.abs() < 1.0 && (p.z - AU).abs() < 1.0, "p = {p:?}");
    }
}
