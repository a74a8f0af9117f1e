use glam::{DMat4, DQuat, DVec3, Vec3};
use std::f64::consts::TAU;

use crate::api::error::{ensure_finite, ensure_positive, Result, SimError};
use crate::api::types::BodyId;
use crate::components::material::Material;
use crate::components::planet::{Moon, Orbiter, Planet};
use crate::components::star::Star;
use crate::core::constants::{wrap_angle, C, DAY, G};

/// Builder for the physical constants shared by every body.
#[derive(Debug, Clone)]
pub struct BodyDesc {
    pub name: String,
    /// kg
    pub mass: f64,
    /// m
    pub radius: f64,
    /// Sidereal rotation period, s. Negative for retrograde spin.
    pub rotation_period: f64,
    /// Obliquity, rad.
    pub axial_tilt: f64,
    pub color: Vec3,
    /// Host texture handle for the sphere pass.
    pub texture: Option<u32>,
    /// Initial position (only meaningful for bodies without an orbit).
    pub position: DVec3,
}

impl BodyDesc {
    pub fn new(name: impl Into<String>, mass: f64, radius: f64) -> Self {
        Self {
            name: name.into(),
            mass,
            radius,
            rotation_period: DAY,
            axial_tilt: 0.0,
            color: Vec3::ONE,
            texture: None,
            position: DVec3::ZERO,
        }
    }

    // -- Builder pattern --

    pub fn with_rotation(mut self, rotation_period: f64, axial_tilt: f64) -> Self {
        self.rotation_period = rotation_period;
        self.axial_tilt = axial_tilt;
        self
    }

    pub fn with_color(mut self, color: Vec3) -> Self {
        self.color = color;
        self
    }

    pub fn with_texture(mut self, texture: u32) -> Self {
        self.texture = Some(texture);
        self
    }

    pub fn with_position(mut self, position: DVec3) -> Self {
        self.position = position;
        self
    }
}

/// State shared by every celestial body: identity, physical constants and
/// axial rotation. Only `update_rotation` and `place` mutate it after
/// construction.
#[derive(Debug, Clone)]
pub struct BodyCore {
    name: String,
    position: DVec3,
    /// Informational; derived from the last position change.
    velocity: DVec3,
    mass: f64,
    radius: f64,
    rotation_period: f64,
    axial_tilt: f64,
    /// Current spin angle in [0, 2π).
    rotation_angle: f64,
    color: Vec3,
    texture: Option<u32>,
}

impl BodyCore {
    pub fn new(desc: BodyDesc) -> Result<Self> {
        ensure_positive("mass", desc.mass)?;
        ensure_positive("radius", desc.radius)?;
        if !desc.rotation_period.is_finite() || desc.rotation_period == 0.0 {
            return Err(SimError::invalid(
                "rotation_period",
                format!("must be finite and non-zero, got {}", desc.rotation_period),
            ));
        }
        ensure_finite("axial_tilt", desc.axial_tilt)?;
        if !desc.position.is_finite() {
            return Err(SimError::invalid("position", "must be finite"));
        }
        Ok(Self {
            name: desc.name,
            position: desc.position,
            velocity: DVec3::ZERO,
            mass: desc.mass,
            radius: desc.radius,
            rotation_period: desc.rotation_period,
            axial_tilt: desc.axial_tilt,
            rotation_angle: 0.0,
            color: desc.color,
            texture: desc.texture,
        })
    }

    /// Advance the spin angle by `dt` seconds, wrapped into [0, 2π).
    /// `dt` is expected to be non-negative; negative steps are not guarded.
    pub fn update_rotation(&mut self, dt: f64) {
        self.rotation_angle = wrap_angle(self.rotation_angle + dt / self.rotation_period * TAU);
    }

    /// Move to `position`; the velocity is refreshed when `dt > 0`.
    pub(crate) fn place(&mut self, position: DVec3, dt: f64) {
        if dt > 0.0 {
            self.velocity = (position - self.position) / dt;
        }
        self.position = position;
    }

    pub(crate) fn set_color(&mut self, color: Vec3) {
        self.color = color;
    }

    /// Model matrix: translate, spin about the polar axis, tilt, scale by radius.
    pub fn model_matrix(&self) -> DMat4 {
        DMat4::from_translation(self.position)
            * DMat4::from_quat(DQuat::from_rotation_y(self.rotation_angle))
            * DMat4::from_quat(DQuat::from_rotation_z(self.axial_tilt))
            * DMat4::from_scale(DVec3::splat(self.radius))
    }

    /// `2Gm/c²`, m.
    pub fn schwarzschild_radius(&self) -> f64 {
        2.0 * G * self.mass / (C * C)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn position(&self) -> DVec3 {
        self.position
    }

    pub fn velocity(&self) -> DVec3 {
        self.velocity
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn rotation_period(&self) -> f64 {
        self.rotation_period
    }

    pub fn axial_tilt(&self) -> f64 {
        self.axial_tilt
    }

    pub fn rotation_angle(&self) -> f64 {
        self.rotation_angle
    }

    pub fn color(&self) -> Vec3 {
        self.color
    }

    pub fn texture(&self) -> Option<u32> {
        self.texture
    }
}

/// Every kind of body a scene can hold.
#[derive(Debug, Clone)]
pub enum Body {
    Star(Star),
    Planet(Planet),
    Moon(Moon),
}

impl Body {
    pub fn core(&self) -> &BodyCore {
        match self {
            Body::Star(s) => s.core(),
            Body::Planet(p) => p.core(),
            Body::Moon(m) => m.core(),
        }
    }

    pub fn name(&self) -> &str {
        self.core().name()
    }

    pub fn position(&self) -> DVec3 {
        self.core().position()
    }

    pub fn radius(&self) -> f64 {
        self.core().radius()
    }

    pub fn mass(&self) -> f64 {
        self.core().mass()
    }

    pub fn color(&self) -> Vec3 {
        self.core().color()
    }

    pub fn schwarzschild_radius(&self) -> f64 {
        self.core().schwarzschild_radius()
    }

    pub fn material(&self) -> Material {
        match self {
            Body::Star(s) => s.material(),
            Body::Planet(p) => p.material(),
            Body::Moon(m) => m.material(),
        }
    }

    /// Orbital state, for bodies that orbit something.
    pub fn orbit(&self) -> Option<&Orbiter> {
        match self {
            Body::Star(_) => None,
            Body::Planet(p) => Some(p.orbit()),
            Body::Moon(m) => Some(m.orbit()),
        }
    }

    pub(crate) fn orbit_mut(&mut self) -> Option<&mut Orbiter> {
        match self {
            Body::Star(_) => None,
            Body::Planet(p) => Some(p.orbit_mut()),
            Body::Moon(m) => Some(m.orbit_mut()),
        }
    }

    pub fn parent(&self) -> Option<BodyId> {
        self.orbit().and_then(|o| o.parent())
    }

    pub fn satellites(&self) -> &[BodyId] {
        match self {
            Body::Planet(p) => p.satellites(),
            Body::Star(_) | Body::Moon(_) => &[],
        }
    }

    pub fn as_star(&self) -> Option<&Star> {
        match self {
            Body::Star(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_star_mut(&mut self) -> Option<&mut Star> {
        match self {
            Body::Star(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_planet(&self) -> Option<&Planet> {
        match self {
            Body::Planet(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_planet_mut(&mut self) -> Option<&mut Planet> {
        match self {
            Body::Planet(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_moon(&self) -> Option<&Moon> {
        match self {
            Body::Moon(m) => Some(m),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::constants::{HOUR, SOLAR_MASS};

    fn earth_desc() -> BodyDesc {
        BodyDesc::new("Earth", 5.972e24, 6.371e6).with_rotation(23.934 * HOUR, 0.409)
    }

    #[test]
    fn rejects_bad_physical_constants() {
        assert!(BodyCore::new(BodyDesc::new("x", 0.0, 1.0)).is_err());
        assert!(BodyCore::new(BodyDesc::new("x", 1.0, -1.0)).is_err());
        assert!(BodyCore::new(BodyDesc::new("x", 1.0, 1.0).with_rotation(0.0, 0.0)).is_err());
        assert!(BodyCore::new(BodyDesc::new("x", 1.0, 1.0).with_rotation(f64::NAN, 0.0)).is_err());
        assert!(BodyCore::new(BodyDesc::new("x", 1.0, 1.0).with_rotation(-DAY, 0.0)).is_ok());
    }

    #[test]
    fn rotation_wraps_into_range() {
        let mut core = BodyCore::new(earth_desc()).unwrap();
        for i in 0..10_000 {
            core.update_rotation(0.37 * HOUR * (i % 7) as f64);
            let a = core.rotation_angle();
            assert!((0.0..TAU).contains(&a), "angle {a}");
        }
    }

    #[test]
    fn retrograde_rotation_stays_in_range() {
        let mut core = BodyCore::new(BodyDesc::new("Venus", 4.87e24, 6.05e6).with_rotation(-243.0 * DAY, 3.09)).unwrap();
        core.update_rotation(DAY);
        let a = core.rotation_angle();
        assert!((0.0..TAU).contains(&a));
        assert!(a > std::f64::consts::PI, "retrograde spin should wrap backwards, got {a}");
    }

    #[test]
    fn quarter_period_is_quarter_turn() {
        let mut core = BodyCore::new(BodyDesc::new("x", 1.0, 1.0).with_rotation(4.0, 0.0)).unwrap();
        core.update_rotation(1.0);
        assert!((core.rotation_angle() - TAU / 4.0).abs() < 1e-12);
    }

    #[test]
    fn schwarzschild_radius_of_sun_is_about_3km() {
        let sun = BodyCore::new(BodyDesc::new("Sun", SOLAR_MASS, 6.957e8)).unwrap();
        let rs = sun.schwarzschild_radius();
        assert!((rs - 2953.0).abs() < 5.0, "rs = {rs}");
    }

    #[test]
    fn model_matrix_translates_and_scales() {
        let core = BodyCore::new(
            BodyDesc::new("x", 1.0, 2.0).with_position(DVec3::new(10.0, 0.0, -5.0)),
        )
        .unwrap();
        let m = core.model_matrix();
        let origin = m.transform_point3(DVec3::ZERO);
        assert_eq!(origin, DVec3::new(10.0, 0.0, -5.0));
        let up = m.transform_vector3(DVec3::Y);
        assert!((up.length() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn place_derives_velocity() {
        let mut core = BodyCore::new(earth_desc()).unwrap();
        core.place(DVec3::new(10.0, 0.0, 0.0), 2.0);
        assert_eq!(core.velocity(), DVec3::new(5.0, 0.0, 0.0));
        core.place(DVec3::new(20.0, 0.0, 0.0), 0.0);
        assert_eq!(core.velocity(), DVec3::new(5.0, 0.0, 0.0));
    }
}
