//! Solar-system body data: J2000 orbital elements and physical constants.
//!
//! Orbital elements from Standish (1992) / JPL approximate planetary positions.
//! Angles are stored in degrees and converted on the way into the engine.

use glam::Vec3;
use orrery_engine::core::constants::{AU, DAY, HOUR, KILOMETER, SOLAR_MASS, SOLAR_RADIUS, YEAR};
use orrery_engine::{BodyDesc, OrbitalElements, Result};

/// Planet index constants.
pub const MERCURY: usize = 0;
pub const VENUS: usize = 1;
pub const EARTH: usize = 2;
pub const MARS: usize = 3;
pub const JUPITER: usize = 4;
pub const SATURN: usize = 5;
pub const URANUS: usize = 6;
pub const NEPTUNE: usize = 7;
pub const PLUTO: usize = 8;
pub const PLANET_COUNT: usize = 9;
pub const MOON_COUNT: usize = 10;

// ── Sun ──────────────────────────────────────────────────────────────

pub const SUN_TEMPERATURE: f64 = 5778.0;
pub const SUN_LUMINOSITY: f64 = 1.0;
pub const SUN_AGE_YEARS: f64 = 4.6e9;
pub const SUN_ROTATION_DAYS: f64 = 25.38;
pub const SUN_TILT_DEG: f64 = 7.25;

// ── Host texture handles ─────────────────────────────────────────────

pub const SUN_TEXTURE: u32 = 0;
/// Planet textures are `PLANET_TEXTURE_BASE + index`.
pub const PLANET_TEXTURE_BASE: u32 = 1;
pub const SATURN_RING_TEXTURE: u32 = 20;

// ── Saturn's rings (inner C ring to outer F ring) ────────────────────

pub const SATURN_RING_INNER_KM: f64 = 74_500.0;
pub const SATURN_RING_OUTER_KM: f64 = 140_220.0;

/// One planet's J2000 elements and physical constants.
#[derive(Debug, Clone, Copy)]
pub struct PlanetData {
    pub name: &'static str,
    /// Semi-major axis (AU)
    pub a_au: f64,
    pub eccentricity: f64,
    /// Inclination to the ecliptic (degrees)
    pub inclination: f64,
    /// Longitude of the ascending node (degrees)
    pub node: f64,
    /// Mean longitude at J2000 (degrees)
    pub mean_longitude: f64,
    /// Longitude of perihelion (degrees)
    pub perihelion: f64,
    /// Sidereal orbital period (days)
    pub period_days: f64,
    pub mass_kg: f64,
    pub radius_km: f64,
    /// Sidereal rotation period (hours), negative for retrograde spin.
    pub rotation_hours: f64,
    /// Obliquity (degrees)
    pub tilt: f64,
    pub color: (f32, f32, f32),
}

impl PlanetData {
    /// Engine elements: ω = ϖ − Ω and M₀ = L − ϖ.
    pub fn elements(&self) -> Result<OrbitalElements> {
        let elements = OrbitalElements::new(self.a_au * AU, self.eccentricity, self.period_days * DAY)?
            .with_inclination(self.inclination.to_radians())
            .with_longitude_ascending_node(self.node.to_radians())
            .with_argument_of_periapsis((self.perihelion - self.node).to_radians())
            .with_mean_anomaly_at_epoch((self.mean_longitude - self.perihelion).to_radians());
        elements.validate()?;
        Ok(elements)
    }

    pub fn desc(&self, texture: u32) -> BodyDesc {
        BodyDesc::new(self.name, self.mass_kg, self.radius_km * KILOMETER)
            .with_rotation(self.rotation_hours * HOUR, self.tilt.to_radians())
            .with_color(color(self.color))
            .with_texture(texture)
    }
}

pub const PLANETS: [PlanetData; PLANET_COUNT] = [
    PlanetData {
        name: "Mercury", a_au: 0.38710, eccentricity: 0.20563, inclination: 7.005, node: 48.331,
        mean_longitude: 252.251, perihelion: 77.457, period_days: 87.97,
        mass_kg: 3.301e23, radius_km: 2439.7, rotation_hours: 1407.6, tilt: 0.034,
        color: (0.60, 0.55, 0.50),
    },
    PlanetData {
        name: "Venus", a_au: 0.72333, eccentricity: 0.00677, inclination: 3.395, node: 76.680,
        mean_longitude: 181.980, perihelion: 131.564, period_days: 224.70,
        mass_kg: 4.867e24, radius_km: 6051.8, rotation_hours: -5832.5, tilt: 2.64,
        color: (0.90, 0.75, 0.40),
    },
    PlanetData {
        name: "Earth", a_au: 1.00000, eccentricity: 0.01671, inclination: 0.0, node: 0.0,
        mean_longitude: 100.464, perihelion: 102.937, period_days: 365.26,
        mass_kg: 5.972e24, radius_km: 6371.0, rotation_hours: 23.934, tilt: 23.44,
        color: (0.20, 0.40, 0.80),
    },
    PlanetData {
        name: "Mars", a_au: 1.52368, eccentricity: 0.09340, inclination: 1.850, node: 49.558,
        mean_longitude: 355.453, perihelion: 336.060, period_days: 686.98,
        mass_kg: 6.417e23, radius_km: 3389.5, rotation_hours: 24.623, tilt: 25.19,
        color: (0.80, 0.30, 0.15),
    },
    PlanetData {
        name: "Jupiter", a_au: 5.20260, eccentricity: 0.04849, inclination: 1.303, node: 100.464,
        mean_longitude: 34.351, perihelion: 14.331, period_days: 4332.59,
        mass_kg: 1.898e27, radius_km: 69_911.0, rotation_hours: 9.925, tilt: 3.13,
        color: (0.80, 0.70, 0.50),
    },
    PlanetData {
        name: "Saturn", a_au: 9.55491, eccentricity: 0.05551, inclination: 2.485, node: 113.665,
        mean_longitude: 50.077, perihelion: 93.057, period_days: 10_759.22,
        mass_kg: 5.683e26, radius_km: 58_232.0, rotation_hours: 10.656, tilt: 26.73,
        color: (0.85, 0.75, 0.50),
    },
    PlanetData {
        name: "Uranus", a_au: 19.21845, eccentricity: 0.04630, inclination: 0.773, node: 74.006,
        mean_longitude: 314.055, perihelion: 173.005, period_days: 30_688.5,
        mass_kg: 8.681e25, radius_km: 25_362.0, rotation_hours: -17.24, tilt: 82.23,
        color: (0.50, 0.75, 0.85),
    },
    PlanetData {
        name: "Neptune", a_au: 30.11039, eccentricity: 0.00899, inclination: 1.770, node: 131.784,
        mean_longitude: 304.349, perihelion: 48.120, period_days: 60_182.0,
        mass_kg: 1.024e26, radius_km: 24_622.0, rotation_hours: 16.11, tilt: 28.32,
        color: (0.25, 0.35, 0.80),
    },
    // Pluto (dwarf planet, included by popular demand)
    PlanetData {
        name: "Pluto", a_au: 39.482, eccentricity: 0.2488, inclination: 17.16, node: 110.299,
        mean_longitude: 238.929, perihelion: 224.067, period_days: 90_560.0,
        mass_kg: 1.303e22, radius_km: 1188.3, rotation_hours: -153.29, tilt: 57.47,
        color: (0.70, 0.60, 0.50),
    },
];

// ── Moons ────────────────────────────────────────────────────────────

/// Circular orbit relative to the parent planet. Moons are tidally locked,
/// so the rotation period equals the orbital period.
#[derive(Debug, Clone, Copy)]
pub struct MoonData {
    pub name: &'static str,
    /// Index into PLANETS.
    pub parent: usize,
    pub orbit_radius_km: f64,
    pub period_days: f64,
    /// Inclination to the parent's equator (degrees); > 90 is retrograde.
    pub inclination: f64,
    pub mass_kg: f64,
    pub radius_km: f64,
    pub color: (f32, f32, f32),
}

impl MoonData {
    pub fn elements(&self) -> Result<OrbitalElements> {
        Ok(OrbitalElements::circular(self.orbit_radius_km * KILOMETER, self.period_days * DAY)?
            .with_inclination(self.inclination.to_radians()))
    }

    pub fn desc(&self) -> BodyDesc {
        BodyDesc::new(self.name, self.mass_kg, self.radius_km * KILOMETER)
            .with_rotation(self.period_days * DAY, 0.0)
            .with_color(color(self.color))
    }
}

pub const MOONS: [MoonData; MOON_COUNT] = [
    MoonData { name: "Moon",     parent: EARTH,   orbit_radius_km: 384_400.0,   period_days: 27.32,  inclination: 5.145,   mass_kg: 7.342e22, radius_km: 1737.4, color: (0.70, 0.70, 0.70) },
    MoonData { name: "Phobos",   parent: MARS,    orbit_radius_km: 9_376.0,     period_days: 0.319,  inclination: 1.09,    mass_kg: 1.066e16, radius_km: 11.27,  color: (0.50, 0.45, 0.40) },
    MoonData { name: "Deimos",   parent: MARS,    orbit_radius_km: 23_463.0,    period_days: 1.263,  inclination: 0.93,    mass_kg: 1.476e15, radius_km: 6.2,    color: (0.55, 0.50, 0.45) },
    MoonData { name: "Io",       parent: JUPITER, orbit_radius_km: 421_700.0,   period_days: 1.769,  inclination: 0.05,    mass_kg: 8.932e22, radius_km: 1821.6, color: (0.90, 0.80, 0.30) },
    MoonData { name: "Europa",   parent: JUPITER, orbit_radius_km: 671_034.0,   period_days: 3.551,  inclination: 0.47,    mass_kg: 4.800e22, radius_km: 1560.8, color: (0.80, 0.70, 0.50) },
    MoonData { name: "Ganymede", parent: JUPITER, orbit_radius_km: 1_070_412.0, period_days: 7.155,  inclination: 0.20,    mass_kg: 1.482e23, radius_km: 2634.1, color: (0.60, 0.55, 0.50) },
    MoonData { name: "Callisto", parent: JUPITER, orbit_radius_km: 1_882_709.0, period_days: 16.689, inclination: 0.19,    mass_kg: 1.076e23, radius_km: 2410.3, color: (0.35, 0.30, 0.28) },
    MoonData { name: "Titan",    parent: SATURN,  orbit_radius_km: 1_221_870.0, period_days: 15.945, inclination: 0.35,    mass_kg: 1.345e23, radius_km: 2574.7, color: (0.85, 0.70, 0.30) },
    MoonData { name: "Triton",   parent: NEPTUNE, orbit_radius_km: 354_759.0,   period_days: 5.877,  inclination: 156.885, mass_kg: 2.139e22, radius_km: 1353.4, color: (0.60, 0.70, 0.80) },
    MoonData { name: "Charon",   parent: PLUTO,   orbit_radius_km: 19_591.0,    period_days: 6.387,  inclination: 0.0,     mass_kg: 1.586e21, radius_km: 606.0,  color: (0.55, 0.55, 0.55) },
];

pub fn sun_desc() -> BodyDesc {
    BodyDesc::new("Sun", SOLAR_MASS, SOLAR_RADIUS)
        .with_rotation(SUN_ROTATION_DAYS * DAY, SUN_TILT_DEG.to_radians())
        .with_texture(SUN_TEXTURE)
}

pub fn sun_age() -> f64 {
    SUN_AGE_YEARS * YEAR
}

fn color(rgb: (f32, f32, f32)) -> Vec3 {
    Vec3::new(rgb.0, rgb.1, rgb.2)
}
