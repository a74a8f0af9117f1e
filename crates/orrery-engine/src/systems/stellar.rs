//! Stellar astrophysics: blackbody color, Harvard/Yerkes classification and
//! the derived interior/activity properties a star refreshes every update.

use std::f64::consts::{PI, TAU};
use std::fmt;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::core::constants::{
    SIGMA, SOLAR_ABSOLUTE_MAGNITUDE, SOLAR_CYCLE, SOLAR_LUMINOSITY, SOLAR_MASS, SOLAR_RADIUS,
    SOLAR_ROTATION_PERIOD, YEAR,
};

pub const MIN_COLOR_TEMPERATURE: f64 = 1000.0;
pub const MAX_COLOR_TEMPERATURE: f64 = 40_000.0;

/// Main-sequence lifetime of a one-solar-mass star, years.
const SOLAR_LIFESPAN_YEARS: f64 = 1e10;
const SOLAR_CORE_TEMPERATURE: f64 = 1.57e7;
const SOLAR_CORE_PRESSURE: f64 = 2.65e16;
/// Reimers coefficient, solar masses per year.
const REIMERS_COEFFICIENT: f64 = 4e-13;
/// Surface field of a solar-rotation star at minimum activity, tesla.
const BASE_FIELD_STRENGTH: f64 = 1e-4;

/// Approximate RGB of a blackbody at `temperature` kelvin, each channel in
/// [0, 1]. Temperature is clamped to [1000, 40000] K.
pub fn color_from_temperature(temperature: f64) -> Vec3 {
    let temp = temperature.clamp(MIN_COLOR_TEMPERATURE, MAX_COLOR_TEMPERATURE) / 100.0;

    let red = if temp <= 66.0 {
        255.0
    } else {
        329.698727446 * (temp - 60.0).powf(-0.1332047592)
    };

    let green = if temp <= 66.0 {
        99.4708025861 * temp.ln() - 161.1195681661
    } else {
        288.1221695283 * (temp - 60.0).powf(-0.0755148492)
    };

    let blue = if temp >= 66.0 {
        255.0
    } else if temp <= 19.0 {
        0.0
    } else {
        138.5177312231 * (temp - 10.0).ln() - 305.0447927307
    };

    let channel = |v: f64| (v.clamp(0.0, 255.0) / 255.0) as f32;
    Vec3::new(channel(red), channel(green), channel(blue))
}

/// Stefan-Boltzmann luminosity `4πr²σT⁴`, W.
pub fn stefan_boltzmann_luminosity(radius: f64, temperature: f64) -> f64 {
    4.0 * PI * radius * radius * SIGMA * temperature.powi(4)
}

/// Absolute visual magnitude from a luminosity in solar units.
pub fn absolute_magnitude(luminosity_solar: f64) -> f64 {
    SOLAR_ABSOLUTE_MAGNITUDE - 2.5 * luminosity_solar.log10()
}

/// Position in the 11-year activity cycle, in [0, 1).
pub fn solar_cycle_phase(elapsed: f64) -> f64 {
    elapsed.rem_euclid(SOLAR_CYCLE) / SOLAR_CYCLE
}

/// Activity level in [0, 1] for a cycle phase.
pub fn cycle_activity(phase: f64) -> f64 {
    ((TAU * phase).sin() + 1.0) / 2.0
}

#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpectralClass {
    O,
    B,
    A,
    F,
    G,
    K,
    M,
}

impl SpectralClass {
    pub fn from_temperature(temperature: f64) -> Self {
        match temperature {
            t if t >= 30_000.0 => SpectralClass::O,
            t if t >= 10_000.0 => SpectralClass::B,
            t if t >= 7_500.0 => SpectralClass::A,
            t if t >= 6_000.0 => SpectralClass::F,
            t if t >= 5_200.0 => SpectralClass::G,
            t if t >= 3_700.0 => SpectralClass::K,
            _ => SpectralClass::M,
        }
    }
}

impl fmt::Display for SpectralClass {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let str = match self {
            SpectralClass::O => "O",
            SpectralClass::B => "B",
            SpectralClass::A => "A",
            SpectralClass::F => "F",
            SpectralClass::G => "G",
            SpectralClass::K => "K",
            SpectralClass::M => "M",
        };
        write!(f, "{}", str)
    }
}

#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LuminosityClass {
    IA,  // Bright supergiants
    IB,  // Supergiants
    II,  // Bright giants
    III, // Normal giants
    IV,  // Subgiants
    V,   // Main sequence
    VI,  // Subdwarfs
    VII, // White dwarfs
}

impl LuminosityClass {
    /// Classify by radius alone. VI and VII are never produced here.
    pub fn from_radius(radius: f64) -> Self {
        match radius / SOLAR_RADIUS {
            r if r > 100.0 => LuminosityClass::IA,
            r if r > 50.0 => LuminosityClass::IB,
            r if r > 25.0 => LuminosityClass::II,
            r if r > 10.0 => LuminosityClass::III,
            r if r > 2.0 => LuminosityClass::IV,
            _ => LuminosityClass::V,
        }
    }
}

impl fmt::Display for LuminosityClass {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let str = match self {
            LuminosityClass::IA => "Ia",
            LuminosityClass::IB => "Ib",
            LuminosityClass::II => "II",
            LuminosityClass::III => "III",
            LuminosityClass::IV => "IV",
            LuminosityClass::V => "V",
            LuminosityClass::VI => "VI",
            LuminosityClass::VII => "VII",
        };
        write!(f, "{}", str)
    }
}

/// Inputs for [`StellarProperties::derive`]. SI units except `luminosity`
/// (solar units).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StellarState {
    pub mass: f64,
    pub radius: f64,
    pub temperature: f64,
    pub luminosity: f64,
    pub rotation_period: f64,
    /// Seconds.
    pub age: f64,
    /// Host-supplied mass-loss rate, kg/s.
    pub mass_loss_override: Option<f64>,
}

/// Properties derived from a star's mass, radius, temperature, luminosity
/// and age. SI units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StellarProperties {
    pub spectral_class: SpectralClass,
    pub luminosity_class: LuminosityClass,
    /// Seconds.
    pub age: f64,
    /// Main-sequence lifetime, seconds.
    pub lifespan: f64,
    /// Fraction of core hydrogen left, in [0, 1].
    pub fuel_remaining: f64,
    /// Pa
    pub core_pressure: f64,
    /// K
    pub core_temperature: f64,
    /// kg/s
    pub mass_loss_rate: f64,
    /// Equatorial rotation speed, m/s.
    pub rotational_velocity: f64,
    /// Surface field, T.
    pub magnetic_field_strength: f64,
    /// In [0, 1).
    pub solar_cycle_phase: f64,
}

impl StellarProperties {
    pub fn derive(state: &StellarState) -> Self {
        let mass = state.mass / SOLAR_MASS;
        let radius = state.radius / SOLAR_RADIUS;
        let phase = solar_cycle_phase(state.age);
        let activity = cycle_activity(phase);
        let period = state.rotation_period.abs();

        let lifespan = SOLAR_LIFESPAN_YEARS * mass.powf(-2.5) * YEAR;
        let reimers = REIMERS_COEFFICIENT * state.luminosity * radius / mass * SOLAR_MASS / YEAR;

        Self {
            spectral_class: SpectralClass::from_temperature(state.temperature),
            luminosity_class: LuminosityClass::from_radius(state.radius),
            age: state.age,
            lifespan,
            fuel_remaining: (1.0 - state.age / lifespan).clamp(0.0, 1.0),
            core_pressure: SOLAR_CORE_PRESSURE * mass * mass / radius.powi(4),
            core_temperature: SOLAR_CORE_TEMPERATURE * mass / radius,
            mass_loss_rate: state.mass_loss_override.unwrap_or(reimers),
            rotational_velocity: TAU * state.radius / period,
            magnetic_field_strength: BASE_FIELD_STRENGTH * (SOLAR_ROTATION_PERIOD / period) * (0.5 + 0.5 * activity),
            solar_cycle_phase: phase,
        }
    }
}

/// Luminosity in solar units.
pub fn to_solar_luminosity(watts: f64) -> f64 {
    watts / SOLAR_LUMINOSITY
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::constants::{SOLAR_TEMPERATURE, SOLAR_CYCLE};

    fn sun_state() -> StellarState {
        StellarState {
            mass: SOLAR_MASS,
            radius: SOLAR_RADIUS,
            temperature: SOLAR_TEMPERATURE,
            luminosity: 1.0,
            rotation_period: SOLAR_ROTATION_PERIOD,
            age: 4.6e9 * YEAR,
            mass_loss_override: None,
        }
    }

    #[test]
    fn color_is_white_near_6600k() {
        let c = color_from_temperature(6600.0);
        assert!((c.x - c.y).abs() < 0.05 && (c.y - c.z).abs() < 0.05, "{c:?}");
    }

    #[test]
    fn cool_stars_are_red_hot_stars_are_blue() {
        let cool = color_from_temperature(1000.0);
        assert!(cool.x > cool.z);
        let hot = color_from_temperature(40_000.0);
        assert_eq!(hot.z, 1.0);
        assert!(hot.z > hot.x);
    }

    #[test]
    fn color_clamps_temperature() {
        assert_eq!(color_from_temperature(10.0), color_from_temperature(1000.0));
        assert_eq!(color_from_temperature(1e6), color_from_temperature(40_000.0));
        for t in [1000.0, 3000.0, 5778.0, 6600.0, 6700.0, 12_000.0, 40_000.0] {
            let c = color_from_temperature(t);
            for ch in c.to_array() {
                assert!((0.0..=1.0).contains(&ch), "{t} K -> {c:?}");
            }
        }
    }

    #[test]
    fn blue_saturates_from_6600k() {
        assert_eq!(color_from_temperature(6600.0).z, 1.0);
        assert_eq!(color_from_temperature(9000.0).z, 1.0);
        assert!(color_from_temperature(5000.0).z < 1.0);
    }

    #[test]
    fn spectral_classes() {
        assert_eq!(SpectralClass::from_temperature(5778.0), SpectralClass::G);
        assert_eq!(SpectralClass::from_temperature(35_000.0), SpectralClass::O);
        assert_eq!(SpectralClass::from_temperature(3000.0), SpectralClass::M);
        assert_eq!(SpectralClass::from_temperature(10_000.0), SpectralClass::B);
        assert_eq!(SpectralClass::from_temperature(7_499.0), SpectralClass::F);
        assert_eq!(SpectralClass::G.to_string(), "G");
    }

    #[test]
    fn luminosity_classes() {
        assert_eq!(LuminosityClass::from_radius(SOLAR_RADIUS), LuminosityClass::V);
        assert_eq!(LuminosityClass::from_radius(5.0 * SOLAR_RADIUS), LuminosityClass::IV);
        assert_eq!(LuminosityClass::from_radius(20.0 * SOLAR_RADIUS), LuminosityClass::III);
        assert_eq!(LuminosityClass::from_radius(30.0 * SOLAR_RADIUS), LuminosityClass::II);
        assert_eq!(LuminosityClass::from_radius(60.0 * SOLAR_RADIUS), LuminosityClass::IB);
        assert_eq!(LuminosityClass::from_radius(900.0 * SOLAR_RADIUS), LuminosityClass::IA);
        assert_eq!(LuminosityClass::IA.to_string(), "Ia");
    }

    #[test]
    fn sun_magnitude_and_luminosity() {
        assert!((absolute_magnitude(1.0) - 4.83).abs() < 0.01);
        let l = to_solar_luminosity(stefan_boltzmann_luminosity(SOLAR_RADIUS, SOLAR_TEMPERATURE));
        assert!((l - 1.0).abs() < 0.01, "L = {l}");
    }

    #[test]
    fn sun_properties_are_plausible() {
        let p = StellarProperties::derive(&sun_state());
        assert_eq!(p.spectral_class, SpectralClass::G);
        assert_eq!(p.luminosity_class, LuminosityClass::V);
        assert!((p.fuel_remaining - 0.54).abs() < 1e-6);
        assert!((p.core_temperature - 1.57e7).abs() < 1.0);
        assert!((p.rotational_velocity - 1993.0).abs() < 5.0, "v = {}", p.rotational_velocity);
        assert!((0.0..1.0).contains(&p.solar_cycle_phase));
        assert!(p.mass_loss_rate > 0.0);
        assert!(p.magnetic_field_strength >= 0.5e-4 && p.magnetic_field_strength <= 1e-4);
    }

    #[test]
    fn fuel_is_non_increasing_with_age() {
        let mut state = sun_state();
        let mut last = f64::INFINITY;
        for i in 0..30 {
            state.age = i as f64 * 1e9 * YEAR;
            let fuel = StellarProperties::derive(&state).fuel_remaining;
            assert!(fuel <= last && (0.0..=1.0).contains(&fuel));
            last = fuel;
        }
        assert_eq!(last, 0.0);
    }

    #[test]
    fn mass_loss_override_wins() {
        let mut state = sun_state();
        state.mass_loss_override = Some(1.5e9);
        assert_eq!(StellarProperties::derive(&state).mass_loss_rate, 1.5e9);
    }

    #[test]
    fn cycle_phase_wraps() {
        assert_eq!(solar_cycle_phase(0.0), 0.0);
        assert!((solar_cycle_phase(1.5 * SOLAR_CYCLE) - 0.5).abs() < 1e-12);
        assert!((cycle_activity(0.25) - 1.0).abs() < 1e-12);
        assert!(cycle_activity(0.75).abs() < 1e-12);
    }
}
