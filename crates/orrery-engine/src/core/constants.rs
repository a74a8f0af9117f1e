//! Physical constants and unit conversions (SI).

use std::f64::consts::TAU;

/// Gravitational constant, m³ kg⁻¹ s⁻².
pub const G: f64 = 6.674_30e-11;
/// Speed of light, m/s.
pub const C: f64 = 299_792_458.0;
/// Stefan-Boltzmann constant, W m⁻² K⁻⁴.
pub const SIGMA: f64 = 5.670_374_419e-8;

pub const SOLAR_MASS: f64 = 1.988_92e30;
pub const SOLAR_RADIUS: f64 = 6.957e8;
/// Nominal solar luminosity, W (IAU 2015).
pub const SOLAR_LUMINOSITY: f64 = 3.828e26;
pub const SOLAR_TEMPERATURE: f64 = 5778.0;
/// Sidereal equatorial rotation period of the Sun, s.
pub const SOLAR_ROTATION_PERIOD: f64 = 25.38 * DAY;
/// Absolute bolometric magnitude of the Sun.
pub const SOLAR_ABSOLUTE_MAGNITUDE: f64 = 4.83;

pub const AU: f64 = 1.495_978_707e11;

pub const MINUTE: f64 = 60.0;
pub const HOUR: f64 = 3600.0;
pub const DAY: f64 = 86_400.0;
pub const WEEK: f64 = 7.0 * DAY;
/// Julian year, s.
pub const YEAR: f64 = 365.25 * DAY;
/// Mean solar-cycle length.
pub const SOLAR_CYCLE: f64 = 11.0 * YEAR;

pub const KILOMETER: f64 = 1000.0;

/// Wrap an angle into `[0, 2π)`.
///
/// `rem_euclid` can round up to exactly 2π for tiny negative inputs,
/// which is folded back to zero.
pub fn wrap_angle(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(TAU);
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}
