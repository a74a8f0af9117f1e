use glam::Vec3;

use crate::api::config::SimulationConfig;
use crate::api::error::{ensure_finite, ensure_non_negative, ensure_positive, Result};
use crate::api::types::LightSource;
use crate::components::body::{BodyCore, BodyDesc};
use crate::components::material::Material;
use crate::core::rng::Rng;
use crate::systems::solar_wind::{SolarWindPool, WindReport, WindSettings, WindSource};
use crate::systems::stellar::{
    absolute_magnitude, color_from_temperature, stefan_boltzmann_luminosity, to_solar_luminosity,
    LuminosityClass, SpectralClass, StellarProperties, StellarState,
};
use crate::systems::surface::{SurfaceContext, SurfaceFeatureManager, SurfaceReport};

/// Counts from one star update.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StarReport {
    pub surface: SurfaceReport,
    pub wind: WindReport,
}

impl StarReport {
    pub fn merge(&mut self, other: &StarReport) {
        self.surface.merge(&other.surface);
        self.wind.merge(&other.wind);
    }
}

/// A luminous body. Owns its surface features and wind.
///
/// The body color is always derived from the temperature.
#[derive(Debug, Clone)]
pub struct Star {
    core: BodyCore,
    /// K
    temperature: f64,
    /// Solar units.
    luminosity: f64,
    /// s
    age: f64,
    mass_loss_override: Option<f64>,
    properties: StellarProperties,
    surface: SurfaceFeatureManager,
    wind: SolarWindPool,
}

impl Star {
    /// `luminosity` in solar units, `temperature` in kelvin.
    pub fn new(desc: BodyDesc, luminosity: f64, temperature: f64) -> Result<Self> {
        ensure_positive("luminosity", luminosity)?;
        ensure_positive("temperature", temperature)?;
        let mut core = BodyCore::new(desc)?;
        core.set_color(color_from_temperature(temperature));

        let config = SimulationConfig::default();
        let properties = StellarProperties::derive(&StellarState {
            mass: core.mass(),
            radius: core.radius(),
            temperature,
            luminosity,
            rotation_period: core.rotation_period(),
            age: 0.0,
            mass_loss_override: None,
        });
        Ok(Self {
            core,
            temperature,
            luminosity,
            age: 0.0,
            mass_loss_override: None,
            properties,
            surface: SurfaceFeatureManager::new(config.max_spots, config.max_prominences),
            wind: SolarWindPool::new(WindSettings::from_config(&config)),
        })
    }

    /// Start the star at `age` seconds.
    pub fn with_age(mut self, age: f64) -> Result<Self> {
        ensure_non_negative("age", age)?;
        self.age = age;
        self.refresh_properties();
        Ok(self)
    }

    /// Apply the feature and wind caps from `config`.
    pub fn apply_config(&mut self, config: &SimulationConfig) {
        self.surface.set_limits(config.max_spots, config.max_prominences);
        self.wind.set_settings(WindSettings::from_config(config));
    }

    /// Spin, age, re-derive properties, then evolve surface features and wind.
    pub fn update(&mut self, dt: f64, rng: &mut Rng) -> StarReport {
        self.core.update_rotation(dt);
        self.age += dt;
        self.refresh_properties();

        let surface = self.surface.update(
            dt,
            &SurfaceContext {
                cycle_phase: self.properties.solar_cycle_phase,
                stellar_radius: self.core.radius(),
                surface_temperature: self.temperature,
            },
            rng,
        );
        let wind = self.wind.update(
            dt,
            &WindSource {
                position: self.core.position(),
                radius: self.core.radius(),
                mass_loss_rate: self.properties.mass_loss_rate,
            },
            rng,
        );
        StarReport { surface, wind }
    }

    fn refresh_properties(&mut self) {
        self.properties = StellarProperties::derive(&StellarState {
            mass: self.core.mass(),
            radius: self.core.radius(),
            temperature: self.temperature,
            luminosity: self.luminosity,
            rotation_period: self.core.rotation_period(),
            age: self.age,
            mass_loss_override: self.mass_loss_override,
        });
    }

    /// Change the surface temperature; color and spectral class follow.
    pub fn set_temperature(&mut self, temperature: f64) -> Result<()> {
        ensure_positive("temperature", temperature)?;
        self.temperature = temperature;
        self.core.set_color(color_from_temperature(temperature));
        self.refresh_properties();
        Ok(())
    }

    /// Override the derived mass-loss rate, kg/s. `None` restores the
    /// Reimers estimate.
    pub fn set_mass_loss_rate(&mut self, rate: Option<f64>) -> Result<()> {
        if let Some(r) = rate {
            ensure_finite("mass_loss_rate", r)?;
        }
        self.mass_loss_override = rate.map(|r| r.max(0.0));
        self.refresh_properties();
        Ok(())
    }

    /// `4πr²σT⁴`, W.
    pub fn calculate_luminosity_from_physics(&self) -> f64 {
        stefan_boltzmann_luminosity(self.core.radius(), self.temperature)
    }

    pub fn luminosity_from_physics_solar(&self) -> f64 {
        to_solar_luminosity(self.calculate_luminosity_from_physics())
    }

    pub fn absolute_magnitude(&self) -> f64 {
        absolute_magnitude(self.luminosity)
    }

    pub fn spectral_class(&self) -> SpectralClass {
        self.properties.spectral_class
    }

    pub fn luminosity_class(&self) -> LuminosityClass {
        self.properties.luminosity_class
    }

    /// Descriptor handed to the renderer's lighting and bloom passes.
    pub fn light_source(&self) -> LightSource {
        LightSource::new(
            self.core.position(),
            self.core.color(),
            self.luminosity,
            self.core.radius() * (1.0 + 0.5 * self.luminosity),
        )
    }

    pub fn material(&self) -> Material {
        let color = self.core.color();
        Material::new(color)
            .with_specular(1.0)
            .with_shininess(32.0)
            .with_emission(color * self.luminosity as f32)
    }

    pub fn core(&self) -> &BodyCore {
        &self.core
    }

    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    pub fn luminosity(&self) -> f64 {
        self.luminosity
    }

    pub fn age(&self) -> f64 {
        self.age
    }

    pub fn color(&self) -> Vec3 {
        self.core.color()
    }

    pub fn properties(&self) -> &StellarProperties {
        &self.properties
    }

    pub fn surface(&self) -> &SurfaceFeatureManager {
        &self.surface
    }

    pub fn wind(&self) -> &SolarWindPool {
        &self.wind
    }
}
