use glam::DVec3;

use crate::api::config::SimulationConfig;
use crate::api::error::{Result, SimError};
use crate::api::types::{BodyId, LightSource};
use crate::components::body::Body;
use crate::components::planet::{Moon, ParentFrame, Planet};
use crate::components::star::{Star, StarReport};
use crate::core::orbit::orbit_path;
use crate::core::rng::Rng;
use crate::core::time::SimulationClock;
use crate::renderer::instance::WindBuffer;
use crate::renderer::traits::{MeshLibrary, Shader};
use crate::systems::lighting::LightState;
use crate::systems::render::{draw_body, draw_rings};

/// Counts from one or more scene updates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameReport {
    /// Fixed steps run (1 for a direct `update`).
    pub steps: u32,
    pub stars: StarReport,
}

/// Arena of bodies wired into parent/satellite hierarchies.
///
/// Bodies are never removed, so a [`BodyId`] stays valid for the life of
/// the scene. Roots are bodies nobody lists as a satellite; they update and
/// draw in insertion order, and each planet's satellites follow it.
pub struct SceneGraph {
    bodies: Vec<Body>,
    roots: Vec<BodyId>,
    config: SimulationConfig,
    rng: Rng,
    clock: SimulationClock,
    /// Simulated seconds passed to `update`.
    time: f64,
}

impl SceneGraph {
    /// Build an empty scene; `config` is validated first.
    pub fn new(config: SimulationConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::with_valid_config(config))
    }

    fn with_valid_config(config: SimulationConfig) -> Self {
        let rng = Rng::new(config.seed);
        let clock = SimulationClock::new(config.fixed_dt).with_time_scale(config.time_scale);
        Self {
            bodies: Vec::with_capacity(32),
            roots: Vec::with_capacity(32),
            config,
            rng,
            clock,
            time: 0.0,
        }
    }

    pub fn add_star(&mut self, mut star: Star) -> BodyId {
        star.apply_config(&self.config);
        log::info!(
            "added star {} ({}{}, T={:.0} K, L={:.3} L☉)",
            star.core().name(),
            star.spectral_class(),
            star.luminosity_class(),
            star.temperature(),
            star.luminosity()
        );
        self.insert(Body::Star(star))
    }

    /// Add a planet. Its parent, if any, must already be in the scene.
    pub fn add_planet(&mut self, planet: Planet) -> Result<BodyId> {
        self.insert_orbiter(Body::Planet(planet))
    }

    /// Add a moon. Its parent must already be in the scene.
    pub fn add_moon(&mut self, moon: Moon) -> Result<BodyId> {
        self.insert_orbiter(Body::Moon(moon))
    }

    fn insert_orbiter(&mut self, mut body: Body) -> Result<BodyId> {
        if let Some(parent) = body.parent() {
            self.get(parent).ok_or_else(|| {
                log::warn!("{} references unknown parent {:?}", body.name(), parent);
                SimError::UnknownBody(parent)
            })?;
        }
        let frame = self.parent_frame(body.parent());
        let default_model = self.config.orbit_model;
        match &mut body {
            Body::Planet(p) => {
                if !p.orbit().has_explicit_model() {
                    p.orbit_mut().set_model(default_model);
                }
                p.update(0.0, frame.as_ref());
            }
            Body::Moon(m) => {
                if !m.orbit().has_explicit_model() {
                    m.orbit_mut().set_model(default_model);
                }
                m.update(0.0, frame.as_ref());
            }
            Body::Star(_) => {}
        }
        log::info!(
            "added {} (a={:.4e} m, parent {:?})",
            body.name(),
            body.orbit().map_or(0.0, |o| o.elements().semi_major_axis()),
            body.parent()
        );
        Ok(self.insert(body))
    }

    fn insert(&mut self, body: Body) -> BodyId {
        let id = BodyId(self.bodies.len() as u32);
        self.bodies.push(body);
        self.roots.push(id);
        id
    }

    /// Register `satellite` under `planet`. The satellite must orbit that
    /// planet; repeated registration is a no-op.
    pub fn add_satellite(&mut self, planet: BodyId, satellite: BodyId) -> Result<()> {
        self.get(planet).ok_or(SimError::UnknownBody(planet))?;
        let sat = self.get(satellite).ok_or(SimError::UnknownBody(satellite))?;
        if sat.parent() != Some(planet) {
            let reason = format!("{} does not orbit {:?}", sat.name(), planet);
            log::warn!("rejected satellite: {}", reason);
            return Err(SimError::InvalidHierarchy(reason));
        }
        let Some(host) = self.bodies[planet.index()].as_planet_mut() else {
            let reason = format!("{:?} is not a planet", planet);
            log::warn!("rejected satellite: {}", reason);
            return Err(SimError::InvalidHierarchy(reason));
        };
        host.add_satellite(satellite);
        self.roots.retain(|&id| id != satellite);
        Ok(())
    }

    /// Build (or rebuild) rings on a planet.
    pub fn enable_rings(&mut self, planet: BodyId, texture: u32, inner_radius: f64, outer_radius: f64) -> Result<()> {
        match self.get_mut(planet) {
            Some(Body::Planet(p)) => p.enable_rings(texture, inner_radius, outer_radius),
            Some(_) => Err(SimError::InvalidHierarchy(format!("{:?} is not a planet", planet))),
            None => Err(SimError::UnknownBody(planet)),
        }
    }

    pub fn get(&self, id: BodyId) -> Option<&Body> {
        self.bodies.get(id.index())
    }

    pub fn get_mut(&mut self, id: BodyId) -> Option<&mut Body> {
        self.bodies.get_mut(id.index())
    }

    pub fn find_by_name(&self, name: &str) -> Option<BodyId> {
        self.bodies
            .iter()
            .position(|b| b.name() == name)
            .map(|i| BodyId(i as u32))
    }

    pub fn iter(&self) -> impl Iterator<Item = (BodyId, &Body)> {
        self.bodies.iter().enumerate().map(|(i, b)| (BodyId(i as u32), b))
    }

    pub fn roots(&self) -> &[BodyId] {
        &self.roots
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Advance every body by `dt` simulated seconds. Each planet's
    /// satellites update right after it, against its fresh position.
    pub fn update(&mut self, dt: f64) -> FrameReport {
        let mut report = FrameReport { steps: 1, ..Default::default() };
        let roots = self.roots.clone();
        for id in roots {
            self.update_body(id, dt, 0, &mut report.stars);
        }
        self.time += dt;

        let surface = &report.stars.surface;
        if !surface.is_quiet() || report.stars.wind.dropped > 0 {
            log::debug!(
                "t={:.0}s spots +{} -{} evicted {} | prominences +{} -{} dropped {} | wind +{} expired {} dropped {}",
                self.time,
                surface.spots_spawned,
                surface.spots_retired,
                surface.spots_evicted,
                surface.prominences_spawned,
                surface.prominences_retired,
                surface.prominences_dropped,
                report.stars.wind.emitted,
                report.stars.wind.expired,
                report.stars.wind.dropped
            );
        }
        report
    }

    fn update_body(&mut self, id: BodyId, dt: f64, depth: usize, stars: &mut StarReport) {
        if depth > self.bodies.len() {
            log::warn!("satellite cycle through {:?}; update stopped", id);
            return;
        }
        let parent = self.get(id).and_then(|b| b.parent());
        let frame = self.parent_frame(parent);

        let satellites = match self.bodies.get_mut(id.index()) {
            Some(Body::Star(star)) => {
                stars.merge(&star.update(dt, &mut self.rng));
                Vec::new()
            }
            Some(Body::Planet(planet)) => {
                planet.update(dt, frame.as_ref());
                planet.satellites().to_vec()
            }
            Some(Body::Moon(moon)) => {
                moon.update(dt, frame.as_ref());
                Vec::new()
            }
            None => {
                log::warn!("satellite {:?} is not in the scene", id);
                Vec::new()
            }
        };
        for satellite in satellites {
            self.update_body(satellite, dt, depth + 1, stars);
        }
    }

    fn parent_frame(&self, parent: Option<BodyId>) -> Option<ParentFrame> {
        let body = self.get(parent?)?;
        Some(ParentFrame {
            position: body.position(),
            radius: body.radius(),
            mass: body.mass(),
        })
    }

    /// Feed wall-clock frame time through the fixed-step clock and run the
    /// resulting number of updates.
    pub fn advance(&mut self, frame_dt: f64) -> FrameReport {
        let steps = self.clock.advance(frame_dt);
        let dt = self.clock.step_dt();
        let mut report = FrameReport::default();
        for _ in 0..steps {
            let step = self.update(dt);
            report.stars.merge(&step.stars);
        }
        report.steps = steps;
        report
    }

    /// Draw every body: each root, then for planets their rings and
    /// satellites.
    pub fn draw(&self, shader: &mut dyn Shader, meshes: &dyn MeshLibrary) {
        for &id in &self.roots {
            self.draw_body(id, shader, meshes, 0);
        }
    }

    fn draw_body(&self, id: BodyId, shader: &mut dyn Shader, meshes: &dyn MeshLibrary, depth: usize) {
        if depth > self.bodies.len() {
            return;
        }
        let Some(body) = self.get(id) else {
            return;
        };
        draw_body(body, shader, meshes);
        if let Body::Planet(planet) = body {
            draw_rings(id, planet, shader, meshes);
            for &satellite in planet.satellites() {
                self.draw_body(satellite, shader, meshes, depth + 1);
            }
        }
    }

    /// One light per star, in insertion order.
    pub fn light_sources(&self) -> Vec<LightSource> {
        self.bodies
            .iter()
            .filter_map(|b| b.as_star().map(Star::light_source))
            .collect()
    }

    /// Refill `lights` from the scene's stars.
    pub fn collect_lights(&self, lights: &mut LightState) {
        lights.clear();
        for light in self.light_sources() {
            lights.add(light);
        }
    }

    /// Refill `buffer` with every star's live wind particles.
    pub fn wind_snapshot(&self, buffer: &mut WindBuffer) {
        buffer.clear();
        for star in self.bodies.iter().filter_map(Body::as_star) {
            star.wind().snapshot(buffer);
        }
    }

    /// Sampled orbit of `id` around its parent's current position, for
    /// orbit-line rendering. `None` for unknown ids and stars.
    pub fn orbit_path(&self, id: BodyId, samples: usize) -> Option<Vec<DVec3>> {
        let body = self.get(id)?;
        let orbit = body.orbit()?;
        let origin = self.parent_frame(orbit.parent()).map_or(DVec3::ZERO, |f| f.position);
        Some(orbit_path(orbit.elements(), samples).into_iter().map(|p| origin + p).collect())
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn clock(&self) -> &SimulationClock {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut SimulationClock {
        &mut self.clock
    }

    /// Total simulated seconds passed to `update`.
    pub fn time(&self) -> f64 {
        self.time
    }
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::with_valid_config(SimulationConfig::default())
    }
}
