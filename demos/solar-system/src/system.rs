//! Solar System: Sun, nine planets, ten moons and Saturn's rings driven by
//! the orrery engine's scene graph.
//!
//! Time starts at J2000. The host calls `step` once per rendered frame
//! with the wall-clock delta and `draw` with its shader and meshes.

use orrery_engine::core::constants::DAY;
use orrery_engine::{
    BodyId, FrameReport, LightSource, MeshLibrary, Moon, Planet, Result, SceneGraph, Shader,
    SimulationConfig, Star, WindBuffer,
};

use crate::bodies::{self, MOONS, PLANETS, PLANET_COUNT, SATURN};
use crate::calendar;

/// Simulated days per wall-clock second at startup; Earth visibly orbits.
pub const DEFAULT_SPEED: f64 = 10.0;
/// Samples per orbit line.
pub const ORBIT_SAMPLES: usize = 96;

/// Host-side controls.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// Simulated days per wall-clock second.
    SetSpeed(f64),
    TogglePause,
    /// Planet index, or `None` to clear the selection.
    Select(Option<usize>),
}

/// Readout for the UI.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeInfo {
    pub days: f64,
    pub speed: f64,
    pub paused: bool,
    pub date: (i32, u32, u32),
}

pub struct SolarSystem {
    scene: SceneGraph,
    sun: BodyId,
    planets: [BodyId; PLANET_COUNT],
    moons: Vec<BodyId>,
    selected: Option<usize>,
}

impl SolarSystem {
    pub fn new(config: SimulationConfig) -> Result<Self> {
        let mut scene = SceneGraph::new(config)?;

        let sun = Star::new(bodies::sun_desc(), bodies::SUN_LUMINOSITY, bodies::SUN_TEMPERATURE)?
            .with_age(bodies::sun_age())?;
        let sun = scene.add_star(sun);

        let mut planets = [sun; PLANET_COUNT];
        for (index, data) in PLANETS.iter().enumerate() {
            let texture = bodies::PLANET_TEXTURE_BASE + index as u32;
            let planet = Planet::new(data.desc(texture), data.elements()?, Some(sun))?;
            planets[index] = scene.add_planet(planet)?;
        }

        scene.enable_rings(
            planets[SATURN],
            bodies::SATURN_RING_TEXTURE,
            bodies::SATURN_RING_INNER_KM * 1000.0,
            bodies::SATURN_RING_OUTER_KM * 1000.0,
        )?;

        let mut moons = Vec::with_capacity(MOONS.len());
        for data in &MOONS {
            let parent = planets[data.parent];
            let moon = scene.add_moon(Moon::new(data.desc(), data.elements()?, parent)?)?;
            scene.add_satellite(parent, moon)?;
            moons.push(moon);
        }

        let mut system = Self {
            scene,
            sun,
            planets,
            moons,
            selected: None,
        };
        system.set_speed(DEFAULT_SPEED);
        log::info!("solar system ready: {} bodies", system.scene.len());
        Ok(system)
    }

    pub fn handle(&mut self, command: Command) {
        match command {
            Command::SetSpeed(days_per_second) => self.set_speed(days_per_second),
            Command::TogglePause => self.scene.clock_mut().toggle_pause(),
            Command::Select(index) => {
                self.selected = index.filter(|&i| i < PLANET_COUNT);
            }
        }
    }

    /// Advance by one rendered frame of `frame_dt` wall-clock seconds.
    pub fn step(&mut self, frame_dt: f64) -> FrameReport {
        self.scene.advance(frame_dt)
    }

    pub fn draw(&self, shader: &mut dyn Shader, meshes: &dyn MeshLibrary) {
        self.scene.draw(shader, meshes);
    }

    pub fn light_sources(&self) -> Vec<LightSource> {
        self.scene.light_sources()
    }

    pub fn wind_snapshot(&self, buffer: &mut WindBuffer) {
        self.scene.wind_snapshot(buffer);
    }

    /// Orbit line of the selected planet, if any.
    pub fn selected_orbit(&self) -> Option<Vec<glam::DVec3>> {
        let index = self.selected?;
        self.scene.orbit_path(self.planets[index], ORBIT_SAMPLES)
    }

    pub fn set_speed(&mut self, days_per_second: f64) {
        self.scene.clock_mut().set_time_scale(days_per_second * DAY);
    }

    pub fn speed(&self) -> f64 {
        self.scene.clock().time_scale() / DAY
    }

    pub fn is_paused(&self) -> bool {
        self.scene.clock().is_paused()
    }

    pub fn days_since_j2000(&self) -> f64 {
        calendar::seconds_to_days(self.scene.time())
    }

    pub fn time_info(&self) -> TimeInfo {
        let days = self.days_since_j2000();
        TimeInfo {
            days,
            speed: self.speed(),
            paused: self.is_paused(),
            date: calendar::days_to_date(days),
        }
    }

    pub fn scene(&self) -> &SceneGraph {
        &self.scene
    }

    pub fn sun(&self) -> BodyId {
        self.sun
    }

    pub fn planet(&self, index: usize) -> Option<BodyId> {
        self.planets.get(index).copied()
    }

    pub fn moons(&self) -> &[BodyId] {
        &self.moons
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bodies::{EARTH, JUPITER, MOON_COUNT};
    use orrery_engine::core::constants::AU;
    use orrery_engine::OrbitModel;

    fn system() -> SolarSystem {
        SolarSystem::new(SimulationConfig::default().with_orbit_model(OrbitModel::Kepler)).unwrap()
    }

    #[test]
    fn scene_shape() {
        let sys = system();
        let scene = sys.scene();
        assert_eq!(scene.len(), 1 + PLANET_COUNT + MOON_COUNT);
        assert_eq!(scene.roots().len(), 1 + PLANET_COUNT);
        assert_eq!(scene.find_by_name("Saturn"), sys.planet(SATURN));
        let saturn = scene.get(sys.planet(SATURN).unwrap()).unwrap();
        assert!(saturn.as_planet().unwrap().rings().is_some());
        let jupiter = scene.get(sys.planet(JUPITER).unwrap()).unwrap();
        assert_eq!(jupiter.satellites().len(), 4);
        assert_eq!(sys.light_sources().len(), 1);
    }

    #[test]
    fn earth_near_one_au_at_j2000() {
        let sys = system();
        let earth = sys.scene().get(sys.planet(EARTH).unwrap()).unwrap();
        let d = earth.position().length() / AU;
        assert!((d - 1.0).abs() < 0.02, "Earth distance = {d} AU");
    }

    #[test]
    fn stays_stable_over_a_simulated_decade() {
        let mut sys = system();
        sys.set_speed(3650.0 / 60.0);
        for _ in 0..3600 {
            sys.step(1.0 / 60.0);
        }
        assert!(sys.days_since_j2000() > 3600.0);
        for (_, body) in sys.scene().iter() {
            assert!(body.position().is_finite(), "{} diverged", body.name());
        }
        for &id in sys.moons() {
            let moon = sys.scene().get(id).unwrap();
            let parent = sys.scene().get(moon.parent().unwrap()).unwrap();
            let a = moon.orbit().unwrap().elements().semi_major_axis();
            let d = (moon.position() - parent.position()).length();
            assert!((d - a).abs() / a < 1e-6, "{} drifted", moon.name());
        }
    }

    #[test]
    fn pause_and_speed_controls() {
        let mut sys = system();
        sys.handle(Command::SetSpeed(1.0));
        assert!((sys.speed() - 1.0).abs() < 1e-12);
        sys.step(1.0 / 60.0);
        let before = sys.days_since_j2000();
        sys.handle(Command::TogglePause);
        assert!(sys.is_paused());
        assert_eq!(sys.step(1.0).steps, 0);
        assert_eq!(sys.days_since_j2000(), before);
    }

    #[test]
    fn date_readout_advances() {
        let mut sys = system();
        sys.set_speed(366.0 * 60.0);
        sys.step(1.0 / 60.0);
        assert_eq!(sys.time_info().date.0, 2001);
    }

    #[test]
    fn selection_yields_orbit_line() {
        let mut sys = system();
        assert!(sys.selected_orbit().is_none());
        sys.handle(Command::Select(Some(EARTH)));
        let path = sys.selected_orbit().unwrap();
        assert_eq!(path.len(), ORBIT_SAMPLES);
        sys.handle(Command::Select(Some(42)));
        assert_eq!(sys.selected(), None);
    }
}
