pub mod bodies;
pub mod calendar;
mod system;

pub use system::{Command, SolarSystem, TimeInfo, DEFAULT_SPEED, ORBIT_SAMPLES};
