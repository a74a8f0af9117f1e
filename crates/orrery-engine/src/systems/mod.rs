pub mod lighting;
pub mod render;
pub mod solar_wind;
pub mod stellar;
pub mod surface;
