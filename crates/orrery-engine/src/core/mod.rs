pub mod constants;
pub mod orbit;
pub mod rng;
pub mod scene;
pub mod time;
