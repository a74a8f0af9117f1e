pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod renderer;

// Re-export key types at crate root for convenience
pub use api::config::SimulationConfig;
pub use api::error::{Result, SimError};
pub use api::types::{BodyId, LightSource};
pub use components::body::{Body, BodyCore, BodyDesc};
pub use components::material::Material;
pub use components::planet::{Moon, Orbiter, ParentFrame, Planet};
pub use components::ring::{RingGeometry, RingSpec};
pub use components::star::{Star, StarReport};
pub use crate::core::orbit::{OrbitModel, OrbitalElements, Perturbation};
pub use crate::core::rng::Rng;
pub use crate::core::scene::{FrameReport, SceneGraph};
pub use crate::core::time::SimulationClock;
pub use renderer::instance::{WindBuffer, WindParticleInstance};
pub use renderer::traits::{BlendMode, Mesh, MeshLibrary, Shader};
pub use systems::lighting::LightState;
pub use systems::solar_wind::{SolarWindPool, WindParticle, WindReport, WindSettings};
pub use systems::stellar::{LuminosityClass, SpectralClass, StellarProperties};
pub use systems::surface::{Prominence, Spot, SurfaceFeatureManager, SurfaceReport};
