pub mod instance;
pub mod traits;

// Re-export key types for convenient access
pub use instance::{WindBuffer, WindParticleInstance};
pub use traits::{BlendMode, Mesh, MeshLibrary, Shader};
