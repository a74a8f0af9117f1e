use bytemuck::{Pod, Zeroable};

/// Per-particle render data for the solar-wind point pipeline.
/// 8 floats = 32 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct WindParticleInstance {
    /// World-space position.
    pub x: f32,
    pub y: f32,
    pub z: f32,
    /// Particle energy in eV.
    pub energy: f32,
    /// age / lifetime, in [0, 1]; renderers fade on it.
    pub age_fraction: f32,
    pub _pad0: f32,
    pub _pad1: f32,
    pub _pad2: f32,
}

impl WindParticleInstance {
    pub const FLOATS: usize = 8;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

/// Snapshot buffer of solar-wind particles, rebuilt each frame.
pub struct WindBuffer {
    instances: Vec<WindParticleInstance>,
}

impl WindBuffer {
    pub fn new() -> Self {
        Self::with_capacity(1024)
    }

    pub fn with_capacity(max: usize) -> Self {
        Self {
            instances: Vec::with_capacity(max),
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
    }

    pub fn push(&mut self, instance: WindParticleInstance) {
        self.instances.push(instance);
    }

    pub fn instance_count(&self) -> usize {
        self.instances.len()
    }

    pub fn instances(&self) -> &[WindParticleInstance] {
        &self.instances
    }

    /// Raw bytes for a vertex-buffer upload.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.instances)
    }
}

impl Default for WindBuffer {
    fn default() -> Self {
        Self::new()
    }
}
