//! Per-frame light list for the renderer's lighting and bloom passes.
//!
//! Rebuilt from the scene's stars every frame; the renderer uploads
//! `as_bytes()` as an array of 8-float [`LightSource`] records.

use glam::Vec3;

use crate::api::types::LightSource;

/// Collected star lights plus the scene ambient term.
pub struct LightState {
    lights: Vec<LightSource>,
    ambient: Vec3,
}

impl LightState {
    pub fn new() -> Self {
        Self::with_capacity(4)
    }

    /// Create a LightState with a specific light capacity.
    pub fn with_capacity(max_lights: usize) -> Self {
        Self {
            lights: Vec::with_capacity(max_lights),
            ambient: Vec3::splat(0.05),
        }
    }

    pub fn add(&mut self, light: LightSource) {
        self.lights.push(light);
    }

    pub fn clear(&mut self) {
        self.lights.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &LightSource> {
        self.lights.iter()
    }

    pub fn count(&self) -> usize {
        self.lights.len()
    }

    /// Brightest light, the one a single-light shader should use.
    pub fn primary(&self) -> Option<&LightSource> {
        self.lights
            .iter()
            .max_by(|a, b| a.luminosity.total_cmp(&b.luminosity))
    }

    /// Set the ambient term. Space scenes want something close to black.
    pub fn set_ambient(&mut self, ambient: Vec3) {
        self.ambient = ambient;
    }

    pub fn ambient(&self) -> Vec3 {
        self.ambient
    }

    /// Raw bytes for a uniform/storage-buffer upload.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.lights)
    }
}

impl Default for LightState {
    fn default() -> Self {
        Self::new()
    }
}
