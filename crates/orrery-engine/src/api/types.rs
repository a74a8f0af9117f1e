use bytemuck::{Pod, Zeroable};
use glam::{DVec3, Vec3};

/// Index of a body inside a [`SceneGraph`](crate::core::scene::SceneGraph).
/// Handed out by the scene; never reused while the scene lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyId(pub u32);

impl BodyId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Light-source descriptor handed to the renderer's HDR/bloom pipeline.
///
/// Wire format (8 floats / 32 bytes):
/// `[x, y, z, r, g, b, luminosity, glow_radius]`
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct LightSource {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    /// Luminosity in solar units.
    pub luminosity: f32,
    /// Effective glow radius in world units.
    pub glow_radius: f32,
}

impl LightSource {
    pub const FLOATS: usize = 8;

    pub fn new(position: DVec3, color: Vec3, luminosity: f64, glow_radius: f64) -> Self {
        let p = position.as_vec3();
        Self {
            x: p.x,
            y: p.y,
            z: p.z,
            r: color.x,
            g: color.y,
            b: color.z,
            luminosity: luminosity as f32,
            glow_radius: glow_radius as f32,
        }
    }

    pub fn position(&self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    pub fn color(&self) -> Vec3 {
        Vec3::new(self.r, self.g, self.b)
    }
}
