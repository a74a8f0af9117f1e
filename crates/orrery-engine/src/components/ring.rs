use std::f32::consts::TAU;

use crate::api::error::{ensure_positive, Result, SimError};

pub const RING_SEGMENTS: usize = 64;
/// x, y, z, u, v
pub const RING_VERTEX_FLOATS: usize = 5;
/// Two triangles per segment.
pub const RING_VERTICES_PER_SEGMENT: usize = 6;

/// Flat annulus in the body's equatorial (X-Z) plane, ready for upload.
///
/// `u` runs from 0 on the inner edge to 1 on the outer edge so a 1D ring
/// texture maps radially; `v` runs once around the ring.
#[derive(Debug, Clone, PartialEq)]
pub struct RingGeometry {
    vertices: Vec<f32>,
    /// Bumped each time the geometry is rebuilt; hosts re-upload on change.
    generation: u32,
}

impl RingGeometry {
    pub fn annulus(inner_radius: f32, outer_radius: f32, segments: usize, generation: u32) -> Self {
        let mut vertices = Vec::with_capacity(segments * RING_VERTICES_PER_SEGMENT * RING_VERTEX_FLOATS);
        for i in 0..segments {
            let v0 = i as f32 / segments as f32;
            let v1 = (i + 1) as f32 / segments as f32;
            let (s0, c0) = (v0 * TAU).sin_cos();
            let (s1, c1) = (v1 * TAU).sin_cos();

            let inner0 = [inner_radius * c0, 0.0, inner_radius * s0, 0.0, v0];
            let outer0 = [outer_radius * c0, 0.0, outer_radius * s0, 1.0, v0];
            let inner1 = [inner_radius * c1, 0.0, inner_radius * s1, 0.0, v1];
            let outer1 = [outer_radius * c1, 0.0, outer_radius * s1, 1.0, v1];

            for vertex in [inner0, outer0, outer1, inner0, outer1, inner1] {
                vertices.extend_from_slice(&vertex);
            }
        }
        Self { vertices, generation }
    }

    pub fn vertices(&self) -> &[f32] {
        &self.vertices
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / RING_VERTEX_FLOATS
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Raw bytes for a vertex-buffer upload.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }
}

/// Planetary ring system: a textured annulus around the equator.
#[derive(Debug, Clone, PartialEq)]
pub struct RingSpec {
    texture: u32,
    inner_radius: f64,
    outer_radius: f64,
    geometry: RingGeometry,
}

impl RingSpec {
    /// Requires `outer_radius > inner_radius > 0`.
    pub fn new(texture: u32, inner_radius: f64, outer_radius: f64, generation: u32) -> Result<Self> {
        ensure_positive("inner_radius", inner_radius)?;
        ensure_positive("outer_radius", outer_radius)?;
        if outer_radius <= inner_radius {
            return Err(SimError::invalid(
                "outer_radius",
                format!("must exceed inner radius {inner_radius}, got {outer_radius}"),
            ));
        }
        Ok(Self {
            texture,
            inner_radius,
            outer_radius,
            geometry: RingGeometry::annulus(inner_radius as f32, outer_radius as f32, RING_SEGMENTS, generation),
        })
    }

    pub fn texture(&self) -> u32 {
        self.texture
    }

    pub fn inner_radius(&self) -> f64 {
        self.inner_radius
    }

    pub fn outer_radius(&self) -> f64 {
        self.outer_radius
    }

    pub fn geometry(&self) -> &RingGeometry {
        &self.geometry
    }
}
