//! Contracts the simulation core consumes from the host renderer.
//!
//! The core never touches a GPU API. Drawing a scene means pushing a model
//! matrix and material uniforms through [`Shader`] and asking a [`Mesh`]
//! to draw itself. Meshes (a shared unit sphere and one ring annulus per
//! ringed planet) are uploaded and owned by the host behind [`MeshLibrary`].

use glam::{Mat4, Vec3};

use crate::api::types::BodyId;

/// Blend state requested for a draw pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlendMode {
    /// Blending disabled.
    #[default]
    Opaque,
    /// Standard alpha blending (src-alpha, one-minus-src-alpha).
    Alpha,
}

/// Shader program wrapper implemented by the host.
///
/// The render-state hooks default to no-ops so minimal hosts only need the
/// uniform setters.
pub trait Shader {
    /// Bind the program for subsequent uniform updates and draws.
    fn use_program(&mut self);

    fn set_matrix4(&mut self, name: &str, value: &Mat4);

    fn set_vector3f(&mut self, name: &str, value: Vec3);

    fn set_float(&mut self, name: &str, value: f32);

    fn set_integer(&mut self, name: &str, value: i32);

    fn set_blend(&mut self, _mode: BlendMode) {}

    fn set_depth_write(&mut self, _enabled: bool) {}

    /// Bind a host texture handle to a texture unit.
    fn bind_texture(&mut self, _unit: u32, _texture: u32) {}
}

/// Uploaded geometry that can draw itself with the currently bound shader.
pub trait Mesh {
    fn draw(&self, shader: &mut dyn Shader);
}

/// Host-side mesh storage.
pub trait MeshLibrary {
    /// Unit sphere shared by every body.
    fn sphere(&self) -> &dyn Mesh;

    /// Ring annulus uploaded for `body`, if the host has one.
    ///
    /// Hosts upload [`RingGeometry`](crate::components::ring::RingGeometry)
    /// when its generation changes.
    fn ring(&self, body: BodyId) -> Option<&dyn Mesh>;
}


#[cfg(test)]
mod tests {
    use super::testing::*;
    use super::*;

    #[test]
    fn blend_mode_default_is_opaque() {
        assert_eq!(BlendMode::default(), BlendMode::Opaque);
    }

    #[test]
    fn recording_shader_captures_uniforms() {
        let mut shader = RecordingShader::default();
        shader.use_program();
        shader.set_float("material.shininess", 50.0);
        shader.set_blend(BlendMode::Alpha);
        assert_eq!(shader.calls.len(), 3);
        assert_eq!(shader.calls[1], Call::Float("material.shininess".into(), 50.0));
    }

    #[test]
    fn label_mesh_records_draw() {
        let mut shader = RecordingShader::default();
        let mesh = LabelMesh::new("sphere");
        mesh.draw(&mut shader);
        assert_eq!(shader.draws(), vec!["sphere".to_string()]);
        assert_eq!(*mesh.draws.borrow(), 1);
    }
}
