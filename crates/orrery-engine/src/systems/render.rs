use glam::{DMat4, DQuat};

use crate::api::types::BodyId;
use crate::components::body::{Body, BodyCore};
use crate::components::material::Material;
use crate::components::planet::Planet;
use crate::renderer::traits::{BlendMode, MeshLibrary, Shader};

/// Texture unit bodies and rings sample from.
pub const DIFFUSE_UNIT: u32 = 0;

/// Push the Phong material uniforms.
pub fn apply_material(shader: &mut dyn Shader, material: &Material) {
    shader.set_vector3f("material.ambient", material.ambient());
    shader.set_vector3f("material.diffuse", material.diffuse);
    shader.set_vector3f("material.specular", material.specular);
    shader.set_float("material.shininess", material.shininess);
    shader.set_vector3f("material.emission", material.emission);
    shader.set_integer("material.useEmission", material.is_emissive() as i32);
}

/// Ring model matrix: translate to the planet, tilt with its axis. No spin
/// and no scale; ring vertices are already in metres.
pub fn ring_model_matrix(core: &BodyCore) -> DMat4 {
    DMat4::from_translation(core.position()) * DMat4::from_quat(DQuat::from_rotation_z(core.axial_tilt()))
}

/// Sphere pass for one body.
pub fn draw_body(body: &Body, shader: &mut dyn Shader, meshes: &dyn MeshLibrary) {
    let core = body.core();
    shader.use_program();
    shader.set_matrix4("model", &core.model_matrix().as_mat4());
    shader.set_integer("isRing", 0);
    apply_material(shader, &body.material());
    if let Some(texture) = core.texture() {
        shader.bind_texture(DIFFUSE_UNIT, texture);
    }
    meshes.sphere().draw(shader);
}

/// Ring pass for a ringed planet: alpha-blended, depth writes off.
pub fn draw_rings(id: BodyId, planet: &Planet, shader: &mut dyn Shader, meshes: &dyn MeshLibrary) {
    let Some(rings) = planet.rings() else {
        return;
    };
    let Some(mesh) = meshes.ring(id) else {
        log::debug!("no ring mesh uploaded for {}", planet.core().name());
        return;
    };

    shader.set_matrix4("model", &ring_model_matrix(planet.core()).as_mat4());
    shader.set_integer("isRing", 1);
    shader.bind_texture(DIFFUSE_UNIT, rings.texture());
    shader.set_blend(BlendMode::Alpha);
    shader.set_depth_write(false);
    mesh.draw(shader);
    shader.set_depth_write(true);
    shader.set_blend(BlendMode::Opaque);
    shader.set_integer("isRing", 0);
}
