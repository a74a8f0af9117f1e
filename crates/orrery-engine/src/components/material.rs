use glam::Vec3;

/// Phong material uniforms for a body's sphere pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub diffuse: Vec3,
    /// Ambient term as a fraction of the diffuse color.
    pub ambient_factor: f32,
    pub specular: Vec3,
    /// Phong specular exponent.
    pub shininess: f32,
    /// Emitted radiance (zero for non-emissive bodies).
    pub emission: Vec3,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            diffuse: Vec3::ONE,
            ambient_factor: 0.2,
            specular: Vec3::splat(0.5),
            shininess: 32.0,
            emission: Vec3::ZERO,
        }
    }
}

impl Material {
    pub fn new(diffuse: Vec3) -> Self {
        Self {
            diffuse,
            ..Default::default()
        }
    }

    pub fn with_specular(mut self, specular: f32) -> Self {
        self.specular = Vec3::splat(specular);
        self
    }

    pub fn with_shininess(mut self, shininess: f32) -> Self {
        self.shininess = shininess;
        self
    }

    pub fn with_emission(mut self, emission: Vec3) -> Self {
        self.emission = emission;
        self
    }

    pub fn ambient(&self) -> Vec3 {
        self.diffuse * self.ambient_factor
    }

    pub fn is_emissive(&self) -> bool {
        self.emission != Vec3::ZERO
    }
}
