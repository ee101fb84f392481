use crate::scene::texture::Texture;
use nalgebra::Vector3;

/// Texture maps and Phong parameters used by the shading stage.
///
/// The textures are owned here and released with the set; a map that failed to load
/// is never stored, so there is nothing to dangle.
#[derive(Debug, Clone)]
pub struct TextureSet {
    pub diffuse: Option<Texture>,
    pub normal: Option<Texture>,
    pub gloss: Option<Texture>,
    pub specular: Option<Texture>,
    /// Specular color used when no specular map is bound.
    pub specular_color: Vector3<f32>,
    /// Gloss used when no gloss map is bound.
    pub gloss_factor: f32,
}

impl Default for TextureSet {
    fn default() -> Self {
        Self {
            diffuse: None,
            normal: None,
            gloss: None,
            specular: None,
            specular_color: Vector3::new(0.5, 0.5, 0.5),
            gloss_factor: 1.0,
        }
    }
}

impl TextureSet {
    pub fn with_diffuse(mut self, texture: Texture) -> Self {
        self.diffuse = Some(texture);
        self
    }

    pub fn with_normal(mut self, texture: Texture) -> Self {
        self.normal = Some(texture);
        self
    }

    pub fn with_gloss(mut self, texture: Texture) -> Self {
        self.gloss = Some(texture);
        self
    }

    pub fn with_specular(mut self, texture: Texture) -> Self {
        self.specular = Some(texture);
        self
    }
}
