use nalgebra::Vector3;

/// A light source that is infinitely far away (e.g., Sun). Rays are parallel.
///
/// `direction` is the direction the light travels, stored normalized.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    pub direction: Vector3<f32>,
    pub intensity: f32,
}

impl DirectionalLight {
    /// Creates a directional light. A zero direction falls back to straight down.
    pub fn new(direction: Vector3<f32>, intensity: f32) -> Self {
        Self {
            direction: direction
                .try_normalize(1e-8)
                .unwrap_or_else(|| -Vector3::y()),
            intensity,
        }
    }
}

impl Default for DirectionalLight {
    fn default() -> Self {
        Self::new(Vector3::new(0.577, -0.577, 0.577), 7.0)
    }
}
