use crate::core::geometry::Fragment;
use crate::core::pipeline::Shader;
use nalgebra::Vector3;

/// Outputs the interpolated vertex color untouched.
/// Useful for debugging geometry and the rasterization pipeline.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnlitShader;

impl Shader for UnlitShader {
    fn fragment(&self, fragment: &Fragment) -> Vector3<f32> {
        fragment.color
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_returns_vertex_color() {
        let frag = Fragment {
            color: Vector3::new(0.1, 0.2, 0.3),
            ..Fragment::default()
        };
        assert_eq!(UnlitShader.fragment(&frag), Vector3::new(0.1, 0.2, 0.3));
    }
}
