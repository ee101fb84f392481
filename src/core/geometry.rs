use nalgebra::{Point3, Vector2, Vector3, Vector4};
use std::ops::{Add, Mul};

/// Represents a single vertex in 3D space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    /// Position in local object space.
    pub position: Point3<f32>,
    /// Normal vector for lighting calculations.
    pub normal: Vector3<f32>,
    /// Tangent vector for normal mapping. Zero when the mesh has no UV layout.
    pub tangent: Vector3<f32>,
    /// Texture coordinates (UV).
    pub texcoord: Vector2<f32>,
    /// Base color, used as albedo when texturing is off.
    pub color: Vector3<f32>,
}

impl Vertex {
    pub fn new(position: Point3<f32>, normal: Vector3<f32>, texcoord: Vector2<f32>) -> Self {
        Self {
            position,
            normal,
            texcoord,
            tangent: Vector3::zeros(),
            color: Vector3::new(1.0, 1.0, 1.0),
        }
    }

    pub fn with_tangent(mut self, tangent: Vector3<f32>) -> Self {
        self.tangent = tangent;
        self
    }

    pub fn with_color(mut self, color: Vector3<f32>) -> Self {
        self.color = color;
        self
    }
}

/// A vertex after the vertex stage.
///
/// `position` holds `(ndc_x, ndc_y, ndc_z, clip_w)`: x, y and z are already divided by
/// the homogeneous weight while `w` keeps the pre-divide value for perspective-correct
/// interpolation. Normal and tangent are in world space and were never divided.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fragment {
    pub position: Vector4<f32>,
    pub normal: Vector3<f32>,
    pub tangent: Vector3<f32>,
    /// Unit vector from the surface point towards the camera origin (world space).
    pub view_dir: Vector3<f32>,
    pub uv: Vector2<f32>,
    pub color: Vector3<f32>,
}

impl Fragment {
    #[inline]
    pub fn ndc_x(&self) -> f32 {
        self.position.x
    }

    #[inline]
    pub fn ndc_y(&self) -> f32 {
        self.position.y
    }

    #[inline]
    pub fn ndc_z(&self) -> f32 {
        self.position.z
    }

    #[inline]
    pub fn clip_w(&self) -> f32 {
        self.position.w
    }
}

impl Default for Fragment {
    fn default() -> Self {
        Self {
            position: Vector4::new(0.0, 0.0, 0.0, 1.0),
            normal: Vector3::zeros(),
            tangent: Vector3::zeros(),
            view_dir: Vector3::zeros(),
            uv: Vector2::zeros(),
            color: Vector3::zeros(),
        }
    }
}

// Linear combination of the shading attributes. `position` is not blended here:
// the rasterizer computes depth and the corrected w separately.
impl Add for Fragment {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            position: self.position,
            normal: self.normal + other.normal,
            tangent: self.tangent + other.tangent,
            view_dir: self.view_dir + other.view_dir,
            uv: self.uv + other.uv,
            color: self.color + other.color,
        }
    }
}

impl Mul<f32> for Fragment {
    type Output = Self;

    fn mul(self, scalar: f32) -> Self {
        Self {
            position: self.position,
            normal: self.normal * scalar,
            tangent: self.tangent * scalar,
            view_dir: self.view_dir * scalar,
            uv: self.uv * scalar,
            color: self.color * scalar,
        }
    }
}
