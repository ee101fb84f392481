use crate::core::geometry::Fragment;
use nalgebra::{Vector2, Vector3};
use std::ops::{Add, Mul};

/// Trait for types that can be linearly blended across a triangle's surface.
///
/// Requirements:
/// - Copy + Clone: cheaply duplicable values for per-vertex storage and interpolation.
/// - Add + Mul<f32>: support linear combination (a * s + b * t) used by barycentric interpolation.
pub trait Interpolatable: Copy + Clone + Add<Output = Self> + Mul<f32, Output = Self> {}

impl Interpolatable for f32 {}
impl Interpolatable for Vector2<f32> {}
impl Interpolatable for Vector3<f32> {}
impl Interpolatable for Fragment {}

/// The programmable per-pixel stage of the pipeline.
///
/// The rasterizer calls `fragment` once for every pixel that is covered by a triangle
/// and passes the depth test, handing over the perspective-correct interpolated
/// fragment. The returned color is linear RGB; values above 1.0 are clamped when the
/// framebuffer packs them.
pub trait Shader {
    fn fragment(&self, fragment: &Fragment) -> Vector3<f32>;
}
