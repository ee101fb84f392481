use crate::core::pipeline::Interpolatable;
use nalgebra::{Point2, Vector3};

const EPSILON: f32 = 1e-5;

/// Signed edge function: the cross product `(b - a) x (p - a)`.
///
/// Twice the signed area of triangle (a, b, p). With screen space y pointing down, the
/// value is positive when `p` lies to the right of the directed edge `a -> b` as seen
/// on screen.
#[inline(always)]
pub fn edge_function(a: Point2<f32>, b: Point2<f32>, p: Point2<f32>) -> f32 {
    (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x)
}

/// Twice the signed area of the triangle. Its sign is the winding order on screen.
#[inline(always)]
pub fn signed_area_x2(v0: Point2<f32>, v1: Point2<f32>, v2: Point2<f32>) -> f32 {
    edge_function(v0, v1, v2)
}

/// Calculates the screen-space barycentric coordinates of `p` with respect to
/// triangle (v0, v1, v2).
///
/// Each weight is the signed area of the sub-triangle opposite its vertex divided by
/// the signed area of the whole triangle, so the weights sum to one and carry the
/// same sign convention for either winding.
///
/// Returns `None` if the triangle is degenerate (area is near zero).
pub fn barycentric_coordinates(
    p: Point2<f32>,
    v0: Point2<f32>,
    v1: Point2<f32>,
    v2: Point2<f32>,
) -> Option<Vector3<f32>> {
    let total = signed_area_x2(v0, v1, v2);
    if total.abs() < EPSILON {
        return None;
    }
    let inv_total = 1.0 / total;

    let w0 = edge_function(v1, v2, p) * inv_total;
    let w1 = edge_function(v2, v0, p) * inv_total;
    let w2 = edge_function(v0, v1, p) * inv_total;

    Some(Vector3::new(w0, w1, w2))
}

/// A pixel is covered when all three edge functions share the sign of the total
/// area, which after normalization means every weight is non-negative.
#[inline(always)]
pub fn is_inside_triangle(bary: &Vector3<f32>) -> bool {
    bary.x >= 0.0 && bary.y >= 0.0 && bary.z >= 0.0
}

/// Perspective-correct depth: `1 / (b0/z0 + b1/z1 + b2/z2)` over NDC z.
///
/// Reciprocal depth is linear in screen space, z is not. Returns `None` when the sum
/// is not a positive finite number, which happens for vertices sitting on the near
/// plane.
pub fn interpolate_depth(bary: &Vector3<f32>, z: [f32; 3]) -> Option<f32> {
    if z.iter().any(|zi| zi.abs() < EPSILON) {
        return None;
    }
    let inv_depth = bary.x / z[0] + bary.y / z[1] + bary.z / z[2];
    if !inv_depth.is_finite() || inv_depth < EPSILON {
        return None;
    }
    Some(1.0 / inv_depth)
}

/// Computes the per-vertex factors `b_i / w_i` and the corrected weight
/// `wc = 1 / sum(b_i / w_i)` from clip-space w values.
///
/// Any attribute interpolated as `sum(A_i * b_i / w_i) * wc` is linear in 3D rather
/// than on screen. Returns `None` when a w is near zero or the sum collapses.
pub fn perspective_weights(bary: &Vector3<f32>, w: [f32; 3]) -> Option<(Vector3<f32>, f32)> {
    if w.iter().any(|wi| wi.abs() < EPSILON) {
        return None;
    }
    let factors = Vector3::new(bary.x / w[0], bary.y / w[1], bary.z / w[2]);
    let sum = factors.x + factors.y + factors.z;
    if !sum.is_finite() || sum.abs() < EPSILON {
        return None;
    }
    Some((factors, 1.0 / sum))
}

/// Perspective-correct interpolation of any blendable attribute.
pub fn perspective_interpolate<T: Interpolatable>(
    values: [T; 3],
    bary: &Vector3<f32>,
    w: [f32; 3],
) -> Option<T> {
    let (factors, w_corrected) = perspective_weights(bary, w)?;
    Some(blend(values, &factors) * w_corrected)
}

/// Plain screen-space interpolation `A0*b0 + A1*b1 + A2*b2`.
#[inline]
pub fn blend<T: Interpolatable>(values: [T; 3], weights: &Vector3<f32>) -> T {
    values[0] * weights.x + values[1] * weights.y + values[2] * weights.z
}
