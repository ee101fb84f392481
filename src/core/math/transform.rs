use nalgebra::{Matrix4, Point2, Point3, Vector3, Vector4};

//=================================
// Transform Matrix Factory
//=================================

/// Factory for creating various transformation matrices.
///
/// Everything here is LEFT-handed: +X right, +Y up, +Z into the screen. Matrices are
/// meant for column vectors (`clip = projection * view * world * p`), and projection
/// maps depth to [0, 1].
pub struct TransformFactory;

#[rustfmt::skip]
impl TransformFactory {
    /// Creates a rotation matrix around the X-axis.
    pub fn rotation_x(angle_rad: f32) -> Matrix4<f32> {
        let c = angle_rad.cos();
        let s = angle_rad.sin();
        Matrix4::new(
            1.0, 0.0, 0.0, 0.0,
            0.0, c,  -s,   0.0,
            0.0, s,   c,   0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Creates a rotation matrix around the Y-axis.
    pub fn rotation_y(angle_rad: f32) -> Matrix4<f32> {
        let c = angle_rad.cos();
        let s = angle_rad.sin();
        Matrix4::new(
            c,   0.0, s,   0.0,
            0.0, 1.0, 0.0, 0.0,
           -s,   0.0, c,   0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Creates a rotation matrix around the Z-axis.
    pub fn rotation_z(angle_rad: f32) -> Matrix4<f32> {
        let c = angle_rad.cos();
        let s = angle_rad.sin();
        Matrix4::new(
            c,  -s,   0.0, 0.0,
            s,   c,   0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Euler rotation in degrees, applied X then Y then Z.
    pub fn rotation_euler_deg(degrees: &Vector3<f32>) -> Matrix4<f32> {
        Self::rotation_z(degrees.z.to_radians())
            * Self::rotation_y(degrees.y.to_radians())
            * Self::rotation_x(degrees.x.to_radians())
    }

    /// Creates a translation matrix.
    pub fn translation(translation: &Vector3<f32>) -> Matrix4<f32> {
        Matrix4::new(
            1.0, 0.0, 0.0, translation.x,
            0.0, 1.0, 0.0, translation.y,
            0.0, 0.0, 1.0, translation.z,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Creates a non-uniform scaling matrix.
    pub fn scaling_nonuniform(scale: &Vector3<f32>) -> Matrix4<f32> {
        Matrix4::new(
            scale.x, 0.0,     0.0,     0.0,
            0.0,     scale.y, 0.0,     0.0,
            0.0,     0.0,     scale.z, 0.0,
            0.0,     0.0,     0.0,     1.0,
        )
    }

    /// Creates a View matrix (Look-To, Left-Handed) from an eye position and a unit
    /// forward direction. The camera looks down its local +Z.
    ///
    /// `forward` and `up` must not be parallel; see `Camera::set_pose`.
    pub fn look_to_lh(eye: &Point3<f32>, forward: &Vector3<f32>, up: &Vector3<f32>) -> Matrix4<f32> {
        let z_axis = forward.normalize();
        let x_axis = up.cross(&z_axis).normalize();
        let y_axis = z_axis.cross(&x_axis);

        Matrix4::new(
            x_axis.x, x_axis.y, x_axis.z, -x_axis.dot(&eye.coords),
            y_axis.x, y_axis.y, y_axis.z, -y_axis.dot(&eye.coords),
            z_axis.x, z_axis.y, z_axis.z, -z_axis.dot(&eye.coords),
            0.0,      0.0,      0.0,      1.0,
        )
    }

    /// Creates a Perspective Projection matrix (Left-Handed).
    ///
    /// `tan_half_fov_y` is the tangent of half the vertical field of view. Points at
    /// view depth `near` land on NDC z = 0 and points at `far` on z = 1; clip w is the
    /// view-space depth.
    pub fn perspective_fov_lh(tan_half_fov_y: f32, aspect_ratio: f32, near: f32, far: f32) -> Matrix4<f32> {
        let y_scale = 1.0 / tan_half_fov_y;
        let x_scale = y_scale / aspect_ratio;
        let range = far / (far - near);

        Matrix4::new(
            x_scale, 0.0,     0.0,   0.0,
            0.0,     y_scale, 0.0,   0.0,
            0.0,     0.0,     range, -near * range,
            0.0,     0.0,     1.0,   0.0,
        )
    }
}

//=================================
// Core Transformation Functions
//=================================

/// Performs perspective division: Clip Space -> NDC.
///
/// Returns `None` when w is too close to zero to divide by (the point sits on the
/// camera's eye plane).
#[inline]
pub fn apply_perspective_division(clip: &Vector4<f32>) -> Option<Point3<f32>> {
    let w = clip.w;
    if w.abs() > 1e-6 {
        Some(Point3::new(clip.x / w, clip.y / w, clip.z / w))
    } else {
        None
    }
}

/// Converts NDC coordinates to Screen coordinates (Viewport Transform).
/// Note: Y-axis is flipped (NDC +Y is up, Screen +Y is down).
#[inline]
pub fn ndc_to_screen(ndc_x: f32, ndc_y: f32, width: f32, height: f32) -> Point2<f32> {
    Point2::new((ndc_x + 1.0) * 0.5 * width, (1.0 - ndc_y) * 0.5 * height)
}

/// Transforms a direction by the rotation/scale part of a matrix (no translation).
#[inline]
pub fn transform_direction(matrix: &Matrix4<f32>, direction: &Vector3<f32>) -> Vector3<f32> {
    matrix.fixed_view::<3, 3>(0, 0) * direction
}
