use crate::core::math::transform::TransformFactory;
use log::warn;
use nalgebra::{Matrix4, Point3, Vector3};

/// Forward directions closer to world up than this (|dot|) use the secondary up.
const PARALLEL_UP_THRESHOLD: f32 = 0.999;

/// Pinhole camera. Manages the View and Projection matrices.
///
/// Left-handed: the camera looks down its `forward` axis with +Y as world up. The view
/// matrix is rebuilt on every pose change, the projection matrix only when one of its
/// four inputs actually changes.
#[derive(Debug, Clone)]
pub struct Camera {
    // --- Pose ---
    origin: Point3<f32>,
    forward: Vector3<f32>,
    up: Vector3<f32>,
    right: Vector3<f32>,

    // --- Projection Parameters ---
    fov_y_deg: f32,
    tan_half_fov: f32,
    aspect_ratio: f32,
    near: f32,
    far: f32,

    // --- Cached Matrices ---
    view_matrix: Matrix4<f32>,
    projection_matrix: Matrix4<f32>,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Point3::origin(), Vector3::z(), 90.0, 1.0, 0.1, 100.0)
    }
}

impl Camera {
    pub fn new(
        origin: Point3<f32>,
        forward: Vector3<f32>,
        fov_y_deg: f32,
        aspect_ratio: f32,
        near: f32,
        far: f32,
    ) -> Self {
        let mut cam = Self {
            origin,
            forward: Vector3::z(),
            up: Vector3::y(),
            right: Vector3::x(),
            fov_y_deg,
            tan_half_fov: (fov_y_deg.to_radians() * 0.5).tan(),
            aspect_ratio,
            near,
            far,
            view_matrix: Matrix4::identity(),
            projection_matrix: Matrix4::identity(),
        };
        cam.set_pose(origin, forward);
        cam.update_projection();
        cam
    }

    /// Places the camera at `origin` looking along `forward` (normalized here).
    ///
    /// A zero-length forward leaves the pose untouched.
    pub fn set_pose(&mut self, origin: Point3<f32>, forward: Vector3<f32>) {
        let Some(forward) = forward.try_normalize(1e-8) else {
            warn!("Ignoring camera pose with zero-length forward vector");
            return;
        };

        // Looking straight up or down makes world up useless for the basis.
        let world_up = if forward.dot(&Vector3::y()).abs() > PARALLEL_UP_THRESHOLD {
            Vector3::z()
        } else {
            Vector3::y()
        };

        self.origin = origin;
        self.forward = forward;
        self.right = world_up.cross(&forward).normalize();
        self.up = forward.cross(&self.right);
        self.view_matrix = TransformFactory::look_to_lh(&self.origin, &self.forward, &world_up);
    }

    /// Convenience pose: look from `origin` towards `target`.
    pub fn look_at(&mut self, origin: Point3<f32>, target: Point3<f32>) {
        self.set_pose(origin, target - origin);
    }

    /// Updates the perspective parameters. The matrix is rebuilt only when a value
    /// differs from the cached one.
    pub fn set_projection(&mut self, fov_y_deg: f32, aspect_ratio: f32, near: f32, far: f32) {
        if fov_y_deg == self.fov_y_deg
            && aspect_ratio == self.aspect_ratio
            && near == self.near
            && far == self.far
        {
            return;
        }
        self.fov_y_deg = fov_y_deg;
        self.tan_half_fov = (fov_y_deg.to_radians() * 0.5).tan();
        self.aspect_ratio = aspect_ratio;
        self.near = near;
        self.far = far;
        self.update_projection();
    }

    pub fn set_aspect_ratio(&mut self, aspect_ratio: f32) {
        self.set_projection(self.fov_y_deg, aspect_ratio, self.near, self.far);
    }

    fn update_projection(&mut self) {
        self.projection_matrix = TransformFactory::perspective_fov_lh(
            self.tan_half_fov,
            self.aspect_ratio,
            self.near,
            self.far,
        );
    }

    pub fn view_matrix(&self) -> Matrix4<f32> {
        self.view_matrix
    }

    pub fn projection_matrix(&self) -> Matrix4<f32> {
        self.projection_matrix
    }

    pub fn origin(&self) -> Point3<f32> {
        self.origin
    }

    pub fn forward(&self) -> Vector3<f32> {
        self.forward
    }

    pub fn up(&self) -> Vector3<f32> {
        self.up
    }

    pub fn right(&self) -> Vector3<f32> {
        self.right
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.aspect_ratio
    }
}
