use crate::core::geometry::{Fragment, Vertex};
use crate::core::math::transform::{apply_perspective_division, transform_direction};
use crate::scene::camera::Camera;
use crate::scene::mesh::Mesh;
use nalgebra::{Matrix4, Point3, Vector3, Vector4};

/// Per-mesh transform state for the vertex stage.
#[derive(Debug, Clone, Copy)]
pub struct VertexStage {
    world: Matrix4<f32>,
    world_view_projection: Matrix4<f32>,
    camera_origin: Point3<f32>,
}

impl VertexStage {
    pub fn new(world: Matrix4<f32>, camera: &Camera) -> Self {
        Self {
            world,
            world_view_projection: camera.projection_matrix() * camera.view_matrix() * world,
            camera_origin: camera.origin(),
        }
    }

    /// Transforms every vertex of `mesh` into `out`, index-aligned with
    /// `mesh.vertices`. `out` is cleared first so its allocation can be reused.
    pub fn run(mesh: &Mesh, camera: &Camera, out: &mut Vec<Fragment>) {
        let stage = Self::new(mesh.world, camera);
        out.clear();
        out.extend(mesh.vertices.iter().map(|v| stage.transform(v)));
    }

    /// Vertex shader for a single vertex.
    pub fn transform(&self, vertex: &Vertex) -> Fragment {
        // 1. Clip space, then NDC. w is kept for perspective correction.
        let clip = self.world_view_projection * vertex.position.to_homogeneous();
        let position = match apply_perspective_division(&clip) {
            Some(ndc) => Vector4::new(ndc.x, ndc.y, ndc.z, clip.w),
            // On the eye plane: leave it undivided, its w fails frustum containment.
            None => clip,
        };

        // 2. World space position for the view vector.
        let world_pos = (self.world * vertex.position.to_homogeneous()).xyz();
        let view_dir = (self.camera_origin.coords - world_pos)
            .try_normalize(1e-8)
            .unwrap_or_else(Vector3::zeros);

        // 3. Directions take the world rotation only.
        let normal = transform_direction(&self.world, &vertex.normal);
        let tangent = transform_direction(&self.world, &vertex.tangent);

        Fragment {
            position,
            normal: normal.try_normalize(1e-8).unwrap_or(normal),
            tangent: tangent.try_normalize(1e-8).unwrap_or(tangent),
            view_dir,
            uv: vertex.texcoord,
            color: vertex.color,
        }
    }
}
