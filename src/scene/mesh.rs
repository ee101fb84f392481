use crate::core::geometry::Vertex;
use crate::core::math::transform::TransformFactory;
use crate::error::{RenderError, Result};
use nalgebra::{Matrix4, Point3, Vector2, Vector3};

/// A collection of vertices and indices representing a 3D object.
#[derive(Debug, Clone)]
pub struct Mesh {
    /// List of vertices.
    pub vertices: Vec<Vertex>,
    /// Triangle list: every consecutive triple of indices is one triangle.
    pub indices: Vec<u32>,
    /// Object-to-world transform, updated between frames for animation.
    pub world: Matrix4<f32>,
}

impl Mesh {
    /// Creates a mesh after checking that the indices form complete triangles and
    /// reference existing vertices.
    pub fn new(vertices: Vec<Vertex>, indices: Vec<u32>) -> Result<Self> {
        if indices.len() % 3 != 0 {
            return Err(RenderError::InvalidMesh(format!(
                "index count {} is not a multiple of 3",
                indices.len()
            )));
        }
        if let Some(&bad) = indices.iter().find(|&&i| i as usize >= vertices.len()) {
            return Err(RenderError::InvalidMesh(format!(
                "index {} out of range for {} vertices",
                bad,
                vertices.len()
            )));
        }
        Ok(Self {
            vertices,
            indices,
            world: Matrix4::identity(),
        })
    }

    pub fn with_world(mut self, world: Matrix4<f32>) -> Self {
        self.world = world;
        self
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Iterates triangles as vertex index triples.
    pub fn triangles(&self) -> impl Iterator<Item = [usize; 3]> + '_ {
        self.indices
            .chunks_exact(3)
            .map(|t| [t[0] as usize, t[1] as usize, t[2] as usize])
    }

    /// Rotates the mesh about world +Y, on top of its current transform.
    pub fn rotate_y(&mut self, angle_rad: f32) {
        self.world = TransformFactory::rotation_y(angle_rad) * self.world;
    }

    /// Creates a simple RGB triangle in the XY plane.
    ///
    /// Vertices are arranged clockwise as seen from -Z, i.e. front-facing for a camera
    /// looking down +Z.
    pub fn create_test_triangle() -> Self {
        let normal = Vector3::new(0.0, 0.0, -1.0);
        let tangent = Vector3::x();
        let vertices = vec![
            Vertex::new(Point3::new(0.0, 4.0, 2.0), normal, Vector2::new(0.5, 0.0))
                .with_tangent(tangent)
                .with_color(Vector3::new(1.0, 0.0, 0.0)),
            Vertex::new(Point3::new(3.0, -2.0, 2.0), normal, Vector2::new(1.0, 1.0))
                .with_tangent(tangent)
                .with_color(Vector3::new(0.0, 1.0, 0.0)),
            Vertex::new(Point3::new(-3.0, -2.0, 2.0), normal, Vector2::new(0.0, 1.0))
                .with_tangent(tangent)
                .with_color(Vector3::new(0.0, 0.0, 1.0)),
        ];

        Self {
            vertices,
            indices: vec![0, 1, 2],
            world: Matrix4::identity(),
        }
    }

    /// Creates an axis-aligned quad in the XY plane, centered at the origin and facing
    /// -Z, made of two triangles. UV (0,0) is the top-left corner.
    pub fn create_quad(width: f32, height: f32) -> Self {
        let hw = width * 0.5;
        let hh = height * 0.5;
        let normal = Vector3::new(0.0, 0.0, -1.0);
        let tangent = Vector3::x();
        let corner = |x: f32, y: f32, u: f32, v: f32| {
            Vertex::new(Point3::new(x, y, 0.0), normal, Vector2::new(u, v)).with_tangent(tangent)
        };
        let vertices = vec![
            corner(-hw, hh, 0.0, 0.0),
            corner(hw, hh, 1.0, 0.0),
            corner(hw, -hh, 1.0, 1.0),
            corner(-hw, -hh, 0.0, 1.0),
        ];

        Self {
            vertices,
            indices: vec![0, 1, 2, 0, 2, 3],
            world: Matrix4::identity(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_incomplete_triangle_is_rejected() {
        let mesh = Mesh::create_test_triangle();
        let err = Mesh::new(mesh.vertices, vec![0, 1]).unwrap_err();
        assert!(matches!(err, RenderError::InvalidMesh(_)));
    }

    #[test]
    fn test_out_of_range_index_is_rejected() {
        let mesh = Mesh::create_test_triangle();
        assert!(Mesh::new(mesh.vertices, vec![0, 1, 3]).is_err());
    }

    #[test]
    fn test_quad_triangles() {
        let quad = Mesh::create_quad(2.0, 2.0);
        let tris: Vec<_> = quad.triangles().collect();
        assert_eq!(tris, vec![[0, 1, 2], [0, 2, 3]]);
        assert_eq!(quad.triangle_count(), 2);
    }

    #[test]
    fn test_rotate_y_accumulates() {
        let mut mesh = Mesh::create_quad(1.0, 1.0);
        mesh.rotate_y(std::f32::consts::FRAC_PI_2);
        mesh.rotate_y(std::f32::consts::FRAC_PI_2);
        let expected = TransformFactory::rotation_y(std::f32::consts::PI);
        assert!((mesh.world - expected).norm() < 1e-5);
    }
}
