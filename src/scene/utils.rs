use crate::core::geometry::Vertex;
use crate::scene::mesh::Mesh;
use nalgebra::{Point3, Vector3};

/// Analyzes the mesh's bounding box and transforms all vertices
/// so that the mesh is centered at (0,0,0) and fits within [-1, 1].
///
/// Returns the original center and the scaling factor used.
pub fn normalize_and_center_mesh(mesh: &mut Mesh) -> (Point3<f32>, f32) {
    if mesh.vertices.is_empty() {
        return (Point3::origin(), 1.0);
    }

    // 1. Calculate Bounding Box
    let mut min_bound = Point3::new(f32::MAX, f32::MAX, f32::MAX);
    let mut max_bound = Point3::new(f32::MIN, f32::MIN, f32::MIN);
    for vertex in &mesh.vertices {
        min_bound = min_bound.inf(&vertex.position);
        max_bound = max_bound.sup(&vertex.position);
    }

    // 2. Calculate Center and Size
    let center = nalgebra::center(&min_bound, &max_bound);
    let extent = max_bound - min_bound;
    let max_dimension = extent.x.max(extent.y).max(extent.z);

    // Scale to fit in [-1, 1] (size 2.0), with a little padding (1.8)
    let scale_factor = if max_dimension > 1e-6 {
        1.8 / max_dimension
    } else {
        1.0
    };

    // 3. Apply Transform to all vertices
    for vertex in &mut mesh.vertices {
        let centered = vertex.position - center;
        vertex.position = Point3::from(centered * scale_factor);
    }

    (center, scale_factor)
}

/// Area-weighted smooth vertex normals, for meshes that ship without normals.
///
/// Uses the left-handed front-face convention: clockwise triangles seen from the
/// viewer get a normal pointing back at the viewer.
pub fn compute_smooth_normals(vertices: &mut [Vertex], indices: &[u32]) {
    let mut accum = vec![Vector3::<f32>::zeros(); vertices.len()];

    for tri in indices.chunks_exact(3) {
        let [i0, i1, i2] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
        let e1 = vertices[i1].position - vertices[i0].position;
        let e2 = vertices[i2].position - vertices[i0].position;
        // |cross| is twice the area, so larger faces weigh more.
        let face_normal = e1.cross(&e2);
        for i in [i0, i1, i2] {
            accum[i] += face_normal;
        }
    }

    for (vertex, n) in vertices.iter_mut().zip(accum) {
        vertex.normal = n.try_normalize(1e-12).unwrap_or_else(Vector3::y);
    }
}

/// Per-vertex tangents from uv derivatives, accumulated over adjacent triangles and
/// re-orthogonalized against the vertex normal. Triangles with a degenerate uv
/// mapping contribute nothing; vertices without any contribution keep a zero
/// tangent, which disables normal mapping for them.
pub fn compute_tangents(vertices: &mut [Vertex], indices: &[u32]) {
    let mut accum = vec![Vector3::<f32>::zeros(); vertices.len()];

    for tri in indices.chunks_exact(3) {
        let [i0, i1, i2] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
        let (v0, v1, v2) = (&vertices[i0], &vertices[i1], &vertices[i2]);

        let e1 = v1.position - v0.position;
        let e2 = v2.position - v0.position;
        let duv1 = v1.texcoord - v0.texcoord;
        let duv2 = v2.texcoord - v0.texcoord;

        let det = duv1.x * duv2.y - duv2.x * duv1.y;
        if det.abs() < 1e-12 {
            continue;
        }
        let tangent = (e1 * duv2.y - e2 * duv1.y) / det;
        for i in [i0, i1, i2] {
            accum[i] += tangent;
        }
    }

    for (vertex, t) in vertices.iter_mut().zip(accum) {
        let n = vertex.normal;
        let orthogonal = t - n * n.dot(&t);
        vertex.tangent = orthogonal.try_normalize(1e-12).unwrap_or_else(Vector3::zeros);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector2;

    #[test]
    fn test_normalize_and_center() {
        let mut mesh = Mesh::create_quad(4.0, 2.0);
        for v in &mut mesh.vertices {
            v.position += Vector3::new(10.0, 0.0, 0.0);
        }
        let (center, scale) = normalize_and_center_mesh(&mut mesh);
        assert!((center.x - 10.0).abs() < 1e-5);
        assert!((scale - 0.45).abs() < 1e-6);
        let max_x = mesh
            .vertices
            .iter()
            .map(|v| v.position.x)
            .fold(f32::MIN, f32::max);
        assert!((max_x - 0.9).abs() < 1e-5);
    }

    #[test]
    fn test_quad_normals_face_viewer() {
        let mut mesh = Mesh::create_quad(2.0, 2.0);
        for v in &mut mesh.vertices {
            v.normal = Vector3::zeros();
        }
        compute_smooth_normals(&mut mesh.vertices, &mesh.indices);
        for v in &mesh.vertices {
            assert!((v.normal - Vector3::new(0.0, 0.0, -1.0)).norm() < 1e-6);
        }
    }

    #[test]
    fn test_quad_tangents_follow_u() {
        let mut mesh = Mesh::create_quad(2.0, 2.0);
        for v in &mut mesh.vertices {
            v.tangent = Vector3::zeros();
        }
        compute_tangents(&mut mesh.vertices, &mesh.indices);
        for v in &mesh.vertices {
            assert!((v.tangent - Vector3::x()).norm() < 1e-6);
        }
    }

    #[test]
    fn test_degenerate_uvs_leave_zero_tangent() {
        let mut mesh = Mesh::create_test_triangle();
        for v in &mut mesh.vertices {
            v.texcoord = Vector2::zeros();
            v.tangent = Vector3::x();
        }
        compute_tangents(&mut mesh.vertices, &mesh.indices);
        assert!(mesh.vertices.iter().all(|v| v.tangent == Vector3::zeros()));
    }
}
