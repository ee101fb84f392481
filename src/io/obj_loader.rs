use crate::core::geometry::Vertex;
use crate::error::{RenderError, Result};
use crate::scene::mesh::Mesh;
use crate::scene::utils::{compute_smooth_normals, compute_tangents};
use log::{info, warn};
use nalgebra::{Point3, Vector2, Vector3};
use std::path::Path;

/// Loads an OBJ file and returns a unified Mesh.
///
/// OBJ data is right-handed with V pointing up. It is converted to the left-handed
/// pipeline on load: z is negated on positions and normals, the winding of every
/// triangle is reversed so front faces stay front faces, and V is flipped so
/// UV (0,0) addresses the top-left texel. Tangents are derived from the uvs.
pub fn load_obj<P: AsRef<Path>>(path: P) -> Result<Mesh> {
    let path_obj = path.as_ref();
    let mesh_err = |reason: String| RenderError::MeshLoad {
        path: path_obj.to_path_buf(),
        reason,
    };

    if !path_obj.exists() {
        return Err(mesh_err("file not found".to_string()));
    }

    info!("Loading OBJ file: {:?}", path_obj);

    let load_options = tobj::LoadOptions {
        triangulate: true,
        single_index: true, // Important: Unifies indices for Position/Normal/UV
        ..Default::default()
    };

    // Materials are configured through the scene file, not MTL.
    let (models, _materials) =
        tobj::load_obj(path_obj, &load_options).map_err(|e| mesh_err(e.to_string()))?;

    let mut vertices = Vec::new();
    let mut indices = Vec::new();
    let mut index_offset = 0u32;
    let mut missing_normals = false;
    let mut has_any_texcoords = false;

    // Iterate over all models found in the OBJ file
    for model in models {
        let mesh = &model.mesh;
        let num_vertices = mesh.positions.len() / 3;

        let has_normals = mesh.normals.len() == mesh.positions.len();
        let has_texcoords = mesh.texcoords.len() / 2 == num_vertices;
        has_any_texcoords |= has_texcoords;

        if !has_normals {
            warn!(
                "Mesh '{}' is missing normals. Computing smooth normals.",
                model.name
            );
            missing_normals = true;
        }

        for i in 0..num_vertices {
            let position = Point3::new(
                mesh.positions[i * 3],
                mesh.positions[i * 3 + 1],
                -mesh.positions[i * 3 + 2],
            );

            let normal = if has_normals {
                Vector3::new(
                    mesh.normals[i * 3],
                    mesh.normals[i * 3 + 1],
                    -mesh.normals[i * 3 + 2],
                )
            } else {
                Vector3::zeros()
            };

            let texcoord = if has_texcoords {
                Vector2::new(mesh.texcoords[i * 2], 1.0 - mesh.texcoords[i * 2 + 1])
            } else {
                Vector2::zeros()
            };

            vertices.push(Vertex::new(position, normal, texcoord));
        }

        // Offset by the vertices of previously merged models, reversing winding.
        for tri in mesh.indices.chunks_exact(3) {
            indices.extend_from_slice(&[
                tri[0] + index_offset,
                tri[2] + index_offset,
                tri[1] + index_offset,
            ]);
        }

        index_offset += num_vertices as u32;
    }

    if vertices.is_empty() {
        return Err(mesh_err("no geometry".to_string()));
    }

    let mut mesh = Mesh::new(vertices, indices)?;

    if missing_normals {
        compute_smooth_normals(&mut mesh.vertices, &mesh.indices);
    }
    if has_any_texcoords {
        compute_tangents(&mut mesh.vertices, &mesh.indices);
    } else {
        warn!("{:?} has no texture coordinates; normal mapping disabled", path_obj);
    }

    info!(
        "OBJ loaded successfully. Total vertices: {}, Total triangles: {}",
        mesh.vertices.len(),
        mesh.triangle_count()
    );

    Ok(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_temp_obj(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!(
            "phong_rasterizer_{}_{}.obj",
            name,
            std::process::id()
        ));
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_missing_file() {
        let err = load_obj("no/such/mesh.obj").unwrap_err();
        assert!(matches!(err, RenderError::MeshLoad { .. }));
    }

    #[test]
    fn test_handedness_conversion() {
        // Counter-clockwise seen from +Z (the OBJ front side), normal +Z.
        let path = write_temp_obj(
            "square",
            "v -1 -1 0.5\nv 1 -1 0.5\nv 1 1 0.5\nv -1 1 0.5\n\
             vt 0 0\nvt 1 0\nvt 1 1\nvt 0 1\n\
             vn 0 0 1\n\
             f 1/1/1 2/2/1 3/3/1 4/4/1\n",
        );
        let mesh = load_obj(&path).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(mesh.triangle_count(), 2);
        for v in &mesh.vertices {
            assert!((v.position.z + 0.5).abs() < 1e-6);
            assert!((v.normal - Vector3::new(0.0, 0.0, -1.0)).norm() < 1e-6);
        }

        // The vertex at OBJ uv (0,0) is the bottom-left corner, V flipped to 1.
        let bottom_left = mesh
            .vertices
            .iter()
            .find(|v| v.position.x < 0.0 && v.position.y < 0.0)
            .unwrap();
        assert!((bottom_left.texcoord - Vector2::new(0.0, 1.0)).norm() < 1e-6);

        // Winding reversed: normals recomputed from the faces agree with the file.
        let mut recomputed = mesh.vertices.clone();
        compute_smooth_normals(&mut recomputed, &mesh.indices);
        for (a, b) in recomputed.iter().zip(&mesh.vertices) {
            assert!((a.normal - b.normal).norm() < 1e-5);
        }

        for v in &mesh.vertices {
            assert!((v.tangent - Vector3::x()).norm() < 1e-5);
        }
    }
}
