use crate::scene::material::TextureSet;
use crate::scene::mesh::Mesh;

/// A mesh instance together with the texture maps it is shaded with.
/// The world transform lives on the mesh.
#[derive(Debug, Clone)]
pub struct SceneObject {
    pub mesh: Mesh,
    pub textures: TextureSet,
}

impl SceneObject {
    pub fn new(mesh: Mesh, textures: TextureSet) -> Self {
        Self { mesh, textures }
    }
}
