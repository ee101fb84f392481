use crate::core::math::transform::TransformFactory;
use crate::error::Result;
use crate::scene::camera::Camera;
use crate::scene::light::DirectionalLight;
use crate::scene::material::TextureSet;
use crate::scene::mesh::Mesh;
use crate::scene::scene_object::SceneObject;
use crate::scene::texture::Texture;
use nalgebra::{Point3, Vector3};

/// Holds all scene resources required for rendering.
#[derive(Debug, Clone)]
pub struct RenderContext {
    pub camera: Camera,
    pub light: DirectionalLight,
    pub scene_objects: Vec<SceneObject>,
}

impl RenderContext {
    pub fn new(camera: Camera, light: DirectionalLight) -> Self {
        Self {
            camera,
            light,
            scene_objects: Vec::new(),
        }
    }

    pub fn add_object(&mut self, object: SceneObject) {
        self.scene_objects.push(object);
    }

    /// Rotates every object about world +Y. Called between frames, never while one
    /// is being drawn.
    pub fn rotate_objects_y(&mut self, angle_rad: f32) {
        for obj in &mut self.scene_objects {
            obj.mesh.rotate_y(angle_rad);
        }
    }

    /// Built-in scene used when no config file is given: a checkerboard quad behind
    /// the RGB test triangle, seen from (0, 0, -10).
    pub fn default_scene(aspect_ratio: f32) -> Result<Self> {
        let camera = Camera::new(
            Point3::new(0.0, 0.0, -10.0),
            Vector3::z(),
            60.0,
            aspect_ratio,
            0.1,
            100.0,
        );
        let mut context = Self::new(camera, DirectionalLight::default());

        let checker = Texture::checkerboard(8, 32, [230, 230, 230], [40, 40, 40])?;
        let quad = Mesh::create_quad(14.0, 10.0)
            .with_world(TransformFactory::translation(&Vector3::new(0.0, 0.0, 5.0)));
        context.add_object(SceneObject::new(quad, TextureSet::default().with_diffuse(checker)));

        context.add_object(SceneObject::new(
            Mesh::create_test_triangle(),
            TextureSet::default(),
        ));

        Ok(context)
    }
}
