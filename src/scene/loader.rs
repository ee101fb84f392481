use crate::core::math::transform::TransformFactory;
use crate::error::Result;
use crate::io::config::{Config, ObjectConfig};
use crate::io::obj_loader::load_obj;
use crate::scene::camera::Camera;
use crate::scene::context::RenderContext;
use crate::scene::light::DirectionalLight;
use crate::scene::material::TextureSet;
use crate::scene::scene_object::SceneObject;
use crate::scene::texture::{Filter, Texture};
use crate::scene::utils::normalize_and_center_mesh;
use log::{info, warn};
use nalgebra::{Matrix4, Point3, Vector3};

/// Object-to-world matrix: scale, then rotate (degrees, Z*Y*X), then translate.
pub fn object_transform(obj_conf: &ObjectConfig) -> Matrix4<f32> {
    let translation = TransformFactory::translation(&Vector3::from(obj_conf.position));
    let rotation = TransformFactory::rotation_euler_deg(&Vector3::from(obj_conf.rotation));
    let scale = TransformFactory::scaling_nonuniform(&Vector3::from(obj_conf.scale));
    translation * rotation * scale
}

pub fn build_camera(config: &Config) -> Camera {
    let position = Point3::from(config.camera.position);
    let target = Point3::from(config.camera.target);
    let mut forward = target - position;
    if forward.norm_squared() < 1e-12 {
        warn!("Camera target equals its position; looking down +Z");
        forward = Vector3::z();
    }
    Camera::new(
        position,
        forward,
        config.camera.fov,
        config.aspect_ratio(),
        config.camera.near,
        config.camera.far,
    )
}

fn load_textures(obj_conf: &ObjectConfig, config: &Config) -> Result<TextureSet> {
    let filter = obj_conf.texture_filter.parse::<Filter>()?;
    let load = |path: &Option<String>| {
        path.as_ref()
            .map(|p| Texture::load(p).map(|t| t.with_filter(filter)))
            .transpose()
    };

    Ok(TextureSet {
        diffuse: load(&obj_conf.diffuse_texture)?,
        normal: load(&obj_conf.normal_texture)?,
        gloss: load(&obj_conf.gloss_texture)?,
        specular: load(&obj_conf.specular_texture)?,
        specular_color: Vector3::from(config.render.fallback_specular),
        ..TextureSet::default()
    })
}

/// Initial resource loading (Heavy I/O). Returns a RenderContext.
///
/// Any mesh or texture that fails to load aborts scene construction. Without
/// `[[objects]]` the built-in scene geometry is used under the configured camera
/// and light.
pub fn init_scene_resources(config: &Config) -> Result<RenderContext> {
    let camera = build_camera(config);
    let light = DirectionalLight::new(
        Vector3::from(config.light.direction),
        config.light.intensity,
    );

    if config.objects.is_empty() {
        info!("No objects configured, using the built-in scene.");
        let mut context = RenderContext::default_scene(config.aspect_ratio())?;
        context.camera = camera;
        context.light = light;
        return Ok(context);
    }

    let mut context = RenderContext::new(camera, light);
    for obj_conf in &config.objects {
        let mut mesh = load_obj(&obj_conf.path)?;
        if obj_conf.normalize {
            normalize_and_center_mesh(&mut mesh);
        }
        let mesh = mesh.with_world(object_transform(obj_conf));
        let textures = load_textures(obj_conf, config)?;
        context.add_object(SceneObject::new(mesh, textures));
    }

    info!(
        "Scene initialized with {} objects.",
        context.scene_objects.len()
    );
    Ok(context)
}
