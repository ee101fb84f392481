use crate::core::rasterizer::CullMode;
use crate::error::{RenderError, Result};
use crate::pipeline::settings::{RenderConfig, ShadingMode};
use crate::scene::texture::Filter;
use nalgebra::Vector3;
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub render: RenderSection,
    #[serde(default)]
    pub camera: CameraConfig,
    #[serde(default)]
    pub light: LightConfig,
    #[serde(default)]
    pub objects: Vec<ObjectConfig>,
}

#[derive(Debug, Deserialize)]
pub struct RenderSection {
    // --- Output ---
    #[serde(default = "default_width")]
    pub width: usize,
    #[serde(default = "default_height")]
    pub height: usize,
    #[serde(default = "default_output")]
    pub output: String,
    #[serde(default)]
    pub depth_output: Option<String>,
    #[serde(default = "default_background")]
    pub background: [f32; 3],

    // --- Shading ---
    #[serde(default = "default_shading_mode")]
    pub shading_mode: String, // "observed_area", "diffuse", "specular", "combined"
    #[serde(default = "default_true")]
    pub use_texture: bool,
    #[serde(default = "default_true")]
    pub use_normal_map: bool,
    #[serde(default = "default_cull_mode")]
    pub cull_mode: String, // "back", "front", "none"
    #[serde(default = "default_ambient")]
    pub ambient: [f32; 3],
    #[serde(default = "default_shininess")]
    pub shininess: f32,
    #[serde(default = "default_fallback_specular")]
    pub fallback_specular: [f32; 3],

    // --- Animation ---
    #[serde(default = "default_frames")]
    pub frames: usize,
    #[serde(default = "default_rotation_speed")]
    pub rotation_speed: f32, // degrees per second
    #[serde(default = "default_fps")]
    pub fps: f32,
    #[serde(default = "default_false")]
    pub all_modes: bool,
}

impl Default for RenderSection {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            output: default_output(),
            depth_output: None,
            background: default_background(),
            shading_mode: default_shading_mode(),
            use_texture: true,
            use_normal_map: true,
            cull_mode: default_cull_mode(),
            ambient: default_ambient(),
            shininess: default_shininess(),
            fallback_specular: default_fallback_specular(),
            frames: default_frames(),
            rotation_speed: default_rotation_speed(),
            fps: default_fps(),
            all_modes: false,
        }
    }
}

fn default_width() -> usize {
    640
}
fn default_height() -> usize {
    480
}
fn default_output() -> String {
    "output.png".to_string()
}
fn default_background() -> [f32; 3] {
    [0.39, 0.39, 0.39]
}
fn default_shading_mode() -> String {
    "combined".to_string()
}
fn default_cull_mode() -> String {
    "none".to_string()
}
fn default_ambient() -> [f32; 3] {
    [0.025, 0.025, 0.025]
}
fn default_shininess() -> f32 {
    25.0
}
fn default_fallback_specular() -> [f32; 3] {
    [0.5, 0.5, 0.5]
}
fn default_frames() -> usize {
    1
}
fn default_rotation_speed() -> f32 {
    45.0
}
fn default_fps() -> f32 {
    30.0
}
fn default_false() -> bool {
    false
}
fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize)]
pub struct CameraConfig {
    #[serde(default = "default_camera_position")]
    pub position: [f32; 3],
    #[serde(default)]
    pub target: [f32; 3],
    #[serde(default = "default_fov")]
    pub fov: f32,
    #[serde(default = "default_near")]
    pub near: f32,
    #[serde(default = "default_far")]
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: default_camera_position(),
            target: [0.0, 0.0, 0.0],
            fov: default_fov(),
            near: default_near(),
            far: default_far(),
        }
    }
}

fn default_camera_position() -> [f32; 3] {
    [0.0, 0.0, -10.0]
}
fn default_fov() -> f32 {
    60.0
}
fn default_near() -> f32 {
    0.1
}
fn default_far() -> f32 {
    100.0
}

#[derive(Debug, Deserialize)]
pub struct LightConfig {
    #[serde(default = "default_light_direction")]
    pub direction: [f32; 3],
    #[serde(default = "default_light_intensity")]
    pub intensity: f32,
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            direction: default_light_direction(),
            intensity: default_light_intensity(),
        }
    }
}

fn default_light_direction() -> [f32; 3] {
    [0.577, -0.577, 0.577]
}
fn default_light_intensity() -> f32 {
    7.0
}

#[derive(Debug, Deserialize)]
pub struct ObjectConfig {
    pub path: String,

    // --- Transform ---
    #[serde(default)]
    pub position: [f32; 3],
    #[serde(default)]
    pub rotation: [f32; 3], // degrees
    #[serde(default = "default_scale")]
    pub scale: [f32; 3],
    /// Recenters the mesh and fits it into [-0.9, 0.9] before the transform.
    #[serde(default = "default_false")]
    pub normalize: bool,

    // --- Textures ---
    pub diffuse_texture: Option<String>,
    pub normal_texture: Option<String>,
    pub gloss_texture: Option<String>,
    pub specular_texture: Option<String>,
    /// "nearest" or "bilinear", applied to every map of the object.
    #[serde(default = "default_texture_filter")]
    pub texture_filter: String,
}

fn default_texture_filter() -> String {
    "nearest".to_string()
}

fn default_scale() -> [f32; 3] {
    [1.0, 1.0, 1.0]
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| RenderError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    fn validate(&self) -> Result<()> {
        let r = &self.render;
        if r.width == 0 || r.height == 0 {
            return Err(RenderError::ConfigValue(format!(
                "resolution must be non-zero, got {}x{}",
                r.width, r.height
            )));
        }
        if !(r.fps > 0.0) {
            return Err(RenderError::ConfigValue(format!("fps must be positive, got {}", r.fps)));
        }
        let c = &self.camera;
        if !(c.near > 0.0 && c.far > c.near) {
            return Err(RenderError::ConfigValue(format!(
                "invalid clip planes near={} far={}",
                c.near, c.far
            )));
        }
        if !(c.fov > 0.0 && c.fov < 180.0) {
            return Err(RenderError::ConfigValue(format!("fov out of range: {}", c.fov)));
        }
        for obj in &self.objects {
            obj.texture_filter.parse::<Filter>()?;
        }
        self.to_render_config().map(|_| ())
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.render.width as f32 / self.render.height as f32
    }

    /// Rotation applied to every object between two animation frames, in radians.
    pub fn rotation_step(&self) -> f32 {
        (self.render.rotation_speed / self.render.fps).to_radians()
    }

    /// Translates the `[render]` section into the per-frame pipeline settings.
    pub fn to_render_config(&self) -> Result<RenderConfig> {
        let r = &self.render;
        Ok(RenderConfig {
            shading_mode: r.shading_mode.parse::<ShadingMode>()?,
            use_texture: r.use_texture,
            use_normal_map: r.use_normal_map,
            cull_mode: r.cull_mode.parse::<CullMode>()?,
            ambient: Vector3::from(r.ambient),
            shininess: r.shininess,
            background: Vector3::from(r.background),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_reference_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config.camera.position, [0.0, 0.0, -10.0]);
        assert_eq!(config.camera.fov, 60.0);
        assert_eq!(config.light.intensity, 7.0);
        assert!(config.objects.is_empty());

        let rc = config.to_render_config().unwrap();
        assert_eq!(rc.shading_mode, ShadingMode::Combined);
        assert_eq!(rc.cull_mode, CullMode::None);
        assert_eq!(rc.shininess, 25.0);
        assert!((rc.ambient - Vector3::repeat(0.025)).norm() < 1e-7);
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
            [render]
            width = 320
            height = 200
            shading_mode = "specular"
            cull_mode = "back"
            frames = 12

            [camera]
            position = [0.0, 1.0, -5.0]
            fov = 45.0

            [light]
            direction = [0.0, -1.0, 0.0]
            intensity = 3.0

            [[objects]]
            path = "assets/vehicle.obj"
            rotation = [0.0, 90.0, 0.0]
            diffuse_texture = "assets/vehicle_diffuse.png"
        "#;
        let config = Config::from_toml(toml).unwrap();
        assert_eq!(config.render.width, 320);
        assert_eq!(config.render.frames, 12);
        assert!((config.aspect_ratio() - 1.6).abs() < 1e-6);
        assert_eq!(config.objects.len(), 1);
        assert_eq!(config.objects[0].scale, [1.0, 1.0, 1.0]);
        assert!(config.objects[0].normal_texture.is_none());
        assert_eq!(config.objects[0].texture_filter, "nearest");

        let rc = config.to_render_config().unwrap();
        assert_eq!(rc.shading_mode, ShadingMode::Specular);
        assert_eq!(rc.cull_mode, CullMode::Back);
    }

    #[test]
    fn test_rotation_step() {
        let config = Config::from_toml("[render]\nrotation_speed = 90.0\nfps = 30.0").unwrap();
        assert!((config.rotation_step() - 3.0_f32.to_radians()).abs() < 1e-7);
    }

    #[test]
    fn test_invalid_values() {
        let bad_mode = Config::from_toml("[render]\nshading_mode = \"toon\"").unwrap();
        assert!(matches!(
            bad_mode.validate(),
            Err(RenderError::ConfigValue(_))
        ));

        let bad_filter =
            Config::from_toml("[[objects]]\npath = \"a.obj\"\ntexture_filter = \"cubic\"").unwrap();
        assert!(matches!(
            bad_filter.validate(),
            Err(RenderError::ConfigValue(_))
        ));

        let bad_planes = Config::from_toml("[camera]\nnear = 5.0\nfar = 1.0").unwrap();
        assert!(bad_planes.validate().is_err());

        let bad_size = Config::from_toml("[render]\nwidth = 0").unwrap();
        assert!(bad_size.validate().is_err());

        assert!(matches!(
            Config::from_toml("[render]\nwidth = \"wide\""),
            Err(RenderError::ConfigParse(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            Config::load("does/not/exist.toml"),
            Err(RenderError::ConfigRead { .. })
        ));
    }
}
