use crate::core::color::max_to_one;
use crate::core::geometry::Fragment;
use crate::core::pipeline::Shader;
use crate::pipeline::settings::{RenderConfig, ShadingMode};
use crate::scene::light::DirectionalLight;
use crate::scene::material::TextureSet;
use nalgebra::{Vector2, Vector3};
use std::f32::consts::PI;

/// Interpolated tangents shorter than this are treated as missing.
const MIN_TANGENT_NORM_SQ: f32 = 1e-6;

/// Phong shading stage: optional normal mapping, Lambert diffuse, Phong specular and
/// a constant ambient term, followed by a hue-preserving clamp.
pub struct PhongShader<'a> {
    pub textures: &'a TextureSet,
    pub light: DirectionalLight,
    pub config: RenderConfig,
}

impl<'a> PhongShader<'a> {
    pub fn new(textures: &'a TextureSet, light: DirectionalLight, config: RenderConfig) -> Self {
        Self {
            textures,
            light,
            config,
        }
    }

    fn surface_normal(&self, fragment: &Fragment) -> Vector3<f32> {
        let n = fragment
            .normal
            .try_normalize(1e-8)
            .unwrap_or_else(|| -self.light.direction);

        match (&self.textures.normal, self.config.use_normal_map) {
            (Some(normal_map), true) => {
                let sample = normal_map.sample(&fragment.uv);
                perturb_normal(&n, &fragment.tangent, &sample)
            }
            _ => n,
        }
    }

    fn albedo(&self, fragment: &Fragment) -> Vector3<f32> {
        match (&self.textures.diffuse, self.config.use_texture) {
            (Some(diffuse), true) => diffuse.sample(&fragment.uv),
            _ => fragment.color,
        }
    }

    fn specular_params(&self, uv: &Vector2<f32>) -> (Vector3<f32>, f32) {
        let ks = self
            .textures
            .specular
            .as_ref()
            .map_or(self.textures.specular_color, |t| t.sample(uv));
        let gloss = self
            .textures
            .gloss
            .as_ref()
            .map_or(self.textures.gloss_factor, |t| t.sample_scalar(uv));
        (ks, gloss)
    }
}

impl Shader for PhongShader<'_> {
    fn fragment(&self, fragment: &Fragment) -> Vector3<f32> {
        let n = self.surface_normal(fragment);
        let light_dir = self.light.direction;

        let cos_theta = lambert(&n, &light_dir);
        let diffuse = diffuse_brdf(&self.albedo(fragment), self.light.intensity);

        let view_dir = fragment
            .view_dir
            .try_normalize(1e-8)
            .unwrap_or_else(Vector3::zeros);
        let (ks, gloss) = self.specular_params(&fragment.uv);
        let specular = phong_specular(
            &ks,
            &n,
            &light_dir,
            &view_dir,
            gloss * self.config.shininess,
        );

        let color = match self.config.shading_mode {
            ShadingMode::ObservedArea => observed_area(cos_theta),
            ShadingMode::Diffuse => diffuse_only(&diffuse, cos_theta),
            ShadingMode::Specular => specular,
            ShadingMode::Combined => combined(&self.config.ambient, &diffuse, cos_theta, &specular),
        };

        max_to_one(color)
    }
}

/// Tangent-space normal mapping.
///
/// `sample` is the raw map value in [0,1]. The tangent is re-orthogonalized against
/// `normal` first; a missing or parallel tangent leaves the normal untouched.
pub fn perturb_normal(
    normal: &Vector3<f32>,
    tangent: &Vector3<f32>,
    sample: &Vector3<f32>,
) -> Vector3<f32> {
    if tangent.norm_squared() <= MIN_TANGENT_NORM_SQ {
        return *normal;
    }

    // Gram-Schmidt
    let t = tangent - normal * normal.dot(tangent);
    let Some(t) = t.try_normalize(1e-6) else {
        return *normal;
    };
    let b = normal.cross(&t);

    let s = sample.map(|c| c * 2.0 - 1.0);
    let perturbed = t * s.x + b * s.y + normal * s.z;
    perturbed.try_normalize(1e-8).unwrap_or(*normal)
}

/// Cosine between the surface normal and the direction towards the light, clamped to
/// [0, 1]. `light_dir` is the direction the light travels.
#[inline]
pub fn lambert(normal: &Vector3<f32>, light_dir: &Vector3<f32>) -> f32 {
    normal.dot(&-light_dir).clamp(0.0, 1.0)
}

/// Lambertian BRDF times the light intensity.
#[inline]
pub fn diffuse_brdf(albedo: &Vector3<f32>, intensity: f32) -> Vector3<f32> {
    albedo * intensity / PI
}

/// Mirrors `d` about `n`: `2(d·n)n - d`.
#[inline]
pub fn reflect(d: &Vector3<f32>, n: &Vector3<f32>) -> Vector3<f32> {
    n * (2.0 * d.dot(n)) - d
}

/// `ks * max(0, r·v)^exponent`, not gated by the Lambert term. A zero exponent (gloss
/// sample 0) yields the full `ks` everywhere, back-lit surfaces included.
pub fn phong_specular(
    ks: &Vector3<f32>,
    normal: &Vector3<f32>,
    light_dir: &Vector3<f32>,
    view_dir: &Vector3<f32>,
    exponent: f32,
) -> Vector3<f32> {
    let r = reflect(&-light_dir, normal);
    let cos_alpha = r.dot(view_dir).max(0.0);
    ks * cos_alpha.powf(exponent)
}

#[inline]
pub fn observed_area(cos_theta: f32) -> Vector3<f32> {
    Vector3::repeat(cos_theta)
}

#[inline]
pub fn diffuse_only(diffuse: &Vector3<f32>, cos_theta: f32) -> Vector3<f32> {
    diffuse * cos_theta
}

#[inline]
pub fn combined(
    ambient: &Vector3<f32>,
    diffuse: &Vector3<f32>,
    cos_theta: f32,
    specular: &Vector3<f32>,
) -> Vector3<f32> {
    ambient + diffuse * cos_theta + specular
}
