use crate::core::rasterizer::RasterStats;
use crate::error::Result;
use crate::io::image::{save_color, save_depth};
use crate::pipeline::renderer::Renderer;
use crate::pipeline::settings::{RenderConfig, ShadingMode};
use crate::scene::context::RenderContext;
use log::info;
use std::path::{Path, PathBuf};

/// What an offline render run produces.
#[derive(Debug, Clone)]
pub struct OutputPlan {
    pub color: PathBuf,
    pub depth: Option<PathBuf>,
    pub frames: usize,
    /// Rotation about world +Y between consecutive frames, in radians.
    pub rotation_step: f32,
    pub modes: Vec<ShadingMode>,
}

/// Inserts `_<mode>` and `_<NNN>` before the extension of `base`.
pub fn decorate_path(base: &Path, mode: Option<ShadingMode>, frame: Option<usize>) -> PathBuf {
    let stem = base
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let mut name = stem;
    if let Some(mode) = mode {
        name.push('_');
        name.push_str(mode.name());
    }
    if let Some(frame) = frame {
        name.push_str(&format!("_{:03}", frame));
    }
    if let Some(ext) = base.extension() {
        name.push('.');
        name.push_str(&ext.to_string_lossy());
    }
    base.with_file_name(name)
}

/// Renders one frame and writes the color (and optionally depth) image.
pub fn render_to_files(
    renderer: &mut Renderer,
    context: &RenderContext,
    config: &RenderConfig,
    color_path: &Path,
    depth_path: Option<&Path>,
) -> Result<RasterStats> {
    let stats = renderer.render_frame(context, config);
    save_color(&renderer.framebuffer, color_path)?;
    if let Some(depth_path) = depth_path {
        save_depth(&renderer.framebuffer, depth_path)?;
    }
    Ok(stats)
}

/// Renders every frame of the plan, once per shading mode.
///
/// Objects are rotated between frames, never during one. Returns the paths of the
/// color images written, in order.
pub fn render_sequence(
    renderer: &mut Renderer,
    context: &mut RenderContext,
    base_config: &RenderConfig,
    plan: &OutputPlan,
) -> Result<Vec<PathBuf>> {
    let modes: &[ShadingMode] = if plan.modes.is_empty() {
        std::slice::from_ref(&base_config.shading_mode)
    } else {
        &plan.modes
    };
    let frames = plan.frames.max(1);
    let mut written = Vec::with_capacity(frames * modes.len());

    for frame in 0..frames {
        if frame > 0 {
            context.rotate_objects_y(plan.rotation_step);
        }
        let frame_tag = (frames > 1).then_some(frame);

        for &mode in modes {
            let mode_tag = (modes.len() > 1).then_some(mode);
            let config = base_config.with_shading_mode(mode);
            let color_path = decorate_path(&plan.color, mode_tag, frame_tag);
            let depth_path = plan
                .depth
                .as_deref()
                .map(|p| decorate_path(p, mode_tag, frame_tag));

            let stats =
                render_to_files(renderer, context, &config, &color_path, depth_path.as_deref())?;
            info!(
                "Frame {}/{} [{}]: {} fragments -> {:?}",
                frame + 1,
                frames,
                mode,
                stats.fragments_shaded,
                color_path
            );
            written.push(color_path);
        }
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decorate_path() {
        let base = Path::new("out/render.png");
        assert_eq!(decorate_path(base, None, None), PathBuf::from("out/render.png"));
        assert_eq!(
            decorate_path(base, Some(ShadingMode::ObservedArea), None),
            PathBuf::from("out/render_observed_area.png")
        );
        assert_eq!(
            decorate_path(base, Some(ShadingMode::Specular), Some(7)),
            PathBuf::from("out/render_specular_007.png")
        );
        assert_eq!(
            decorate_path(Path::new("frame"), None, Some(12)),
            PathBuf::from("frame_012")
        );
    }

    #[test]
    fn test_sequence_writes_every_frame_and_mode() {
        let dir = std::env::temp_dir().join(format!("phong_rasterizer_seq_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();

        let mut context = RenderContext::default_scene(1.0).unwrap();
        let start = context.scene_objects[0].mesh.world;
        let mut renderer = Renderer::new(24, 24);
        let plan = OutputPlan {
            color: dir.join("scene.png"),
            depth: Some(dir.join("depth.png")),
            frames: 3,
            rotation_step: 0.1,
            modes: vec![ShadingMode::Diffuse, ShadingMode::Combined],
        };

        let written =
            render_sequence(&mut renderer, &mut context, &RenderConfig::default(), &plan).unwrap();
        assert_eq!(written.len(), 6);
        assert_eq!(written[0], dir.join("scene_diffuse_000.png"));
        assert_eq!(written[5], dir.join("scene_combined_002.png"));
        assert!(written.iter().all(|p| p.exists()));
        assert!(dir.join("depth_combined_001.png").exists());

        // Two rotation steps were applied.
        let expected = crate::core::math::transform::TransformFactory::rotation_y(0.2) * start;
        assert!((context.scene_objects[0].mesh.world - expected).norm() < 1e-5);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_single_frame_keeps_plain_name() {
        let dir = std::env::temp_dir().join(format!("phong_rasterizer_one_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();

        let mut context = RenderContext::default_scene(1.0).unwrap();
        let mut renderer = Renderer::new(16, 16);
        let plan = OutputPlan {
            color: dir.join("single.png"),
            depth: None,
            frames: 1,
            rotation_step: 0.5,
            modes: Vec::new(),
        };
        let written =
            render_sequence(&mut renderer, &mut context, &RenderConfig::default(), &plan).unwrap();
        assert_eq!(written, vec![dir.join("single.png")]);

        std::fs::remove_dir_all(&dir).ok();
    }
}
