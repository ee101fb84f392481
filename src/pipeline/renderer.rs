use crate::core::framebuffer::FrameBuffer;
use crate::core::geometry::Fragment;
use crate::core::pipeline::Shader;
use crate::core::rasterizer::{RasterStats, Rasterizer};
use crate::pipeline::settings::RenderConfig;
use crate::pipeline::shaders::phong::PhongShader;
use crate::pipeline::vertex_stage::VertexStage;
use crate::scene::camera::Camera;
use crate::scene::context::RenderContext;
use crate::scene::mesh::Mesh;
use log::debug;
use nalgebra::Vector3;

/// The high-level renderer that orchestrates the pipeline stages.
///
/// Owns the framebuffer and a scratch buffer of transformed vertices that is reused
/// across meshes and frames.
pub struct Renderer {
    pub rasterizer: Rasterizer,
    pub framebuffer: FrameBuffer,
    fragments: Vec<Fragment>,
    last_stats: RasterStats,
}

impl Renderer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            rasterizer: Rasterizer::default(),
            framebuffer: FrameBuffer::new(width, height),
            fragments: Vec::new(),
            last_stats: RasterStats::default(),
        }
    }

    /// Resizes the framebuffer; a no-op when the resolution is unchanged.
    pub fn resize(&mut self, width: usize, height: usize) {
        self.framebuffer.resize(width, height);
    }

    /// Clears color to `background` and depth to +infinity.
    pub fn clear(&mut self, background: Vector3<f32>) {
        self.framebuffer.clear(background);
    }

    /// Counters of the last frame drawn with [`Renderer::render_frame`].
    pub fn last_stats(&self) -> RasterStats {
        self.last_stats
    }

    /// Draws a mesh using the provided shader.
    ///
    /// All vertices go through the vertex stage once, then triangles are rasterized
    /// in index order. A triangle referencing a missing vertex is skipped and counted
    /// as degenerate.
    pub fn draw_mesh<S: Shader>(
        &mut self,
        mesh: &Mesh,
        camera: &Camera,
        shader: &S,
        stats: &mut RasterStats,
    ) {
        VertexStage::run(mesh, camera, &mut self.fragments);

        for [i0, i1, i2] in mesh.triangles() {
            let (Some(&a), Some(&b), Some(&c)) = (
                self.fragments.get(i0),
                self.fragments.get(i1),
                self.fragments.get(i2),
            ) else {
                stats.triangles += 1;
                stats.degenerate += 1;
                continue;
            };
            let triangle = [a, b, c];
            self.rasterizer
                .rasterize_triangle(&mut self.framebuffer, shader, &triangle, stats);
        }
    }

    /// Renders one complete frame of `context` with Phong shading.
    ///
    /// Camera and mesh transforms must be updated before this call; the frame runs
    /// to completion and leaves a fully written framebuffer behind.
    pub fn render_frame(&mut self, context: &RenderContext, config: &RenderConfig) -> RasterStats {
        let mut stats = RasterStats::default();
        self.rasterizer.cull_mode = config.cull_mode;
        self.clear(config.background);

        for obj in &context.scene_objects {
            let shader = PhongShader::new(&obj.textures, context.light, *config);
            self.draw_mesh(&obj.mesh, &context.camera, &shader, &mut stats);
        }

        debug!(
            "Frame ({}): {} triangles, {} frustum rejected, {} culled, {} degenerate, {} fragments shaded, {} depth rejected",
            config.shading_mode,
            stats.triangles,
            stats.frustum_rejected,
            stats.face_culled,
            stats.degenerate,
            stats.fragments_shaded,
            stats.depth_rejected
        );

        self.last_stats = stats;
        stats
    }
}
