use crate::core::framebuffer::FrameBuffer;
use crate::core::geometry::Fragment;
use crate::core::math::interpolation::{
    barycentric_coordinates, blend, interpolate_depth, is_inside_triangle, perspective_weights,
    signed_area_x2,
};
use crate::core::math::transform::ndc_to_screen;
use crate::core::pipeline::Shader;
use crate::error::RenderError;
use nalgebra::{Point2, Vector4};
use std::str::FromStr;

/// Below this (in squared pixels) a triangle is treated as degenerate.
const MIN_AREA_X2: f32 = 1e-6;
/// Vertices with a clip w at or below this fail frustum containment.
const MIN_CLIP_W: f32 = 1e-6;

/// Which screen-space winding is discarded before scan conversion.
///
/// Front faces have positive signed area in screen space, i.e. they appear clockwise
/// to the viewer (left-handed convention).
#[derive(PartialEq, Eq, Copy, Clone, Debug, Default)]
pub enum CullMode {
    Back,
    Front,
    #[default]
    None,
}

impl FromStr for CullMode {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "back" => Ok(CullMode::Back),
            "front" => Ok(CullMode::Front),
            "none" => Ok(CullMode::None),
            other => Err(RenderError::ConfigValue(format!("unknown cull mode '{}'", other))),
        }
    }
}

/// Per-frame counters, reset by the renderer at the start of every frame.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RasterStats {
    pub triangles: usize,
    pub frustum_rejected: usize,
    pub face_culled: usize,
    pub degenerate: usize,
    pub fragments_shaded: usize,
    pub depth_rejected: usize,
}

/// The Rasterizer is responsible for drawing triangles onto the FrameBuffer.
#[derive(Debug, Clone, Copy, Default)]
pub struct Rasterizer {
    pub cull_mode: CullMode,
}

/// Trivial accept test for a single post-transform vertex: positive clip w, NDC x and
/// y inside [-1, 1], NDC z inside [0, 1]. NaN coordinates fail every comparison.
#[inline]
pub fn is_inside_frustum(fragment: &Fragment) -> bool {
    let p = fragment.position;
    p.w > MIN_CLIP_W
        && (-1.0..=1.0).contains(&p.x)
        && (-1.0..=1.0).contains(&p.y)
        && (0.0..=1.0).contains(&p.z)
}

impl Rasterizer {
    pub fn new(cull_mode: CullMode) -> Self {
        Self { cull_mode }
    }

    /// Rasterize a single triangle of post-transform fragments.
    ///
    /// The triangle is dropped whole if any vertex fails [`is_inside_frustum`]; there
    /// is no polygon clipping. Surviving triangles are scanned over their clamped
    /// bounding box, depth-tested with a strict less-than, and every accepted pixel
    /// is shaded with perspective-correct attributes.
    pub fn rasterize_triangle<S: Shader>(
        &self,
        framebuffer: &mut FrameBuffer,
        shader: &S,
        vertices: &[Fragment; 3],
        stats: &mut RasterStats,
    ) {
        stats.triangles += 1;

        // 1. Frustum rejection
        if !vertices.iter().all(is_inside_frustum) {
            stats.frustum_rejected += 1;
            return;
        }

        // 2. Viewport Transform
        let width = framebuffer.width as f32;
        let height = framebuffer.height as f32;
        let screen_coords: [Point2<f32>; 3] =
            vertices.map(|v| ndc_to_screen(v.ndc_x(), v.ndc_y(), width, height));

        // 3. Winding & Face Culling
        let signed_area = signed_area_x2(screen_coords[0], screen_coords[1], screen_coords[2]);
        if signed_area.abs() < MIN_AREA_X2 {
            stats.degenerate += 1;
            return;
        }
        match self.cull_mode {
            CullMode::Back if signed_area < 0.0 => {
                stats.face_culled += 1;
                return;
            }
            CullMode::Front if signed_area > 0.0 => {
                stats.face_culled += 1;
                return;
            }
            _ => {}
        }

        // 4. Bounding Box
        let Some((start_x, start_y, end_x, end_y)) =
            Self::compute_bounding_box(&screen_coords, framebuffer.width, framebuffer.height)
        else {
            return;
        };

        let z_values = vertices.map(|v| v.ndc_z());
        let w_values = vertices.map(|v| v.clip_w());

        // 5. Pixel Loop
        for y in start_y..=end_y {
            for x in start_x..=end_x {
                let pixel_center = Point2::new(x as f32 + 0.5, y as f32 + 0.5);

                let Some(bary) = barycentric_coordinates(
                    pixel_center,
                    screen_coords[0],
                    screen_coords[1],
                    screen_coords[2],
                ) else {
                    continue;
                };
                if !is_inside_triangle(&bary) {
                    continue;
                }

                // Reciprocal NDC z for the depth buffer.
                let Some(depth) = interpolate_depth(&bary, z_values) else {
                    continue;
                };
                if depth <= 0.0 || depth >= 1.0 {
                    continue;
                }

                // Reciprocal clip w for the attributes.
                let Some((factors, w_corrected)) = perspective_weights(&bary, w_values) else {
                    continue;
                };

                if !framebuffer.depth_test_and_update(x, y, depth) {
                    stats.depth_rejected += 1;
                    continue;
                }

                let mut fragment = blend(*vertices, &factors) * w_corrected;
                fragment.position = Vector4::new(
                    pixel_center.x / width * 2.0 - 1.0,
                    1.0 - pixel_center.y / height * 2.0,
                    depth,
                    w_corrected,
                );

                let color = shader.fragment(&fragment);
                framebuffer.write_pixel(x, y, color);
                stats.fragments_shaded += 1;
            }
        }
    }

    /// Integer pixel range covering the three points, clamped to the framebuffer.
    /// Returns `None` when the box lies entirely off screen.
    fn compute_bounding_box(
        points: &[Point2<f32>; 3],
        width: usize,
        height: usize,
    ) -> Option<(usize, usize, usize, usize)> {
        if width == 0 || height == 0 {
            return None;
        }
        let min_x = points[0].x.min(points[1].x).min(points[2].x).floor() as i64;
        let min_y = points[0].y.min(points[1].y).min(points[2].y).floor() as i64;
        let max_x = points[0].x.max(points[1].x).max(points[2].x).ceil() as i64;
        let max_y = points[0].y.max(points[1].y).max(points[2].y).ceil() as i64;

        if max_x < 0 || max_y < 0 || min_x >= width as i64 || min_y >= height as i64 {
            return None;
        }

        Some((
            min_x.max(0) as usize,
            min_y.max(0) as usize,
            max_x.min(width as i64 - 1) as usize,
            max_y.min(height as i64 - 1) as usize,
        ))
    }
}
