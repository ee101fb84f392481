use crate::core::color::{pack_rgb, unpack_rgb};
use log::debug;
use nalgebra::Vector3;

/// Default window used when visualizing the depth buffer. Perspective depth crowds
/// towards 1.0, so the interesting range is narrow.
pub const DEPTH_VIEW_MIN: f32 = 0.985;
pub const DEPTH_VIEW_MAX: f32 = 1.0;

/// Represents a 2D buffer containing color and depth information.
///
/// Color is stored packed as `0x00RRGGBB`, depth as one `f32` per pixel. The buffer is
/// exclusively owned by the renderer while a frame is being drawn.
#[derive(Debug, Clone)]
pub struct FrameBuffer {
    pub width: usize,
    pub height: usize,
    color_buffer: Vec<u32>,
    depth_buffer: Vec<f32>,
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        let size = width * height;
        Self {
            width,
            height,
            color_buffer: vec![0; size],
            depth_buffer: vec![f32::INFINITY; size],
        }
    }

    /// Reallocates the buffers for a new resolution. Does nothing when the size is
    /// unchanged, so it is safe to call every frame.
    pub fn resize(&mut self, width: usize, height: usize) {
        if width == self.width && height == self.height {
            return;
        }
        debug!(
            "Resizing framebuffer {}x{} -> {}x{}",
            self.width, self.height, width, height
        );
        let size = width * height;
        self.width = width;
        self.height = height;
        self.color_buffer = vec![0; size];
        self.depth_buffer = vec![f32::INFINITY; size];
    }

    /// Fills color with the background and resets every depth entry to +infinity.
    pub fn clear(&mut self, background: Vector3<f32>) {
        self.color_buffer.fill(pack_rgb(&background));
        self.depth_buffer.fill(f32::INFINITY);
    }

    #[inline(always)]
    pub fn in_bounds(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }

    #[inline(always)]
    fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    /// Depth test and update.
    /// Returns true if the new depth is strictly closer than the stored value, in
    /// which case the stored value is replaced.
    #[inline]
    pub fn depth_test_and_update(&mut self, x: usize, y: usize, new_depth: f32) -> bool {
        if !self.in_bounds(x, y) {
            return false;
        }
        let idx = self.index(x, y);
        if new_depth < self.depth_buffer[idx] {
            self.depth_buffer[idx] = new_depth;
            true
        } else {
            false
        }
    }

    /// Packs a 0..1 float color into the color buffer.
    #[inline]
    pub fn write_pixel(&mut self, x: usize, y: usize, color: Vector3<f32>) {
        if self.in_bounds(x, y) {
            let idx = self.index(x, y);
            self.color_buffer[idx] = pack_rgb(&color);
        }
    }

    pub fn get_pixel(&self, x: usize, y: usize) -> Option<Vector3<f32>> {
        self.packed_pixel(x, y).map(unpack_rgb)
    }

    pub fn packed_pixel(&self, x: usize, y: usize) -> Option<u32> {
        if !self.in_bounds(x, y) {
            return None;
        }
        Some(self.color_buffer[self.index(x, y)])
    }

    pub fn depth(&self, x: usize, y: usize) -> Option<f32> {
        if !self.in_bounds(x, y) {
            return None;
        }
        Some(self.depth_buffer[self.index(x, y)])
    }

    pub fn color_buffer(&self) -> &[u32] {
        &self.color_buffer
    }

    pub fn depth_buffer(&self) -> &[f32] {
        &self.depth_buffer
    }

    /// Row-major RGB8 bytes for image export.
    pub fn to_rgb8(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.color_buffer.len() * 3);
        for &packed in &self.color_buffer {
            bytes.push(((packed >> 16) & 0xFF) as u8);
            bytes.push(((packed >> 8) & 0xFF) as u8);
            bytes.push((packed & 0xFF) as u8);
        }
        bytes
    }

    /// Greyscale RGB8 view of the depth buffer.
    ///
    /// Depth is remapped linearly from `[min, max]` to `[0, 1]` and clamped; pixels
    /// that were never written (+infinity) come out white.
    pub fn depth_to_rgb8(&self, min: f32, max: f32) -> Vec<u8> {
        let range = max - min;
        let inv_range = if range.abs() > 1e-9 { 1.0 / range } else { 0.0 };

        let mut bytes = Vec::with_capacity(self.depth_buffer.len() * 3);
        for &depth in &self.depth_buffer {
            let value = if depth.is_finite() {
                ((depth - min) * inv_range).clamp(0.0, 1.0)
            } else {
                1.0
            };
            let grey = (value * 255.0) as u8;
            bytes.extend_from_slice(&[grey, grey, grey]);
        }
        bytes
    }
}
