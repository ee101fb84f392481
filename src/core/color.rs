use nalgebra::Vector3;

/// Hue-preserving tone clamp.
///
/// When the brightest channel exceeds 1.0 every channel is divided by it, so an
/// over-lit surface keeps its color ratio instead of saturating to white one
/// channel at a time.
pub fn max_to_one(color: Vector3<f32>) -> Vector3<f32> {
    let max = color.x.max(color.y).max(color.z);
    if max > 1.0 { color / max } else { color }
}

/// Packs a linear 0..1 color into `0x00RRGGBB`. Channels are clamped first.
#[inline]
pub fn pack_rgb(color: &Vector3<f32>) -> u32 {
    let r = (color.x.clamp(0.0, 1.0) * 255.0) as u32;
    let g = (color.y.clamp(0.0, 1.0) * 255.0) as u32;
    let b = (color.z.clamp(0.0, 1.0) * 255.0) as u32;
    (r << 16) | (g << 8) | b
}

/// Inverse of [`pack_rgb`], quantized to 1/255 steps.
#[inline]
pub fn unpack_rgb(packed: u32) -> Vector3<f32> {
    Vector3::new(
        ((packed >> 16) & 0xFF) as f32 / 255.0,
        ((packed >> 8) & 0xFF) as f32 / 255.0,
        (packed & 0xFF) as f32 / 255.0,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_to_one_scales_by_brightest_channel() {
        let out = max_to_one(Vector3::new(2.0, 0.5, 0.0));
        assert!((out - Vector3::new(1.0, 0.25, 0.0)).norm() < 1e-6);
    }

    #[test]
    fn test_max_to_one_leaves_in_range_color() {
        let c = Vector3::new(0.5, 0.5, 0.5);
        assert_eq!(max_to_one(c), c);
    }

    #[test]
    fn test_pack_rgb_layout() {
        assert_eq!(pack_rgb(&Vector3::new(1.0, 0.0, 0.0)), 0x00FF_0000);
        assert_eq!(pack_rgb(&Vector3::new(0.0, 1.0, 0.0)), 0x0000_FF00);
        assert_eq!(pack_rgb(&Vector3::new(0.0, 0.0, 1.0)), 0x0000_00FF);
        assert_eq!(pack_rgb(&Vector3::new(2.0, -1.0, 0.0)), 0x00FF_0000);
    }

    #[test]
    fn test_unpack_rgb() {
        let c = unpack_rgb(0x00FF_8000);
        assert_eq!(c.x, 1.0);
        assert!((c.y - 128.0 / 255.0).abs() < 1e-6);
        assert_eq!(c.z, 0.0);
    }
}
