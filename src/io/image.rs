use crate::core::framebuffer::{DEPTH_VIEW_MAX, DEPTH_VIEW_MIN, FrameBuffer};
use crate::error::{RenderError, Result};
use log::info;
use std::path::Path;

fn save_rgb8(data: &[u8], width: usize, height: usize, path: &Path) -> Result<()> {
    image::save_buffer(
        path,
        data,
        width as u32,
        height as u32,
        image::ExtendedColorType::Rgb8,
    )
    .map_err(|source| RenderError::ImageSave {
        path: path.to_path_buf(),
        source,
    })?;
    info!("Saved {}x{} image to {:?}", width, height, path);
    Ok(())
}

/// Saves the color buffer. The format is picked from the file extension.
pub fn save_color<P: AsRef<Path>>(framebuffer: &FrameBuffer, path: P) -> Result<()> {
    save_rgb8(
        &framebuffer.to_rgb8(),
        framebuffer.width,
        framebuffer.height,
        path.as_ref(),
    )
}

/// Saves the depth buffer as a grey image, remapping the default depth window.
pub fn save_depth<P: AsRef<Path>>(framebuffer: &FrameBuffer, path: P) -> Result<()> {
    save_rgb8(
        &framebuffer.depth_to_rgb8(DEPTH_VIEW_MIN, DEPTH_VIEW_MAX),
        framebuffer.width,
        framebuffer.height,
        path.as_ref(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector3;

    #[test]
    fn test_save_and_reload_color() {
        let mut fb = FrameBuffer::new(4, 3);
        fb.clear(Vector3::new(1.0, 0.0, 0.0));
        let path = std::env::temp_dir().join(format!("phong_rasterizer_{}.png", std::process::id()));
        save_color(&fb, &path).unwrap();

        let img = image::open(&path).unwrap().to_rgb8();
        std::fs::remove_file(&path).ok();
        assert_eq!(img.dimensions(), (4, 3));
        assert_eq!(img.get_pixel(2, 1).0, [255, 0, 0]);
    }

    #[test]
    fn test_unknown_extension_is_an_error() {
        let fb = FrameBuffer::new(2, 2);
        let err = save_depth(&fb, std::env::temp_dir().join("depth.unknownext")).unwrap_err();
        assert!(matches!(err, RenderError::ImageSave { .. }));
    }
}
