use crate::error::{RenderError, Result};
use image::RgbImage;
use log::info;
use nalgebra::{Vector2, Vector3};
use std::path::Path;
use std::str::FromStr;

/// How texels are looked up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Filter {
    /// The texel containing the sample point.
    #[default]
    Nearest,
    /// Blend of the four nearest texel centers.
    Bilinear,
}

impl FromStr for Filter {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "nearest" => Ok(Filter::Nearest),
            "bilinear" => Ok(Filter::Bilinear),
            other => Err(RenderError::ConfigValue(format!("unknown texture filter '{}'", other))),
        }
    }
}

/// Represents a 2D texture map.
///
/// UV (0,0) addresses the first row of the image (top-left). Coordinates outside
/// [0, 1) wrap around (repeat), so no lookup can leave the pixel buffer. Values are
/// returned as stored, in [0, 1], without any color-space conversion.
#[derive(Debug, Clone)]
pub struct Texture {
    image: RgbImage,
    pub width: u32,
    pub height: u32,
    pub filter: Filter,
}

impl Texture {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_ref = path.as_ref();
        let img = image::open(path_ref).map_err(|source| RenderError::TextureLoad {
            path: path_ref.to_path_buf(),
            source,
        })?;

        let texture = Self::from_image(img.to_rgb8())?;
        info!(
            "Loaded texture: {:?} ({}x{})",
            path_ref, texture.width, texture.height
        );
        Ok(texture)
    }

    /// Wraps already decoded pixels. Row-major RGB8, `width * height * 3` bytes.
    pub fn from_rgb8(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        let len = data.len();
        let image = RgbImage::from_raw(width, height, data).ok_or(RenderError::TextureData {
            width,
            height,
            len,
        })?;
        Self::from_image(image)
    }

    /// Procedural checkerboard of `cells x cells` squares, each `cell_size` texels
    /// wide. The top-left cell has color `a`.
    pub fn checkerboard(cells: u32, cell_size: u32, a: [u8; 3], b: [u8; 3]) -> Result<Self> {
        let side = cells * cell_size;
        let image = RgbImage::from_fn(side, side, |x, y| {
            if ((x / cell_size) + (y / cell_size)) % 2 == 0 {
                image::Rgb(a)
            } else {
                image::Rgb(b)
            }
        });
        Self::from_image(image)
    }

    fn from_image(image: RgbImage) -> Result<Self> {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Err(RenderError::TextureData {
                width,
                height,
                len: 0,
            });
        }
        Ok(Self {
            image,
            width,
            height,
            filter: Filter::Nearest,
        })
    }

    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.filter = filter;
        self
    }

    /// Samples the texture at `uv`.
    pub fn sample(&self, uv: &Vector2<f32>) -> Vector3<f32> {
        let u = wrap_unit(uv.x);
        let v = wrap_unit(uv.y);

        match self.filter {
            Filter::Nearest => {
                let x = ((u * self.width as f32) as u32).min(self.width - 1);
                let y = ((v * self.height as f32) as u32).min(self.height - 1);
                self.texel(x as i64, y as i64)
            }
            Filter::Bilinear => self.sample_bilinear(u, v),
        }
    }

    /// Samples a single channel (red), for grey-scale maps such as gloss.
    pub fn sample_scalar(&self, uv: &Vector2<f32>) -> f32 {
        self.sample(uv).x
    }

    fn sample_bilinear(&self, u: f32, v: f32) -> Vector3<f32> {
        // -0.5 because pixel centers are at 0.5
        let x = u * self.width as f32 - 0.5;
        let y = v * self.height as f32 - 0.5;

        let x0 = x.floor() as i64;
        let y0 = y.floor() as i64;
        let wx = x - x.floor();
        let wy = y - y.floor();

        let c00 = self.texel(x0, y0);
        let c10 = self.texel(x0 + 1, y0);
        let c01 = self.texel(x0, y0 + 1);
        let c11 = self.texel(x0 + 1, y0 + 1);

        let top = c00 * (1.0 - wx) + c10 * wx;
        let bottom = c01 * (1.0 - wx) + c11 * wx;
        top * (1.0 - wy) + bottom * wy
    }

    /// Texel fetch with repeat addressing.
    fn texel(&self, x: i64, y: i64) -> Vector3<f32> {
        let x = x.rem_euclid(self.width as i64) as u32;
        let y = y.rem_euclid(self.height as i64) as u32;
        let pixel = self.image.get_pixel(x, y);
        Vector3::new(
            pixel[0] as f32 / 255.0,
            pixel[1] as f32 / 255.0,
            pixel[2] as f32 / 255.0,
        )
    }
}

/// Maps any finite coordinate into [0, 1). Non-finite input maps to 0.
#[inline]
fn wrap_unit(t: f32) -> f32 {
    if !t.is_finite() {
        return 0.0;
    }
    let wrapped = t.rem_euclid(1.0);
    // rem_euclid can round up to exactly 1.0 for tiny negative inputs.
    if wrapped >= 1.0 { 0.0 } else { wrapped }
}
