use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced to callers of the rasterizer.
///
/// Nothing inside the per-triangle or per-pixel loops produces one of these:
/// degenerate geometry and numeric trouble are skipped locally. These cover the
/// resource boundary (files in, images out) and malformed input meshes.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Failed to load texture '{}': {source}", path.display())]
    TextureLoad {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("Texture data does not match {width}x{height} RGB8 ({len} bytes)")]
    TextureData { width: u32, height: u32, len: usize },
    #[error("Failed to load mesh '{}': {reason}", path.display())]
    MeshLoad { path: PathBuf, reason: String },
    #[error("Invalid mesh: {0}")]
    InvalidMesh(String),
    #[error("Failed to read config file '{}': {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse TOML: {0}")]
    ConfigParse(#[from] toml::de::Error),
    #[error("Invalid config value: {0}")]
    ConfigValue(String),
    #[error("Failed to create output directory '{}': {source}", path.display())]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to save image '{}': {source}", path.display())]
    ImageSave {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

pub type Result<T> = std::result::Result<T, RenderError>;
