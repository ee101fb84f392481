use crate::core::rasterizer::CullMode;
use crate::error::RenderError;
use nalgebra::Vector3;
use std::fmt;
use std::str::FromStr;

/// Which lighting term ends up in the color buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShadingMode {
    /// Lambert cosine only, as grey.
    ObservedArea,
    /// Diffuse BRDF scaled by the Lambert cosine.
    Diffuse,
    /// Phong specular only.
    Specular,
    /// Ambient + diffuse + specular.
    #[default]
    Combined,
}

impl ShadingMode {
    pub const ALL: [ShadingMode; 4] = [
        ShadingMode::ObservedArea,
        ShadingMode::Diffuse,
        ShadingMode::Specular,
        ShadingMode::Combined,
    ];

    /// Next mode in the toggle cycle, wrapping from `Combined` back to `ObservedArea`.
    pub fn next(self) -> Self {
        match self {
            ShadingMode::ObservedArea => ShadingMode::Diffuse,
            ShadingMode::Diffuse => ShadingMode::Specular,
            ShadingMode::Specular => ShadingMode::Combined,
            ShadingMode::Combined => ShadingMode::ObservedArea,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ShadingMode::ObservedArea => "observed_area",
            ShadingMode::Diffuse => "diffuse",
            ShadingMode::Specular => "specular",
            ShadingMode::Combined => "combined",
        }
    }
}

impl fmt::Display for ShadingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ShadingMode {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "observed_area" | "observedarea" => Ok(ShadingMode::ObservedArea),
            "diffuse" => Ok(ShadingMode::Diffuse),
            "specular" => Ok(ShadingMode::Specular),
            "combined" => Ok(ShadingMode::Combined),
            other => Err(RenderError::ConfigValue(format!(
                "unknown shading mode '{}'",
                other
            ))),
        }
    }
}

/// Per-frame render toggles. Built once per frame and never mutated while drawing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderConfig {
    pub shading_mode: ShadingMode,
    pub use_texture: bool,
    pub use_normal_map: bool,
    pub cull_mode: CullMode,
    pub ambient: Vector3<f32>,
    pub shininess: f32,
    pub background: Vector3<f32>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            shading_mode: ShadingMode::Combined,
            use_texture: true,
            use_normal_map: true,
            cull_mode: CullMode::None,
            ambient: Vector3::repeat(0.025),
            shininess: 25.0,
            background: Vector3::repeat(0.39),
        }
    }
}

impl RenderConfig {
    pub fn with_shading_mode(mut self, shading_mode: ShadingMode) -> Self {
        self.shading_mode = shading_mode;
        self
    }
}
