//! Render configuration: a single, serializable value passed into the
//! render entry point. Every field has a default so partial JSON files load.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use mandelzoom_core::{IterationParams, PixelCoordinate, Resolution, ZoomRequest};

use crate::error::RenderError;
use crate::gradient::Gradient;

// ---------------------------------------------------------------------------
// Evaluation strategy
// ---------------------------------------------------------------------------

/// How each row's escape times are computed. Both produce identical frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EvalStrategy {
    /// Early-exit loop per pixel.
    #[default]
    PerPixel,
    /// Iterate a whole row at once, masking out escaped points.
    Masked,
}

impl FromStr for EvalStrategy {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "per-pixel" => Ok(Self::PerPixel),
            "masked" => Ok(Self::Masked),
            other => Err(RenderError::InvalidStrategy(other.to_string())),
        }
    }
}

impl fmt::Display for EvalStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::PerPixel => "per-pixel",
            Self::Masked => "masked",
        })
    }
}

// ---------------------------------------------------------------------------
// RenderConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderConfig {
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u32,
    #[serde(default)]
    pub zoom_level: u32,
    /// Only meaningful when `zoom_level > 0`, where it must be positive.
    #[serde(default)]
    pub zoom_factor: f64,
    #[serde(default)]
    pub zoom_center: PixelCoordinate,
    #[serde(default = "default_width")]
    pub width: u32,
    /// When absent, the frame is 3:2.
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub gradient: Gradient,
    #[serde(default)]
    pub strategy: EvalStrategy,
}

fn default_max_iterations() -> u32 {
    IterationParams::DEFAULT_MAX_ITERATIONS
}
fn default_width() -> u32 {
    Resolution::DEFAULT_WIDTH
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            max_iterations: default_max_iterations(),
            zoom_level: 0,
            zoom_factor: 0.0,
            zoom_center: PixelCoordinate::default(),
            width: default_width(),
            height: None,
            gradient: Gradient::default(),
            strategy: EvalStrategy::default(),
        }
    }
}

impl RenderConfig {
    pub fn resolution(&self) -> crate::Result<Resolution> {
        Ok(Resolution::with_optional_height(self.width, self.height)?)
    }

    pub fn iteration_params(&self) -> crate::Result<IterationParams> {
        Ok(IterationParams::new(self.max_iterations)?)
    }

    pub fn zoom(&self) -> ZoomRequest {
        ZoomRequest::new(self.zoom_level, self.zoom_factor, self.zoom_center)
    }

    /// Check everything that can be checked before rendering starts.
    pub fn validate(&self) -> crate::Result<()> {
        self.iteration_params()?;
        self.resolution()?;
        self.zoom().validate()?;
        self.gradient.validate()
    }
}
