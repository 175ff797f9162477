use thiserror::Error;

/// Errors originating from the rendering pipeline.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("invalid image dimensions: {width}×{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("invalid color '{0}' (expected #rrggbb)")]
    InvalidColor(String),

    #[error("invalid gradient: {0}")]
    InvalidGradient(String),

    #[error("invalid evaluation strategy '{0}' (expected per-pixel or masked)")]
    InvalidStrategy(String),

    #[error("failed to write image: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode PNG: {0}")]
    Encoding(#[from] png::EncodingError),

    #[error(transparent)]
    Core(#[from] mandelzoom_core::CoreError),
}
