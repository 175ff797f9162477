use thiserror::Error;

/// Errors originating from the core escape-time engine.
///
/// Every variant is a configuration problem detected before any pixel is
/// evaluated.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid max iterations: {0} (must be >= 1)")]
    InvalidMaxIterations(u32),

    #[error("invalid resolution: {width}×{height} (both must be > 0)")]
    InvalidResolution { width: u32, height: u32 },

    #[error("invalid zoom factor: {0} (must be positive and finite when zooming)")]
    InvalidZoomFactor(f64),

    #[error("invalid coordinate '{0}' (expected X,Y with non-negative integers)")]
    InvalidCoordinate(String),

    #[error("invalid viewport: {reason}")]
    InvalidViewport { reason: String },
}
