pub mod complex;
pub mod error;
pub mod fractal;
pub mod mandelbrot;
pub mod masked;
pub mod resolution;
pub mod viewport;
pub mod zoom;

// Re-export primary types for convenience.
pub use complex::Complex;
pub use error::CoreError;
pub use fractal::{EscapeResult, Fractal, IterationParams, ESCAPE_BOUND};
pub use mandelbrot::{evaluate, Mandelbrot};
pub use masked::evaluate_masked;
pub use resolution::{PixelCoordinate, Resolution};
pub use viewport::Viewport;
pub use zoom::{apply_zoom, ZoomRequest};

/// Convenience result type for the core crate.
pub type Result<T> = std::result::Result<T, CoreError>;
