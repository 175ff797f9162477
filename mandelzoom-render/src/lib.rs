pub mod buffer;
pub mod config;
pub mod error;
pub mod export;
pub mod gradient;
pub mod renderer;

pub use buffer::FrameBuffer;
pub use config::{EvalStrategy, RenderConfig};
pub use error::RenderError;
pub use export::{export_png, ExportMetadata};
pub use gradient::{Band, Gradient, Rgb, Threshold};
pub use renderer::{render, render_fractal, render_frame, RenderProgress, RenderResult};

/// Convenience result type for the render crate.
pub type Result<T> = std::result::Result<T, RenderError>;
