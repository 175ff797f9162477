use std::path::PathBuf;

use thiserror::Error;

use mandelzoom_render::RenderError;

/// Errors surfaced by the `mandelzoom` binary.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("failed to read config file {}: {source}", .path.display())]
    ReadConfig {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file {}: {source}", .path.display())]
    ParseConfig {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("invalid log level '{0}' (expected trace, debug, info, warn, warning, error or critical)")]
    InvalidLogLevel(String),

    #[error(transparent)]
    Render(#[from] RenderError),
}
