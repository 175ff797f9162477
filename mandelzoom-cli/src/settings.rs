//! Run settings: render configuration plus the output and logging glue.
//!
//! Load order is defaults, then the optional `--config` JSON file, then
//! whatever flags were given explicitly.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::level_filters::LevelFilter;

use mandelzoom_render::RenderConfig;

use crate::cli::Args;
use crate::error::CliError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(flatten)]
    pub render: RenderConfig,
    #[serde(default = "default_output_path")]
    pub output_path: PathBuf,
    /// Overrides `RUST_LOG` when set.
    #[serde(default)]
    pub log_level: Option<String>,
}

fn default_output_path() -> PathBuf {
    PathBuf::from("frame.png")
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            render: RenderConfig::default(),
            output_path: default_output_path(),
            log_level: None,
        }
    }
}

impl Settings {
    /// Read settings from a JSON file. Missing keys take their defaults.
    pub fn load(path: &Path) -> Result<Self, CliError> {
        let json = fs::read_to_string(path).map_err(|source| CliError::ReadConfig {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&json).map_err(|source| CliError::ParseConfig {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Resolve the settings for a run from the parsed command line.
    pub fn from_args(args: &Args) -> Result<Self, CliError> {
        let mut settings = match &args.config {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        settings.apply(args);
        Ok(settings)
    }

    /// Overwrite every field that was given explicitly on the command line.
    fn apply(&mut self, args: &Args) {
        let render = &mut self.render;
        if let Some(n) = args.max_iterations {
            render.max_iterations = n;
        }
        if let Some(level) = args.zoom_level {
            render.zoom_level = level;
        }
        if let Some(factor) = args.zoom_factor {
            render.zoom_factor = factor;
        }
        if let Some(center) = args.zoom_center {
            render.zoom_center = center;
        }
        if let Some(width) = args.width {
            render.width = width;
        }
        if args.height.is_some() {
            render.height = args.height;
        }
        if let Some(gradient) = &args.gradient {
            render.gradient = gradient.clone();
        }
        if let Some(strategy) = args.strategy {
            render.strategy = strategy;
        }
        if let Some(path) = &args.output_path {
            self.output_path = path.clone();
        }
        if args.log_level.is_some() {
            self.log_level = args.log_level.clone();
        }
    }

    /// The configured log level, if any. Accepts `warning` and `critical`
    /// as aliases for `warn` and `error`, case-insensitively.
    pub fn level_filter(&self) -> Result<Option<LevelFilter>, CliError> {
        self.log_level.as_deref().map(parse_level).transpose()
    }
}

fn parse_level(level: &str) -> Result<LevelFilter, CliError> {
    match level.to_ascii_lowercase().as_str() {
        "trace" => Ok(LevelFilter::TRACE),
        "debug" => Ok(LevelFilter::DEBUG),
        "info" => Ok(LevelFilter::INFO),
        "warn" | "warning" => Ok(LevelFilter::WARN),
        "error" | "critical" => Ok(LevelFilter::ERROR),
        _ => Err(CliError::InvalidLogLevel(level.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mandelzoom_core::PixelCoordinate;
    use mandelzoom_render::{EvalStrategy, Gradient, Rgb};

    #[test]
    fn defaults_without_args() {
        let s = Settings::from_args(&Args::default()).unwrap();
        assert_eq!(s, Settings::default());
        assert_eq!(s.output_path, PathBuf::from("frame.png"));
        assert_eq!(s.render.max_iterations, 200);
        assert_eq!(s.render.width, 3000);
    }

    #[test]
    fn flags_override_fields() {
        let args = Args {
            max_iterations: Some(64),
            zoom_level: Some(3),
            zoom_factor: Some(2.5),
            zoom_center: Some(PixelCoordinate::new(7, 9)),
            width: Some(90),
            height: Some(30),
            gradient: Some(Gradient::Linear { inside: Rgb::BLACK }),
            strategy: Some(EvalStrategy::Masked),
            output_path: Some(PathBuf::from("zoom.png")),
            log_level: Some("debug".into()),
            config: None,
        };
        let s = Settings::from_args(&args).unwrap();
        assert_eq!(s.render.max_iterations, 64);
        assert_eq!(s.render.zoom_level, 3);
        assert_eq!(s.render.zoom_factor, 2.5);
        assert_eq!(s.render.zoom_center, PixelCoordinate::new(7, 9));
        assert_eq!((s.render.width, s.render.height), (90, Some(30)));
        assert_eq!(s.render.gradient, Gradient::Linear { inside: Rgb::BLACK });
        assert_eq!(s.render.strategy, EvalStrategy::Masked);
        assert_eq!(s.output_path, PathBuf::from("zoom.png"));
        assert_eq!(s.level_filter().unwrap(), Some(LevelFilter::DEBUG));
    }

    #[test]
    fn json_file_shape() {
        let json = r##"{
            "max_iterations": 500,
            "zoom_level": 2,
            "zoom_factor": 3.0,
            "zoom_center": "100,50",
            "width": 600,
            "gradient": {"policy": "banded", "bands": [{"threshold": "inside", "color": "#000000"}]},
            "output_path": "deep.png",
            "log_level": "warning"
        }"##;
        let s: Settings = serde_json::from_str(json).unwrap();
        assert_eq!(s.render.max_iterations, 500);
        assert_eq!(s.render.zoom_center, PixelCoordinate::new(100, 50));
        assert_eq!(s.render.height, None);
        assert_eq!(s.render.strategy, EvalStrategy::PerPixel);
        assert_eq!(s.output_path, PathBuf::from("deep.png"));
        assert_eq!(s.level_filter().unwrap(), Some(LevelFilter::WARN));
    }

    #[test]
    fn json_zoom_center_follows_flag_syntax() {
        for bad in [r#"{"zoom_center": {"x": 1, "y": 2}}"#, r#"{"zoom_center": "-1,2"}"#] {
            assert!(
                serde_json::from_str::<Settings>(bad).is_err(),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn missing_config_file_reported() {
        let args = Args {
            config: Some(PathBuf::from("/definitely/not/here.json")),
            ..Args::default()
        };
        assert!(matches!(
            Settings::from_args(&args),
            Err(CliError::ReadConfig { .. })
        ));
    }

    #[test]
    fn log_level_aliases() {
        assert_eq!(parse_level("CRITICAL").unwrap(), LevelFilter::ERROR);
        assert_eq!(parse_level("Warning").unwrap(), LevelFilter::WARN);
        assert_eq!(parse_level("INFO").unwrap(), LevelFilter::INFO);
        assert_eq!(parse_level("warn").unwrap(), LevelFilter::WARN);
        for bad in ["loud", "off", "0", "5", ""] {
            assert!(
                matches!(parse_level(bad), Err(CliError::InvalidLogLevel(_))),
                "'{bad}' should be rejected"
            );
        }
    }
}
