use std::path::PathBuf;

use clap::Parser;

use mandelzoom_core::{CoreError, PixelCoordinate};
use mandelzoom_render::{EvalStrategy, Gradient, RenderError};

/// Render the Mandelbrot set to a PNG, optionally zooming in first.
///
/// Every option also has a key in the JSON file given to `--config`;
/// flags given on the command line override values from the file.
#[derive(Debug, Default, Parser)]
#[command(name = "mandelzoom", version, about)]
pub struct Args {
    /// Maximum number of iterations per pixel to determine boundedness [default: 200]
    #[arg(short = 'i', long = "iterations", value_name = "N")]
    pub max_iterations: Option<u32>,

    /// Number of times to zoom in [default: 0]
    #[arg(short = 'l', long, value_name = "N")]
    pub zoom_level: Option<u32>,

    /// Size of the zoomed area relative to the frame; larger values zoom closer
    #[arg(short = 'z', long, value_name = "FACTOR", allow_negative_numbers = true)]
    pub zoom_factor: Option<f64>,

    /// Pixel coordinates of the zoom target
    #[arg(short = 'c', long, value_name = "X,Y", value_parser = parse_coordinate)]
    pub zoom_center: Option<PixelCoordinate>,

    /// Horizontal resolution in pixels; the frame is 3:2 unless --height is given [default: 3000]
    #[arg(short = 'r', long = "resolution", value_name = "PIXELS")]
    pub width: Option<u32>,

    /// Vertical resolution when the desired aspect ratio is not 3:2
    #[arg(short = 'v', long, value_name = "PIXELS")]
    pub height: Option<u32>,

    /// File to write the frame to [default: frame.png]
    #[arg(short = 'f', long = "file", value_name = "PATH")]
    pub output_path: Option<PathBuf>,

    /// `linear`, `linear:#rrggbb`, or bands such as `0:#000000,20:#ffffff,inside:#000000`
    #[arg(short = 'p', long, value_name = "GRADIENT", value_parser = parse_gradient)]
    pub gradient: Option<Gradient>,

    /// Escape-time evaluation strategy: per-pixel or masked
    #[arg(short = 's', long, value_name = "STRATEGY", value_parser = parse_strategy)]
    pub strategy: Option<EvalStrategy>,

    /// Log level: trace, debug, info, warn, warning, error or critical [default: $RUST_LOG or info]
    #[arg(short = 'g', long, value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// JSON settings file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

fn parse_coordinate(s: &str) -> Result<PixelCoordinate, String> {
    s.parse().map_err(|e: CoreError| e.to_string())
}

fn parse_gradient(s: &str) -> Result<Gradient, String> {
    s.parse().map_err(|e: RenderError| e.to_string())
}

fn parse_strategy(s: &str) -> Result<EvalStrategy, String> {
    s.parse().map_err(|e: RenderError| e.to_string())
}
