//! PNG export with embedded render parameters (tEXt chunks).

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use tracing::debug;

use mandelzoom_core::{Viewport, ZoomRequest};

use crate::buffer::FrameBuffer;
use crate::config::{EvalStrategy, RenderConfig};

/// Parameters to embed in an exported PNG as tEXt chunks.
#[derive(Debug, Clone)]
pub struct ExportMetadata {
    pub viewport: Viewport,
    pub zoom: ZoomRequest,
    pub max_iterations: u32,
    pub gradient: String,
    pub strategy: EvalStrategy,
}

impl ExportMetadata {
    /// Describe a frame rendered from `config` over the final `viewport`.
    pub fn new(config: &RenderConfig, viewport: &Viewport) -> Self {
        Self {
            viewport: *viewport,
            zoom: config.zoom(),
            max_iterations: config.max_iterations,
            gradient: config.gradient.to_string(),
            strategy: config.strategy,
        }
    }
}

/// Write a frame as an 8-bit RGB PNG with the render parameters attached.
///
/// Uses the `png` crate directly to inject custom tEXt chunks readable by
/// exiftool and most image viewers.
pub fn export_png(buffer: &FrameBuffer, path: &Path, metadata: &ExportMetadata) -> crate::Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);

    let mut encoder = png::Encoder::new(writer, buffer.width, buffer.height);
    encoder.set_color(png::ColorType::Rgb);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.set_compression(png::Compression::Default);

    encoder.add_text_chunk("Software".to_string(), "Mandelzoom".to_string())?;
    encoder.add_text_chunk("Description".to_string(), build_description(metadata))?;
    for (key, value) in build_metadata_pairs(buffer, metadata) {
        encoder.add_text_chunk(key, value)?;
    }

    let mut png_writer = encoder.write_header()?;
    png_writer.write_image_data(&buffer.pixels)?;
    png_writer.finish()?;

    debug!(
        width = buffer.width,
        height = buffer.height,
        path = %path.display(),
        "Exported PNG"
    );
    Ok(())
}

fn build_description(meta: &ExportMetadata) -> String {
    let vp = &meta.viewport;
    let mut desc = format!(
        "Mandelbrot - Re [{}, {}], Im [{}, {}], Iterations: {}",
        vp.re_min, vp.re_max, vp.im_min, vp.im_max, meta.max_iterations,
    );
    if meta.zoom.level > 0 {
        desc.push_str(&format!(
            ", Zoom: {} @ {}x toward {}",
            meta.zoom.level, meta.zoom.factor, meta.zoom.center
        ));
    }
    desc
}

fn build_metadata_pairs(buffer: &FrameBuffer, meta: &ExportMetadata) -> Vec<(String, String)> {
    let vp = &meta.viewport;
    vec![
        ("Mandelzoom.ReMin".into(), vp.re_min.to_string()),
        ("Mandelzoom.ReMax".into(), vp.re_max.to_string()),
        ("Mandelzoom.ImMin".into(), vp.im_min.to_string()),
        ("Mandelzoom.ImMax".into(), vp.im_max.to_string()),
        ("Mandelzoom.ZoomLevel".into(), meta.zoom.level.to_string()),
        ("Mandelzoom.ZoomFactor".into(), meta.zoom.factor.to_string()),
        ("Mandelzoom.ZoomCenter".into(), meta.zoom.center.to_string()),
        ("Mandelzoom.MaxIterations".into(), meta.max_iterations.to_string()),
        ("Mandelzoom.Gradient".into(), meta.gradient.clone()),
        ("Mandelzoom.Strategy".into(), meta.strategy.to_string()),
        (
            "Mandelzoom.Resolution".into(),
            format!("{}x{}", buffer.width, buffer.height),
        ),
    ]
}
