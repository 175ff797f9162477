use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use rayon::prelude::*;
use tracing::{debug, info};

use mandelzoom_core::{
    apply_zoom, evaluate_masked, Complex, Fractal, IterationParams, Mandelbrot, Resolution,
    Viewport,
};

use crate::buffer::FrameBuffer;
use crate::config::{EvalStrategy, RenderConfig};
use crate::error::RenderError;
use crate::gradient::Gradient;

// ---------------------------------------------------------------------------
// Progress
// ---------------------------------------------------------------------------

/// Row counters for progress reporting, safe to read from another thread.
#[derive(Debug, Default)]
pub struct RenderProgress {
    rows_done: AtomicUsize,
    rows_total: AtomicUsize,
}

impl RenderProgress {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset progress for a new frame with `total` rows.
    pub fn reset(&self, total: usize) {
        self.rows_total.store(total, Ordering::Relaxed);
        self.rows_done.store(0, Ordering::Relaxed);
    }

    /// Mark one more row as finished.
    pub fn inc(&self) {
        self.rows_done.fetch_add(1, Ordering::Relaxed);
    }

    /// Read the current progress as `(done, total)`.
    pub fn progress(&self) -> (usize, usize) {
        (
            self.rows_done.load(Ordering::Relaxed),
            self.rows_total.load(Ordering::Relaxed),
        )
    }
}

// ---------------------------------------------------------------------------
// Result
// ---------------------------------------------------------------------------

/// The result of a full-frame render driven by a [`RenderConfig`].
#[derive(Debug)]
pub struct RenderResult {
    pub buffer: FrameBuffer,
    /// The viewport the frame was rendered with, after zooming.
    pub viewport: Viewport,
    pub elapsed: Duration,
}

// ---------------------------------------------------------------------------
// Per-row rendering
// ---------------------------------------------------------------------------

/// Evaluate and colorize one row into its slice of the frame.
fn render_row<F: Fractal>(
    fractal: &F,
    viewport: &Viewport,
    gradient: &Gradient,
    strategy: EvalStrategy,
    row: u32,
    line: &mut [u8],
) {
    let max_iter = fractal.params().max_iterations;

    match strategy {
        EvalStrategy::PerPixel => {
            for (col, pixel) in line.chunks_exact_mut(FrameBuffer::CHANNELS).enumerate() {
                let result = fractal.evaluate(viewport.to_complex(col as u32, row));
                pixel.copy_from_slice(&gradient.colorize(result, max_iter).to_array());
            }
        }
        EvalStrategy::Masked => {
            let width = (line.len() / FrameBuffer::CHANNELS) as u32;
            let points: Vec<Complex> = (0..width)
                .map(|col| viewport.to_complex(col, row))
                .collect();
            let results = evaluate_masked(fractal, &points);
            for (pixel, result) in line
                .chunks_exact_mut(FrameBuffer::CHANNELS)
                .zip(results)
            {
                pixel.copy_from_slice(&gradient.colorize(result, max_iter).to_array());
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Full-frame render
// ---------------------------------------------------------------------------

/// Render a full frame in parallel, one row per work item.
///
/// Each Rayon task owns a disjoint row slice of the buffer, and every
/// pixel is still iterated strictly sequentially, so the output is
/// identical to a single-threaded pass.
pub fn render_fractal<F: Fractal + Sync>(
    fractal: &F,
    viewport: &Viewport,
    resolution: Resolution,
    gradient: &Gradient,
    strategy: EvalStrategy,
    progress: &RenderProgress,
) -> crate::Result<FrameBuffer> {
    if resolution.width == 0 || resolution.height == 0 {
        return Err(RenderError::InvalidDimensions {
            width: resolution.width,
            height: resolution.height,
        });
    }
    viewport.check()?;
    gradient.validate()?;

    debug!(
        width = resolution.width,
        height = resolution.height,
        %strategy,
        "Starting frame render"
    );

    let mut buffer = FrameBuffer::new(resolution)?;
    let stride = buffer.stride();
    progress.reset(resolution.height as usize);

    buffer
        .pixels
        .par_chunks_mut(stride)
        .enumerate()
        .for_each(|(row, line)| {
            render_row(fractal, viewport, gradient, strategy, row as u32, line);
            progress.inc();
        });

    Ok(buffer)
}

/// Render the Mandelbrot set over `viewport` with the per-pixel strategy.
pub fn render(
    viewport: &Viewport,
    resolution: Resolution,
    max_iterations: u32,
    gradient: &Gradient,
) -> crate::Result<FrameBuffer> {
    let mandelbrot = Mandelbrot::new(IterationParams::new(max_iterations)?);
    render_fractal(
        &mandelbrot,
        viewport,
        resolution,
        gradient,
        EvalStrategy::PerPixel,
        &RenderProgress::new(),
    )
}

/// Validate `config`, zoom the default view, and render the frame.
///
/// The zoom completes before any pixel is evaluated; a configuration error
/// is returned before any rendering work starts.
pub fn render_frame(config: &RenderConfig, progress: &RenderProgress) -> crate::Result<RenderResult> {
    let start = Instant::now();
    config.validate()?;

    let resolution = config.resolution()?;
    let mandelbrot = Mandelbrot::new(config.iteration_params()?);

    let viewport = apply_zoom(
        &Viewport::default_mandelbrot(resolution),
        resolution,
        &config.zoom(),
    )?;
    info!(
        re_min = viewport.re_min,
        re_max = viewport.re_max,
        im_min = viewport.im_min,
        im_max = viewport.im_max,
        re_increment = viewport.re_increment,
        im_increment = viewport.im_increment,
        "Viewport ready"
    );

    let buffer = render_fractal(
        &mandelbrot,
        &viewport,
        resolution,
        &config.gradient,
        config.strategy,
        progress,
    )?;

    let elapsed = start.elapsed();
    info!(
        elapsed_ms = elapsed.as_millis(),
        width = resolution.width,
        height = resolution.height,
        max_iterations = config.max_iterations,
        "Render complete"
    );

    Ok(RenderResult {
        buffer,
        viewport,
        elapsed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gradient::{Band, Rgb};
    use mandelzoom_core::{evaluate, PixelCoordinate};

    fn small_config() -> RenderConfig {
        RenderConfig {
            max_iterations: 40,
            width: 60,
            height: Some(40),
            ..RenderConfig::default()
        }
    }

    #[test]
    fn basic_render_fills_every_row() {
        let progress = RenderProgress::new();
        let result = render_frame(&small_config(), &progress).unwrap();

        assert_eq!(result.buffer.pixels.len(), 60 * 40 * 3);
        assert_eq!(progress.progress(), (40, 40));
    }

    #[test]
    fn parallel_matches_sequential_reference() {
        let res = Resolution::new(45, 30).unwrap();
        let viewport = Viewport::default_mandelbrot(res);
        let gradient = Gradient::default();
        let frame = render(&viewport, res, 60, &gradient).unwrap();

        let mut reference = FrameBuffer::new(res).unwrap();
        for row in 0..res.height {
            for col in 0..res.width {
                let r = evaluate(viewport.to_complex(col, row), 60);
                reference.set_pixel(col, row, gradient.colorize(r, 60));
            }
        }
        assert_eq!(frame, reference);
    }

    #[test]
    fn strategies_agree() {
        let banded = Gradient::Banded {
            bands: vec![
                Band::at_least(0, Rgb::new(0, 0, 80)),
                Band::at_least(4, Rgb::new(0, 120, 200)),
                Band::at_least(12, Rgb::WHITE),
                Band::inside(Rgb::BLACK),
            ],
        };
        let per_pixel = RenderConfig {
            gradient: banded,
            zoom_level: 1,
            zoom_factor: 2.0,
            zoom_center: PixelCoordinate::new(20, 20),
            ..small_config()
        };
        let masked = RenderConfig {
            strategy: EvalStrategy::Masked,
            ..per_pixel.clone()
        };

        let progress = RenderProgress::new();
        let a = render_frame(&per_pixel, &progress).unwrap();
        let b = render_frame(&masked, &progress).unwrap();
        assert_eq!(a.buffer, b.buffer);
        assert_eq!(a.viewport, b.viewport);
    }

    #[test]
    fn invalid_config_never_renders() {
        let progress = RenderProgress::new();
        let cfg = RenderConfig {
            zoom_level: 1,
            zoom_factor: 0.0,
            ..small_config()
        };
        assert!(render_frame(&cfg, &progress).is_err());
        assert_eq!(progress.progress(), (0, 0), "no rows should have been started");
    }

    #[test]
    fn zero_dimensions_rejected() {
        let res = Resolution {
            width: 0,
            height: 10,
        };
        let vp = Viewport::default_mandelbrot(Resolution::new(10, 10).unwrap());
        let err = render_fractal(
            &Mandelbrot::default(),
            &vp,
            res,
            &Gradient::default(),
            EvalStrategy::PerPixel,
            &RenderProgress::new(),
        );
        assert!(matches!(err, Err(RenderError::InvalidDimensions { .. })));
    }

    #[test]
    fn empty_band_list_rejected_by_every_entry_point() {
        let res = Resolution::new(12, 8).unwrap();
        let viewport = Viewport::default_mandelbrot(res);
        let empty = Gradient::Banded { bands: Vec::new() };

        assert!(matches!(
            render(&viewport, res, 20, &empty),
            Err(RenderError::InvalidGradient(_))
        ));

        let progress = RenderProgress::new();
        let err = render_fractal(
            &Mandelbrot::default(),
            &viewport,
            res,
            &empty,
            EvalStrategy::Masked,
            &progress,
        );
        assert!(matches!(err, Err(RenderError::InvalidGradient(_))));
        assert_eq!(progress.progress(), (0, 0));
    }

    #[test]
    fn oversized_frame_fails_before_any_row() {
        let cfg = RenderConfig {
            width: 3_000_000_000,
            height: None,
            max_iterations: 1,
            ..RenderConfig::default()
        };
        let progress = RenderProgress::new();
        assert!(matches!(
            render_frame(&cfg, &progress),
            Err(RenderError::InvalidDimensions { .. })
        ));
        assert_eq!(progress.progress(), (0, 0));
    }
}
