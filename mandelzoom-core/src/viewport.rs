use serde::{Deserialize, Serialize};

use crate::complex::Complex;
use crate::error::CoreError;
use crate::resolution::Resolution;

/// The rectangular region of the complex plane mapped onto the pixel grid.
///
/// Bounds are stored explicitly, together with the per-pixel increments
/// derived from them and the frame resolution. Row 0 maps next to
/// `im_min`, so the imaginary axis grows downward in the image.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub re_min: f64,
    pub re_max: f64,
    pub im_min: f64,
    pub im_max: f64,

    /// Complex-plane units per pixel column.
    pub re_increment: f64,

    /// Complex-plane units per pixel row.
    pub im_increment: f64,
}

impl Viewport {
    /// Real-axis bounds of the unzoomed view.
    pub const DEFAULT_RE: (f64, f64) = (-2.0, 1.0);
    /// Imaginary-axis bounds of the unzoomed view.
    pub const DEFAULT_IM: (f64, f64) = (-1.0, 1.0);

    /// Default view: `re ∈ [-2, 1]`, `im ∈ [-1, 1]`.
    pub fn default_mandelbrot(resolution: Resolution) -> Self {
        let (re_min, re_max) = Self::DEFAULT_RE;
        let (im_min, im_max) = Self::DEFAULT_IM;
        Self::with_increments(re_min, re_max, im_min, im_max, resolution)
    }

    /// Create a viewport from explicit bounds, deriving the increments.
    pub fn from_bounds(
        re_min: f64,
        re_max: f64,
        im_min: f64,
        im_max: f64,
        resolution: Resolution,
    ) -> crate::Result<Self> {
        let vp = Self::with_increments(re_min, re_max, im_min, im_max, resolution);
        vp.check()?;
        Ok(vp)
    }

    pub(crate) fn with_increments(
        re_min: f64,
        re_max: f64,
        im_min: f64,
        im_max: f64,
        resolution: Resolution,
    ) -> Self {
        Self {
            re_min,
            re_max,
            im_min,
            im_max,
            re_increment: (re_max - re_min) / resolution.width as f64,
            im_increment: (im_max - im_min) / resolution.height as f64,
        }
    }

    /// Verify ordered, finite bounds and strictly positive increments.
    pub fn check(&self) -> crate::Result<()> {
        let finite = [
            self.re_min,
            self.re_max,
            self.im_min,
            self.im_max,
            self.re_increment,
            self.im_increment,
        ]
        .iter()
        .all(|v| v.is_finite());
        if !finite {
            return Err(CoreError::InvalidViewport {
                reason: format!("non-finite bounds or increments: {self:?}"),
            });
        }
        if self.re_max <= self.re_min || self.im_max <= self.im_min {
            return Err(CoreError::InvalidViewport {
                reason: format!(
                    "bounds must be ordered, got re [{}, {}] im [{}, {}]",
                    self.re_min, self.re_max, self.im_min, self.im_max
                ),
            });
        }
        if self.re_increment <= 0.0 || self.im_increment <= 0.0 {
            return Err(CoreError::InvalidViewport {
                reason: format!(
                    "increments must be positive, got {} and {}",
                    self.re_increment, self.im_increment
                ),
            });
        }
        Ok(())
    }

    /// Map a pixel column/row to its point on the complex plane.
    ///
    /// Pixel index 0 lands one increment past the minimum bound, not on
    /// the bound itself; reference output depends on this offset.
    #[inline]
    pub fn to_complex(&self, col: u32, row: u32) -> Complex {
        Complex::new(
            self.re_min + self.re_increment * (col as f64 + 1.0),
            self.im_min + self.im_increment * (row as f64 + 1.0),
        )
    }

    /// Width of the viewport in complex-plane units.
    pub fn re_span(&self) -> f64 {
        self.re_max - self.re_min
    }

    /// Height of the viewport in complex-plane units.
    pub fn im_span(&self) -> f64 {
        self.im_max - self.im_min
    }
}
