use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Output image size in pixels, fixed for the whole run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Resolution {
    pub const DEFAULT_WIDTH: u32 = 3000;

    /// Create a resolution, rejecting zero-sized axes.
    pub fn new(width: u32, height: u32) -> crate::Result<Self> {
        if width == 0 || height == 0 {
            return Err(CoreError::InvalidResolution { width, height });
        }
        Ok(Self { width, height })
    }

    /// Resolve an optional height against the default 3:2 aspect ratio.
    ///
    /// Without an explicit height, `height = (2 * width) / 3` with integer
    /// division, so a width of 1 yields a zero height and is rejected.
    pub fn with_optional_height(width: u32, height: Option<u32>) -> crate::Result<Self> {
        let height = height.unwrap_or_else(|| Self::default_height(width));
        Self::new(width, height)
    }

    /// Height for a 3:2 frame of the given width.
    pub fn default_height(width: u32) -> u32 {
        ((2 * u64::from(width)) / 3) as u32
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Geometric center of the frame, rounded down on odd axes.
    pub fn center(&self) -> PixelCoordinate {
        PixelCoordinate {
            x: self.width / 2,
            y: self.height / 2,
        }
    }
}

impl Default for Resolution {
    fn default() -> Self {
        Self {
            width: Self::DEFAULT_WIDTH,
            height: Self::default_height(Self::DEFAULT_WIDTH),
        }
    }
}

/// A pixel position. `x` is the column, `y` the row; `(0, 0)` is top-left.
///
/// Serialized as the same `X,Y` text the command line accepts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PixelCoordinate {
    pub x: u32,
    pub y: u32,
}

impl PixelCoordinate {
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

/// Parses `X,Y` where both parts are plain decimal digits.
impl FromStr for PixelCoordinate {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CoreError::InvalidCoordinate(s.to_string());
        let (x, y) = s.split_once(',').ok_or_else(invalid)?;
        let is_digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
        if !is_digits(x) || !is_digits(y) {
            return Err(invalid());
        }
        Ok(Self {
            x: x.parse().map_err(|_| invalid())?,
            y: y.parse().map_err(|_| invalid())?,
        })
    }
}

impl TryFrom<String> for PixelCoordinate {
    type Error = CoreError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<PixelCoordinate> for String {
    fn from(p: PixelCoordinate) -> Self {
        p.to_string()
    }
}

impl std::fmt::Display for PixelCoordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}
