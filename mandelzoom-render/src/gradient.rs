use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use mandelzoom_core::EscapeResult;

use crate::error::RenderError;

// ---------------------------------------------------------------------------
// Rgb
// ---------------------------------------------------------------------------

/// An 8-bit RGB color. Textual form is `#rrggbb` (the `#` is optional on input).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Self = Self::new(0, 0, 0);
    pub const WHITE: Self = Self::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn gray(v: u8) -> Self {
        Self::new(v, v, v)
    }

    pub fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl FromStr for Rgb {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(RenderError::InvalidColor(s.to_string()));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map_err(|_| RenderError::InvalidColor(s.to_string()))
        };
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl TryFrom<String> for Rgb {
    type Error = RenderError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Rgb> for String {
    fn from(c: Rgb) -> Self {
        c.to_string()
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

// ---------------------------------------------------------------------------
// Bands
// ---------------------------------------------------------------------------

/// When a band applies to a pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Threshold {
    /// The iteration count is at least this value. A bounded point counts
    /// as having used the whole budget.
    AtLeast(u32),
    /// The point never escaped.
    Inside,
}

impl Threshold {
    #[inline]
    pub fn matches(self, result: EscapeResult, max_iterations: u32) -> bool {
        match self {
            Self::AtLeast(t) => result.count(max_iterations) >= t,
            Self::Inside => result.is_bounded(),
        }
    }
}

/// One `(threshold, color)` entry of a banded gradient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Band {
    pub threshold: Threshold,
    pub color: Rgb,
}

impl Band {
    pub fn at_least(threshold: u32, color: Rgb) -> Self {
        Self {
            threshold: Threshold::AtLeast(threshold),
            color,
        }
    }

    pub fn inside(color: Rgb) -> Self {
        Self {
            threshold: Threshold::Inside,
            color,
        }
    }
}

// ---------------------------------------------------------------------------
// Gradient
// ---------------------------------------------------------------------------

/// Maps an escape result to a color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum Gradient {
    /// Gray level `round(255 * count / max_iterations)` for escaped points,
    /// `inside` for bounded ones.
    Linear {
        #[serde(default = "default_inside")]
        inside: Rgb,
    },
    /// Bands are painted in order over a black pixel; every band whose
    /// threshold matches overwrites the previous color, so the last
    /// matching band wins.
    Banded { bands: Vec<Band> },
}

fn default_inside() -> Rgb {
    Rgb::WHITE
}

impl Default for Gradient {
    fn default() -> Self {
        Self::Linear {
            inside: default_inside(),
        }
    }
}

impl Gradient {
    /// Color for a single escape result.
    pub fn colorize(&self, result: EscapeResult, max_iterations: u32) -> Rgb {
        match self {
            Self::Linear { inside } => match result {
                EscapeResult::Bounded => *inside,
                EscapeResult::Escaped { iterations } => {
                    let ratio = iterations as f64 / max_iterations as f64;
                    Rgb::gray((255.0 * ratio).round().min(255.0) as u8)
                }
            },
            Self::Banded { bands } => bands.iter().fold(Rgb::BLACK, |color, band| {
                if band.threshold.matches(result, max_iterations) {
                    band.color
                } else {
                    color
                }
            }),
        }
    }

    /// A banded gradient must name at least one band.
    pub fn validate(&self) -> crate::Result<()> {
        match self {
            Self::Banded { bands } if bands.is_empty() => Err(RenderError::InvalidGradient(
                "banded gradient has no bands".into(),
            )),
            _ => Ok(()),
        }
    }
}

/// Parses `linear`, `linear:#rrggbb`, or a band list such as
/// `0:#000000,10:#3050a0,inside:#000000`.
impl FromStr for Gradient {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s == "linear" {
            return Ok(Self::default());
        }
        if let Some(color) = s.strip_prefix("linear:") {
            return Ok(Self::Linear {
                inside: color.trim().parse()?,
            });
        }

        let bands = s
            .split(',')
            .map(|entry| {
                let (threshold, color) = entry.trim().split_once(':').ok_or_else(|| {
                    RenderError::InvalidGradient(format!("band '{entry}' is not THRESHOLD:COLOR"))
                })?;
                let threshold = match threshold.trim() {
                    "inside" => Threshold::Inside,
                    t => Threshold::AtLeast(t.parse().map_err(|_| {
                        RenderError::InvalidGradient(format!("bad threshold '{t}' in '{entry}'"))
                    })?),
                };
                Ok(Band {
                    threshold,
                    color: color.trim().parse()?,
                })
            })
            .collect::<crate::Result<Vec<_>>>()?;

        let gradient = Self::Banded { bands };
        gradient.validate()?;
        Ok(gradient)
    }
}

impl fmt::Display for Gradient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Linear { inside } => write!(f, "linear:{inside}"),
            Self::Banded { bands } => {
                for (i, band) in bands.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    match band.threshold {
                        Threshold::AtLeast(t) => write!(f, "{t}:{}", band.color)?,
                        Threshold::Inside => write!(f, "inside:{}", band.color)?,
                    }
                }
                Ok(())
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
