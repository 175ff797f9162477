use serde::{Deserialize, Serialize};

use crate::complex::Complex;
use crate::error::CoreError;

/// Component bound used by the escape test.
pub const ESCAPE_BOUND: f64 = 2.0;

/// The outcome of iterating a single point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EscapeResult {
    /// The orbit crossed the bound on update number `iterations` (1-based).
    Escaped { iterations: u32 },

    /// The full iteration budget ran out without escaping.
    Bounded,
}

impl EscapeResult {
    /// Iteration count as seen by the colorizer: a bounded point used the
    /// whole budget.
    #[inline]
    pub fn count(&self, max_iterations: u32) -> u32 {
        match self {
            Self::Escaped { iterations } => *iterations,
            Self::Bounded => max_iterations,
        }
    }

    #[inline]
    pub fn is_bounded(&self) -> bool {
        matches!(self, Self::Bounded)
    }
}

/// Parameters controlling iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IterationParams {
    /// Maximum number of updates before a point is declared bounded.
    pub max_iterations: u32,
}

impl IterationParams {
    pub const DEFAULT_MAX_ITERATIONS: u32 = 200;

    pub fn new(max_iterations: u32) -> crate::Result<Self> {
        if max_iterations < 1 {
            return Err(CoreError::InvalidMaxIterations(max_iterations));
        }
        Ok(Self { max_iterations })
    }
}

impl Default for IterationParams {
    fn default() -> Self {
        Self {
            max_iterations: Self::DEFAULT_MAX_ITERATIONS,
        }
    }
}

/// An escape-time recurrence.
///
/// Implementors supply a single update step and the escape predicate;
/// both evaluation strategies (the early-exit loop in
/// [`evaluate`](Self::evaluate) and the batched sweep in
/// [`evaluate_masked`](crate::evaluate_masked)) are built on these two
/// methods, so they cannot disagree.
///
/// Renderers should be generic over `F: Fractal` for static dispatch.
pub trait Fractal {
    /// Access the iteration parameters.
    fn params(&self) -> &IterationParams;

    /// One application of the recurrence.
    fn step(&self, z: Complex, c: Complex) -> Complex;

    /// Whether `z` has left the bounding region.
    fn has_escaped(&self, z: Complex) -> bool;

    /// Iterate from `z = 0` until escape or the budget runs out.
    fn evaluate(&self, c: Complex) -> EscapeResult {
        let mut z = Complex::ZERO;
        for count in 1..=self.params().max_iterations {
            z = self.step(z, c);
            if self.has_escaped(z) {
                return EscapeResult::Escaped { iterations: count };
            }
        }
        EscapeResult::Bounded
    }
}
