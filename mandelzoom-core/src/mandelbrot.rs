use crate::complex::Complex;
use crate::fractal::{EscapeResult, Fractal, IterationParams, ESCAPE_BOUND};

/// The Mandelbrot set: `z_{n+1} = z_n² + c`, starting from `z₀ = 0`.
///
/// The escape test compares each component of `z` against
/// [`ESCAPE_BOUND`] independently and only in the positive direction,
/// rather than testing `|z|² > 4`. This is looser than the textbook
/// criterion but it is what existing reference frames were produced
/// with, so it is kept exactly.
#[derive(Debug, Clone, Default)]
pub struct Mandelbrot {
    params: IterationParams,
}

impl Mandelbrot {
    pub fn new(params: IterationParams) -> Self {
        Self { params }
    }
}

impl Fractal for Mandelbrot {
    fn params(&self) -> &IterationParams {
        &self.params
    }

    #[inline]
    fn step(&self, z: Complex, c: Complex) -> Complex {
        z * z + c
    }

    #[inline]
    fn has_escaped(&self, z: Complex) -> bool {
        z.re > ESCAPE_BOUND || z.im > ESCAPE_BOUND
    }
}

/// Evaluate a single point of the Mandelbrot set with the given budget.
pub fn evaluate(c: Complex, max_iterations: u32) -> EscapeResult {
    Mandelbrot::new(IterationParams { max_iterations }).evaluate(c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origin_never_escapes() {
        for budget in [1, 2, 50, 200, 5000] {
            assert_eq!(evaluate(Complex::ZERO, budget), EscapeResult::Bounded);
        }
    }

    #[test]
    fn one_escapes_on_third_update() {
        // z: 0 → 1 → 2 → 5; 2 is not > 2.0, 5 is.
        assert_eq!(
            evaluate(Complex::new(1.0, 0.0), 200),
            EscapeResult::Escaped { iterations: 3 }
        );
    }

    #[test]
    fn one_is_bounded_with_short_budget() {
        assert_eq!(evaluate(Complex::new(1.0, 0.0), 2), EscapeResult::Bounded);
        assert_eq!(
            evaluate(Complex::new(1.0, 0.0), 3),
            EscapeResult::Escaped { iterations: 3 }
        );
    }

    #[test]
    fn minus_one_cycles() {
        // 0 → -1 → 0 → -1 …
        assert_eq!(evaluate(Complex::new(-1.0, 0.0), 500), EscapeResult::Bounded);
    }

    #[test]
    fn far_point_escapes_on_first_update() {
        assert_eq!(
            evaluate(Complex::new(10.0, 0.0), 200),
            EscapeResult::Escaped { iterations: 1 }
        );
        assert_eq!(
            evaluate(Complex::new(0.0, 3.0), 200),
            EscapeResult::Escaped { iterations: 1 }
        );
    }

    #[test]
    fn negative_direction_is_not_tested_directly() {
        // c = -3: z₁ = -3 is far outside |z| ≤ 2 but not > 2.0 on any
        // component; z₂ = 9 - 3 = 6 escapes.
        assert_eq!(
            evaluate(Complex::new(-3.0, 0.0), 200),
            EscapeResult::Escaped { iterations: 2 }
        );
        // c = -2.5i: z₁ = -2.5i, z₂ = -6.25 - 2.5i, z₃ = 32.8125 + 28.75i
        assert_eq!(
            evaluate(Complex::new(0.0, -2.5), 200),
            EscapeResult::Escaped { iterations: 3 }
        );
    }

    #[test]
    fn escaped_count_within_budget() {
        let points = [
            Complex::new(0.3, 0.5),
            Complex::new(-0.75, 0.1),
            Complex::new(-2.0, 0.9),
            Complex::new(0.26, 0.0),
            Complex::new(-1.9, -0.9),
        ];
        for budget in [1, 5, 64, 300] {
            for &c in &points {
                if let EscapeResult::Escaped { iterations } = evaluate(c, budget) {
                    assert!((1..=budget).contains(&iterations), "{c}: {iterations}");
                }
            }
        }
    }

    #[test]
    fn deterministic_results() {
        let m = Mandelbrot::default();
        let points = [
            Complex::new(0.0, 0.0),
            Complex::new(-0.75, 0.1),
            Complex::new(0.3, 0.5),
            Complex::new(-2.0, 0.0),
            Complex::new(1.0, 1.0),
        ];
        let run1: Vec<_> = points.iter().map(|&c| m.evaluate(c)).collect();
        let run2: Vec<_> = points.iter().map(|&c| m.evaluate(c)).collect();
        assert_eq!(run1, run2, "iteration results must be deterministic");
    }
}
