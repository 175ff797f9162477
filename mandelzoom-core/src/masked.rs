//! Whole-batch evaluation: every live point advances one step per sweep
//! and escaped points are masked out of later sweeps.

use crate::complex::Complex;
use crate::fractal::{EscapeResult, Fractal};

/// Evaluate a batch of points sweep by sweep.
///
/// Produces the same result for every point as calling
/// [`Fractal::evaluate`] on it individually; only the loop nesting differs.
pub fn evaluate_masked<F: Fractal>(fractal: &F, points: &[Complex]) -> Vec<EscapeResult> {
    let mut z = vec![Complex::ZERO; points.len()];
    let mut results = vec![EscapeResult::Bounded; points.len()];
    let mut live: Vec<usize> = (0..points.len()).collect();

    for count in 1..=fractal.params().max_iterations {
        if live.is_empty() {
            break;
        }
        live.retain(|&i| {
            z[i] = fractal.step(z[i], points[i]);
            if fractal.has_escaped(z[i]) {
                results[i] = EscapeResult::Escaped { iterations: count };
                false
            } else {
                true
            }
        });
    }

    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{IterationParams, Mandelbrot};

    #[test]
    fn matches_per_point_evaluation() {
        let m = Mandelbrot::new(IterationParams::new(120).unwrap());
        let points: Vec<Complex> = (0..40)
            .flat_map(|i| {
                (0..30).map(move |j| Complex::new(-2.2 + i as f64 * 0.08, -1.2 + j as f64 * 0.08))
            })
            .collect();

        let masked = evaluate_masked(&m, &points);
        let single: Vec<_> = points.iter().map(|&c| m.evaluate(c)).collect();
        assert_eq!(masked, single);
    }

    #[test]
    fn empty_batch() {
        assert!(evaluate_masked(&Mandelbrot::default(), &[]).is_empty());
    }

    #[test]
    fn known_points() {
        let m = Mandelbrot::default();
        let r = evaluate_masked(&m, &[Complex::ZERO, Complex::new(1.0, 0.0)]);
        assert_eq!(
            r,
            vec![
                EscapeResult::Bounded,
                EscapeResult::Escaped { iterations: 3 }
            ]
        );
    }
}
