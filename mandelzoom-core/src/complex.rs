use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul};

/// A point on the complex plane as two `f64` components.
///
/// Only the operations the recurrence needs are provided. Multiplication
/// follows the textbook expansion term by term so results are reproducible
/// across evaluation strategies.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Complex {
    pub re: f64,
    pub im: f64,
}

impl Complex {
    pub const ZERO: Self = Self { re: 0.0, im: 0.0 };

    #[inline]
    pub fn new(re: f64, im: f64) -> Self {
        Self { re, im }
    }

    /// `self * self`.
    #[inline]
    pub fn square(self) -> Self {
        self * self
    }
}

impl Add for Complex {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self {
            re: self.re + rhs.re,
            im: self.im + rhs.im,
        }
    }
}

/// `(a + bi)(c + di) = (ac − bd) + (ad + bc)i`
impl Mul for Complex {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        Self {
            re: self.re * rhs.re - self.im * rhs.im,
            im: self.re * rhs.im + self.im * rhs.re,
        }
    }
}

impl std::fmt::Display for Complex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.im >= 0.0 {
            write!(f, "{} + {}i", self.re, self.im)
        } else {
            write!(f, "{} - {}i", self.re, -self.im)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn addition() {
        let c = Complex::new(1.0, 2.0) + Complex::new(3.0, -4.0);
        assert_eq!(c, Complex::new(4.0, -2.0));
    }

    #[test]
    fn multiplication() {
        // (1 + 2i)(3 + 4i) = 3 + 4i + 6i + 8i² = -5 + 10i
        let c = Complex::new(1.0, 2.0) * Complex::new(3.0, 4.0);
        assert_eq!(c, Complex::new(-5.0, 10.0));
    }

    #[test]
    fn squaring_matches_expansion() {
        // (a + bi)² = a² − b² + 2abi
        let (a, b) = (0.3, -1.7);
        let z = Complex::new(a, b).square();
        assert_eq!(z.re, a * a - b * b);
        assert_eq!(z.im, 2.0 * a * b);
    }

    #[test]
    fn display_sign() {
        assert_eq!(Complex::new(1.5, 2.0).to_string(), "1.5 + 2i");
        assert_eq!(Complex::new(-1.0, -0.5).to_string(), "-1 - 0.5i");
    }
}
