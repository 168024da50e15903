use std::ops::{Add, Mul, Sub};

use serde::{Deserialize, Serialize};

/// A point on the complex plane, stored as two `f64` components.
///
/// Used both for the iteration variable `z` and for world coordinates
/// produced by [`Viewport::screen_to_world`](crate::Viewport::screen_to_world).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Complex {
    pub re: f64,
    pub im: f64,
}

impl Complex {
    pub const ZERO: Self = Self { re: 0.0, im: 0.0 };

    #[inline]
    pub const fn new(re: f64, im: f64) -> Self {
        Self { re, im }
    }

    /// Returns `re² + im²` without taking the square root.
    #[inline]
    pub fn norm_sq(self) -> f64 {
        self.re * self.re + self.im * self.im
    }

    /// `z²`, in the operation order the escape loop relies on.
    #[inline]
    pub fn square(self) -> Self {
        Self::new(self.re * self.re - self.im * self.im, 2.0 * self.re * self.im)
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.re.is_finite() && self.im.is_finite()
    }
}

impl Add for Complex {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.re + rhs.re, self.im + rhs.im)
    }
}

impl Sub for Complex {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.re - rhs.re, self.im - rhs.im)
    }
}

/// Scalar multiplication: `Complex * f64`.
impl Mul<f64> for Complex {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: f64) -> Self {
        Self::new(self.re * rhs, self.im * rhs)
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
    fn json_shape() {
        let c: Complex = serde_json::from_str(r#"{ "re": -0.75, "im": 0.1 }"#).unwrap();
        assert_eq!(c, Complex::new(-0.75, 0.1));
        assert_eq!(serde_json::to_string(&Complex::ZERO).unwrap(), r#"{"re":0.0,"im":0.0}"#);
    }

    #[test]
    fn arithmetic() {
        let a = Complex::new(1.0, 2.0);
        let b = Complex::new(3.0, -4.0);
        assert_eq!(a + b, Complex::new(4.0, -2.0));
        assert_eq!(a - b, Complex::new(-2.0, 6.0));
        assert_eq!(a * 2.0, Complex::new(2.0, 4.0));
    }

    #[test]
    fn square_matches_product() {
        let z = Complex::new(1.5, -0.5);
        assert_eq!(z.square(), Complex::new(2.0, -1.5));
        assert_eq!(Complex::new(0.0, 1.0).square(), Complex::new(-1.0, 0.0));
    }

    #[test]
    fn norm_sq_of_3_4() {
        assert_eq!(Complex::new(3.0, 4.0).norm_sq(), 25.0);
    }

    #[test]
    fn finiteness() {
        assert!(Complex::new(-0.5, 0.0).is_finite());
        assert!(!Complex::new(f64::NAN, 0.0).is_finite());
        assert!(!Complex::new(0.0, f64::NEG_INFINITY).is_finite());
    }

    #[test]
    fn display_sign() {
        assert_eq!(Complex::new(1.0, -2.0).to_string(), "1 - 2i");
        assert_eq!(Complex::new(-0.5, 0.0).to_string(), "-0.5 + 0i");
    }
}
