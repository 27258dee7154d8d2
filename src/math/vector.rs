//! Two-dimensional quantity vectors.
//!
//! The magnitude is derived once, at construction, and can't be set on its
//! own. All three components share the unit of `x`.
//!
//! # Coordinate conventions
//!
//! The physics engine reports positions in screen coordinates (origin in
//! the top-left corner, `y` grows downwards). The analysis works in the
//! math convention (origin bottom-left, `y` grows upwards, so "up the slope"
//! is positive). [`Vector::translated`] flips a free vector between the two,
//! [`Vector::translated_abs`] maps a point, which also needs the screen
//! height as the new axis origin. Both are their own inverse.

use serde::Serialize;
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

use super::quantity::{Precision, Quantity, Unit};

/// A 2-D vector of quantities with a derived magnitude.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Vector {
    x: Quantity,
    y: Quantity,
    magnitude: Quantity,
}

impl Vector {
    /// Create a vector from two components.
    #[must_use]
    pub fn new(x: Quantity, y: Quantity) -> Self {
        let magnitude = Quantity::new(
            x.value().hypot(y.value()),
            x.unit(),
            x.precision(),
        );
        Self { x, y, magnitude }
    }

    /// Create a vector from raw components.
    #[must_use]
    pub fn from_f64(x: f64, y: f64, unit: Option<Unit>, precision: Precision) -> Self {
        Self::new(precision.quantity(x, unit), precision.quantity(y, unit))
    }

    /// The zero vector.
    #[must_use]
    pub fn zero(unit: Option<Unit>, precision: Precision) -> Self {
        Self::from_f64(0.0, 0.0, unit, precision)
    }

    /// First component.
    #[must_use]
    pub const fn x(&self) -> Quantity {
        self.x
    }

    /// Second component.
    #[must_use]
    pub const fn y(&self) -> Quantity {
        self.y
    }

    /// Euclidean length, `sqrt(x² + y²)`.
    #[must_use]
    pub const fn magnitude(&self) -> Quantity {
        self.magnitude
    }

    /// Shared unit.
    #[must_use]
    pub const fn unit(&self) -> Option<Unit> {
        self.x.unit()
    }

    /// Flip the sense of `y` (free vectors: velocities, displacements).
    #[must_use]
    pub fn translated(self) -> Self {
        Self::new(self.x, -self.y)
    }

    /// Move a point between screen and math coordinates, `y' = height - y`.
    #[must_use]
    pub fn translated_abs(self, height: f64) -> Self {
        Self::new(self.x, -self.y + height)
    }

    /// Component-wise absolute value.
    #[must_use]
    pub fn abs(self) -> Self {
        Self::new(self.x.abs(), self.y.abs())
    }

    /// Whether both components are finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.x.value().is_finite() && self.y.value().is_finite()
    }
}

impl PartialEq for Vector {
    fn eq(&self, other: &Self) -> bool {
        self.x == other.x && self.y == other.y
    }
}

impl Add for Vector {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for Vector {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }
}

impl Neg for Vector {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

impl Mul<f64> for Vector {
    type Output = Self;

    fn mul(self, factor: f64) -> Self {
        Self::new(self.x * factor, self.y * factor)
    }
}

impl Mul<Quantity> for Vector {
    type Output = Self;

    fn mul(self, factor: Quantity) -> Self {
        Self::new(self.x * factor, self.y * factor)
    }
}

impl Div<f64> for Vector {
    type Output = Self;

    fn div(self, divisor: f64) -> Self {
        Self::new(self.x / divisor, self.y / divisor)
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {} -> {})", self.x, self.y, self.magnitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn v(x: f64, y: f64, unit: Option<Unit>) -> Vector {
        Vector::from_f64(x, y, unit, Precision::default())
    }

    #[test]
    fn test_magnitude_derived() {
        let vec = v(5.0, 5.0, None);
        assert_eq!(vec.x(), 5.0);
        assert_eq!(vec.y(), 5.0);
        assert_relative_eq!(vec.magnitude().value(), 50f64.sqrt(), epsilon = 1e-9);
        assert!(vec.magnitude().unit().is_none());
    }

    #[test]
    fn test_from_f64_unit() {
        let vec = v(2.0, 3.0, Some(Unit::Mass));
        assert_eq!(vec.x().unit(), Some(Unit::Mass));
        assert_eq!(vec.y().unit(), Some(Unit::Mass));
        assert_eq!(vec.magnitude().unit(), Some(Unit::Mass));
        assert_relative_eq!(vec.magnitude().value(), 13f64.sqrt(), epsilon = 1e-9);
    }

    #[test]
    fn test_equality_compares_components() {
        let a = v(5.0, 5.0, Some(Unit::Distance));
        assert_eq!(a, v(5.0, 5.0, Some(Unit::Distance)));
        assert_ne!(a, v(5.0, 5.0, Some(Unit::Mass)));
        assert_ne!(a, v(6.0, 5.0, Some(Unit::Distance)));
        assert_ne!(a, v(5.0, 6.0, Some(Unit::Distance)));
    }

    #[test]
    fn test_translation_relative() {
        let vec = v(5.0, 6.0, Some(Unit::Velocity)).translated();
        assert_eq!(vec, v(5.0, -6.0, Some(Unit::Velocity)));
    }

    #[test]
    fn test_translation_absolute() {
        let vec = v(5.0, 6.0, Some(Unit::Distance)).translated_abs(800.0);
        assert_eq!(vec, v(5.0, 794.0, Some(Unit::Distance)));
    }

    #[test]
    fn test_translations_are_involutions() {
        let vec = v(12.5, -3.25, Some(Unit::Distance));
        assert_eq!(vec.translated().translated(), vec);
        assert_eq!(vec.translated_abs(600.0).translated_abs(600.0), vec);
    }

    #[test]
    fn test_abs_rederives_magnitude() {
        let vec = v(-3.0, 4.0, None).abs();
        assert_eq!(vec, v(3.0, 4.0, None));
        assert_relative_eq!(vec.magnitude().value(), 5.0);
    }

    #[test]
    fn test_scalar_multiplication() {
        let vec = v(1.0, -2.0, Some(Unit::Velocity)) * 3.0;
        assert_eq!(vec, v(3.0, -6.0, Some(Unit::Velocity)));
        assert_relative_eq!(vec.magnitude().value(), 45f64.sqrt(), epsilon = 1e-9);

        let factor = Precision::default().quantity(2.0, None);
        assert_eq!(v(1.0, 1.0, None) * factor, v(2.0, 2.0, None));
    }

    #[test]
    fn test_division_and_difference() {
        let a = v(10.0, 20.0, Some(Unit::Distance));
        let b = v(4.0, 25.0, Some(Unit::Distance));
        assert_eq!((a - b) / 2.0, v(3.0, -2.5, Some(Unit::Distance)));
        assert_eq!(a + b, v(14.0, 45.0, Some(Unit::Distance)));
        assert_eq!(-a, v(-10.0, -20.0, Some(Unit::Distance)));
    }

    #[test]
    fn test_nan_component_breaks_equality() {
        let vec = Vector::new(Quantity::nan(), Quantity::nan());
        assert!(vec.magnitude().is_nan());
        assert!(!vec.is_finite());
        assert_ne!(vec, vec);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Magnitude is non-negative.
        #[test]
        fn prop_magnitude_nonneg(x in -1e5f64..1e5, y in -1e5f64..1e5) {
            let vec = Vector::from_f64(x, y, Some(Unit::Velocity), Precision::default());
            prop_assert!(vec.magnitude().value() >= 0.0);
        }

        /// Negation and absolute value preserve magnitude.
        #[test]
        fn prop_neg_abs_preserve_magnitude(x in -1e5f64..1e5, y in -1e5f64..1e5) {
            let vec = Vector::from_f64(x, y, None, Precision::default());
            let m = vec.magnitude().value();
            prop_assert!(((-vec).magnitude().value() - m).abs() < 1e-8);
            prop_assert!((vec.abs().magnitude().value() - m).abs() < 1e-8);
        }
    }
}
