//! Unit-tagged, rounded scalar values.
//!
//! Every [`Quantity`] is rounded on construction according to the
//! [`Precision`] it was built with, and every arithmetic result is rounded
//! again with the precision of its left operand. The left operand's unit
//! also wins, so `time / 2.0` is still a time.
//!
//! A NaN quantity is the only "undefined" marker the analysis produces. It
//! propagates through arithmetic untouched and, per IEEE 754, never compares
//! equal to anything, itself included.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

/// Physical dimension a quantity is tagged with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Unit {
    /// Length along the plane (m).
    Distance,
    /// Elapsed time (s).
    Time,
    /// Velocity (m/s).
    Velocity,
    /// Plane tilt (rad).
    Tilt,
    /// Block mass (kg).
    Mass,
    /// Acceleration (m/s^2).
    Acceleration,
}

impl Unit {
    /// Default SI symbol.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Distance => "m",
            Self::Time => "s",
            Self::Velocity => "m/s",
            Self::Tilt => "rad",
            Self::Mass => "kg",
            Self::Acceleration => "m/s^2",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Rounding policy applied to every quantity value.
///
/// `digits` is the number of decimal places kept. When `collapse_epsilon`
/// is set, any value whose magnitude is at most that epsilon becomes exactly
/// zero before rounding; when it is `None` only plain rounding happens.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Precision {
    /// Decimal places kept after rounding.
    pub digits: u32,
    /// Optional near-zero collapse threshold.
    #[serde(default)]
    pub collapse_epsilon: Option<f64>,
}

impl Default for Precision {
    fn default() -> Self {
        Self::new(10)
    }
}

impl Precision {
    /// Plain rounding to `digits` decimal places.
    #[must_use]
    pub const fn new(digits: u32) -> Self {
        Self {
            digits,
            collapse_epsilon: None,
        }
    }

    /// Enable the near-zero collapse.
    #[must_use]
    pub const fn with_collapse(mut self, epsilon: f64) -> Self {
        self.collapse_epsilon = Some(epsilon);
        self
    }

    /// Apply the policy to a raw value.
    ///
    /// Non-finite values pass through unchanged, and so do values too large
    /// to be scaled by `10^digits` without overflowing.
    #[must_use]
    pub fn apply(&self, value: f64) -> f64 {
        if !value.is_finite() {
            return value;
        }
        if let Some(epsilon) = self.collapse_epsilon {
            if value.abs() <= epsilon {
                return 0.0;
            }
        }
        let factor = 10f64.powi(self.digits.min(i32::MAX as u32) as i32);
        let scaled = value * factor;
        if !scaled.is_finite() {
            return value;
        }
        let rounded = scaled.round() / factor;
        // normalise -0.0
        if rounded == 0.0 {
            0.0
        } else {
            rounded
        }
    }

    /// Build a quantity with this precision.
    #[must_use]
    pub fn quantity(self, value: f64, unit: Option<Unit>) -> Quantity {
        Quantity::new(value, unit, self)
    }
}

/// A rounded numeric value with an optional physical unit.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Quantity {
    value: f64,
    unit: Option<Unit>,
    #[serde(skip)]
    precision: Precision,
}

impl Quantity {
    /// Create a quantity, rounding `value` with `precision`.
    #[must_use]
    pub fn new(value: f64, unit: Option<Unit>, precision: Precision) -> Self {
        Self {
            value: precision.apply(value),
            unit,
            precision,
        }
    }

    /// The undefined quantity.
    #[must_use]
    pub fn nan() -> Self {
        Self {
            value: f64::NAN,
            unit: None,
            precision: Precision::default(),
        }
    }

    /// Zero in the given unit.
    #[must_use]
    pub fn zero(unit: Option<Unit>, precision: Precision) -> Self {
        Self::new(0.0, unit, precision)
    }

    /// Rounded numeric value.
    #[must_use]
    pub const fn value(&self) -> f64 {
        self.value
    }

    /// Unit tag, if any.
    #[must_use]
    pub const fn unit(&self) -> Option<Unit> {
        self.unit
    }

    /// Rounding policy this quantity carries into arithmetic.
    #[must_use]
    pub const fn precision(&self) -> Precision {
        self.precision
    }

    /// Whether this is the undefined quantity.
    #[must_use]
    pub fn is_nan(&self) -> bool {
        self.value.is_nan()
    }

    /// Absolute value, keeping unit and precision.
    #[must_use]
    pub fn abs(self) -> Self {
        self.derive(self.value.abs())
    }

    /// Square root, keeping unit and precision.
    #[must_use]
    pub fn sqrt(self) -> Self {
        self.derive(self.value.sqrt())
    }

    /// Order by rounded value alone, whatever the units. `None` only when
    /// either side is NaN. Unlike `partial_cmp`, equal values with different
    /// units compare `Equal`.
    #[must_use]
    pub fn cmp_value(&self, other: &Self) -> Option<Ordering> {
        self.value.partial_cmp(&other.value)
    }

    /// Same unit and precision, new value.
    fn derive(self, value: f64) -> Self {
        Self::new(value, self.unit, self.precision)
    }

    fn units_agree(&self, other: &Self) -> bool {
        match (self.unit, other.unit) {
            (Some(a), Some(b)) => a == b,
            _ => true,
        }
    }
}

impl PartialEq for Quantity {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value && self.units_agree(other)
    }
}

impl PartialEq<f64> for Quantity {
    fn eq(&self, other: &f64) -> bool {
        self.value == self.precision.apply(*other)
    }
}

impl PartialOrd for Quantity {
    /// Ordering looks at the rounded values only. Two equal values whose
    /// units disagree are unordered, so `partial_cmp` stays consistent
    /// with `==`.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match self.cmp_value(other)? {
            Ordering::Equal if !self.units_agree(other) => None,
            ordering => Some(ordering),
        }
    }
}

impl PartialOrd<f64> for Quantity {
    fn partial_cmp(&self, other: &f64) -> Option<Ordering> {
        self.value.partial_cmp(&self.precision.apply(*other))
    }
}

macro_rules! quantity_binop {
    ($trait:ident, $method:ident, $op:tt) => {
        impl $trait for Quantity {
            type Output = Self;

            fn $method(self, rhs: Self) -> Self {
                self.derive(self.value $op rhs.value)
            }
        }

        impl $trait<f64> for Quantity {
            type Output = Self;

            fn $method(self, rhs: f64) -> Self {
                self.derive(self.value $op rhs)
            }
        }
    };
}

quantity_binop!(Add, add, +);
quantity_binop!(Sub, sub, -);
quantity_binop!(Mul, mul, *);
quantity_binop!(Div, div, /);

impl Neg for Quantity {
    type Output = Self;

    fn neg(self) -> Self {
        self.derive(-self.value)
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.unit {
            Some(unit) => write!(f, "{} {unit}", self.value),
            None => write!(f, "{}", self.value),
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Rounding is idempotent.
        #[test]
        fn prop_rounding_idempotent(value in -1e4f64..1e4, digits in 0u32..10) {
            let p = Precision::new(digits);
            let once = p.apply(value);
            prop_assert_eq!(p.apply(once), once);
        }

        /// Rounding never moves a value by more than half a unit in the last place kept.
        #[test]
        fn prop_rounding_bounded(value in -1e6f64..1e6, digits in 0u32..8) {
            let p = Precision::new(digits);
            let bound = 0.5 * 10f64.powi(-(digits as i32)) + 1e-9;
            prop_assert!((p.apply(value) - value).abs() <= bound);
        }

        /// Absolute value is never negative.
        #[test]
        fn prop_abs_nonneg(value in -1e9f64..1e9) {
            let s = Precision::default().quantity(value, Some(Unit::Distance));
            prop_assert!(s.abs().value() >= 0.0);
        }
    }
}
