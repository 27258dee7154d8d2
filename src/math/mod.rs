//! Rounded, unit-tagged scalars and 2-D vectors.

pub mod quantity;
pub mod vector;

pub use quantity::{Precision, Quantity, Unit};
pub use vector::Vector;
