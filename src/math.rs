//! Exact arithmetic used to derive spline formulas.

pub use matrix::{conversion_matrix, RationalMatrix};
pub use rational::Rational;
pub use segment::Segment;

pub mod basis;
mod matrix;
mod rational;
mod segment;
