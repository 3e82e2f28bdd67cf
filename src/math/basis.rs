//! Characteristic matrices of the built-in spline bases.
//!
//! Row `r` holds the weights of each control point in the coefficient of `t^r`.

use super::{Rational, RationalMatrix};
use once_cell::sync::Lazy;

pub static QUADRATIC_BEZIER: Lazy<RationalMatrix> = Lazy::new(|| {
    RationalMatrix::from_rows([
        [1, 0, 0],
        [-2, 2, 0],
        [1, -2, 1],
    ])
});

pub static CUBIC_BEZIER: Lazy<RationalMatrix> = Lazy::new(|| {
    RationalMatrix::from_rows([
        [1, 0, 0, 0],
        [-3, 3, 0, 0],
        [3, -6, 3, 0],
        [-1, 3, -3, 1],
    ])
});

/// Control points are ordered `p0, v0, p1, v1`.
pub static CUBIC_HERMITE: Lazy<RationalMatrix> = Lazy::new(|| {
    RationalMatrix::from_rows([
        [1, 0, 0, 0],
        [0, 1, 0, 0],
        [-3, -2, 3, -1],
        [2, 1, -2, 1],
    ])
});

/// Uniform Catmull-Rom with a tension of 1/2.
pub static CUBIC_CATMULL_ROM: Lazy<RationalMatrix> = Lazy::new(|| {
    RationalMatrix::from_rows([
        [0, 2, 0, 0],
        [-1, 0, 1, 0],
        [2, -5, 4, -1],
        [-1, 3, -3, 1],
    ])
    .scaled(Rational::new(1, 2))
});

pub static CUBIC_UNIFORM_BSPLINE: Lazy<RationalMatrix> = Lazy::new(|| {
    RationalMatrix::from_rows([
        [1, 4, 1, 0],
        [-3, 0, 3, 0],
        [3, -6, 3, 0],
        [-1, 3, -3, 1],
    ])
    .scaled(Rational::new(1, 6))
});

#[cfg(test)]
mod test {
    use super::*;
    use crate::math::conversion_matrix;

    fn all() -> [&'static RationalMatrix; 4] {
        [
            &CUBIC_BEZIER,
            &CUBIC_HERMITE,
            &CUBIC_CATMULL_ROM,
            &CUBIC_UNIFORM_BSPLINE,
        ]
    }

    #[test]
    fn cubic_bases_are_invertible() {
        for m in all() {
            let inv = m.inverse().unwrap();
            assert_eq!(&inv * m, RationalMatrix::identity(4));
        }
        assert!(QUADRATIC_BEZIER.inverse().is_some());
    }

    #[test]
    fn bezier_to_hermite() {
        let c = conversion_matrix(&CUBIC_BEZIER, &CUBIC_HERMITE).unwrap();
        assert_eq!(c, RationalMatrix::from_rows([
            [1, 0, 0, 0],
            [-3, 3, 0, 0],
            [0, 0, 0, 1],
            [0, 0, -3, 3],
        ]));
    }

    #[test]
    fn conversions_round_trip_exactly() {
        for a in all() {
            for b in all() {
                let ab = conversion_matrix(a, b).unwrap();
                let ba = conversion_matrix(b, a).unwrap();
                assert_eq!(&ba * &ab, RationalMatrix::identity(4));
            }
        }
    }
}
