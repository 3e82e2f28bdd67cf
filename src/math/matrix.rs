use super::Rational;
use crate::error::GenerateError;
use smallvec::SmallVec;
use std::fmt;
use std::ops::{Index, IndexMut, Mul};

/// A small square matrix over the rationals, stored row-major.
#[derive(Clone, PartialEq, Eq)]
pub struct RationalMatrix {
    size: usize,
    data: SmallVec<[Rational; 16]>,
}

impl RationalMatrix {
    /// Creates a `size`×`size` matrix of zeros.
    pub fn zeros(size: usize) -> Self {
        Self {
            size,
            data: SmallVec::from_elem(Rational::ZERO, size * size),
        }
    }

    /// Creates the `size`×`size` identity matrix.
    pub fn identity(size: usize) -> Self {
        let mut m = Self::zeros(size);
        for i in 0..size {
            m[(i, i)] = Rational::ONE;
        }
        m
    }

    /// Creates a matrix from integer rows.
    pub fn from_rows<const N: usize>(rows: [[i64; N]; N]) -> Self {
        Self {
            size: N,
            data: rows.iter().flatten().map(|&v| Rational::int(v)).collect(),
        }
    }

    /// Returns a copy of this matrix with every element multiplied by `factor`.
    pub fn scaled(mut self, factor: Rational) -> Self {
        for v in self.data.iter_mut() {
            *v = *v * factor;
        }
        self
    }

    /// The number of rows (and columns).
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn row(&self, r: usize) -> &[Rational] {
        &self.data[r * self.size..(r + 1) * self.size]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Rational]> + '_ {
        self.data.chunks(self.size.max(1))
    }

    /// Multiplies this matrix by a column vector.
    ///
    /// # Panics
    /// If the length of `v` differs from the matrix size.
    pub fn apply(&self, v: &[Rational]) -> SmallVec<[Rational; 4]> {
        assert_eq!(v.len(), self.size, "vector length does not match matrix");
        self.rows()
            .map(|row| {
                row.iter()
                    .zip(v)
                    .fold(Rational::ZERO, |acc, (&a, &b)| acc + a * b)
            })
            .collect()
    }

    /// Inverts the matrix by Gauss-Jordan elimination, or returns `None`
    /// if it is singular.
    pub fn inverse(&self) -> Option<RationalMatrix> {
        let n = self.size;
        let mut a = self.clone();
        let mut inv = Self::identity(n);

        for col in 0..n {
            let pivot = (col..n).find(|&r| !a[(r, col)].is_zero())?;
            if pivot != col {
                a.swap_rows(pivot, col);
                inv.swap_rows(pivot, col);
            }

            let scale = a[(col, col)].recip()?;
            for c in 0..n {
                a[(col, c)] = a[(col, c)] * scale;
                inv[(col, c)] = inv[(col, c)] * scale;
            }

            for r in (0..n).filter(|&r| r != col) {
                let factor = a[(r, col)];
                if factor.is_zero() {
                    continue;
                }
                for c in 0..n {
                    a[(r, c)] = a[(r, c)] - factor * a[(col, c)];
                    inv[(r, c)] = inv[(r, c)] - factor * inv[(col, c)];
                }
            }
        }

        Some(inv)
    }

    fn swap_rows(&mut self, a: usize, b: usize) {
        for c in 0..self.size {
            self.data.swap(a * self.size + c, b * self.size + c);
        }
    }
}

/// Computes the matrix converting control points of the `from` basis into
/// control points of the `to` basis describing the same curve,
/// i.e. `inverse(to) * from`.
pub fn conversion_matrix(
    from: &RationalMatrix,
    to: &RationalMatrix,
) -> Result<RationalMatrix, GenerateError> {
    if from.size() != to.size() {
        return Err(GenerateError::DegreeMismatch {
            from: from.size(),
            to: to.size(),
        });
    }
    let inv = to.inverse().ok_or_else(|| GenerateError::SingularBasisMatrix {
        from: format!("{:?}", from),
        to: format!("{:?}", to),
    })?;
    Ok(&inv * from)
}

impl Index<(usize, usize)> for RationalMatrix {
    type Output = Rational;

    fn index(&self, (r, c): (usize, usize)) -> &Rational {
        &self.data[r * self.size + c]
    }
}

impl IndexMut<(usize, usize)> for RationalMatrix {
    fn index_mut(&mut self, (r, c): (usize, usize)) -> &mut Rational {
        &mut self.data[r * self.size + c]
    }
}

impl Mul for &RationalMatrix {
    type Output = RationalMatrix;

    /// # Panics
    /// If the matrices differ in size.
    fn mul(self, rhs: &RationalMatrix) -> RationalMatrix {
        assert_eq!(self.size, rhs.size, "matrix sizes do not match");
        let n = self.size;
        let mut out = RationalMatrix::zeros(n);
        for r in 0..n {
            for c in 0..n {
                out[(r, c)] = (0..n).fold(Rational::ZERO, |acc, k| acc + self[(r, k)] * rhs[(k, c)]);
            }
        }
        out
    }
}

impl fmt::Debug for RationalMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, row) in self.rows().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            let row = row.iter().map(|v| v.to_string()).collect::<Vec<_>>();
            write!(f, "{}", row.join(","))?;
        }
        write!(f, "]")
    }
}
