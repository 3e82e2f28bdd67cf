use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

/// An exact rational number.
///
/// Always stored in lowest terms with a positive denominator, so structural
/// equality is numeric equality.
///
/// # Panics
/// Arithmetic panics if the reduced result does not fit in `i64`, like
/// overflowing integer arithmetic in debug builds.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rational {
    n: i64,
    d: i64,
}

impl Rational {
    pub const ZERO: Rational = Rational { n: 0, d: 1 };
    pub const ONE: Rational = Rational { n: 1, d: 1 };

    /// Creates a reduced rational `n / d`.
    ///
    /// # Panics
    /// If `d` is zero.
    pub fn new(n: i64, d: i64) -> Self {
        assert!(d != 0, "rational with zero denominator");
        Self::from_wide(n as i128, d as i128)
    }

    /// Creates an integral rational.
    pub const fn int(n: i64) -> Self {
        Self { n, d: 1 }
    }

    /// The numerator, carrying the sign.
    pub const fn numer(&self) -> i64 {
        self.n
    }

    /// The denominator, always positive.
    pub const fn denom(&self) -> i64 {
        self.d
    }

    pub const fn is_zero(&self) -> bool {
        self.n == 0
    }

    pub const fn is_integer(&self) -> bool {
        self.d == 1
    }

    pub const fn is_negative(&self) -> bool {
        self.n < 0
    }

    pub const fn abs(self) -> Self {
        Self { n: self.n.abs(), d: self.d }
    }

    /// The multiplicative inverse, or `None` for zero.
    pub fn recip(self) -> Option<Self> {
        (!self.is_zero()).then(|| Self::new(self.d, self.n))
    }

    pub fn to_f64(self) -> f64 {
        self.n as f64 / self.d as f64
    }

    fn from_wide(n: i128, d: i128) -> Self {
        let g = gcd(n, d).max(1);
        let (n, d) = (n / g, d / g);
        let (n, d) = if d < 0 { (-n, -d) } else { (n, d) };
        Self {
            n: i64::try_from(n).expect("rational numerator overflow"),
            d: i64::try_from(d).expect("rational denominator overflow"),
        }
    }
}

/// Greatest common divisor using the Euclidean algorithm.
fn gcd(mut a: i128, mut b: i128) -> i128 {
    a = a.abs();
    b = b.abs();
    while b != 0 {
        let t = b;
        b = a % b;
        a = t;
    }
    a
}

impl Default for Rational {
    fn default() -> Self {
        Self::ZERO
    }
}

impl From<i64> for Rational {
    fn from(n: i64) -> Self {
        Self::int(n)
    }
}

impl Add for Rational {
    type Output = Rational;

    fn add(self, rhs: Rational) -> Rational {
        let (a, b) = (self.n as i128, self.d as i128);
        let (c, d) = (rhs.n as i128, rhs.d as i128);
        Rational::from_wide(a * d + c * b, b * d)
    }
}

impl Sub for Rational {
    type Output = Rational;

    fn sub(self, rhs: Rational) -> Rational {
        self + -rhs
    }
}

impl Mul for Rational {
    type Output = Rational;

    fn mul(self, rhs: Rational) -> Rational {
        Rational::from_wide(
            self.n as i128 * rhs.n as i128,
            self.d as i128 * rhs.d as i128,
        )
    }
}

impl Div for Rational {
    type Output = Rational;

    /// # Panics
    /// If `rhs` is zero.
    fn div(self, rhs: Rational) -> Rational {
        assert!(!rhs.is_zero(), "rational division by zero");
        Rational::from_wide(
            self.n as i128 * rhs.d as i128,
            self.d as i128 * rhs.n as i128,
        )
    }
}

impl Neg for Rational {
    type Output = Rational;

    fn neg(self) -> Rational {
        Rational { n: -self.n, d: self.d }
    }
}

impl PartialEq<i64> for Rational {
    fn eq(&self, other: &i64) -> bool {
        self.d == 1 && self.n == *other
    }
}

impl Ord for Rational {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.n as i128 * other.d as i128).cmp(&(other.n as i128 * self.d as i128))
    }
}

impl PartialOrd for Rational {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.d == 1 {
            write!(f, "{}", self.n)
        } else {
            write!(f, "{}/{}", self.n, self.d)
        }
    }
}

impl fmt::Debug for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rational({})", self)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn reduces_and_normalizes_sign() {
        let r = Rational::new(4, -6);
        assert_eq!(r.numer(), -2);
        assert_eq!(r.denom(), 3);
        assert_eq!(Rational::new(0, -5), Rational::ZERO);
    }

    #[test]
    fn arithmetic() {
        let a = Rational::new(1, 6);
        let b = Rational::new(2, 3);
        assert_eq!(a + b, Rational::new(5, 6));
        assert_eq!(a - b, Rational::new(-1, 2));
        assert_eq!(a * b, Rational::new(1, 9));
        assert_eq!(a / b, Rational::new(1, 4));
        assert_eq!(-a, Rational::new(-1, 6));
        assert_eq!(Rational::new(6, 3), 2i64);
    }

    #[test]
    fn ordering_and_queries() {
        assert!(Rational::new(-1, 2) < Rational::new(1, 3));
        assert!(Rational::new(2, 3) > Rational::new(1, 2));
        assert_eq!(Rational::new(-3, 4).abs(), Rational::new(3, 4));
        assert!(Rational::int(7).is_integer());
        assert!(!Rational::new(7, 2).is_integer());
        assert_eq!(Rational::ZERO.recip(), None);
        assert_eq!(Rational::new(-2, 5).recip(), Some(Rational::new(-5, 2)));
    }

    #[test]
    fn display() {
        assert_eq!(Rational::int(-3).to_string(), "-3");
        assert_eq!(Rational::new(2, 6).to_string(), "1/3");
    }

    #[test]
    #[should_panic(expected = "rational numerator overflow")]
    fn overflow_panics() {
        let _ = Rational::int(i64::MAX) + Rational::ONE;
    }
}
