//! Rendering of linear combinations of named variables as short expressions.

use crate::math::Rational;
use smallvec::SmallVec;
use std::fmt;

/// How numeric literals are written in rendered expressions.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum NumberStyle {
    /// Integers are written bare, e.g. `3*p0` and `(p0+p1)/2`.
    #[default]
    Integer,
    /// Integers are written as float literals, e.g. `3.0*p0` and `(p0+p1)/2.0`.
    Float,
}

impl NumberStyle {
    fn integer(self, n: i64) -> String {
        match self {
            NumberStyle::Integer => format!("{}", n),
            NumberStyle::Float => format!("{}.0", n),
        }
    }

    /// The literal form of a non-negative rational.
    fn literal(self, v: Rational) -> String {
        if v.is_integer() {
            self.integer(v.numer())
        } else {
            format!("({}.0/{}.0)", v.numer(), v.denom())
        }
    }
}

/// A single `coefficient * variable` term.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Term {
    pub coeff: Rational,
    pub var: String,
}

/// A linear combination of named variables.
///
/// Zero terms are dropped on insertion. When every remaining term has the
/// same magnitude as the first, that magnitude is factored out, so
/// `[(2, a), (-2, b), (2, c)]` renders as `2*(a-b+c)`.
#[derive(Clone, Debug, Default)]
pub struct LinearSum {
    terms: SmallVec<[Term; 4]>,
    style: NumberStyle,
}

impl LinearSum {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_style(style: NumberStyle) -> Self {
        Self {
            terms: SmallVec::new(),
            style,
        }
    }

    /// Builds a sum from parallel coefficients and variable names.
    pub fn from_pairs<S: AsRef<str>>(
        coeffs: &[Rational],
        vars: impl IntoIterator<Item = S>,
        style: NumberStyle,
    ) -> Self {
        let mut sum = Self::with_style(style);
        for (&coeff, var) in coeffs.iter().zip(vars) {
            sum.add_term(coeff, var.as_ref());
        }
        sum
    }

    pub fn add_term(&mut self, coeff: Rational, var: &str) {
        if !coeff.is_zero() {
            self.terms.push(Term {
                coeff,
                var: var.to_owned(),
            });
        }
    }

    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    /// The common magnitude of all terms, if there are at least two terms and they share one.
    fn common_scale(&self) -> Option<Rational> {
        let (first, rest) = self.terms.split_first()?;
        if rest.is_empty() {
            return None;
        }
        let scale = first.coeff.abs();
        rest.iter()
            .all(|term| term.coeff.abs() == scale)
            .then_some(scale)
    }

    fn format_term(&self, out: &mut String, first: bool, coeff: Rational, var: &str) {
        if coeff == Rational::ONE {
            if !first {
                out.push('+');
            }
        } else if coeff == -Rational::ONE {
            out.push('-');
        } else if coeff.is_negative() {
            out.push('-');
            out.push_str(&self.style.literal(coeff.abs()));
            out.push('*');
        } else {
            if !first {
                out.push('+');
            }
            out.push_str(&self.style.literal(coeff));
            out.push('*');
        }
        out.push_str(var);
    }

    /// Renders the sum as an expression.
    pub fn render(&self) -> String {
        if self.terms.is_empty() {
            return "0".to_owned();
        }

        let scale = self.common_scale().unwrap_or(Rational::ONE);
        let mut line = String::new();
        for (i, term) in self.terms.iter().enumerate() {
            self.format_term(&mut line, i == 0, term.coeff / scale, &term.var);
        }

        if scale == Rational::ONE {
            line
        } else if scale.numer() == 1 {
            format!("({})/{}", line, self.style.integer(scale.denom()))
        } else {
            format!("{}*({})", self.style.literal(scale), line)
        }
    }
}

impl fmt::Display for LinearSum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
