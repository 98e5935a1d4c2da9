use crate::parser::fmt::{fmt_number, Latex};
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A polynomial in one indeterminate, stored as a dense array of coefficients indexed by power
/// (index 0 holds the constant term).
///
/// The array always has `degree + 1` entries, and for a degree greater than zero, the leading
/// coefficient is non-zero.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Polynomial {
    /// The name of the indeterminate. Empty if the polynomial was built from constants only.
    indeterminate: String,

    /// The coefficients, from the constant term up to the leading term.
    coefficients: Vec<f64>,
}

impl Polynomial {
    /// Creates a polynomial from the given coefficients (constant term first), trimming zero
    /// coefficients from the top until the leading coefficient is non-zero or only the constant
    /// term is left.
    pub fn new(indeterminate: impl Into<String>, coefficients: Vec<f64>) -> Self {
        let mut poly = Self {
            indeterminate: indeterminate.into(),
            coefficients,
        };
        poly.trim();
        poly
    }

    /// Creates a polynomial of degree 0.
    pub fn constant(value: f64) -> Self {
        Self::new(String::new(), vec![value])
    }

    /// Creates the polynomial `coefficient * indeterminate^power`.
    pub fn monomial(indeterminate: impl Into<String>, power: usize, coefficient: f64) -> Self {
        let mut coefficients = vec![0.0; power + 1];
        coefficients[power] = coefficient;
        Self::new(indeterminate, coefficients)
    }

    /// Removes zero coefficients from the top of the array.
    fn trim(&mut self) {
        while self.coefficients.len() > 1 && self.coefficients.last() == Some(&0.0) {
            self.coefficients.pop();
        }
        if self.coefficients.is_empty() {
            self.coefficients.push(0.0);
        }
    }

    /// Returns the name of the indeterminate.
    pub fn indeterminate(&self) -> &str {
        &self.indeterminate
    }

    /// Returns the degree of the polynomial.
    pub fn degree(&self) -> usize {
        self.coefficients.len() - 1
    }

    /// Returns the coefficients, from the constant term up to the leading term.
    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    /// Returns the number of non-zero terms.
    pub fn term_count(&self) -> usize {
        self.coefficients.iter().filter(|c| **c != 0.0).count()
    }

    /// Evaluates the polynomial at the given point using Horner's rule.
    pub fn eval(&self, x: f64) -> f64 {
        self.coefficients.iter().rev().fold(0.0, |acc, c| acc * x + c)
    }

    /// Writes the terms of the polynomial from the highest power to the lowest, skipping zero
    /// terms. `power` writes the indeterminate raised to a power of 2 or more.
    fn fmt_terms(
        &self,
        f: &mut fmt::Formatter,
        power: impl Fn(&mut fmt::Formatter, &str, usize) -> fmt::Result,
    ) -> fmt::Result {
        let mut first = true;
        for (exponent, coefficient) in self.coefficients.iter().enumerate().rev() {
            if *coefficient == 0.0 {
                continue;
            }

            let negative = coefficient.is_sign_negative();
            match (first, negative) {
                (true, true) => write!(f, "-")?,
                (true, false) => (),
                (false, true) => write!(f, " - ")?,
                (false, false) => write!(f, " + ")?,
            }
            first = false;

            let magnitude = coefficient.abs();
            if magnitude != 1.0 || exponent == 0 {
                fmt_number(f, magnitude)?;
            }

            match exponent {
                0 => (),
                1 => write!(f, "{}", self.indeterminate)?,
                _ => power(f, &self.indeterminate, exponent)?,
            }
        }

        if first {
            write!(f, "0")?;
        }
        Ok(())
    }
}

impl std::fmt::Display for Polynomial {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        self.fmt_terms(f, |f, name, exponent| write!(f, "{}^{}", name, exponent))
    }
}

impl Latex for Polynomial {
    fn fmt_latex(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.fmt_terms(f, |f, name, exponent| write!(f, "{}^{{{}}}", name, exponent))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_leading_zeros() {
        let poly = Polynomial::new("x", vec![1.0, 2.0, 0.0, 0.0]);
        assert_eq!(poly.degree(), 1);
        assert_eq!(poly.coefficients(), &[1.0, 2.0]);
    }

    #[test]
    fn zero_polynomial() {
        let poly = Polynomial::new("x", vec![0.0, 0.0]);
        assert_eq!(poly.degree(), 0);
        assert_eq!(poly.coefficients(), &[0.0]);
        assert_eq!(poly.to_string(), "0");

        assert_eq!(Polynomial::new("x", vec![]).coefficients(), &[0.0]);
    }

    #[test]
    fn monomial() {
        let poly = Polynomial::monomial("t", 3, 2.0);
        assert_eq!(poly.coefficients(), &[0.0, 0.0, 0.0, 2.0]);
        assert_eq!(poly.to_string(), "2t^3");
    }

    #[test]
    fn horner() {
        // x^3 - 12x^2 + 48x - 64 = (x - 4)^3
        let poly = Polynomial::new("x", vec![-64.0, 48.0, -12.0, 1.0]);
        assert_eq!(poly.eval(4.0), 0.0);
        assert_eq!(poly.eval(6.0), 8.0);
    }

    #[test]
    fn display() {
        let poly = Polynomial::new("x", vec![-64.0, 48.0, -12.0, 1.0]);
        assert_eq!(poly.to_string(), "x^3 - 12x^2 + 48x - 64");

        let poly = Polynomial::new("x", vec![0.0, -1.0, 0.5]);
        assert_eq!(poly.to_string(), "0.5x^2 - x");

        let poly = Polynomial::new("x", vec![1.0]);
        assert_eq!(poly.to_string(), "1");

        let poly = Polynomial::new("x", vec![-1.0, 0.0, -1.0]);
        assert_eq!(poly.to_string(), "-x^2 - 1");
    }

    #[test]
    fn display_latex() {
        let poly = Polynomial::new("x", vec![-64.0, 48.0, -12.0, 1.0]);
        assert_eq!(poly.as_display().to_string(), "x^{3} - 12x^{2} + 48x - 64");
    }
}
