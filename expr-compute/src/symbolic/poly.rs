//! Normalization of polynomial expressions into a dense coefficient form.
//!
//! An expression is a polynomial if it is built from constants and the indeterminate using only
//! addition, subtraction, multiplication, negation, parentheses, and powers with constant,
//! non-negative integer exponents. [`normalize`] expands such an expression into a single
//! [`Node::Polynomial`]:
//!
//! ```
//! use expr_compute::symbolic::normalize;
//! use expr_parser::{parse, Node};
//!
//! let Node::Polynomial(poly) = normalize(&parse("x", "(x - 4)^3")) else {
//!     panic!("not a polynomial");
//! };
//! assert_eq!(poly.degree(), 3);
//! assert_eq!(poly.coefficients(), &[-64.0, 48.0, -12.0, 1.0]);
//! ```

use expr_parser::parser::ast::{BinaryKind, Node, Polynomial, UnaryKind};
use tracing::debug;

/// The largest degree a normalized polynomial may have. Powers that would expand past it are
/// left as they are.
pub const MAX_DEGREE: usize = 1024;

/// Returns `true` if the exponent of a power can be expanded by repeated multiplication.
fn is_expandable_exponent(exponent: &Node) -> bool {
    matches!(
        exponent,
        Node::Constant(k) if k.is_finite() && *k >= 0.0 && k.floor() == k.ceil()
    )
}

/// Returns `true` if the power expands to a polynomial no larger than [`MAX_DEGREE`]. A constant
/// base is folded with `powf`, so its exponent is not bounded.
fn is_expandable_power(base: &Node, exponent: &Node) -> bool {
    match exponent {
        Node::Constant(k) if is_expandable_exponent(exponent) => {
            matches!(base, Node::Constant(_)) || *k <= MAX_DEGREE as f64
        },
        _ => false,
    }
}

/// Returns `true` if the tree can be normalized into a polynomial.
pub fn is_polynomial(tree: &Node) -> bool {
    match tree {
        Node::Constant(_) | Node::Indeterminate(_) | Node::Polynomial(_) => true,
        Node::Unary(UnaryKind::Group | UnaryKind::Negate, child) => is_polynomial(child),
        Node::Binary(BinaryKind::Plus | BinaryKind::Minus | BinaryKind::Times, lhs, rhs) => {
            is_polynomial(lhs) && is_polynomial(rhs)
        },
        Node::Binary(BinaryKind::Pow, base, exponent) => {
            is_polynomial(base) && is_expandable_power(base, exponent)
        },
        _ => false,
    }
}

/// Expands the tree into a [`Node::Polynomial`] if it is a polynomial (see [`is_polynomial`]).
/// Otherwise, the tree is returned unchanged. The tree is also returned unchanged if expanding
/// it would raise a polynomial past [`MAX_DEGREE`].
///
/// Normalizing a [`Node::Polynomial`] returns it unchanged.
pub fn normalize(tree: &Node) -> Node {
    if !is_polynomial(tree) {
        return tree.clone();
    }

    debug!(%tree, "normalizing polynomial");
    to_polynomial(tree).map_or_else(|| tree.clone(), Node::Polynomial)
}

/// Recursively expands a tree into a polynomial. Returns [`None`] for trees that are not
/// polynomials.
fn to_polynomial(tree: &Node) -> Option<Polynomial> {
    match tree {
        Node::Constant(value) => Some(Polynomial::constant(*value)),
        Node::Indeterminate(name) => Some(Polynomial::monomial(name.as_str(), 1, 1.0)),
        Node::Polynomial(poly) => Some(poly.clone()),
        Node::Unary(UnaryKind::Group, child) => to_polynomial(child),
        Node::Unary(UnaryKind::Negate, child) => Some(neg(&to_polynomial(child)?)),
        Node::Binary(BinaryKind::Plus, lhs, rhs) => {
            Some(add(&to_polynomial(lhs)?, &to_polynomial(rhs)?))
        },
        Node::Binary(BinaryKind::Minus, lhs, rhs) => {
            Some(sub(&to_polynomial(lhs)?, &to_polynomial(rhs)?))
        },
        Node::Binary(BinaryKind::Times, lhs, rhs) => {
            Some(mul(&to_polynomial(lhs)?, &to_polynomial(rhs)?))
        },
        Node::Binary(BinaryKind::Pow, base, exponent) => {
            let Node::Constant(k) = **exponent else {
                return None;
            };
            if !is_expandable_power(base, exponent) {
                return None;
            }

            match &**base {
                Node::Constant(value) => Some(Polynomial::constant(value.powf(k))),
                Node::Indeterminate(name) => Some(Polynomial::monomial(name.as_str(), k as usize, 1.0)),
                base => {
                    let base = to_polynomial(base)?;
                    let degree = base.degree().checked_mul(k as usize)?;
                    if degree > MAX_DEGREE {
                        return None;
                    }
                    Some(pow(&base, k as usize))
                },
            }
        },
        _ => None,
    }
}

/// Picks the indeterminate name of a combination of two polynomials: the name of the one with
/// the larger degree, or the left one on a tie. A name is never replaced by the empty name of a
/// polynomial built from constants only.
fn combined_name<'a>(lhs: &'a Polynomial, rhs: &'a Polynomial) -> &'a str {
    if rhs.degree() > lhs.degree() || lhs.indeterminate().is_empty() {
        rhs.indeterminate()
    } else {
        lhs.indeterminate()
    }
}

fn neg(poly: &Polynomial) -> Polynomial {
    let coefficients = poly.coefficients().iter().map(|c| -c).collect();
    Polynomial::new(poly.indeterminate(), coefficients)
}

/// Combines two polynomials term-wise, after padding the shorter one with zeros.
fn zip_with(lhs: &Polynomial, rhs: &Polynomial, op: impl Fn(f64, f64) -> f64) -> Polynomial {
    let (a, b) = (lhs.coefficients(), rhs.coefficients());
    let coefficients = (0..a.len().max(b.len()))
        .map(|i| op(a.get(i).copied().unwrap_or(0.0), b.get(i).copied().unwrap_or(0.0)))
        .collect();
    Polynomial::new(combined_name(lhs, rhs), coefficients)
}

fn add(lhs: &Polynomial, rhs: &Polynomial) -> Polynomial {
    zip_with(lhs, rhs, |a, b| a + b)
}

fn sub(lhs: &Polynomial, rhs: &Polynomial) -> Polynomial {
    zip_with(lhs, rhs, |a, b| a - b)
}

/// Multiplies two polynomials by convolving their coefficients.
fn mul(lhs: &Polynomial, rhs: &Polynomial) -> Polynomial {
    let (a, b) = (lhs.coefficients(), rhs.coefficients());
    let mut coefficients = vec![0.0; a.len() + b.len() - 1];
    for (i, x) in a.iter().enumerate() {
        for (j, y) in b.iter().enumerate() {
            coefficients[i + j] += x * y;
        }
    }
    Polynomial::new(combined_name(lhs, rhs), coefficients)
}

/// Raises a polynomial to a power by repeated squaring.
fn pow(poly: &Polynomial, mut exponent: usize) -> Polynomial {
    let mut result = Polynomial::new(poly.indeterminate(), vec![1.0]);
    let mut square = poly.clone();
    while exponent > 0 {
        if exponent & 1 == 1 {
            result = mul(&result, &square);
        }
        exponent >>= 1;
        if exponent > 0 {
            square = mul(&square, &square);
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use crate::{numerical::evaluate, symbolic::is_constant};
    use expr_parser::parse;
    use pretty_assertions::assert_eq;
    use super::*;

    fn normalized(source: &str) -> Polynomial {
        match normalize(&parse("x", source)) {
            Node::Polynomial(poly) => poly,
            other => panic!("`{}` did not normalize: {:?}", source, other),
        }
    }

    #[test]
    fn cube() {
        let poly = normalized("(x-4)^3");
        assert_eq!(poly.degree(), 3);
        assert_eq!(poly.coefficients(), &[-64.0, 48.0, -12.0, 1.0]);
        assert_eq!(poly.indeterminate(), "x");
    }

    #[test]
    fn leaves() {
        assert_eq!(normalized("5"), Polynomial::constant(5.0));
        assert_eq!(normalized("x").coefficients(), &[0.0, 1.0]);
        assert_eq!(normalized("x^4").coefficients(), &[0.0, 0.0, 0.0, 0.0, 1.0]);
        assert_eq!(normalized("x^0").coefficients(), &[1.0]);
    }

    #[test]
    fn constant_power_keeps_shape() {
        let poly = normalized("2^3");
        assert_eq!(poly.degree(), 0);
        assert_eq!(poly.coefficients(), &[8.0]);
    }

    #[test]
    fn negation_and_groups() {
        assert_eq!(normalized("-(x+1)*(x-1)").coefficients(), &[1.0, 0.0, -1.0]);
        assert_eq!(normalized("((x))").coefficients(), &[0.0, 1.0]);
    }

    #[test]
    fn cancellation_trims() {
        let poly = normalized("x^2 + x - x^2");
        assert_eq!(poly.degree(), 1);
        assert_eq!(poly.coefficients(), &[0.0, 1.0]);

        let poly = normalized("x - x");
        assert_eq!(poly.degree(), 0);
        assert_eq!(poly.coefficients(), &[0.0]);
        assert_eq!(poly.indeterminate(), "x");
    }

    #[test]
    fn composite_power() {
        assert_eq!(normalized("(x^2 + 1)^2").coefficients(), &[1.0, 0.0, 2.0, 0.0, 1.0]);
        assert_eq!(normalized("(2*x)^0").coefficients(), &[1.0]);
        assert_eq!(normalized("(x+1)^1").coefficients(), &[1.0, 1.0]);
    }

    #[test]
    fn name_of_combination() {
        let poly = normalized("3 + 2*x");
        assert_eq!(poly.indeterminate(), "x");

        let Node::Polynomial(poly) = normalize(&parse("t", "t^2 - 3")) else {
            panic!("not a polynomial");
        };
        assert_eq!(poly.indeterminate(), "t");
        assert_eq!(poly.to_string(), "t^2 - 3");

        assert_eq!(normalized("2*3").indeterminate(), "");
    }

    #[test]
    fn not_polynomials() {
        for source in ["sin(x)", "x/2", "x^-1", "x^0.5", "x^x", "|x|", "2^(1+1)", "x +"] {
            let tree = parse("x", source);
            assert!(!is_polynomial(&tree), "source: {}", source);
            assert_eq!(normalize(&tree), tree);
        }
    }

    #[test]
    fn huge_exponents_left_unexpanded() {
        let sources = [
            "x^100000000000000000000",
            "x^1000000000000",
            "(x+1)^100000000000000000000",
            "(x^2+1)^600",
            "x^1025",
        ];
        for source in sources {
            let tree = parse("x", source);
            assert_eq!(normalize(&tree), tree, "source: {}", source);
        }

        assert_eq!(normalized("x^1024").degree(), MAX_DEGREE);
        assert_eq!(normalized("(x^2+1)^512").degree(), MAX_DEGREE);
        assert_eq!(normalized("2^2000").degree(), 0);
    }

    #[test]
    fn power_by_squaring() {
        let poly = normalized("(x+1)^7");
        assert_eq!(poly.coefficients(), &[1.0, 7.0, 21.0, 35.0, 35.0, 21.0, 7.0, 1.0]);
        assert_eq!(poly.indeterminate(), "x");
    }

    #[test]
    fn idempotent() {
        let once = normalize(&parse("x", "(x-4)^3 + 2*x"));
        let twice = normalize(&once);
        assert!(matches!(once, Node::Polynomial(_)));
        assert!(is_polynomial(&once));
        assert_eq!(twice, once);
    }

    #[test]
    fn polynomial_operands() {
        let lhs = normalize(&parse("x", "x + 1"));
        let tree = Node::binary(BinaryKind::Times, lhs, parse("x", "x - 1"));
        assert_eq!(normalize(&tree), Node::Polynomial(Polynomial::new("x", vec![-1.0, 0.0, 1.0])));
    }

    #[test]
    fn same_values_as_tree() {
        for source in ["(x-4)^3", "-(2*x + 1)^2 * (x - 0.5)", "3*(x+1)*(x-2) - x^3"] {
            let tree = parse("x", source);
            let poly = normalize(&tree);
            for x in [-2.0, -0.5, 0.0, 1.0, 3.5] {
                let expected = evaluate(&tree, x).unwrap();
                let actual = evaluate(&poly, x).unwrap();
                assert!((expected - actual).abs() <= 1e-9 * expected.abs().max(1.0), "source: {}", source);
            }
        }
    }

    #[test]
    fn constant_polynomials() {
        assert!(is_constant(&normalize(&parse("x", "2*(3+4)"))));
        assert!(!is_constant(&normalize(&parse("x", "2*(3+x)"))));
    }
}
