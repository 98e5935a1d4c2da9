//! Symbolic differentiation with respect to the indeterminate.
//!
//! The derivative is built directly from the differentiation rules, without simplification,
//! except that [`chain_rule`] skips the multiplications by 0 and 1 that it would otherwise
//! produce. Derived subtrees are wrapped in [`UnaryKind::Group`] wherever they end up under an
//! operator that binds tighter, so that the plain-text display of a derivative parses back to
//! the same tree.

mod function;

use expr_parser::parser::ast::{BinaryKind, Node, Polynomial, UnaryKind};
use tracing::debug;
use crate::error::{error_node_reached, Error};
use super::constant::is_constant;

/// Computes the derivative of the given tree with respect to its indeterminate.
///
/// Returns [`Err`] if the tree contains a [`Node::Error`].
pub fn derivative(tree: &Node) -> Result<Node, Error> {
    debug!(%tree, "computing derivative");
    differentiate(tree)
}

/// Applies the chain rule to `outer`, the derivative of a function evaluated at `inner`:
/// `(f(u))' = f'(u) * u'`.
///
/// - If `inner` is constant, the result is the constant 0.
/// - If `inner` is exactly the indeterminate, `u' = 1` and `outer` is returned as is.
/// - Otherwise, the result is `outer * (u')`.
pub fn chain_rule(outer: Node, inner: &Node) -> Result<Node, Error> {
    if is_constant(inner) {
        Ok(Node::Constant(0.0))
    } else if inner.is_indeterminate() {
        Ok(outer)
    } else {
        Ok(times(outer, Node::unary(UnaryKind::Group, differentiate(inner)?)))
    }
}

/// Recursively differentiates a tree.
fn differentiate(tree: &Node) -> Result<Node, Error> {
    match tree {
        Node::Constant(_) => Ok(Node::Constant(0.0)),
        Node::Indeterminate(_) => Ok(Node::Constant(1.0)),
        Node::Error(offset) => Err(error_node_reached(*offset)),
        Node::Polynomial(poly) => Ok(Node::Polynomial(polynomial_rule(poly))),
        Node::Unary(kind, child) => function::unary_rule(*kind, child),
        Node::Binary(kind, lhs, rhs) => binary_rule(*kind, lhs, rhs),
    }
}

/// `(a_n x^n + ... + a_1 x + a_0)' = n a_n x^(n-1) + ... + a_1`
fn polynomial_rule(poly: &Polynomial) -> Polynomial {
    let coefficients = poly.coefficients()
        .iter()
        .enumerate()
        .skip(1)
        .map(|(power, coefficient)| power as f64 * coefficient)
        .collect();
    Polynomial::new(poly.indeterminate(), coefficients)
}

/// Differentiates a binary operation.
fn binary_rule(kind: BinaryKind, f: &Node, g: &Node) -> Result<Node, Error> {
    match kind {
        // (f ± g)' = f' ± g'
        BinaryKind::Plus | BinaryKind::Minus => {
            Ok(Node::binary_grouped(kind, differentiate(f)?, differentiate(g)?))
        },
        // (fg)' = f'g + fg'
        BinaryKind::Times => Ok(plus(
            times(differentiate(f)?, g.clone()),
            times(f.clone(), differentiate(g)?),
        )),
        // (f/g)' = (f'g - fg') / g^2
        BinaryKind::Div => Ok(div(
            minus(
                times(differentiate(f)?, g.clone()),
                times(f.clone(), differentiate(g)?),
            ),
            pow(g.clone(), constant(2.0)),
        )),
        BinaryKind::Pow => power_rule(f, g),
    }
}

/// Differentiates `a^b`.
///
/// If `b` is constant, this is the power rule `(a^b)' = b a^(b - 1) a'`. Otherwise, it is the
/// general rule `(a^b)' = a^b (b' ln(a) + b a' / a)`, found by differentiating `e^(b ln(a))`.
fn power_rule(a: &Node, b: &Node) -> Result<Node, Error> {
    if is_constant(b) {
        let outer = times(b.clone(), pow(a.clone(), minus(b.clone(), constant(1.0))));
        return chain_rule(outer, a);
    }

    let log_derivative = plus(
        times(differentiate(b)?, call(UnaryKind::Ln, a)),
        div(times(b.clone(), differentiate(a)?), a.clone()),
    );
    Ok(times(
        pow(a.clone(), b.clone()),
        Node::unary(UnaryKind::Group, log_derivative),
    ))
}

fn constant(value: f64) -> Node {
    Node::Constant(value)
}

fn call(kind: UnaryKind, arg: &Node) -> Node {
    Node::unary(kind, arg.clone())
}

fn plus(lhs: Node, rhs: Node) -> Node {
    Node::binary_grouped(BinaryKind::Plus, lhs, rhs)
}

fn minus(lhs: Node, rhs: Node) -> Node {
    Node::binary_grouped(BinaryKind::Minus, lhs, rhs)
}

fn times(lhs: Node, rhs: Node) -> Node {
    Node::binary_grouped(BinaryKind::Times, lhs, rhs)
}

fn div(lhs: Node, rhs: Node) -> Node {
    Node::binary_grouped(BinaryKind::Div, lhs, rhs)
}

fn pow(base: Node, exponent: Node) -> Node {
    Node::binary_grouped(BinaryKind::Pow, base, exponent)
}
