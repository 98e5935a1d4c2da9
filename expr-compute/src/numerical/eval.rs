use expr_parser::parser::ast::{BinaryKind, Node, UnaryKind};
use std::f64::consts::FRAC_PI_2;
use crate::error::{error_node_reached, Error};

/// Any type that can be evaluated at a value of the indeterminate to produce a number.
pub trait Eval {
    /// Evaluate the expression with the indeterminate set to `x`.
    ///
    /// Returns [`Err`] if the expression contains a [`Node::Error`]. Domain errors are not
    /// errors: they produce NaN or an infinity, which propagates through the rest of the
    /// expression.
    fn eval(&self, x: f64) -> Result<f64, Error>;
}

impl Eval for Node {
    fn eval(&self, x: f64) -> Result<f64, Error> {
        match self {
            Node::Indeterminate(_) => Ok(x),
            Node::Constant(value) => Ok(*value),
            Node::Error(offset) => Err(error_node_reached(*offset)),
            Node::Unary(kind, child) => Ok(eval_unary(*kind, child.eval(x)?)),
            Node::Binary(kind, lhs, rhs) => {
                let lhs = lhs.eval(x)?;
                let rhs = rhs.eval(x)?;
                Ok(eval_binary(*kind, lhs, rhs))
            },
            Node::Polynomial(poly) => Ok(poly.eval(x)),
        }
    }
}

/// Evaluates the tree with the indeterminate set to `x`.
///
/// ```
/// use expr_compute::numerical::evaluate;
/// use expr_parser::parse;
///
/// assert_eq!(evaluate(&parse("x", "x^2"), 3.0).unwrap(), 9.0);
/// ```
pub fn evaluate(tree: &Node, x: f64) -> Result<f64, Error> {
    tree.eval(x)
}

/// Applies a unary operation to an evaluated operand.
fn eval_unary(kind: UnaryKind, u: f64) -> f64 {
    match kind {
        UnaryKind::Negate => -u,
        UnaryKind::Group => u,
        UnaryKind::Sin => u.sin(),
        UnaryKind::Cos => u.cos(),
        UnaryKind::Tan => u.tan(),
        UnaryKind::Cot => (FRAC_PI_2 - u).tan(),
        UnaryKind::Sec => 1.0 / u.cos(),
        UnaryKind::Csc => 1.0 / u.sin(),
        UnaryKind::Asin => u.asin(),
        UnaryKind::Acos => u.acos(),
        UnaryKind::Atan => u.atan(),
        UnaryKind::Acot => FRAC_PI_2 - u.atan(),
        UnaryKind::Asec => (1.0 / u).acos(),
        UnaryKind::Acsc => (1.0 / u).asin(),
        UnaryKind::Log => u.log10(),
        UnaryKind::Ln => u.ln(),
        UnaryKind::Exp => u.exp(),
        UnaryKind::Floor => u.floor(),
        UnaryKind::Sqrt => u.sqrt(),
        UnaryKind::Abs => u.abs(),
        UnaryKind::Reciprocal => 1.0 / u,
    }
}

/// Applies a binary operation to evaluated operands.
fn eval_binary(kind: BinaryKind, lhs: f64, rhs: f64) -> f64 {
    match kind {
        BinaryKind::Plus => lhs + rhs,
        BinaryKind::Minus => lhs - rhs,
        BinaryKind::Times => lhs * rhs,
        BinaryKind::Div => lhs / rhs,
        BinaryKind::Pow => lhs.powf(rhs),
    }
}
