//! Derivatives of the unary operations and functions supported by the parser.

use expr_parser::parser::ast::{Node, UnaryKind};
use crate::error::{error_node_reached, Error};
use super::{call, chain_rule, constant, differentiate, div, minus, plus, pow, times};

/// Differentiates a unary operation applied to `u`, applying the chain rule where needed.
pub(super) fn unary_rule(kind: UnaryKind, u: &Node) -> Result<Node, Error> {
    let outer = match kind {
        UnaryKind::Negate => return Ok(Node::negated(differentiate(u)?)),
        UnaryKind::Group => return Ok(Node::unary(UnaryKind::Group, differentiate(u)?)),
        UnaryKind::Floor => return match u.error_offsets().first() {
            Some(offset) => Err(error_node_reached(*offset)),
            None => Ok(constant(0.0)),
        },

        UnaryKind::Sin => call(UnaryKind::Cos, u),
        UnaryKind::Cos => Node::negated(call(UnaryKind::Sin, u)),
        UnaryKind::Tan => pow(call(UnaryKind::Sec, u), constant(2.0)),
        UnaryKind::Cot => Node::negated(pow(call(UnaryKind::Csc, u), constant(2.0))),
        UnaryKind::Sec => times(call(UnaryKind::Sec, u), call(UnaryKind::Tan, u)),
        UnaryKind::Csc => Node::negated(times(call(UnaryKind::Csc, u), call(UnaryKind::Cot, u))),
        UnaryKind::Asin => asin_outer(u),
        UnaryKind::Acos => Node::negated(asin_outer(u)),
        UnaryKind::Atan => atan_outer(u),
        UnaryKind::Acot => Node::negated(atan_outer(u)),
        UnaryKind::Asec => asec_outer(u),
        UnaryKind::Acsc => Node::negated(asec_outer(u)),
        UnaryKind::Log => div(
            div(constant(1.0), u.clone()),
            call(UnaryKind::Ln, &constant(10.0)),
        ),
        UnaryKind::Ln => div(constant(1.0), u.clone()),
        UnaryKind::Exp => call(UnaryKind::Exp, u),
        UnaryKind::Reciprocal => Node::negated(div(constant(1.0), pow(u.clone(), constant(2.0)))),
        UnaryKind::Sqrt => div(constant(1.0), times(constant(2.0), call(UnaryKind::Sqrt, u))),
        UnaryKind::Abs => div(call(UnaryKind::Abs, u), u.clone()),
    };
    chain_rule(outer, u)
}

/// `arcsin'(u) = (1 - u^2)^(-0.5)`
fn asin_outer(u: &Node) -> Node {
    pow(
        minus(constant(1.0), pow(u.clone(), constant(2.0))),
        Node::negated(constant(0.5)),
    )
}

/// `arctan'(u) = 1 / (1 + u^2)`
fn atan_outer(u: &Node) -> Node {
    div(constant(1.0), plus(constant(1.0), pow(u.clone(), constant(2.0))))
}

/// `arcsec'(u) = 1 / (|u| sqrt(u^2 - 1))`, for `|u| > 1`.
fn asec_outer(u: &Node) -> Node {
    div(
        constant(1.0),
        times(
            call(UnaryKind::Abs, u),
            call(UnaryKind::Sqrt, &minus(pow(u.clone(), constant(2.0)), constant(1.0))),
        ),
    )
}
