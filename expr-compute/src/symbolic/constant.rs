use expr_parser::parser::ast::Node;

/// Returns `true` if the value of the tree does not depend on the indeterminate, i.e. it is built
/// from constants only.
///
/// A tree containing a [`Node::Error`] is never constant. A polynomial is constant if its degree
/// is 0.
pub fn is_constant(tree: &Node) -> bool {
    match tree {
        Node::Constant(_) => true,
        Node::Indeterminate(_) | Node::Error(_) => false,
        Node::Polynomial(poly) => poly.degree() == 0,
        Node::Unary(..) | Node::Binary(..) => tree.children().into_iter().all(is_constant),
    }
}
