use super::Node;

/// An iterator that iteratively traverses a tree of nodes in left-to-right post-order (i.e.
/// depth-first).
///
/// This iterator is created by [`Node::post_order_iter`].
pub struct NodeIter<'a> {
    stack: Vec<&'a Node>,
    last_visited: Option<&'a Node>,
}

impl<'a> NodeIter<'a> {
    /// Creates a new iterator that traverses the tree in left-to-right post-order.
    pub fn new(node: &'a Node) -> Self {
        Self {
            stack: vec![node],
            last_visited: None,
        }
    }

    /// Pops the current node in the stack and marks it as the last visited node.
    fn visit(&mut self) -> Option<&'a Node> {
        self.last_visited = Some(self.stack.pop()?);
        self.last_visited
    }

    /// Returns true if the given node is the last visited node.
    fn is_last_visited(&self, node: &'a Node) -> bool {
        match self.last_visited {
            Some(last_visited) => std::ptr::eq(last_visited, node),
            None => false,
        }
    }
}

impl<'a> Iterator for NodeIter<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let node = *self.stack.last()?;
            match node {
                Node::Indeterminate(_) | Node::Constant(_) | Node::Error(_) | Node::Polynomial(_) => {
                    return self.visit();
                },
                Node::Unary(_, child) => {
                    if self.is_last_visited(child) {
                        return self.visit();
                    }
                    self.stack.push(child);
                },
                Node::Binary(_, lhs, rhs) => {
                    if self.is_last_visited(rhs) {
                        return self.visit();
                    }
                    self.stack.push(rhs);
                    self.stack.push(lhs);
                },
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::{ast::{BinaryKind, Kind, UnaryKind}, parse};

    #[test]
    fn post_order() {
        let tree = parse("x", "sin(x)+2*x");
        let kinds = tree.post_order_iter().map(|node| node.kind()).collect::<Vec<_>>();
        assert_eq!(kinds, vec![
            Kind::Indeterminate,
            Kind::Unary(UnaryKind::Sin),
            Kind::Constant,
            Kind::Indeterminate,
            Kind::Binary(BinaryKind::Times),
            Kind::Binary(BinaryKind::Plus),
        ]);
    }

    #[test]
    fn arity_matches_children() {
        let tree = parse("x", "-(x^2/3)+floor(x)-pi");
        for node in tree.post_order_iter() {
            assert_eq!(node.kind().arity(), node.children().len());
        }
    }
}
