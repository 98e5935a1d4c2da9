pub mod kind;

pub use expr_error::Error;

/// Creates the error returned when computation reaches a [`Node::Error`].
///
/// [`Node::Error`]: expr_parser::Node::Error
pub(crate) fn error_node_reached(offset: usize) -> Error {
    Error::at(offset, kind::ErrorNodeReached { offset })
}
