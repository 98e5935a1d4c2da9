//! The expression tree produced by the parser and consumed by every transformation.

pub mod iter;
pub mod node;
pub mod polynomial;

pub use node::{BinaryKind, Kind, Node, UnaryKind};
pub use polynomial::Polynomial;
