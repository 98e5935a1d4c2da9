//! Numerical and symbolic computation on expression trees produced by [`expr_parser`].
//!
//! - [`numerical`] evaluates a tree at a value of its indeterminate, or samples it over an
//!   interval for plotting.
//! - [`symbolic`] checks whether a tree is constant, differentiates it, and expands polynomials
//!   into a canonical coefficient form.
//!
//! Every operation takes the tree by reference and returns [`Err`] if it reaches a
//! [`Node::Error`](expr_parser::Node::Error) left behind by the parser.
//!
//! # Features
//!
//! - `serde`: Derives [`Serialize`] and [`Deserialize`] for [`numerical::GraphPoint`], and
//!   enables the same feature in [`expr_parser`].
//!
//! [`Serialize`]: https://docs.rs/serde/latest/serde/trait.Serialize.html
//! [`Deserialize`]: https://docs.rs/serde/latest/serde/trait.Deserialize.html

pub mod error;
pub mod numerical;
pub mod symbolic;

pub use error::Error;
pub use numerical::{evaluate, sample, Eval, GraphPoint};
pub use symbolic::{chain_rule, derivative, is_constant, is_polynomial, normalize};
