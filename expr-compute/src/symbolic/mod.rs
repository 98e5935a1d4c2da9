//! Symbolic manipulation of expression trees.
//!
//! Every function in this module is a pure transformation: the input tree is borrowed and never
//! modified, and any result is a freshly built tree.
//!
//! ```
//! use expr_compute::{numerical::evaluate, symbolic::derivative};
//! use expr_parser::parse;
//!
//! let tree = parse("x", "x^3");
//! let derived = derivative(&tree).unwrap();
//! assert_eq!(evaluate(&derived, 2.0).unwrap(), 12.0);
//! ```

pub mod constant;
pub mod derivative;
pub mod poly;

pub use constant::is_constant;
pub use derivative::{chain_rule, derivative};
pub use poly::{is_polynomial, normalize};
