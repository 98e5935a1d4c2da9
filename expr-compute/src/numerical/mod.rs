//! Numerical evaluation of expression trees.

pub mod eval;
pub mod sample;

pub use eval::{evaluate, Eval};
pub use sample::{sample, GraphPoint};
