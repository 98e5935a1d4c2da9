//! Tokenizer, parser, and syntax tree for mathematical expressions in a single indeterminate.
//!
//! The main entry point is [`parser::parse`], which turns source text into a [`Node`] tree. The
//! parser is total: malformed input produces [`Node::Error`] nodes inside the tree instead of an
//! early return, and [`parser::error::parse_errors`] turns those into reportable errors.
//!
//! # Features
//!
//! - `serde`: Derives [`Serialize`] and [`Deserialize`] for the syntax tree.
//!
//! [`Serialize`]: https://docs.rs/serde/latest/serde/trait.Serialize.html
//! [`Deserialize`]: https://docs.rs/serde/latest/serde/trait.Deserialize.html

pub mod parser;
pub mod tokenizer;

pub use parser::{
    ast::{BinaryKind, Kind, Node, Polynomial, UnaryKind},
    fmt::Latex,
    literal::scan_constant,
    parse,
    strip_whitespace,
};
