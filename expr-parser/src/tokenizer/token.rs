use logos::Logos;
use std::ops::Range;

/// The different kinds of tokens that can be produced by the tokenizer.
///
/// The tokenizer runs on whitespace-free input, so there is no whitespace token.
#[derive(Logos, Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenKind {
    #[token("+")]
    Add,

    #[token("-")]
    Sub,

    #[token("*")]
    #[token("×")]
    Mul,

    #[token("/")]
    #[token("÷")]
    Div,

    #[token("^")]
    Exp,

    #[token("(")]
    OpenParen,

    #[token(")")]
    CloseParen,

    #[token("|")]
    Pipe,

    #[regex(r"[\p{Alphabetic}_][\p{Alphabetic}0-9_]*")]
    Name,

    #[regex(r"[0-9]+(\.[0-9]+)?")]
    Number,

    #[regex(r".", priority = 0)]
    Symbol,
}

/// A token produced by the tokenizer.
#[derive(Debug, Clone, PartialEq)]
pub struct Token<'source> {
    /// The region of the source text that this token originated from, in bytes.
    pub span: Range<usize>,

    /// The kind of token.
    pub kind: TokenKind,

    /// The raw lexeme that was parsed into this token.
    pub lexeme: &'source str,
}
