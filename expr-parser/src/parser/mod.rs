pub mod ast;
pub mod error;
pub mod fmt;
pub mod literal;

use ast::{BinaryKind, Node, UnaryKind};
use literal::scan_constant;
use super::tokenizer::{tokenize_complete, Token, TokenKind};
use std::f64::consts::PI;

/// Removes all whitespace from the given text. Offsets stored in [`Node::Error`] index into the
/// stripped text.
pub fn strip_whitespace(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Parses the given expression in terms of the given indeterminate.
///
/// Whitespace is removed before parsing. Parsing never fails: any part of the expression that
/// cannot be understood becomes a [`Node::Error`] somewhere in the returned tree, so callers
/// should check [`Node::has_error`] before evaluating it.
///
/// ```
/// use expr_parser::parser::{ast::{BinaryKind, Node}, parse};
///
/// let tree = parse("x", "x ^ 2");
/// assert_eq!(tree, Node::binary(
///     BinaryKind::Pow,
///     Node::Indeterminate("x".to_string()),
///     Node::Constant(2.0),
/// ));
/// ```
pub fn parse(indeterminate: &str, text: &str) -> Node {
    let source = strip_whitespace(text);
    Parser::new(indeterminate, &source).parse_full()
}

/// A recursive-descent parser for single-variable expressions, implementing this grammar (from
/// lowest to highest precedence):
///
/// ```text
/// expression := term { ('+' | '-') term }
/// term       := factor { ('*' | '/') factor }
/// factor     := '-' factor | primary [ '^' factor ]
/// primary    := constant | '(' expression ')' | '|' expression '|' | indeterminate
///             | function '(' expression ')' | 'pi' | 'e' [ '^' exponent ]
/// ```
///
/// Instead of returning errors, the parser embeds a [`Node::Error`] holding the offset of the
/// problem into the tree, then skips to the end of the input.
#[derive(Debug, Clone)]
pub struct Parser<'source> {
    /// The whitespace-free source being parsed.
    source: &'source str,

    /// The name of the indeterminate.
    indeterminate: &'source str,

    /// The tokens that this parser is currently parsing.
    tokens: Box<[Token<'source>]>,

    /// The index of the **next** token to be parsed.
    cursor: usize,

    /// Whether an error node has been produced.
    failed: bool,
}

impl<'source> Parser<'source> {
    /// Create a new parser for the given whitespace-free source.
    pub fn new(indeterminate: &'source str, source: &'source str) -> Self {
        Self {
            source,
            indeterminate,
            tokens: tokenize_complete(source),
            cursor: 0,
            failed: false,
        }
    }

    /// Returns the offset of the current token, or the end of the source if the cursor is at the
    /// end of the stream.
    pub fn offset(&self) -> usize {
        self.tokens
            .get(self.cursor)
            .map_or(self.source.len(), |token| token.span.start)
    }

    /// Returns the current token. The cursor is not moved. Returns [`None`] if the cursor is at
    /// the end of the stream.
    pub fn current_token(&self) -> Option<&Token<'source>> {
        self.tokens.get(self.cursor)
    }

    /// Returns the kind of the current token.
    fn current_kind(&self) -> Option<TokenKind> {
        self.current_token().map(|token| token.kind)
    }

    /// Advances the cursor past the current token if it is of the given kind. Returns `true` if
    /// the cursor moved.
    fn eat(&mut self, kind: TokenKind) -> bool {
        if self.current_kind() == Some(kind) {
            self.cursor += 1;
            true
        } else {
            false
        }
    }

    /// Creates an error node pointing at the current token, or the end of the source if the
    /// cursor is at the end of the stream, then moves the cursor to the end.
    fn error(&mut self) -> Node {
        let offset = self.offset();
        self.cursor = self.tokens.len();
        self.failed = true;
        Node::Error(offset)
    }

    /// Consumes the closing delimiter of `node`. If it is missing, an error node replaces
    /// `node`, unless an error was already produced inside it; then the partial node is kept.
    fn close(&mut self, delimiter: TokenKind, node: Node) -> Node {
        if self.eat(delimiter) || self.failed {
            node
        } else {
            self.error()
        }
    }

    /// Parses the whole source as an expression. If input remains after the expression, the
    /// result is an error node pointing at it.
    pub fn parse_full(&mut self) -> Node {
        let node = self.parse_expression();
        if self.cursor < self.tokens.len() {
            self.error()
        } else {
            node
        }
    }

    /// Parses terms separated by `+` or `-`.
    pub fn parse_expression(&mut self) -> Node {
        let mut lhs = self.parse_term();
        loop {
            let kind = match self.current_kind() {
                Some(TokenKind::Add) => BinaryKind::Plus,
                Some(TokenKind::Sub) => BinaryKind::Minus,
                _ => return lhs,
            };
            self.cursor += 1;
            let rhs = self.parse_term();
            lhs = Node::binary(kind, lhs, rhs);
        }
    }

    /// Parses factors separated by `*` or `/`.
    pub fn parse_term(&mut self) -> Node {
        let mut lhs = self.parse_factor();
        loop {
            let kind = match self.current_kind() {
                Some(TokenKind::Mul) => BinaryKind::Times,
                Some(TokenKind::Div) => BinaryKind::Div,
                _ => return lhs,
            };
            self.cursor += 1;
            let rhs = self.parse_factor();
            lhs = Node::binary(kind, lhs, rhs);
        }
    }

    /// Parses a negation, or a primary optionally raised to a power. Powers are
    /// right-associative, since the exponent is itself a factor.
    pub fn parse_factor(&mut self) -> Node {
        if self.eat(TokenKind::Sub) {
            return Node::unary(UnaryKind::Negate, self.parse_factor());
        }

        let base = self.parse_primary();
        if self.eat(TokenKind::Exp) {
            let exponent = self.parse_factor();
            Node::binary(BinaryKind::Pow, base, exponent)
        } else {
            base
        }
    }

    /// Parses a constant, a parenthesized or absolute-valued expression, or a name.
    fn parse_primary(&mut self) -> Node {
        let Some(token) = self.current_token().cloned() else {
            return self.error();
        };

        match token.kind {
            TokenKind::Number => {
                self.cursor += 1;
                let (value, _) = scan_constant(self.source, token.span.start);
                Node::Constant(value)
            },
            TokenKind::OpenParen => {
                self.cursor += 1;
                let inner = self.parse_expression();
                self.close(TokenKind::CloseParen, Node::unary(UnaryKind::Group, inner))
            },
            TokenKind::Pipe => {
                self.cursor += 1;
                let inner = self.parse_expression();
                self.close(TokenKind::Pipe, Node::unary(UnaryKind::Abs, inner))
            },
            TokenKind::Name => self.parse_name(token.lexeme),
            _ => self.error(),
        }
    }

    /// Parses a function call, `pi`, `e`, or the indeterminate. Function names take priority over
    /// the indeterminate.
    fn parse_name(&mut self, name: &str) -> Node {
        if let Some(kind) = UnaryKind::from_function_name(name) {
            self.cursor += 1;
            if !self.eat(TokenKind::OpenParen) {
                return self.error();
            }
            let arg = self.parse_expression();
            return self.close(TokenKind::CloseParen, Node::unary(kind, arg));
        }

        match name {
            "pi" => {
                self.cursor += 1;
                Node::Constant(PI)
            },
            "e" => {
                self.cursor += 1;
                self.parse_exp()
            },
            _ if name == self.indeterminate => {
                self.cursor += 1;
                Node::Indeterminate(name.to_string())
            },
            _ => self.error(),
        }
    }

    /// Parses what follows `e`: a parenthesized exponent, a factor exponent, or nothing (meaning
    /// `e^1`).
    fn parse_exp(&mut self) -> Node {
        if !self.eat(TokenKind::Exp) {
            return Node::unary(UnaryKind::Exp, Node::Constant(1.0));
        }

        if self.eat(TokenKind::OpenParen) {
            let exponent = self.parse_expression();
            self.close(TokenKind::CloseParen, Node::unary(UnaryKind::Exp, exponent))
        } else {
            Node::unary(UnaryKind::Exp, self.parse_factor())
        }
    }
}

/// The precedence of an operation, in order from lowest precedence (binds loosest) to highest
/// precedence (binds tightest).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
    /// Precedence of addition (`+`) and subtraction (`-`), which separate terms.
    Term,

    /// Precedence of multiplication (`*`) and division (`/`), which separate factors.
    Factor,

    /// Precedence of unary subtraction (`-`).
    Neg,

    /// Precedence of exponentiation (`^`).
    Exp,

    /// Constants, names, function calls and anything else displayed with its own delimiters.
    Primary,
}
