use std::f64::consts::PI;
use std::fmt::{Display, Formatter, Result};
use super::{ast::{Node, UnaryKind}, Precedence};

/// A trait for types that can be formatted as LaTeX.
pub trait Latex {
    /// Format the value as LaTeX.
    fn fmt_latex(&self, f: &mut Formatter) -> Result;

    /// Wraps the value in a [`LatexFormatter`], which implements [`Display`].
    fn as_display(&self) -> LatexFormatter<'_, Self> {
        LatexFormatter(self)
    }
}

/// A wrapper type that implements [`Display`] for any type that implements [`Latex`].
pub struct LatexFormatter<'a, T: ?Sized>(&'a T);

impl<T: ?Sized> Display for LatexFormatter<'_, T>
where
    T: Latex,
{
    fn fmt(&self, f: &mut Formatter) -> Result {
        self.0.fmt_latex(f)
    }
}

/// Helper to format a number using the shortest representation that reads back to the same
/// value.
pub fn fmt_number(f: &mut Formatter, value: f64) -> Result {
    write!(f, "{}", value)
}

/// Helper to format a constant in plain text. The constant `π` is written as `pi`, so that it
/// parses back to the same value.
pub fn fmt_constant(f: &mut Formatter, value: f64) -> Result {
    if value == PI {
        write!(f, "pi")
    } else {
        fmt_number(f, value)
    }
}

/// Helper to format a constant as LaTeX.
pub fn fmt_constant_latex(f: &mut Formatter, value: f64) -> Result {
    if value == PI {
        write!(f, "\\pi")
    } else {
        fmt_number(f, value)
    }
}

/// Helper to format powers. If `base` is [`None`], the base is Euler's number `e`.
pub fn fmt_pow(f: &mut Formatter, base: Option<&Node>, exponent: &Node) -> Result {
    match base {
        Some(base) => {
            let base = base.innermost();
            let needs_paren = base.precedence() <= Precedence::Exp
                || matches!(base, Node::Unary(UnaryKind::Exp | UnaryKind::Reciprocal, _));

            if needs_paren {
                write!(f, "\\left(")?;
                base.fmt_latex(f)?;
                write!(f, "\\right)")?;
            } else {
                base.fmt_latex(f)?;
            }
        },
        None => write!(f, "e")?,
    }
    write!(f, "^{{")?;
    exponent.innermost().fmt_latex(f)?;
    write!(f, "}}")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    use crate::parser::parse;

    fn display(source: &str) -> String {
        parse("x", source).to_string()
    }

    fn latex(source: &str) -> String {
        parse("x", source).as_display().to_string()
    }

    #[test]
    fn fmt_display() {
        assert_eq!(display("3*x + 6"), "3 × x + 6");
    }

    #[test]
    fn fmt_display_2() {
        assert_eq!(display("x^2 - 2/x"), "x ^ 2 - 2 ÷ x");
    }

    #[test]
    fn fmt_display_functions() {
        assert_eq!(display("arcsin(x)+ln(x)"), "arcsin(x) + ln(x)");
        assert_eq!(display("-|x|"), "-abs(x)");
        assert_eq!(display("e^(2*x)"), "e^(2 × x)");
        assert_eq!(display("e"), "e^(1)");
        assert_eq!(display("(x+1)*pi"), "(x + 1) × pi");
    }

    #[test]
    fn fmt_display_error() {
        assert_eq!(display("sin("), "sin(<error at 4>)");
    }

    #[test]
    fn fmt_display_reciprocal() {
        let node = Node::unary(UnaryKind::Reciprocal, Node::Indeterminate("x".to_string()));
        assert_eq!(node.to_string(), "1/(x)");
    }

    #[test]
    fn fmt_latex() {
        assert_eq!(latex("sqrt(3*x)^2"), "\\sqrt{3 \\, x}^{2}");
    }

    #[test]
    fn fmt_latex_2() {
        assert_eq!(latex("1/x + 5/x^2"), "\\frac{1}{x} + \\frac{5}{x^{2}}");
    }

    #[test]
    fn fmt_latex_functions() {
        assert_eq!(latex("sin(x)*cos(x)"), "\\sin\\left(x\\right) \\, \\cos\\left(x\\right)");
        assert_eq!(latex("log(x)"), "\\log_{10}\\left(x\\right)");
        assert_eq!(latex("arccot(x)"), "\\operatorname{arccot}\\left(x\\right)");
        assert_eq!(latex("floor(x)"), "\\left\\lfloor x \\right\\rfloor");
        assert_eq!(latex("|x-1|"), "\\left| x - 1 \\right|");
        assert_eq!(latex("e^(x+1)"), "e^{x + 1}");
        assert_eq!(latex("2*pi"), "2 \\, \\pi");
    }

    #[test]
    fn fmt_latex_negate() {
        assert_eq!(latex("-sin(x)"), "-\\sin\\left(x\\right)");
        assert_eq!(latex("-x"), "-x");
        assert_eq!(latex("-(x+1)"), "-\\left(x + 1\\right)");
        assert_eq!(latex("-pi"), "-\\pi");
    }

    #[test]
    fn fmt_latex_negate_wraps_signed_leaves() {
        let negated = |child: Node| Node::Unary(UnaryKind::Negate, Box::new(child));
        assert_eq!(negated(Node::Constant(2.0)).as_display().to_string(), "-2");
        assert_eq!(negated(Node::Constant(-2.0)).as_display().to_string(), "-\\left(-2\\right)");
        assert_eq!(
            negated(Node::Error(3)).as_display().to_string(),
            "-\\left(\\text{error at 3}\\right)",
        );
    }

    #[test]
    fn fmt_latex_pow_base() {
        assert_eq!(latex("(x+1)^2"), "\\left(x + 1\\right)^{2}");
        assert_eq!(latex("(-x)^(1/2)"), "\\left(-x\\right)^{\\frac{1}{2}}");
        assert_eq!(latex("x*2"), "x \\cdot 2");
    }
}
