use ariadne::Fmt;
use expr_attrs::ErrorKind;
use expr_error::{ErrorKind, EXPR};

/// The end of the expression was reached unexpectedly.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unexpected end of expression",
    labels = [format!("you might need to add another {} here", "expression".fg(EXPR))],
)]
pub struct UnexpectedEof;

/// A character could not be understood in its position.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("unexpected `{}`", found),
    labels = ["I could not understand the expression from here"],
    help = format!(
        "check for unmatched {} or {}, or for names other than the variable `{}` and the supported functions",
        "(".fg(EXPR),
        "|".fg(EXPR),
        indeterminate,
    ),
)]
pub struct UnexpectedInput {
    /// The text found at the error location.
    pub found: String,

    /// The name of the indeterminate the expression was parsed with.
    pub indeterminate: String,
}
