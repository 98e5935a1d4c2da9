use expr_attrs::ErrorKind;
use expr_error::ErrorKind;

/// The expression contains a part that could not be parsed, so it has no value and no
/// derivative.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "cannot compute an expression that failed to parse",
    labels = [format!("parsing failed at offset {}", offset)],
    help = "fix the expression and try again",
)]
pub struct ErrorNodeReached {
    /// The offset stored in the error node, in the whitespace-stripped source.
    pub offset: usize,
}
