use ariadne::Fmt;
use expr_attrs::ErrorKind;
use expr_error::{ErrorKind, EXPR};

/// The command after `:` is not one the REPL knows.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("unknown command `:{}`", name),
    labels = ["this command"],
    help = format!(
        "available commands: {}, {}, {}, {}, {}, {}",
        ":eval".fg(EXPR),
        ":diff".fg(EXPR),
        ":poly".fg(EXPR),
        ":latex".fg(EXPR),
        ":var".fg(EXPR),
        ":help".fg(EXPR),
    ),
)]
pub struct UnknownCommand {
    /// The name of the command, without the leading `:`.
    pub name: String,
}

/// A command was given without one of its arguments.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("`:{}` needs {}", command, argument),
    labels = [format!("add {} after this command", argument)],
)]
pub struct MissingArgument {
    /// The name of the command, without the leading `:`.
    pub command: String,

    /// A description of the missing argument.
    pub argument: &'static str,
}

/// The point given to `:eval` is not a number.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("`{}` is not a number", found),
    labels = ["expected the value of the variable here"],
    help = format!("for example: {}", ":eval 2.5 x^2".fg(EXPR)),
)]
pub struct InvalidPoint {
    /// The text given as the point.
    pub found: String,
}

/// The name cannot be used as the variable of an expression.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("`{}` cannot be used as the variable", found),
    labels = ["this name"],
    help = "use a single word made of letters, digits and underscores, other than a function name, `pi`, or `e`",
)]
pub struct InvalidName {
    /// The rejected name.
    pub found: String,
}
