pub mod kind;

use expr_error::Error as ExprError;
use std::io;

/// Utility enum to package errors that can occur while running a REPL command. Each variant keeps
/// the text its spans point into.
#[derive(Debug)]
pub enum Error {
    /// Errors in the expression. The spans point into the expression with whitespace removed.
    ParseError {
        source: String,
        errors: Vec<ExprError>,
    },

    /// An error that occurred while evaluating or differentiating the expression.
    ComputeError {
        source: String,
        error: ExprError,
    },

    /// The command itself is malformed. The spans point into the command line.
    CommandError {
        line: String,
        error: ExprError,
    },
}

impl Error {
    /// Report the errors in this [`Error`] to stderr.
    pub fn report_to_stderr(&self) -> io::Result<()> {
        match self {
            Self::ParseError { source, errors } => errors
                .iter()
                .try_for_each(|err| err.report_to_stderr(source)),
            Self::ComputeError { source, error } => error.report_to_stderr(source),
            Self::CommandError { line, error } => error.report_to_stderr(line),
        }
    }

    /// Returns the underlying errors.
    pub fn errors(&self) -> Vec<&ExprError> {
        match self {
            Self::ParseError { errors, .. } => errors.iter().collect(),
            Self::ComputeError { error, .. } | Self::CommandError { error, .. } => vec![error],
        }
    }
}
