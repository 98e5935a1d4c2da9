//! Contains the common [`ErrorKind`] trait used by all errors to display user-facing error
//! messages, and the span-carrying [`Error`] type returned by the parser and evaluator.

use ariadne::{Color, Report, Source};
use std::{any::Any, fmt::Debug, ops::Range};

// lets the derive macro's `expr_error::EXPR` path resolve inside this crate's own tests
#[cfg(test)]
extern crate self as expr_error;

/// The color to use to highlight expressions.
pub const EXPR: Color = Color::RGB(52, 235, 152);

/// Represents any kind of error that can occur while parsing or evaluating an expression.
pub trait ErrorKind: Debug + Send + Sync {
    /// Returns the error kind as [`Any`], so that callers can inspect the concrete kind.
    fn as_any(&self) -> &dyn Any;

    /// Builds the report for this error.
    fn build_report<'a>(
        &self,
        src_id: &'a str,
        spans: &[Range<usize>],
    ) -> Report<(&'a str, Range<usize>)>;
}

/// An error associated with regions of an expression's source text that can be highlighted.
#[derive(Debug)]
pub struct Error {
    /// The regions of the source text that this error originated from.
    pub spans: Vec<Range<usize>>,

    /// The kind of error that occurred.
    pub kind: Box<dyn ErrorKind>,
}

impl Error {
    /// Creates a new error with the given spans and kind.
    pub fn new(spans: Vec<Range<usize>>, kind: impl ErrorKind + 'static) -> Self {
        Self { spans, kind: Box::new(kind) }
    }

    /// Creates a new error pointing at a single character offset.
    pub fn at(offset: usize, kind: impl ErrorKind + 'static) -> Self {
        Self::new(vec![offset..offset + 1], kind)
    }

    /// Returns the concrete kind of this error, if it is a `T`.
    pub fn downcast_kind<T: ErrorKind + 'static>(&self) -> Option<&T> {
        self.kind.as_any().downcast_ref::<T>()
    }

    /// Build a report from this error kind.
    pub fn build_report<'a>(&self, src_id: &'a str) -> Report<(&'a str, Range<usize>)> {
        self.kind.build_report(src_id, &self.spans)
    }

    /// Writes the report for this error to the given writer, using `source` as the highlighted
    /// text.
    pub fn write_report(&self, source: &str, w: impl std::io::Write) -> std::io::Result<()> {
        self.build_report("input").write(("input", Source::from(source)), w)
    }

    /// Report this error to stderr.
    ///
    /// The `ariadne` crate's [`Report`] type does not have a `Display` implementation, so we can
    /// only use its `eprint` method to print to stderr.
    pub fn report_to_stderr(&self, source: &str) -> std::io::Result<()> {
        self.build_report("input").eprint(("input", Source::from(source)))
    }
}
