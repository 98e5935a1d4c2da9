use crate::error::{kind::{InvalidName, InvalidPoint, MissingArgument, UnknownCommand}, Error};
use expr_compute::{derivative, evaluate, normalize};
use expr_error::{Error as ExprError, ErrorKind};
use expr_parser::{
    parser::error::parse_errors,
    tokenizer::{tokenize_complete, TokenKind},
    parse,
    strip_whitespace,
    Latex,
    Node,
    UnaryKind,
};
use std::ops::Range;
use tracing::debug;

const HELP: &str = "\
<expr>             show how the expression was parsed
:eval <x> <expr>   evaluate the expression at a value of the variable
:diff <expr>       differentiate the expression
:poly <expr>       expand the expression into a polynomial
:latex <expr>      show the expression as LaTeX
:var <name>        change the variable (currently `{}`)
:help              show this message";

/// A line of input to the REPL.
#[derive(Debug, Clone, PartialEq)]
pub enum Command<'a> {
    /// Parse an expression and print it back.
    Show(&'a str),

    /// Evaluate an expression at the given point.
    Eval {
        x: f64,
        expr: &'a str,
    },

    /// Differentiate an expression.
    Diff(&'a str),

    /// Normalize a polynomial expression.
    Poly(&'a str),

    /// Print an expression as LaTeX.
    Latex(&'a str),

    /// Change the variable of the session.
    Var(&'a str),

    /// Print the list of commands.
    Help,
}

/// Returns the span of `part` within `line`, in characters. `part` must be a subslice of `line`.
fn span_in(line: &str, part: &str) -> Range<usize> {
    let byte_start = (part.as_ptr() as usize).saturating_sub(line.as_ptr() as usize);
    let start = line.get(..byte_start).map_or(0, |prefix| prefix.chars().count());
    start..start + part.chars().count().max(1)
}

/// Creates an error about a command line.
fn command_error(line: &str, span: Range<usize>, kind: impl ErrorKind + 'static) -> Error {
    Error::CommandError {
        line: line.to_string(),
        error: ExprError::new(vec![span], kind),
    }
}

/// Splits the first whitespace-separated word off of `text`, returning the word and the rest of
/// the text with leading whitespace removed.
fn split_word(text: &str) -> (&str, &str) {
    match text.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim_start()),
        None => (text, ""),
    }
}

/// Checks that `name` can be used as the variable of an expression: it must be a single name
/// token that the parser would not read as a function, `pi`, or `e`.
pub fn validate_name(name: &str) -> Result<(), ExprError> {
    let tokens = tokenize_complete(name);
    let is_single_name = matches!(&*tokens, [token] if token.kind == TokenKind::Name);
    let is_reserved = UnaryKind::from_function_name(name).is_some() || name == "pi" || name == "e";

    if is_single_name && !is_reserved {
        Ok(())
    } else {
        Err(ExprError::new(
            vec![0..name.chars().count().max(1)],
            InvalidName { found: name.to_string() },
        ))
    }
}

impl<'a> Command<'a> {
    /// Parses a line of input. Lines starting with `:` are commands; anything else is an
    /// expression to show.
    pub fn parse(line: &'a str) -> Result<Self, Error> {
        let line = line.trim();
        let Some(rest) = line.strip_prefix(':') else {
            return Ok(Self::Show(line));
        };

        let (name, args) = split_word(rest);
        let missing = |argument| {
            command_error(line, span_in(line, name), MissingArgument {
                command: name.to_string(),
                argument,
            })
        };

        match name {
            "eval" => {
                let (point, expr) = split_word(args);
                if point.is_empty() {
                    return Err(missing("a value and an expression"));
                }
                let x = point.parse::<f64>().map_err(|_| {
                    command_error(line, span_in(line, point), InvalidPoint {
                        found: point.to_string(),
                    })
                })?;
                if expr.is_empty() {
                    return Err(missing("an expression"));
                }
                Ok(Self::Eval { x, expr })
            },
            "diff" | "poly" | "latex" => {
                if args.is_empty() {
                    return Err(missing("an expression"));
                }
                Ok(match name {
                    "diff" => Self::Diff(args),
                    "poly" => Self::Poly(args),
                    _ => Self::Latex(args),
                })
            },
            "var" => {
                if args.is_empty() {
                    return Err(missing("a name"));
                }
                validate_name(args).map_err(|mut error| {
                    error.spans = vec![span_in(line, args)];
                    Error::CommandError { line: line.to_string(), error }
                })?;
                Ok(Self::Var(args))
            },
            "help" => Ok(Self::Help),
            _ => Err(command_error(line, span_in(line, line), UnknownCommand {
                name: name.to_string(),
            })),
        }
    }
}

/// The state of the REPL, kept between lines.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    /// The variable that expressions are parsed in terms of.
    indeterminate: String,
}

impl Session {
    /// Creates a session with the given variable.
    pub fn new(indeterminate: &str) -> Result<Self, Error> {
        validate_name(indeterminate).map_err(|error| Error::CommandError {
            line: indeterminate.to_string(),
            error,
        })?;
        Ok(Self { indeterminate: indeterminate.to_string() })
    }

    /// Returns the variable of the session.
    pub fn indeterminate(&self) -> &str {
        &self.indeterminate
    }

    /// Parses an expression, failing if any part of it could not be parsed.
    fn parse_checked(&self, expr: &str) -> Result<Node, Error> {
        let tree = parse(&self.indeterminate, expr);
        if !tree.has_error() {
            return Ok(tree);
        }

        let source = strip_whitespace(expr);
        let errors = parse_errors(&tree, &self.indeterminate, &source);
        Err(Error::ParseError { source, errors })
    }

    /// Runs a command, returning the text to print.
    pub fn execute(&mut self, command: Command) -> Result<String, Error> {
        debug!(?command, indeterminate = %self.indeterminate, "executing command");

        let compute_error = |expr: &str, error| Error::ComputeError {
            source: strip_whitespace(expr),
            error,
        };

        match command {
            Command::Show(expr) => Ok(self.parse_checked(expr)?.to_string()),
            Command::Eval { x, expr } => {
                let tree = self.parse_checked(expr)?;
                let value = evaluate(&tree, x).map_err(|err| compute_error(expr, err))?;
                Ok(value.to_string())
            },
            Command::Diff(expr) => {
                let tree = self.parse_checked(expr)?;
                let derived = derivative(&tree).map_err(|err| compute_error(expr, err))?;
                Ok(derived.to_string())
            },
            Command::Poly(expr) => Ok(normalize(&self.parse_checked(expr)?).to_string()),
            Command::Latex(expr) => Ok(self.parse_checked(expr)?.as_display().to_string()),
            Command::Var(name) => {
                self.indeterminate = name.to_string();
                Ok(format!("the variable is now `{}`", name))
            },
            Command::Help => Ok(HELP.replace("{}", &self.indeterminate)),
        }
    }
}

#[cfg(test)]
mod tests {
    use expr_parser::parser::error::kind::{UnexpectedEof, UnexpectedInput};
    use pretty_assertions::assert_eq;
    use super::*;

    fn run(session: &mut Session, line: &str) -> Result<String, Error> {
        Command::parse(line).and_then(|command| session.execute(command))
    }

    fn session() -> Session {
        Session::new("x").unwrap()
    }

    #[test]
    fn parse_commands() {
        assert_eq!(Command::parse("  x + 1 ").unwrap(), Command::Show("x + 1"));
        assert_eq!(
            Command::parse(":eval 2.5 x^2").unwrap(),
            Command::Eval { x: 2.5, expr: "x^2" },
        );
        assert_eq!(
            Command::parse(":eval   -1   sin(x) + 1").unwrap(),
            Command::Eval { x: -1.0, expr: "sin(x) + 1" },
        );
        assert_eq!(Command::parse(":diff x^2").unwrap(), Command::Diff("x^2"));
        assert_eq!(Command::parse(":poly (x-1)^2").unwrap(), Command::Poly("(x-1)^2"));
        assert_eq!(Command::parse(":latex 1/x").unwrap(), Command::Latex("1/x"));
        assert_eq!(Command::parse(":var theta").unwrap(), Command::Var("theta"));
        assert_eq!(Command::parse(":help").unwrap(), Command::Help);
    }

    #[test]
    fn unknown_command() {
        let err = Command::parse(":integrate x").unwrap_err();
        let Error::CommandError { line, error } = err else {
            panic!("expected a command error");
        };
        assert_eq!(line, ":integrate x");
        assert_eq!(
            error.downcast_kind::<UnknownCommand>(),
            Some(&UnknownCommand { name: "integrate".to_string() }),
        );
    }

    #[test]
    fn missing_arguments() {
        for line in [":eval", ":eval 2", ":diff", ":poly  ", ":latex", ":var"] {
            let err = Command::parse(line).unwrap_err();
            let errors = err.errors();
            assert!(errors[0].downcast_kind::<MissingArgument>().is_some(), "line: {}", line);
        }
    }

    #[test]
    fn invalid_point() {
        let err = Command::parse(":eval two x^2").unwrap_err();
        let errors = err.errors();
        assert_eq!(
            errors[0].downcast_kind::<InvalidPoint>(),
            Some(&InvalidPoint { found: "two".to_string() }),
        );
        assert_eq!(errors[0].spans, vec![6..9]);
    }

    #[test]
    fn invalid_names() {
        for name in ["sin", "pi", "e", "x y", "2x", "x+1"] {
            assert!(validate_name(name).is_err(), "name: {}", name);
        }
        for name in ["x", "t", "theta", "x_1"] {
            assert!(validate_name(name).is_ok(), "name: {}", name);
        }

        let err = Command::parse(":var cos").unwrap_err();
        assert_eq!(err.errors()[0].spans, vec![5..8]);
        assert!(Session::new("ln").is_err());
    }

    #[test]
    fn show() {
        assert_eq!(run(&mut session(), "x+1").unwrap(), "x + 1");
        assert_eq!(run(&mut session(), "2*pi*x").unwrap(), "2 × pi × x");
    }

    #[test]
    fn eval() {
        assert_eq!(run(&mut session(), ":eval 3 x^2").unwrap(), "9");
        assert_eq!(run(&mut session(), ":eval 0 sin(x)+cos(x)").unwrap(), "1");
        assert_eq!(run(&mut session(), ":eval -1 sqrt(x)").unwrap(), "NaN");
    }

    #[test]
    fn diff() {
        assert_eq!(run(&mut session(), ":diff sin(x)").unwrap(), "cos(x)");
        assert_eq!(run(&mut session(), ":diff x^2").unwrap(), "2 × x ^ (2 - 1)");
    }

    #[test]
    fn poly() {
        assert_eq!(run(&mut session(), ":poly (x-4)^3").unwrap(), "x^3 - 12x^2 + 48x - 64");
        assert_eq!(run(&mut session(), ":poly sin(x)").unwrap(), "sin(x)");
    }

    #[test]
    fn latex() {
        assert_eq!(run(&mut session(), ":latex sqrt(x)/2").unwrap(), "\\frac{\\sqrt{x}}{2}");
    }

    #[test]
    fn change_variable() {
        let mut session = session();
        assert_eq!(run(&mut session, ":var t").unwrap(), "the variable is now `t`");
        assert_eq!(session.indeterminate(), "t");
        assert_eq!(run(&mut session, ":eval 2 t^3").unwrap(), "8");
        assert!(run(&mut session, "x").is_err());
    }

    #[test]
    fn help_mentions_variable() {
        let mut session = Session::new("theta").unwrap();
        let help = run(&mut session, ":help").unwrap();
        assert!(help.contains(":eval <x> <expr>"));
        assert!(help.contains("(currently `theta`)"));
    }

    #[test]
    fn parse_errors_are_reported() {
        let err = run(&mut session(), ":eval 1 sin(").unwrap_err();
        let Error::ParseError { source, errors } = err else {
            panic!("expected a parse error");
        };
        assert_eq!(source, "sin(");
        assert_eq!(errors.len(), 1);
        assert!(errors[0].downcast_kind::<UnexpectedEof>().is_some());

        let err = run(&mut session(), "2 * y").unwrap_err();
        let errors = err.errors();
        assert_eq!(
            errors[0].downcast_kind::<UnexpectedInput>(),
            Some(&UnexpectedInput { found: "y".to_string(), indeterminate: "x".to_string() }),
        );
    }
}
