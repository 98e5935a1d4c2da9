mod command;
mod error;

use command::{Command, Session};
use error::Error;
use rustyline::{error::ReadlineError, DefaultEditor};
use std::io::{self, BufRead, IsTerminal};
use tracing::warn;
use tracing_subscriber::EnvFilter;

/// Runs a line of input, printing the result or reporting the failure.
fn run_line(input: &str, session: &mut Session) {
    match Command::parse(input).and_then(|command| session.execute(command)) {
        Ok(output) => println!("{}", output),
        Err(err) => report(&err),
    }
}

/// Reports the error to stderr, falling back to a plain message if the report cannot be written.
fn report(err: &Error) {
    if let Err(io_err) = err.report_to_stderr() {
        warn!(%io_err, "could not write error report");
        eprintln!("{:?}", err);
    }
}

/// Installs the log subscriber, filtered by `RUST_LOG` (default: `warn`).
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() {
    init_logging();

    let indeterminate = std::env::args().nth(1).unwrap_or_else(|| "x".to_string());
    let mut session = match Session::new(&indeterminate) {
        Ok(session) => session,
        Err(err) => {
            report(&err);
            std::process::exit(1);
        },
    };

    if !io::stdin().is_terminal() {
        // read one command per line from stdin
        for line in io::stdin().lock().lines() {
            match line {
                Ok(line) if line.trim().is_empty() => (),
                Ok(line) => run_line(&line, &mut session),
                Err(err) => {
                    eprintln!("{}", err);
                    break;
                },
            }
        }
    } else {
        // run the repl / interactive mode
        let mut rl = match DefaultEditor::new() {
            Ok(rl) => rl,
            Err(err) => {
                eprintln!("{}", err);
                std::process::exit(1);
            },
        };

        fn process_line(rl: &mut DefaultEditor, session: &mut Session) -> Result<(), ReadlineError> {
            let input = rl.readline("> ")?;
            if input.trim().is_empty() {
                return Ok(());
            }

            rl.add_history_entry(&input)?;

            run_line(&input, session);
            Ok(())
        }

        loop {
            if let Err(err) = process_line(&mut rl, &mut session) {
                match err {
                    ReadlineError::Eof | ReadlineError::Interrupted => (),
                    _ => eprintln!("{}", err),
                }
                break;
            }
        }
    }
}
