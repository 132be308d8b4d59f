//! Interactive shell.

use crate::error::CliError;
use crate::output::{render, OutputFormat};
use crate::script::parse_line;
use layerkv_server::{KvServer, Response, ServerError};
use std::io::{self, BufRead, Write};

/// Runs the interactive shell on stdin/stdout until EOF or `quit`.
pub fn run(server: &KvServer, format: OutputFormat) -> Result<(), CliError> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    session(server, stdin.lock(), &mut stdout.lock(), format)
}

/// Drives one shell session over arbitrary input and output.
///
/// The prompt shows the current transaction depth.
pub fn session<R: BufRead, W: Write>(
    server: &KvServer,
    mut input: R,
    out: &mut W,
    format: OutputFormat,
) -> Result<(), CliError> {
    let mut line = String::new();
    loop {
        write!(out, "layerkv[{}]> ", server.depth())?;
        out.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            writeln!(out)?;
            break;
        }

        let trimmed = line.trim();
        if matches!(trimmed, "quit" | "exit") {
            break;
        }
        if trimmed == "help" {
            writeln!(
                out,
                "commands: get set delete exists keys begin commit rollback stats clear quit"
            )?;
            continue;
        }

        let response = match parse_line(trimmed) {
            Ok(None) => continue,
            Ok(Some(request)) => server.handle(request),
            Err(message) => Response::from(ServerError::InvalidRequest(message)),
        };
        writeln!(out, "{}", render(&response, format))?;
    }

    if server.depth() > 0 {
        tracing::warn!(
            depth = server.depth(),
            "shell closed with open transactions; uncommitted changes are discarded"
        );
    }
    Ok(())
}
