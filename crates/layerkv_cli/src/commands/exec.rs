//! Script execution.

use crate::error::CliError;
use crate::output::{render, OutputFormat};
use crate::script::parse_line;
use layerkv_server::{KvServer, Response, ServerError};
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;
use tracing::{debug, info};

/// Outcome of running a script.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ExecSummary {
    /// Commands executed.
    pub total: usize,
    /// Commands that returned an error.
    pub failed: usize,
}

/// Runs the exec command against a file, or stdin if no path is given.
pub fn run(
    server: &KvServer,
    path: Option<&Path>,
    format: OutputFormat,
    fail_fast: bool,
) -> Result<(), CliError> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let summary = match path {
        Some(path) => {
            let reader = BufReader::new(File::open(path)?);
            execute(server, reader, &mut out, format, fail_fast)?
        }
        None => execute(server, io::stdin().lock(), &mut out, format, fail_fast)?,
    };

    info!(
        total = summary.total,
        failed = summary.failed,
        depth = server.depth(),
        "script finished"
    );
    if summary.failed > 0 {
        return Err(CliError::Failed {
            failed: summary.failed,
            total: summary.total,
        });
    }
    Ok(())
}

/// Executes every command read from `input`, writing one result per line.
///
/// Unparseable lines count as failed commands. With `fail_fast` execution
/// stops after the first failure.
pub fn execute<R: BufRead, W: Write>(
    server: &KvServer,
    input: R,
    out: &mut W,
    format: OutputFormat,
    fail_fast: bool,
) -> Result<ExecSummary, CliError> {
    let mut summary = ExecSummary::default();

    for (index, line) in input.lines().enumerate() {
        let line = line?;
        let response = match parse_line(&line) {
            Ok(None) => continue,
            Ok(Some(request)) => {
                debug!(line = index + 1, request = request.name(), "executing");
                server.handle(request)
            }
            Err(message) => {
                let err = CliError::Parse {
                    line: index + 1,
                    message,
                };
                Response::from(ServerError::InvalidRequest(err.to_string()))
            }
        };

        summary.total += 1;
        writeln!(out, "{}", render(&response, format))?;

        if !response.is_success() {
            summary.failed += 1;
            if fail_fast {
                break;
            }
        }
    }

    Ok(summary)
}
