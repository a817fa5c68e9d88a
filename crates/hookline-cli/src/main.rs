//! CLI entrypoint for the hookline hook runner.
//!
//! The binary delegates to [`hookline_cli::run`], which loads configuration,
//! installs telemetry, and either hosts a long-lived event stream on stdin or
//! reads a single payload.

use std::io::{self, StderrLock, StdinLock, StdoutLock};
use std::process::ExitCode;

fn main() -> ExitCode {
    let stdin: StdinLock<'static> = io::stdin().lock();
    let mut stdout: StdoutLock<'_> = io::stdout().lock();
    let mut stderr: StderrLock<'_> = io::stderr().lock();
    hookline_cli::run(std::env::args_os(), stdin, &mut stdout, &mut stderr)
}
