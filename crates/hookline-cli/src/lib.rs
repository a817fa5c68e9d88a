//! Command-line runtime for the hookline hook runner.
//!
//! `hookline host` runs the dispatch loop over stdin with one of the built-in
//! sinks; `hookline read` resolves and binds a single payload. Configuration
//! flags precede the subcommand and are handed to `ortho_config`; everything
//! after them is parsed by clap. IO streams are injected so tests can drive
//! the runtime without a process boundary.

use std::ffi::OsString;
use std::io::{BufRead, Write};
use std::process::ExitCode;

use clap::Parser;
use hookline::HookHost;
use hookline::event::HookEvent;
use hookline::read::read_event_from_reader;
use hookline_config::{Config, HooksHome};
use serde_json::{Value, json};
use tracing::info;

mod cli;
mod config;
mod errors;
pub mod sinks;
pub mod telemetry;

use cli::{Cli, CliCommand};
use config::{ConfigLoader, OrthoConfigLoader, split_config_arguments};
use errors::AppError;
use sinks::Sink;

const CLI_TARGET: &str = "hookline::cli";

/// Runs the CLI using the provided arguments and IO handles.
#[must_use]
pub fn run<I, R, W, E>(args: I, stdin: R, stdout: &mut W, stderr: &mut E) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
    R: BufRead,
    W: Write,
    E: Write,
{
    run_with_loader(args, stdin, stdout, stderr, &OrthoConfigLoader)
}

pub(crate) fn run_with_loader<I, R, W, E, L>(
    args: I,
    stdin: R,
    stdout: &mut W,
    stderr: &mut E,
    loader: &L,
) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
    R: BufRead,
    W: Write,
    E: Write,
    L: ConfigLoader,
{
    let args: Vec<OsString> = args.into_iter().collect();
    let split = split_config_arguments(&args);

    let result = Cli::try_parse_from(&split.command_arguments)
        .map_err(AppError::CliUsage)
        .and_then(|cli| {
            loader
                .load(&split.config_arguments)
                .map(|config| (cli, config))
        })
        .and_then(|(cli, config)| execute(cli.command, &config, stdin, stdout));

    match result {
        Ok(exit_code) => exit_code,
        Err(AppError::CliUsage(error)) if !error.use_stderr() => {
            let _ = write!(stdout, "{error}");
            ExitCode::SUCCESS
        }
        Err(error) => {
            let _ = writeln!(stderr, "hookline: {error}");
            ExitCode::from(error.exit_code())
        }
    }
}

fn execute<R, W>(
    command: CliCommand,
    config: &Config,
    stdin: R,
    stdout: &mut W,
) -> Result<ExitCode, AppError>
where
    R: BufRead,
    W: Write,
{
    telemetry::initialise(config)?;
    let _hook = telemetry::hook_span(command.name()).entered();
    match command {
        CliCommand::Host { sink } => {
            let home = HooksHome::from_config(config)?;
            info!(
                target: CLI_TARGET,
                ?sink,
                home = %home.root().display(),
                "hosting hook events from stdin"
            );
            let mut handler = Sink::for_kind(sink, &home);
            let summary = HookHost::new().run(stdin, &mut handler);
            info!(
                target: CLI_TARGET,
                dispatched = summary.dispatched(),
                skipped = summary.skipped(),
                handler_failures = summary.handler_failures(),
                "hook input closed"
            );
            Ok(summary.exit_code())
        }
        CliCommand::Read => {
            let event = read_event_from_reader(stdin)?;
            let line = serde_json::to_string(&describe(&event)).map_err(AppError::SerialiseSummary)?;
            writeln!(stdout, "{line}").map_err(AppError::WriteSummary)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Summarises how a payload bound: its discriminant as sent, the kind it
/// bound to, the names of the fields the kind does not know, and the payload.
fn describe(event: &HookEvent) -> Value {
    let mut extras: Vec<&str> = event.extras().keys().map(String::as_str).collect();
    extras.sort_unstable();
    let kind = event.kind();
    json!({
        "type": event.event_type(),
        "kind": kind.as_str(),
        "known": kind.is_known(),
        "extras": extras,
        "payload": event.raw(),
    })
}
