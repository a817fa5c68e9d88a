//! Command-line argument definitions.

use clap::{Parser, Subcommand, ValueEnum};

/// Built-in handlers for the host loop.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, ValueEnum)]
pub(crate) enum SinkKind {
    /// Append every resolved payload to the event log as one JSON line.
    #[default]
    Jsonl,
    /// Append a one-line summary of each finished tool call.
    ToolSummary,
}

/// Runs hooks against agent lifecycle events.
#[derive(Parser, Debug)]
#[command(name = "hookline", version, disable_help_subcommand = true)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: CliCommand,
}

/// Subcommands.
#[derive(Subcommand, Debug, Clone, Copy)]
pub(crate) enum CliCommand {
    /// Reads host messages from stdin until it closes, dispatching each event
    /// to a built-in sink.
    Host {
        /// Sink receiving the events.
        #[arg(long, value_enum, default_value_t = SinkKind::Jsonl)]
        sink: SinkKind,
    },
    /// Reads one payload or envelope from stdin and prints how it binds.
    Read,
}

impl CliCommand {
    /// Subcommand name as typed on the command line.
    pub(crate) const fn name(self) -> &'static str {
        match self {
            Self::Host { .. } => "host",
            Self::Read => "read",
        }
    }
}
