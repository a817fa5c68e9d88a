//! Built-in hook handlers that append to files under the hooks home.
//!
//! Each event opens its output file in append mode and closes it again, so
//! external log rotation never loses lines.

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use hookline::event::{self, HookEvent, ToolCallFinished};
use hookline::{HookHandler, RawEvent};
use hookline_config::HooksHome;
use thiserror::Error;
use tracing::debug;

use crate::cli::SinkKind;

const SINK_TARGET: &str = "hookline::sink";

/// Errors raised while a sink records an event.
#[derive(Debug, Clone, Error)]
pub enum SinkError {
    /// The event could not be serialised.
    #[error("failed to serialise event: {0}")]
    Serialise(#[source] Arc<serde_json::Error>),
    /// The output file could not be written.
    #[error("failed to append to '{}'", .path.display())]
    Append {
        /// File being written.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: Arc<io::Error>,
    },
}

fn append_line(path: &Path, line: &str) -> Result<(), SinkError> {
    let append_error = |source: io::Error| SinkError::Append {
        path: path.to_path_buf(),
        source: Arc::new(source),
    };
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(append_error)?;
    writeln!(file, "{line}").map_err(append_error)
}

/// Appends every resolved payload as one JSON line.
#[derive(Debug, Clone)]
pub struct JsonlSink {
    path: PathBuf,
}

impl JsonlSink {
    /// Creates a sink appending to `path`.
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl HookHandler for JsonlSink {
    type Error = SinkError;

    fn on_event(&mut self, event: &RawEvent) -> Result<(), Self::Error> {
        let line =
            serde_json::to_string(event).map_err(|error| SinkError::Serialise(Arc::new(error)))?;
        append_line(&self.path, &line)
    }
}

/// Appends a one-line summary of each finished tool call and ignores all
/// other events.
#[derive(Debug, Clone)]
pub struct ToolSummarySink {
    path: PathBuf,
}

impl ToolSummarySink {
    /// Creates a sink appending to `path`.
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

/// Renders the summary line for a finished tool call.
#[must_use]
pub fn tool_summary_line(call: &ToolCallFinished) -> String {
    let success = call
        .success()
        .map_or_else(|| String::from("unknown"), |flag| flag.to_string());
    format!(
        "type=tool-call-finished tool={} status={} success={success} duration_ms={} output_bytes={} cwd={}",
        call.tool_name().unwrap_or("unknown"),
        call.status().unwrap_or("unknown"),
        call.duration_ms().unwrap_or(0),
        call.output_bytes().unwrap_or(0),
        call.cwd().unwrap_or(""),
    )
}

impl HookHandler for ToolSummarySink {
    type Error = SinkError;

    fn on_event(&mut self, event: &RawEvent) -> Result<(), Self::Error> {
        match event::bind(event.clone()) {
            HookEvent::ToolCallFinished(call) => append_line(&self.path, &tool_summary_line(&call)),
            other => {
                debug!(target: SINK_TARGET, kind = %other.kind(), "ignoring event");
                Ok(())
            }
        }
    }
}

/// The sink selected on the command line.
#[derive(Debug, Clone)]
pub enum Sink {
    /// See [`JsonlSink`].
    Jsonl(JsonlSink),
    /// See [`ToolSummarySink`].
    ToolSummary(ToolSummarySink),
}

impl Sink {
    pub(crate) fn for_kind(kind: SinkKind, home: &HooksHome) -> Self {
        match kind {
            SinkKind::Jsonl => Self::Jsonl(JsonlSink::new(home.event_log_path().to_path_buf())),
            SinkKind::ToolSummary => Self::ToolSummary(ToolSummarySink::new(
                home.tool_summary_path().to_path_buf(),
            )),
        }
    }
}

impl HookHandler for Sink {
    type Error = SinkError;

    fn on_event(&mut self, event: &RawEvent) -> Result<(), Self::Error> {
        match self {
            Self::Jsonl(sink) => sink.on_event(event),
            Self::ToolSummary(sink) => sink.on_event(event),
        }
    }
}
