//! Conditions raised while reading and dispatching hook events.
//!
//! Every variant raised inside the dispatch loop is recovered locally: the
//! loop reports it to its [`DiagnosticSink`](crate::host::DiagnosticSink) and
//! moves on to the next line. Only the one-shot readers in [`crate::read`]
//! return these errors to their caller. I/O and JSON errors are wrapped in
//! `Arc` so the enum stays cheap to clone into diagnostics.

use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

/// Errors arising while resolving, parsing, or dispatching hook events.
#[derive(Debug, Clone, Error)]
pub enum HookError {
    /// A stream line was not a valid JSON host message.
    #[error("line {line}: malformed envelope: {message}; input: {excerpt:?}")]
    MalformedEnvelopeLine {
        /// One-based line number within the stream.
        line: u64,
        /// Description of the parse failure.
        message: String,
        /// The start of the offending line, truncated by [`excerpt`].
        excerpt: String,
    },

    /// The envelope pointed at a payload file that could not be used.
    #[error("payload file '{}' unavailable: {message}", .path.display())]
    PayloadUnavailable {
        /// Path named by the envelope's indirection field.
        path: PathBuf,
        /// Why the file could not be used.
        message: String,
    },

    /// A host message carried a kind other than `hook-event`.
    #[error("line {line}: skipping message of kind '{kind}'")]
    UnrecognizedMessageKind {
        /// One-based line number within the stream.
        line: u64,
        /// Kind reported by the message; empty when the field was missing.
        kind: String,
    },

    /// The registered handler returned an error or panicked.
    #[error("handler failed for '{event_type}' event (seq {}): {message}", render_seq(.seq))]
    HandlerFailure {
        /// Sequence number of the host message, when present.
        seq: Option<i64>,
        /// Discriminant of the event being handled.
        event_type: String,
        /// The handler's error including its source chain.
        message: String,
    },

    /// The input stream could not be read.
    #[error("failed to read hook input: {0}")]
    ReadInput(#[source] Arc<std::io::Error>),

    /// A one-shot payload was not valid JSON.
    #[error("invalid JSON hook payload: {0}")]
    InvalidPayload(#[source] Arc<serde_json::Error>),
}

impl From<std::io::Error> for HookError {
    fn from(error: std::io::Error) -> Self {
        Self::ReadInput(Arc::new(error))
    }
}

impl From<serde_json::Error> for HookError {
    fn from(error: serde_json::Error) -> Self {
        Self::InvalidPayload(Arc::new(error))
    }
}

/// Characters of an offending line kept in diagnostics.
pub const EXCERPT_CHARS: usize = 120;

/// Returns the first [`EXCERPT_CHARS`] characters of `line`, marking any cut
/// with a trailing `...`.
///
/// # Example
///
/// ```
/// use hookline::error::excerpt;
///
/// assert_eq!(excerpt("{\"type\":"), "{\"type\":");
/// assert!(excerpt(&"x".repeat(500)).ends_with("..."));
/// ```
#[must_use]
pub fn excerpt(line: &str) -> String {
    let mut chars = line.chars();
    let mut shown: String = chars.by_ref().take(EXCERPT_CHARS).collect();
    if chars.next().is_some() {
        shown.push_str("...");
    }
    shown
}

/// Formats an optional sequence number for diagnostics.
fn render_seq(seq: &Option<i64>) -> String {
    seq.map_or_else(|| String::from("?"), |value| value.to_string())
}

/// Renders an error followed by each of its sources, separated by `": "`.
pub(crate) fn error_chain(error: &(dyn std::error::Error + 'static)) -> String {
    let mut rendered = error.to_string();
    let mut current = error.source();
    while let Some(source) = current {
        rendered.push_str(": ");
        rendered.push_str(&source.to_string());
        current = source.source();
    }
    rendered
}
