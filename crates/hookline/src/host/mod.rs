//! The long-lived dispatch loop.
//!
//! [`HookHost::run`] reads host messages line by line, resolves each event's
//! envelope, and hands the raw payload to a [`HookHandler`]. Nothing that goes
//! wrong with a single line stops the loop: malformed lines, foreign message
//! kinds, unreadable payload files, and failing or panicking handlers are
//! reported to a [`DiagnosticSink`] and skipped. The loop ends only when the
//! input does.

mod diagnostics;

use std::any::Any;
use std::io::BufRead;
use std::marker::PhantomData;
use std::panic::{self, AssertUnwindSafe};
use std::process::ExitCode;

use tracing::debug;

use crate::RawEvent;
use crate::envelope;
use crate::error::{HookError, error_chain, excerpt};
use crate::keys;
use crate::protocol::HostMessage;

pub use diagnostics::{DiagnosticSink, HOST_TARGET, TracingDiagnostics};

/// Receives resolved hook events.
///
/// Handlers are called synchronously, one event at a time; the next line is
/// not read until `on_event` returns. Returned errors and panics are reported
/// as [`HookError::HandlerFailure`] and do not stop the loop.
///
/// # Example
///
/// ```
/// use hookline::{HookHandler, RawEvent};
///
/// #[derive(Default)]
/// struct Counter(usize);
///
/// impl HookHandler for Counter {
///     type Error = std::convert::Infallible;
///
///     fn on_event(&mut self, _event: &RawEvent) -> Result<(), Self::Error> {
///         self.0 += 1;
///         Ok(())
///     }
/// }
/// ```
pub trait HookHandler {
    /// Error returned when the handler cannot process an event.
    type Error: std::error::Error + 'static;

    /// Handles one resolved event.
    ///
    /// # Errors
    ///
    /// Any error is reported by the host together with its source chain.
    fn on_event(&mut self, event: &RawEvent) -> Result<(), Self::Error>;
}

/// Adapts a closure into a [`HookHandler`]. Built by [`handler_fn`].
pub struct HandlerFn<F, E> {
    callback: F,
    error: PhantomData<fn() -> E>,
}

/// Wraps a closure as a [`HookHandler`].
///
/// # Example
///
/// ```
/// use std::io::Cursor;
///
/// use hookline::{HookHost, handler_fn};
///
/// let mut seen = Vec::new();
/// let input = Cursor::new("{\"type\":\"hook-event\",\"seq\":1,\"event\":{\"type\":\"session-start\"}}\n");
/// let summary = HookHost::new().run(
///     input,
///     &mut handler_fn(|event| {
///         seen.push(event.clone());
///         Ok::<(), std::io::Error>(())
///     }),
/// );
/// assert_eq!(summary.dispatched(), 1);
/// assert_eq!(seen.len(), 1);
/// ```
pub const fn handler_fn<F, E>(callback: F) -> HandlerFn<F, E>
where
    F: FnMut(&RawEvent) -> Result<(), E>,
    E: std::error::Error + 'static,
{
    HandlerFn {
        callback,
        error: PhantomData,
    }
}

impl<F, E> HookHandler for HandlerFn<F, E>
where
    F: FnMut(&RawEvent) -> Result<(), E>,
    E: std::error::Error + 'static,
{
    type Error = E;

    fn on_event(&mut self, event: &RawEvent) -> Result<(), Self::Error> {
        (self.callback)(event)
    }
}

/// Counts describing one run of the dispatch loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HostSummary {
    lines_read: u64,
    dispatched: u64,
    skipped: u64,
    handler_failures: u64,
}

impl HostSummary {
    /// Lines read from the input, including blank ones.
    #[must_use]
    pub const fn lines_read(&self) -> u64 {
        self.lines_read
    }

    /// Events handed to the handler, whether or not it succeeded.
    #[must_use]
    pub const fn dispatched(&self) -> u64 {
        self.dispatched
    }

    /// Non-blank lines that never reached the handler.
    #[must_use]
    pub const fn skipped(&self) -> u64 {
        self.skipped
    }

    /// Handler calls that returned an error or panicked.
    #[must_use]
    pub const fn handler_failures(&self) -> u64 {
        self.handler_failures
    }

    /// Exit status for a host process. Reaching the end of the input is
    /// always a success.
    #[must_use]
    pub const fn exit_code(&self) -> ExitCode {
        ExitCode::SUCCESS
    }
}

enum LineOutcome {
    Blank,
    Skipped,
    Dispatched,
    HandlerFailed,
}

/// Drives a handler from a line-oriented host stream.
#[derive(Debug, Default)]
pub struct HookHost<D = TracingDiagnostics> {
    diagnostics: D,
}

impl HookHost {
    /// Creates a host that reports diagnostics through `tracing`.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            diagnostics: TracingDiagnostics,
        }
    }
}

impl<D: DiagnosticSink> HookHost<D> {
    /// Creates a host that reports diagnostics to `diagnostics`.
    #[must_use]
    pub const fn with_diagnostics(diagnostics: D) -> Self {
        Self { diagnostics }
    }

    /// Returns the diagnostic sink.
    #[must_use]
    pub const fn diagnostics(&self) -> &D {
        &self.diagnostics
    }

    /// Reads `input` to the end, dispatching every hook event to `handler`.
    ///
    /// Lines that are blank after trimming are skipped silently. A read error
    /// other than invalid UTF-8 is reported and ends the run as if the input
    /// had ended.
    pub fn run<R, H>(&mut self, mut input: R, handler: &mut H) -> HostSummary
    where
        R: BufRead,
        H: HookHandler + ?Sized,
    {
        let mut summary = HostSummary::default();
        let mut buffer = Vec::new();
        loop {
            buffer.clear();
            match input.read_until(b'\n', &mut buffer) {
                Ok(0) => break,
                Ok(_) => {}
                Err(source) => {
                    self.diagnostics.report(&HookError::from(source));
                    break;
                }
            }
            summary.lines_read += 1;
            match self.process_line(&buffer, summary.lines_read, handler) {
                LineOutcome::Blank => {}
                LineOutcome::Skipped => summary.skipped += 1,
                LineOutcome::Dispatched => summary.dispatched += 1,
                LineOutcome::HandlerFailed => {
                    summary.dispatched += 1;
                    summary.handler_failures += 1;
                }
            }
        }
        debug!(
            target: HOST_TARGET,
            lines_read = summary.lines_read,
            dispatched = summary.dispatched,
            skipped = summary.skipped,
            handler_failures = summary.handler_failures,
            "hook input ended"
        );
        summary
    }

    fn process_line<H>(&mut self, bytes: &[u8], line: u64, handler: &mut H) -> LineOutcome
    where
        H: HookHandler + ?Sized,
    {
        let text = match std::str::from_utf8(bytes) {
            Ok(text) => text.trim(),
            Err(source) => {
                self.diagnostics.report(&HookError::MalformedEnvelopeLine {
                    line,
                    message: format!("invalid UTF-8: {source}"),
                    excerpt: excerpt(String::from_utf8_lossy(bytes).trim()),
                });
                return LineOutcome::Skipped;
            }
        };
        if text.is_empty() {
            return LineOutcome::Blank;
        }
        let message = match HostMessage::from_line(text, line) {
            Ok(message) => message,
            Err(diagnostic) => {
                self.diagnostics.report(&diagnostic);
                return LineOutcome::Skipped;
            }
        };
        if !message.is_hook_event() {
            self.diagnostics.report(&HookError::UnrecognizedMessageKind {
                line,
                kind: message.kind().to_owned(),
            });
            return LineOutcome::Skipped;
        }
        self.dispatch(message, handler)
    }

    fn dispatch<H>(&mut self, message: HostMessage, handler: &mut H) -> LineOutcome
    where
        H: HookHandler + ?Sized,
    {
        let seq = message.seq();
        let raw = match envelope::resolve(message.into_event()) {
            Ok(raw) => raw,
            Err(diagnostic) => {
                self.diagnostics.report(&diagnostic);
                return LineOutcome::Skipped;
            }
        };
        let event_type = keys::discriminant(&raw);
        debug!(target: HOST_TARGET, ?seq, %event_type, "dispatching hook event");

        let failure = match panic::catch_unwind(AssertUnwindSafe(|| handler.on_event(&raw))) {
            Ok(Ok(())) => return LineOutcome::Dispatched,
            Ok(Err(source)) => error_chain(&source),
            Err(payload) => panic_message(payload.as_ref()),
        };
        self.diagnostics.report(&HookError::HandlerFailure {
            seq,
            event_type,
            message: failure,
        });
        LineOutcome::HandlerFailed
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    let detail = payload
        .downcast_ref::<&str>()
        .map(|text| (*text).to_owned())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| String::from("non-string panic payload"));
    format!("handler panicked: {detail}")
}
