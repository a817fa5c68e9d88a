//! Hook event protocol for observing agent sessions from an external process.
//!
//! An emitter writes lifecycle events (approvals, tool calls, model requests,
//! session boundaries) to a hook as JSON. This crate provides the hook side:
//!
//! - [`envelope`] resolves inline payloads and payloads passed by file path.
//! - [`event`] binds a raw payload to a typed event without ever failing,
//!   keeping unknown fields.
//! - [`host`] runs the long-lived loop that reads host messages line by line
//!   and calls a [`HookHandler`], isolating handler failures.
//! - [`read`] handles hooks that receive exactly one payload on stdin.
//!
//! # Example
//!
//! ```
//! use std::io::Cursor;
//!
//! use hookline::event::{self, HookEvent};
//! use hookline::{HookHost, handler_fn};
//!
//! let input = Cursor::new(concat!(
//!     r#"{"type":"hook-event","seq":1,"event":{"type":"tool-call-finished","tool-name":"shell"}}"#,
//!     "\n",
//! ));
//! let mut tools = Vec::new();
//! HookHost::new().run(
//!     input,
//!     &mut handler_fn(|raw| {
//!         if let HookEvent::ToolCallFinished(finished) = event::bind(raw.clone()) {
//!             tools.extend(finished.tool_name().map(str::to_owned));
//!         }
//!         Ok::<(), std::io::Error>(())
//!     }),
//! );
//! assert_eq!(tools, vec![String::from("shell")]);
//! ```

pub mod coerce;
pub mod envelope;
pub mod error;
pub mod event;
pub mod host;
pub mod keys;
pub mod protocol;
pub mod read;

#[cfg(test)]
mod tests;

/// A payload as received: a JSON object with open-ended keys.
pub type RawEvent = serde_json::Map<String, serde_json::Value>;

pub use error::HookError;
pub use event::{EventKind, HookEvent, bind};
pub use host::{DiagnosticSink, HookHandler, HookHost, HostSummary, TracingDiagnostics, handler_fn};
pub use protocol::HostMessage;
