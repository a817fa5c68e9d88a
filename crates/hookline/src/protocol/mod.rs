//! Host message framing.
//!
//! The emitter writes one JSON object per line to the hook's input stream:
//!
//! ```text
//! {"schema_version": 1, "type": "hook-event", "seq": 1, "event": {...}}
//! ```
//!
//! Only messages whose `type` is [`HOOK_EVENT_KIND`] carry events; other kinds
//! are reserved for future use and skipped by the host. The `event` field is an
//! envelope, resolved by [`crate::envelope::resolve`].

use serde::Serialize;
use serde_json::Value;

use crate::coerce;
use crate::error::{HookError, excerpt};

/// Message kind carrying a hook event.
pub const HOOK_EVENT_KIND: &str = "hook-event";

/// Schema version written by [`HostMessage::hook_event`].
pub const HOST_SCHEMA_VERSION: i64 = 1;

/// One line of the host stream.
///
/// Parsing is tolerant: header fields are coerced the same way event fields
/// are, and a missing `event` is treated as `null`.
///
/// # Example
///
/// ```
/// use hookline::protocol::HostMessage;
/// use serde_json::json;
///
/// let message = HostMessage::hook_event(7, json!({"type": "session-start"}));
/// let line = message.to_line().unwrap();
/// let parsed = HostMessage::from_line(&line, 1).unwrap();
/// assert!(parsed.is_hook_event());
/// assert_eq!(parsed.seq(), Some(7));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HostMessage {
    #[serde(skip_serializing_if = "Option::is_none")]
    schema_version: Option<i64>,
    #[serde(rename = "type")]
    kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    seq: Option<i64>,
    event: Value,
}

impl HostMessage {
    /// Creates a `hook-event` message wrapping an envelope.
    #[must_use]
    pub fn hook_event(seq: i64, event: Value) -> Self {
        Self {
            schema_version: Some(HOST_SCHEMA_VERSION),
            kind: HOOK_EVENT_KIND.to_owned(),
            seq: Some(seq),
            event,
        }
    }

    /// Parses one stream line.
    ///
    /// `line_number` is one-based and only used for diagnostics.
    ///
    /// # Errors
    ///
    /// Returns [`HookError::MalformedEnvelopeLine`] when the line is not JSON
    /// or is JSON but not an object.
    pub fn from_line(line: &str, line_number: u64) -> Result<Self, HookError> {
        let malformed = |message: String| HookError::MalformedEnvelopeLine {
            line: line_number,
            message,
            excerpt: excerpt(line),
        };
        let value: Value =
            serde_json::from_str(line).map_err(|error| malformed(error.to_string()))?;
        let Value::Object(mut object) = value else {
            return Err(malformed(String::from("host message is not a JSON object")));
        };
        Ok(Self {
            schema_version: object.get("schema_version").and_then(coerce::integer),
            kind: object
                .get("type")
                .and_then(coerce::string)
                .unwrap_or_default(),
            seq: object.get("seq").and_then(coerce::integer),
            event: object.remove("event").unwrap_or(Value::Null),
        })
    }

    /// Serialises the message as a single line without a trailing newline.
    ///
    /// # Errors
    ///
    /// Returns an error if the event cannot be serialised.
    pub fn to_line(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Returns the schema version, when sent.
    #[must_use]
    pub const fn schema_version(&self) -> Option<i64> {
        self.schema_version
    }

    /// Returns the message kind; empty when missing.
    #[must_use]
    pub const fn kind(&self) -> &str {
        self.kind.as_str()
    }

    /// Returns whether this message carries a hook event.
    #[must_use]
    pub fn is_hook_event(&self) -> bool {
        self.kind == HOOK_EVENT_KIND
    }

    /// Returns the sequence number, when sent.
    #[must_use]
    pub const fn seq(&self) -> Option<i64> {
        self.seq
    }

    /// Returns the envelope.
    #[must_use]
    pub const fn event(&self) -> &Value {
        &self.event
    }

    /// Consumes the message, returning the envelope.
    #[must_use]
    pub fn into_event(self) -> Value {
        self.event
    }
}
