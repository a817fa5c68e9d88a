//! Envelope resolution.
//!
//! Small payloads travel inline in the host message. Large payloads are
//! written to a file by the emitter and the envelope carries only the path in
//! an indirection field. [`resolve`] hides the difference from callers.

use std::fs;
use std::path::Path;

use serde_json::Value;
use tracing::debug;

use crate::RawEvent;
use crate::error::HookError;

/// Tracing target for envelope resolution.
pub const ENVELOPE_TARGET: &str = "hookline::envelope";

/// Indirection field spellings, in lookup order.
pub const PAYLOAD_PATH_KEYS: &[&str] = &["payload-path", "payload_path"];

/// Returns the payload path named by an envelope, if any.
///
/// Only non-empty string values count; the hyphenated spelling is checked
/// first.
#[must_use]
pub fn payload_path(envelope: &Value) -> Option<&str> {
    let object = envelope.as_object()?;
    PAYLOAD_PATH_KEYS
        .iter()
        .filter_map(|key| object.get(*key).and_then(Value::as_str))
        .find(|path| !path.is_empty())
}

/// Resolves an envelope into the raw event it carries.
///
/// A non-empty indirection field always wins over inline fields. The referenced
/// file is read once, closed, and parsed; nothing is cached. An inline
/// envelope that is not a JSON object resolves to an empty mapping.
///
/// # Errors
///
/// Returns [`HookError::PayloadUnavailable`] when the referenced file cannot
/// be read, is not valid JSON, or does not hold a JSON object.
///
/// # Example
///
/// ```
/// use hookline::envelope::resolve;
/// use serde_json::json;
///
/// let raw = resolve(json!({"type": "session-start", "thread-id": "t1"})).unwrap();
/// assert_eq!(raw.get("thread-id"), Some(&json!("t1")));
/// ```
pub fn resolve(envelope: Value) -> Result<RawEvent, HookError> {
    if let Some(path) = payload_path(&envelope) {
        return read_payload_file(Path::new(path));
    }
    match envelope {
        Value::Object(map) => Ok(map),
        _ => Ok(RawEvent::new()),
    }
}

fn read_payload_file(path: &Path) -> Result<RawEvent, HookError> {
    debug!(
        target: ENVELOPE_TARGET,
        path = %path.display(),
        "reading payload by reference"
    );
    let unavailable = |message: String| HookError::PayloadUnavailable {
        path: path.to_path_buf(),
        message,
    };
    let text = fs::read_to_string(path).map_err(|error| unavailable(error.to_string()))?;
    match serde_json::from_str::<Value>(&text) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(unavailable(String::from("payload is not a JSON object"))),
        Err(error) => Err(unavailable(error.to_string())),
    }
}
