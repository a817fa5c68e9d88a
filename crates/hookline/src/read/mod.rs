//! One-shot payload readers.
//!
//! Hooks launched once per event receive a single envelope on stdin instead
//! of a host stream. These helpers read it whole, resolve it, and optionally
//! bind it.

use std::io::{self, Read};

use serde_json::Value;

use crate::RawEvent;
use crate::envelope;
use crate::error::HookError;
use crate::event::{self, HookEvent};

/// Reads one envelope from `reader` and resolves it.
///
/// Empty or whitespace-only input yields an empty payload.
///
/// # Errors
///
/// Returns [`HookError::ReadInput`] if reading fails,
/// [`HookError::InvalidPayload`] if the input is not JSON, and
/// [`HookError::PayloadUnavailable`] if the envelope names an unusable file.
///
/// # Example
///
/// ```
/// use hookline::read::read_payload_from_reader;
///
/// let raw = read_payload_from_reader(&b"{\"type\":\"session-end\"}"[..]).unwrap();
/// assert_eq!(raw.len(), 1);
/// assert!(read_payload_from_reader(&b"  \n"[..]).unwrap().is_empty());
/// ```
pub fn read_payload_from_reader<R: Read>(mut reader: R) -> Result<RawEvent, HookError> {
    let mut buffer = Vec::new();
    reader.read_to_end(&mut buffer)?;
    if buffer.iter().all(u8::is_ascii_whitespace) {
        return Ok(RawEvent::new());
    }
    let value: Value = serde_json::from_slice(&buffer)?;
    envelope::resolve(value)
}

/// Reads one envelope from standard input and resolves it.
///
/// # Errors
///
/// See [`read_payload_from_reader`].
pub fn read_payload_from_stdin() -> Result<RawEvent, HookError> {
    read_payload_from_reader(io::stdin().lock())
}

/// Reads one envelope from `reader`, resolves it, and binds it.
///
/// # Errors
///
/// See [`read_payload_from_reader`].
pub fn read_event_from_reader<R: Read>(reader: R) -> Result<HookEvent, HookError> {
    read_payload_from_reader(reader).map(event::bind)
}

/// Reads one envelope from standard input, resolves it, and binds it.
///
/// # Errors
///
/// See [`read_payload_from_reader`].
pub fn read_event_from_stdin() -> Result<HookEvent, HookError> {
    read_event_from_reader(io::stdin().lock())
}
