//! Key normalisation for payloads from both protocol generations.
//!
//! Emitters have used hyphen-separated keys (`thread-id`) and
//! underscore-separated keys (`thread_id`) for the same field. The binder
//! never looks a field up under both spellings itself: it builds a
//! [`NormalizedKeys`] view once per payload and queries canonical,
//! hyphenated names against it. The raw mapping is never rewritten.

use std::borrow::Cow;
use std::collections::HashMap;

use serde_json::Value;

use crate::RawEvent;
use crate::coerce;

/// Canonical key of the schema version.
pub const SCHEMA_VERSION: &str = "schema-version";

/// Canonical key of the event identifier.
pub const EVENT_ID: &str = "event-id";

/// Canonical key of the event timestamp.
pub const TIMESTAMP: &str = "timestamp";

/// Canonical key of the discriminant.
pub const DISCRIMINANT: &str = "type";

/// Canonical keys present on every event.
pub const COMMON_FIELDS: &[&str] = &[SCHEMA_VERSION, EVENT_ID, TIMESTAMP, DISCRIMINANT];

/// Keys that may carry the discriminant, in lookup order.
pub const DISCRIMINANT_KEYS: &[&str] = &[
    "type",
    "event-type",
    "event_type",
    "xcodex-event-type",
    "xcodex_event_type",
    "hook-event-name",
    "hook_event_name",
];

/// Returns the canonical spelling of `key`.
///
/// Underscores become hyphens and every discriminant spelling maps to
/// [`DISCRIMINANT`].
///
/// # Example
///
/// ```
/// use hookline::keys::canonical_key;
///
/// assert_eq!(canonical_key("thread_id"), "thread-id");
/// assert_eq!(canonical_key("hook_event_name"), "type");
/// assert_eq!(canonical_key("cwd"), "cwd");
/// ```
#[must_use]
pub fn canonical_key(key: &str) -> Cow<'_, str> {
    if DISCRIMINANT_KEYS.contains(&key) {
        return Cow::Borrowed(DISCRIMINANT);
    }
    if key.contains('_') {
        Cow::Owned(key.replace('_', "-"))
    } else {
        Cow::Borrowed(key)
    }
}

/// Reads the discriminant of a raw payload as text, verbatim.
///
/// The first non-null value among [`DISCRIMINANT_KEYS`] wins, so the canonical
/// `xcodex_event_type` beats `hook_event_name`, which carries whatever key the
/// hook was registered under. Returns an empty string when no discriminant is
/// present. Registration names such as `PostToolUse` are mapped to event kinds by
/// [`EventKind`](crate::event::EventKind), not here.
#[must_use]
pub fn discriminant(raw: &RawEvent) -> String {
    DISCRIMINANT_KEYS
        .iter()
        .filter_map(|key| raw.get(*key))
        .find_map(coerce::string)
        .unwrap_or_default()
}

/// Canonical-key view over a raw payload.
///
/// When both spellings of a key are present the hyphenated one wins.
/// Discriminant keys are excluded; read them through [`discriminant`].
#[derive(Debug)]
pub struct NormalizedKeys<'a> {
    raw: &'a RawEvent,
    fields: HashMap<Cow<'a, str>, &'a Value>,
}

impl<'a> NormalizedKeys<'a> {
    /// Builds the view in a single pass over `raw`.
    #[must_use]
    pub fn new(raw: &'a RawEvent) -> Self {
        let mut fields: HashMap<Cow<'a, str>, &'a Value> = HashMap::with_capacity(raw.len());
        for (key, value) in raw {
            let canonical = canonical_key(key);
            if canonical == DISCRIMINANT {
                continue;
            }
            let is_canonical_spelling = canonical.as_ref() == key.as_str();
            if is_canonical_spelling || !fields.contains_key(&canonical) {
                fields.insert(canonical, value);
            }
        }
        Self { raw, fields }
    }

    /// Looks up a field by its canonical key.
    #[must_use]
    pub fn get(&self, canonical: &str) -> Option<&'a Value> {
        self.fields.get(canonical).copied()
    }

    /// Returns the raw entries whose keys are neither common fields nor in
    /// `named`, under either spelling. Keys keep their original spelling.
    #[must_use]
    pub fn extras(&self, named: &[&str]) -> RawEvent {
        self.raw
            .iter()
            .filter(|(key, _)| !is_known_key(key, named))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }
}

/// Returns whether `key` names a common field or one of `named`.
#[must_use]
pub fn is_known_key(key: &str, named: &[&str]) -> bool {
    let canonical = canonical_key(key);
    COMMON_FIELDS.contains(&canonical.as_ref()) || named.contains(&canonical.as_ref())
}

#[cfg(test)]
mod tests;
