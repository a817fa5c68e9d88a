//! Unit tests for key normalisation.

use rstest::rstest;
use serde_json::{Value, json};

use super::*;

fn raw(value: Value) -> RawEvent {
    match value {
        Value::Object(map) => map,
        other => panic!("expected an object, got {other}"),
    }
}

#[rstest]
#[case("thread-id", "thread-id")]
#[case("thread_id", "thread-id")]
#[case("schema_version", "schema-version")]
#[case("type", "type")]
#[case("event_type", "type")]
#[case("hook-event-name", "type")]
#[case("xcodex_event_type", "type")]
#[case("x", "x")]
fn canonical_spellings(#[case] key: &str, #[case] expected: &str) {
    assert_eq!(canonical_key(key), expected);
}

#[test]
fn discriminant_prefers_type_over_event_name() {
    let payload = raw(json!({"hook_event_name": "PostToolUse", "type": "session-end"}));
    assert_eq!(discriminant(&payload), "session-end");
}

#[test]
fn discriminant_falls_back_to_event_name() {
    let payload = raw(json!({"hook_event_name": "PostToolUse"}));
    assert_eq!(discriminant(&payload), "PostToolUse");
}

#[test]
fn discriminant_prefers_canonical_event_type_over_event_name() {
    let payload = raw(json!({
        "hook_event_name": "tool_call_finished",
        "xcodex_event_type": "tool-call-finished"
    }));
    assert_eq!(discriminant(&payload), "tool-call-finished");
}

#[test]
fn discriminant_skips_nulls_and_defaults_to_empty() {
    assert_eq!(discriminant(&raw(json!({"type": null}))), "");
    assert_eq!(discriminant(&raw(json!({}))), "");
    assert_eq!(
        discriminant(&raw(json!({"type": null, "event_type": "x"}))),
        "x"
    );
}

#[test]
fn normalized_view_accepts_either_spelling() {
    let payload = raw(json!({"thread_id": "t1", "call-id": "c1"}));
    let keys = NormalizedKeys::new(&payload);
    assert_eq!(keys.get("thread-id"), Some(&json!("t1")));
    assert_eq!(keys.get("call-id"), Some(&json!("c1")));
    assert_eq!(keys.get("turn-id"), None);
}

#[test]
fn hyphenated_spelling_wins_when_both_present() {
    let payload = raw(json!({"thread_id": "old", "thread-id": "new"}));
    let keys = NormalizedKeys::new(&payload);
    assert_eq!(keys.get("thread-id"), Some(&json!("new")));
}

#[test]
fn discriminant_keys_are_not_fields() {
    let payload = raw(json!({"type": "x", "hook_event_name": "Stop"}));
    let keys = NormalizedKeys::new(&payload);
    assert_eq!(keys.get("type"), None);
    assert_eq!(keys.get("hook-event-name"), None);
}

#[test]
fn extras_exclude_common_and_named_fields_in_both_spellings() {
    let payload = raw(json!({
        "schema_version": 1,
        "event-id": "e",
        "timestamp": "t",
        "hook_event_name": "Stop",
        "thread_id": "t1",
        "cwd": "/a",
        "session_id": "s",
        "__marker__": true
    }));
    let keys = NormalizedKeys::new(&payload);
    let extras = keys.extras(&["thread-id", "cwd"]);
    let mut names: Vec<&str> = extras.keys().map(String::as_str).collect();
    names.sort_unstable();
    assert_eq!(names, vec!["__marker__", "session_id"]);
}
