//! Unit tests for event binding.

use rstest::rstest;
use serde_json::{Value, json};

use super::*;

fn raw(value: Value) -> RawEvent {
    match value {
        Value::Object(map) => map,
        other => panic!("expected an object, got {other}"),
    }
}

fn tool_call_finished(value: Value) -> ToolCallFinished {
    match bind(raw(value)) {
        HookEvent::ToolCallFinished(event) => event,
        other => panic!("expected tool-call-finished, got {:?}", other.kind()),
    }
}

fn assert_disjoint(event: &HookEvent, named: &[&str]) {
    for key in event.extras().keys() {
        let canonical = keys::canonical_key(key);
        assert!(
            !keys::COMMON_FIELDS.contains(&canonical.as_ref()),
            "common field '{key}' leaked into extras"
        );
        assert!(
            !named.contains(&canonical.as_ref()),
            "named field '{key}' leaked into extras"
        );
    }
}

#[rstest]
#[case("agent-turn-complete", EventKind::AgentTurnComplete, AgentTurnComplete::FIELDS)]
#[case("approval-requested", EventKind::ApprovalRequested, ApprovalRequested::FIELDS)]
#[case("model-request-started", EventKind::ModelRequestStarted, ModelRequestStarted::FIELDS)]
#[case(
    "model-response-completed",
    EventKind::ModelResponseCompleted,
    ModelResponseCompleted::FIELDS
)]
#[case("session-start", EventKind::SessionStart, SessionStart::FIELDS)]
#[case("session-end", EventKind::SessionEnd, SessionEnd::FIELDS)]
#[case("tool-call-started", EventKind::ToolCallStarted, ToolCallStarted::FIELDS)]
#[case("tool-call-finished", EventKind::ToolCallFinished, ToolCallFinished::FIELDS)]
fn known_shapes_keep_extras_disjoint(
    #[case] discriminant: &str,
    #[case] expected: EventKind,
    #[case] named: &[&str],
) {
    let mut payload = raw(json!({
        "schema_version": 1,
        "event-id": "e1",
        "timestamp": "2025-01-01T00:00:00Z",
        "type": discriminant,
        "future-field": {"nested": true},
        "another_future": 7
    }));
    let mut hyphenated = true;
    for key in named {
        let spelling = if hyphenated {
            (*key).to_owned()
        } else {
            key.replace('-', "_")
        };
        payload.insert(spelling, json!("value"));
        hyphenated = !hyphenated;
    }

    let event = bind(payload.clone());

    assert_eq!(event.kind(), expected);
    assert_eq!(event.raw(), &payload);
    assert_disjoint(&event, named);
    assert_eq!(event.extras().len(), 2);
    assert_eq!(event.extras().get("another_future"), Some(&json!(7)));
}

#[rstest]
#[case(json!({"type": "brand-new-event", "x": 1}))]
#[case(json!({"type": "", "x": 1}))]
#[case(json!({"x": 1}))]
#[case(json!({"type": 42, "x": 1}))]
fn unrecognised_discriminants_bind_to_unknown(#[case] value: Value) {
    let payload = raw(value);
    let event = bind(payload.clone());
    assert_eq!(event.kind(), EventKind::Unknown);
    assert_eq!(event.raw(), &payload);
    assert_eq!(event.extras().get("x"), Some(&json!(1)));
    assert!(!event.extras().contains_key("type"));
}

#[rstest]
#[case(json!(null))]
#[case(json!([1, 2]))]
#[case(json!("tool-call-finished"))]
fn non_object_values_bind_to_empty_unknown(#[case] value: Value) {
    let event = HookEvent::from_value(value);
    assert_eq!(event.kind(), EventKind::Unknown);
    assert!(event.raw().is_empty());
    assert_eq!(event.event_type(), "");
}

#[test]
fn binding_is_idempotent() {
    let payload = raw(json!({
        "type": "approval-requested",
        "command": ["ls", 1, null],
        "approval_policy": {"mode": "on-request"},
        "extra": [1, 2, 3]
    }));
    assert_eq!(bind(payload.clone()), bind(payload));
}

#[test]
fn fields_are_coerced_permissively() {
    let event = tool_call_finished(json!({
        "type": "tool-call-finished",
        "attempt": "3",
        "success": "no",
        "duration-ms": 12.9,
        "output-bytes": true,
        "status": 0
    }));
    assert_eq!(event.attempt(), Some(3));
    assert_eq!(event.success(), Some(false));
    assert_eq!(event.duration_ms(), Some(12));
    assert_eq!(event.output_bytes(), Some(1));
    assert_eq!(event.status(), Some("0"));
    assert_eq!(event.tool_name(), None);
}

#[test]
fn unusable_values_are_absent_not_defaulted() {
    let payload = raw(json!({"type": "model-request-started", "tool-count": "abc"}));
    let HookEvent::ModelRequestStarted(event) = bind(payload) else {
        panic!("expected model-request-started");
    };
    assert_eq!(event.tool_count(), None);
    assert_eq!(event.attempt(), None);
    assert_eq!(event.parallel_tool_calls(), None);
}

#[test]
fn header_is_coerced_with_defaults() {
    let sparse = bind(raw(json!({"type": "session-start", "schema-version": "x"})));
    let header = sparse.header();
    assert_eq!(header.schema_version(), 0);
    assert_eq!(header.event_id(), "");
    assert_eq!(header.timestamp(), "");
    assert_eq!(header.event_type(), "session-start");

    let coerced = bind(raw(json!({"type": "session-start", "schema_version": "2", "event_id": 9})));
    assert_eq!(coerced.header().schema_version(), 2);
    assert_eq!(coerced.header().event_id(), "9");
}

#[test]
fn underscore_payload_binds_through_lifecycle_name() {
    let event = tool_call_finished(json!({
        "hook_event_name": "PostToolUse",
        "session_id": "s1",
        "tool_name": "shell",
        "call_id": "c1",
        "duration_ms": 40,
        "cwd": "/work"
    }));
    assert_eq!(event.header().event_type(), "PostToolUse");
    assert_eq!(event.tool_name(), Some("shell"));
    assert_eq!(event.call_id(), Some("c1"));
    assert_eq!(event.duration_ms(), Some(40));
    assert_eq!(event.cwd(), Some("/work"));
    assert_eq!(event.extras().len(), 1);
    assert_eq!(event.extras().get("session_id"), Some(&json!("s1")));
}

#[test]
fn canonical_event_type_beats_registration_name() {
    let event = tool_call_finished(json!({
        "hook_event_name": "tool_call_finished",
        "xcodex_event_type": "tool-call-finished",
        "tool_name": "shell",
        "schema_version": 1
    }));
    assert_eq!(event.header().event_type(), "tool-call-finished");
    assert_eq!(event.tool_name(), Some("shell"));
    assert!(event.extras().is_empty());
}

#[rstest]
#[case(json!({"hook_event_name": "SessionStart", "xcodex_event_type": "session-start"}))]
#[case(json!({"hook-event-name": "session.start", "xcodex-event-type": "session-start"}))]
#[case(json!({"hook_event_name": "session_start"}))]
fn event_name_spellings_stay_out_of_extras(#[case] value: Value) {
    let event = HookEvent::from_value(value);
    assert_eq!(event.kind(), EventKind::SessionStart);
    assert!(event.extras().is_empty());
}

#[test]
fn hyphenated_spelling_wins_for_named_fields() {
    let event = tool_call_finished(json!({
        "type": "tool-call-finished",
        "tool_name": "old",
        "tool-name": "new"
    }));
    assert_eq!(event.tool_name(), Some("new"));
    assert!(event.extras().is_empty());
}

#[rstest]
#[case("turn-complete")]
#[case("Stop")]
#[case("agent-turn-complete")]
fn turn_complete_aliases(#[case] discriminant: &str) {
    let event = bind(raw(json!({"type": discriminant, "input-messages": ["hi", 3]})));
    let HookEvent::AgentTurnComplete(turn) = event else {
        panic!("expected agent-turn-complete");
    };
    assert_eq!(turn.input_messages(), Some(&["hi".to_owned(), "3".to_owned()][..]));
    assert_eq!(turn.header().event_type(), discriminant);
}

#[test]
fn opaque_fields_pass_through() {
    let policy = json!({"mode": "workspace-write", "roots": ["/a"]});
    let event = bind(raw(json!({"type": "approval-requested", "sandbox-policy": policy.clone()})));
    let HookEvent::ApprovalRequested(approval) = event else {
        panic!("expected approval-requested");
    };
    assert_eq!(approval.sandbox_policy(), Some(&policy));
    assert_eq!(approval.approval_policy(), None);
}

#[test]
fn token_usage_counts_accept_either_spelling() {
    let event = bind(raw(json!({
        "type": "model-response-completed",
        "token_usage": {
            "input_tokens": 10,
            "cached-input-tokens": "4",
            "output_tokens": 2.0,
            "total_tokens": null
        }
    })));
    let HookEvent::ModelResponseCompleted(response) = event else {
        panic!("expected model-response-completed");
    };
    let usage = response.token_usage_counts().expect("token usage object");
    assert_eq!(
        usage,
        TokenUsage {
            input_tokens: Some(10),
            cached_input_tokens: Some(4),
            output_tokens: Some(2),
            reasoning_output_tokens: None,
            total_tokens: None,
        }
    );
}

#[test]
fn token_usage_requires_an_object() {
    assert_eq!(TokenUsage::from_value(&json!([1, 2])), None);
}

#[test]
fn into_raw_and_json_value_return_the_payload() {
    let payload = raw(json!({"type": "session-end", "thread-id": "t"}));
    let event = bind(payload.clone());
    assert_eq!(event.to_json_value(), Value::Object(payload.clone()));
    assert_eq!(event.into_raw(), payload);
}

#[rstest]
#[case("PermissionRequest", EventKind::ApprovalRequested)]
#[case("PreToolUse", EventKind::ToolCallStarted)]
#[case("SessionStart", EventKind::SessionStart)]
#[case("SessionEnd", EventKind::SessionEnd)]
#[case("model-response-completed", EventKind::ModelResponseCompleted)]
#[case("agent_turn_complete", EventKind::AgentTurnComplete)]
#[case("approval_requested", EventKind::ApprovalRequested)]
#[case("model_request_started", EventKind::ModelRequestStarted)]
#[case("model_response_completed", EventKind::ModelResponseCompleted)]
#[case("session_end", EventKind::SessionEnd)]
#[case("tool_call_started", EventKind::ToolCallStarted)]
#[case("tool_call_finished", EventKind::ToolCallFinished)]
#[case("session.start", EventKind::SessionStart)]
#[case("session.end", EventKind::SessionEnd)]
#[case("tool.execute.before", EventKind::ToolCallStarted)]
#[case("tool.execute.after", EventKind::ToolCallFinished)]
#[case("TOOL-CALL-FINISHED", EventKind::Unknown)]
fn event_kinds_from_discriminants(#[case] discriminant: &str, #[case] expected: EventKind) {
    assert_eq!(EventKind::from_discriminant(discriminant), expected);
}

#[test]
fn event_kind_names_are_canonical() {
    assert_eq!(EventKind::AgentTurnComplete.as_str(), "agent-turn-complete");
    assert_eq!(EventKind::Unknown.as_str(), "unknown");
    assert!(!EventKind::Unknown.is_known());
    assert!(EventKind::SessionEnd.is_known());
}
