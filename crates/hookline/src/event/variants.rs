//! Known event shapes.
//!
//! Each shape is generated by `hook_event!` from its discriminant and its
//! list of named fields. Named fields are coerced once, at bind time.

use serde_json::Value;

use super::EventHeader;
use crate::RawEvent;
use crate::coerce;
use crate::keys::NormalizedKeys;

macro_rules! field_storage {
    (text) => { Option<String> };
    (int) => { Option<i64> };
    (flag) => { Option<bool> };
    (texts) => { Option<Vec<String>> };
    (opaque) => { Option<Value> };
}

macro_rules! field_extract {
    (text, $value:expr) => { $value.and_then(coerce::string) };
    (int, $value:expr) => { $value.and_then(coerce::integer) };
    (flag, $value:expr) => { $value.and_then(coerce::boolean) };
    (texts, $value:expr) => { $value.and_then(coerce::string_list) };
    (opaque, $value:expr) => { $value.and_then(coerce::opaque) };
}

macro_rules! field_accessor {
    ($(#[$doc:meta])* $field:ident, text) => {
        $(#[$doc])*
        #[must_use]
        pub fn $field(&self) -> Option<&str> {
            self.$field.as_deref()
        }
    };
    ($(#[$doc:meta])* $field:ident, int) => {
        $(#[$doc])*
        #[must_use]
        pub const fn $field(&self) -> Option<i64> {
            self.$field
        }
    };
    ($(#[$doc:meta])* $field:ident, flag) => {
        $(#[$doc])*
        #[must_use]
        pub const fn $field(&self) -> Option<bool> {
            self.$field
        }
    };
    ($(#[$doc:meta])* $field:ident, texts) => {
        $(#[$doc])*
        #[must_use]
        pub fn $field(&self) -> Option<&[String]> {
            self.$field.as_deref()
        }
    };
    ($(#[$doc:meta])* $field:ident, opaque) => {
        $(#[$doc])*
        #[must_use]
        pub const fn $field(&self) -> Option<&Value> {
            self.$field.as_ref()
        }
    };
}

macro_rules! hook_event {
    (
        $(#[$meta:meta])*
        $name:ident $(=> $discriminant:literal)? {
            $( $(#[$doc:meta])* $field:ident : $kind:ident = $key:literal ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub struct $name {
            header: EventHeader,
            $( $field: field_storage!($kind), )*
            raw: RawEvent,
            extras: RawEvent,
        }

        impl $name {
            $(
                /// Canonical discriminant of this shape.
                pub const DISCRIMINANT: &'static str = $discriminant;
            )?

            /// Canonical keys of the named fields.
            pub const FIELDS: &'static [&'static str] = &[$($key),*];

            pub(crate) fn from_raw(raw: RawEvent) -> Self {
                let (header, extras, $($field,)*) = {
                    let keys = NormalizedKeys::new(&raw);
                    (
                        EventHeader::read(&raw, &keys),
                        keys.extras(Self::FIELDS),
                        $( field_extract!($kind, keys.get($key)), )*
                    )
                };
                Self {
                    header,
                    $( $field, )*
                    raw,
                    extras,
                }
            }

            /// Returns the common header.
            #[must_use]
            pub const fn header(&self) -> &EventHeader {
                &self.header
            }

            /// Returns the complete original payload.
            #[must_use]
            pub const fn raw(&self) -> &RawEvent {
                &self.raw
            }

            /// Returns the payload entries not named by this shape.
            #[must_use]
            pub const fn extras(&self) -> &RawEvent {
                &self.extras
            }

            /// Consumes the event, returning the original payload.
            #[must_use]
            pub fn into_raw(self) -> RawEvent {
                self.raw
            }

            $( field_accessor!($(#[$doc])* $field, $kind); )*
        }
    };
}

hook_event! {
    /// The agent finished a turn.
    AgentTurnComplete => "agent-turn-complete" {
        /// Conversation thread identifier.
        thread_id: text = "thread-id",
        /// Turn identifier.
        turn_id: text = "turn-id",
        /// Working directory of the session.
        cwd: text = "cwd",
        /// User messages that opened the turn.
        input_messages: texts = "input-messages",
        /// Final assistant message of the turn.
        last_assistant_message: text = "last-assistant-message",
    }
}

hook_event! {
    /// The agent is waiting for the user to approve an action.
    ApprovalRequested => "approval-requested" {
        /// Conversation thread identifier.
        thread_id: text = "thread-id",
        /// Turn identifier.
        turn_id: text = "turn-id",
        /// Working directory of the session.
        cwd: text = "cwd",
        /// What kind of approval is requested, such as `exec` or `apply-patch`.
        kind: text = "kind",
        /// Tool call awaiting approval.
        call_id: text = "call-id",
        /// Command line awaiting approval.
        command: texts = "command",
        /// Paths touched by the action.
        paths: texts = "paths",
        /// Approval policy in force, as sent.
        approval_policy: opaque = "approval-policy",
        /// Sandbox policy in force, as sent.
        sandbox_policy: opaque = "sandbox-policy",
        /// Root the user is asked to grant write access to.
        grant_root: text = "grant-root",
        /// Identifier of an elicitation request.
        request_id: text = "request-id",
        /// Message shown with the request.
        message: text = "message",
        /// Reason given for the request.
        reason: text = "reason",
        /// MCP server asking for input.
        server_name: text = "server-name",
        /// Proposed amendment to the exec policy.
        proposed_execpolicy_amendment: texts = "proposed-execpolicy-amendment",
    }
}

hook_event! {
    /// A model request is about to be sent.
    ModelRequestStarted => "model-request-started" {
        /// Conversation thread identifier.
        thread_id: text = "thread-id",
        /// Turn identifier.
        turn_id: text = "turn-id",
        /// Working directory of the session.
        cwd: text = "cwd",
        /// Model request identifier.
        model_request_id: text = "model-request-id",
        /// Retry attempt, starting at one.
        attempt: int = "attempt",
        /// Model name.
        model: text = "model",
        /// Model provider.
        provider: text = "provider",
        /// Number of input items in the prompt.
        prompt_input_item_count: int = "prompt-input-item-count",
        /// Number of tools offered to the model.
        tool_count: int = "tool-count",
        /// Whether parallel tool calls are allowed.
        parallel_tool_calls: flag = "parallel-tool-calls",
        /// Whether an output schema was supplied.
        has_output_schema: flag = "has-output-schema",
    }
}

hook_event! {
    /// A model response finished streaming.
    ModelResponseCompleted => "model-response-completed" {
        /// Conversation thread identifier.
        thread_id: text = "thread-id",
        /// Turn identifier.
        turn_id: text = "turn-id",
        /// Working directory of the session.
        cwd: text = "cwd",
        /// Model request identifier.
        model_request_id: text = "model-request-id",
        /// Retry attempt, starting at one.
        attempt: int = "attempt",
        /// Response identifier.
        response_id: text = "response-id",
        /// Whether the agent will send a follow-up request.
        needs_follow_up: flag = "needs-follow-up",
        /// Token usage, as sent. See [`Self::token_usage_counts`].
        token_usage: opaque = "token-usage",
    }
}

hook_event! {
    /// A session started.
    SessionStart => "session-start" {
        /// Conversation thread identifier.
        thread_id: text = "thread-id",
        /// Working directory of the session.
        cwd: text = "cwd",
        /// What started the session.
        session_source: text = "session-source",
    }
}

hook_event! {
    /// A session ended.
    SessionEnd => "session-end" {
        /// Conversation thread identifier.
        thread_id: text = "thread-id",
        /// Working directory of the session.
        cwd: text = "cwd",
        /// What started the session.
        session_source: text = "session-source",
    }
}

hook_event! {
    /// A tool call is about to run.
    ToolCallStarted => "tool-call-started" {
        /// Conversation thread identifier.
        thread_id: text = "thread-id",
        /// Turn identifier.
        turn_id: text = "turn-id",
        /// Working directory of the session.
        cwd: text = "cwd",
        /// Model request that produced the call.
        model_request_id: text = "model-request-id",
        /// Retry attempt of that request.
        attempt: int = "attempt",
        /// Tool name.
        tool_name: text = "tool-name",
        /// Tool call identifier.
        call_id: text = "call-id",
    }
}

hook_event! {
    /// A tool call finished.
    ToolCallFinished => "tool-call-finished" {
        /// Conversation thread identifier.
        thread_id: text = "thread-id",
        /// Turn identifier.
        turn_id: text = "turn-id",
        /// Working directory of the session.
        cwd: text = "cwd",
        /// Model request that produced the call.
        model_request_id: text = "model-request-id",
        /// Retry attempt of that request.
        attempt: int = "attempt",
        /// Tool name.
        tool_name: text = "tool-name",
        /// Tool call identifier.
        call_id: text = "call-id",
        /// Completion status reported by the tool.
        status: text = "status",
        /// Whether the call succeeded.
        success: flag = "success",
        /// Wall-clock duration in milliseconds.
        duration_ms: int = "duration-ms",
        /// Size of the tool output in bytes.
        output_bytes: int = "output-bytes",
        /// Leading portion of the tool output.
        output_preview: text = "output-preview",
    }
}

hook_event! {
    /// An event whose discriminant is not one of the known shapes.
    ///
    /// Every non-common field is preserved in [`Self::extras`].
    UnknownEvent {}
}
