//! Tolerant binding of raw payloads to typed events.
//!
//! [`bind`] never fails. Payloads with a known discriminant become one of the
//! typed shapes; anything else becomes [`HookEvent::Unknown`]. Every shape keeps
//! the complete original payload and the entries it did not name, so hooks
//! written against an older field list still see newer fields.

mod token_usage;
mod variants;

use serde_json::Value;
use strum::{Display, EnumString, IntoStaticStr};

use crate::RawEvent;
use crate::coerce;
use crate::keys::{self, NormalizedKeys};

pub use token_usage::TokenUsage;
pub use variants::{
    AgentTurnComplete, ApprovalRequested, ModelRequestStarted, ModelResponseCompleted, SessionEnd,
    SessionStart, ToolCallFinished, ToolCallStarted, UnknownEvent,
};

/// Fields shared by every event, coerced permissively.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EventHeader {
    schema_version: i64,
    event_id: String,
    timestamp: String,
    event_type: String,
}

impl EventHeader {
    pub(crate) fn read(raw: &RawEvent, keys: &NormalizedKeys<'_>) -> Self {
        Self {
            schema_version: keys
                .get(keys::SCHEMA_VERSION)
                .and_then(coerce::integer)
                .unwrap_or(0),
            event_id: keys
                .get(keys::EVENT_ID)
                .and_then(coerce::string)
                .unwrap_or_default(),
            timestamp: keys
                .get(keys::TIMESTAMP)
                .and_then(coerce::string)
                .unwrap_or_default(),
            event_type: keys::discriminant(raw),
        }
    }

    /// Schema version; zero when absent or not numeric.
    #[must_use]
    pub const fn schema_version(&self) -> i64 {
        self.schema_version
    }

    /// Event identifier; empty when absent.
    #[must_use]
    pub const fn event_id(&self) -> &str {
        self.event_id.as_str()
    }

    /// Timestamp as sent; empty when absent.
    #[must_use]
    pub const fn timestamp(&self) -> &str {
        self.timestamp.as_str()
    }

    /// Discriminant exactly as sent, such as `tool-call-finished` or
    /// `PostToolUse`; empty when absent.
    #[must_use]
    pub const fn event_type(&self) -> &str {
        self.event_type.as_str()
    }
}

/// The kinds of event a payload can bind to.
///
/// Parsing accepts the canonical discriminants plus every name a hook can be
/// registered under: the snake_case keys, the lifecycle names used by older
/// emitters, and the dotted `session.start` style. [`EventKind::from_discriminant`] is total.
///
/// # Example
///
/// ```
/// use hookline::event::EventKind;
///
/// assert_eq!(EventKind::from_discriminant("PostToolUse"), EventKind::ToolCallFinished);
/// assert_eq!(EventKind::from_discriminant("brand-new"), EventKind::Unknown);
/// assert_eq!(EventKind::ToolCallFinished.to_string(), "tool-call-finished");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, IntoStaticStr)]
pub enum EventKind {
    /// `agent-turn-complete`.
    #[strum(
        to_string = "agent-turn-complete",
        serialize = "agent_turn_complete",
        serialize = "turn-complete",
        serialize = "Stop"
    )]
    AgentTurnComplete,
    /// `approval-requested`.
    #[strum(
        to_string = "approval-requested",
        serialize = "approval_requested",
        serialize = "PermissionRequest"
    )]
    ApprovalRequested,
    /// `model-request-started`.
    #[strum(to_string = "model-request-started", serialize = "model_request_started")]
    ModelRequestStarted,
    /// `model-response-completed`.
    #[strum(
        to_string = "model-response-completed",
        serialize = "model_response_completed"
    )]
    ModelResponseCompleted,
    /// `session-start`.
    #[strum(
        to_string = "session-start",
        serialize = "session_start",
        serialize = "SessionStart",
        serialize = "session.start"
    )]
    SessionStart,
    /// `session-end`.
    #[strum(
        to_string = "session-end",
        serialize = "session_end",
        serialize = "SessionEnd",
        serialize = "session.end"
    )]
    SessionEnd,
    /// `tool-call-started`.
    #[strum(
        to_string = "tool-call-started",
        serialize = "tool_call_started",
        serialize = "PreToolUse",
        serialize = "tool.execute.before"
    )]
    ToolCallStarted,
    /// `tool-call-finished`.
    #[strum(
        to_string = "tool-call-finished",
        serialize = "tool_call_finished",
        serialize = "PostToolUse",
        serialize = "tool.execute.after"
    )]
    ToolCallFinished,
    /// Any other discriminant, including an empty one.
    #[strum(to_string = "unknown")]
    Unknown,
}

impl EventKind {
    /// Maps a discriminant to its kind; unrecognised values map to
    /// [`EventKind::Unknown`].
    #[must_use]
    pub fn from_discriminant(discriminant: &str) -> Self {
        discriminant.parse().unwrap_or(Self::Unknown)
    }

    /// Returns the canonical discriminant, or `unknown`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        self.into()
    }

    /// Returns whether this kind is one of the typed shapes.
    #[must_use]
    pub const fn is_known(self) -> bool {
        !matches!(self, Self::Unknown)
    }
}

/// A payload bound to one of the known shapes, or to [`UnknownEvent`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HookEvent {
    /// See [`AgentTurnComplete`].
    AgentTurnComplete(AgentTurnComplete),
    /// See [`ApprovalRequested`].
    ApprovalRequested(ApprovalRequested),
    /// See [`ModelRequestStarted`].
    ModelRequestStarted(ModelRequestStarted),
    /// See [`ModelResponseCompleted`].
    ModelResponseCompleted(ModelResponseCompleted),
    /// See [`SessionStart`].
    SessionStart(SessionStart),
    /// See [`SessionEnd`].
    SessionEnd(SessionEnd),
    /// See [`ToolCallStarted`].
    ToolCallStarted(ToolCallStarted),
    /// See [`ToolCallFinished`].
    ToolCallFinished(ToolCallFinished),
    /// See [`UnknownEvent`].
    Unknown(UnknownEvent),
}

macro_rules! each_variant {
    ($event:expr, $inner:ident => $body:expr) => {
        match $event {
            HookEvent::AgentTurnComplete($inner) => $body,
            HookEvent::ApprovalRequested($inner) => $body,
            HookEvent::ModelRequestStarted($inner) => $body,
            HookEvent::ModelResponseCompleted($inner) => $body,
            HookEvent::SessionStart($inner) => $body,
            HookEvent::SessionEnd($inner) => $body,
            HookEvent::ToolCallStarted($inner) => $body,
            HookEvent::ToolCallFinished($inner) => $body,
            HookEvent::Unknown($inner) => $body,
        }
    };
}

impl HookEvent {
    /// Binds a JSON value. Values that are not objects bind to
    /// [`HookEvent::Unknown`] with an empty payload.
    #[must_use]
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(raw) => bind(raw),
            _ => bind(RawEvent::new()),
        }
    }

    /// Returns the kind this event bound to.
    #[must_use]
    pub const fn kind(&self) -> EventKind {
        match self {
            Self::AgentTurnComplete(_) => EventKind::AgentTurnComplete,
            Self::ApprovalRequested(_) => EventKind::ApprovalRequested,
            Self::ModelRequestStarted(_) => EventKind::ModelRequestStarted,
            Self::ModelResponseCompleted(_) => EventKind::ModelResponseCompleted,
            Self::SessionStart(_) => EventKind::SessionStart,
            Self::SessionEnd(_) => EventKind::SessionEnd,
            Self::ToolCallStarted(_) => EventKind::ToolCallStarted,
            Self::ToolCallFinished(_) => EventKind::ToolCallFinished,
            Self::Unknown(_) => EventKind::Unknown,
        }
    }

    /// Returns the common header.
    #[must_use]
    pub fn header(&self) -> &EventHeader {
        each_variant!(self, event => event.header())
    }

    /// Returns the discriminant exactly as sent.
    #[must_use]
    pub fn event_type(&self) -> &str {
        self.header().event_type()
    }

    /// Returns the complete original payload.
    #[must_use]
    pub fn raw(&self) -> &RawEvent {
        each_variant!(self, event => event.raw())
    }

    /// Returns the payload entries not named by the bound shape.
    #[must_use]
    pub fn extras(&self) -> &RawEvent {
        each_variant!(self, event => event.extras())
    }

    /// Consumes the event, returning the original payload.
    #[must_use]
    pub fn into_raw(self) -> RawEvent {
        each_variant!(self, event => event.into_raw())
    }

    /// Returns the original payload as a JSON value.
    #[must_use]
    pub fn to_json_value(&self) -> Value {
        Value::Object(self.raw().clone())
    }
}

/// Binds a raw payload to a typed event.
///
/// # Example
///
/// ```
/// use hookline::event::{bind, HookEvent};
/// use serde_json::json;
///
/// let raw = json!({"type": "tool-call-finished", "attempt": "3", "success": "no"});
/// let serde_json::Value::Object(raw) = raw else { unreachable!() };
/// let HookEvent::ToolCallFinished(event) = bind(raw) else { panic!("wrong shape") };
/// assert_eq!(event.attempt(), Some(3));
/// assert_eq!(event.success(), Some(false));
/// assert_eq!(event.duration_ms(), None);
/// ```
#[must_use]
pub fn bind(raw: RawEvent) -> HookEvent {
    match EventKind::from_discriminant(&keys::discriminant(&raw)) {
        EventKind::AgentTurnComplete => {
            HookEvent::AgentTurnComplete(AgentTurnComplete::from_raw(raw))
        }
        EventKind::ApprovalRequested => {
            HookEvent::ApprovalRequested(ApprovalRequested::from_raw(raw))
        }
        EventKind::ModelRequestStarted => {
            HookEvent::ModelRequestStarted(ModelRequestStarted::from_raw(raw))
        }
        EventKind::ModelResponseCompleted => {
            HookEvent::ModelResponseCompleted(ModelResponseCompleted::from_raw(raw))
        }
        EventKind::SessionStart => HookEvent::SessionStart(SessionStart::from_raw(raw)),
        EventKind::SessionEnd => HookEvent::SessionEnd(SessionEnd::from_raw(raw)),
        EventKind::ToolCallStarted => HookEvent::ToolCallStarted(ToolCallStarted::from_raw(raw)),
        EventKind::ToolCallFinished => {
            HookEvent::ToolCallFinished(ToolCallFinished::from_raw(raw))
        }
        EventKind::Unknown => HookEvent::Unknown(UnknownEvent::from_raw(raw)),
    }
}

#[cfg(test)]
mod tests;
