//! The legacy `TraceEvent` model, kept for compatibility with code that
//! predates the unified [`crate::Event`] stream. [`TraceEvent::to_event`]
//! is the adapter that lets callers migrate incrementally.

use crate::{now_iso, CorrelationId, Event, EventType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Whether a traced operation succeeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// The operation completed without error.
    Success,
    /// The operation raised and was wrapped into a `ToolError`.
    Error,
}

/// A single legacy trace entry (`actor`/`action`/`target`/`params`).
///
/// Predates `Event`; `team_conversation` in the orchestrator exposes a
/// stream of these for tooling that hasn't migrated to `team_events`.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceEvent {
    /// Who performed the action.
    pub actor: String,
    /// What happened (`"route"`, `"decision"`, `"tool_call"`, `"respond"`, ...).
    pub action: String,
    /// What the action concerns.
    pub target: String,
    /// Structured parameters.
    #[serde(default)]
    pub params: BTreeMap<String, serde_json::Value>,
    /// Whether the action succeeded.
    pub outcome: Outcome,
    /// The wrapped tool error, if `outcome == Error`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<crate::ToolError>,
    /// ISO-8601 UTC timestamp.
    pub timestamp: String,
    /// Id shared by every trace entry of the same turn.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correlation_id: Option<CorrelationId>,
}

impl TraceEvent {
    /// Construct a successful trace entry, stamping the current time.
    pub fn ok(
        actor: impl Into<String>,
        action: impl Into<String>,
        target: impl Into<String>,
        params: BTreeMap<String, serde_json::Value>,
        correlation_id: Option<CorrelationId>,
    ) -> Self {
        Self {
            actor: actor.into(),
            action: action.into(),
            target: target.into(),
            params,
            outcome: Outcome::Success,
            error: None,
            timestamp: now_iso(),
            correlation_id,
        }
    }

    /// Construct a failed trace entry, stamping the current time.
    pub fn failed(
        actor: impl Into<String>,
        action: impl Into<String>,
        target: impl Into<String>,
        params: BTreeMap<String, serde_json::Value>,
        error: crate::ToolError,
        correlation_id: Option<CorrelationId>,
    ) -> Self {
        Self {
            actor: actor.into(),
            action: action.into(),
            target: target.into(),
            params,
            outcome: Outcome::Error,
            error: Some(error),
            timestamp: now_iso(),
            correlation_id,
        }
    }

    /// Adapter: map a legacy trace entry onto the unified `Event` stream.
    ///
    /// `action` maps onto `EventType` directly when it names one of the
    /// seven known kinds; anything else (most commonly a free-form error
    /// action string) becomes `EventType::Error`.
    pub fn to_event(&self) -> Event {
        let event_type = match self.action.as_str() {
            "route" => EventType::Route,
            "decision" => EventType::Decision,
            "tool_call" => EventType::ToolCall,
            "observation" => EventType::Observation,
            "respond" => EventType::Respond,
            "critique" => EventType::Critique,
            _ => EventType::Error,
        };
        let mut data = self.params.clone();
        if let Some(error) = &self.error {
            data.insert(
                "error".to_string(),
                serde_json::to_value(error).expect("ToolError always serializes"),
            );
        }
        Event {
            event_type,
            actor: self.actor.clone(),
            target: self.target.clone(),
            data,
            timestamp: self.timestamp.clone(),
            correlation_id: self.correlation_id.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn to_event_maps_known_actions() {
        let t = TraceEvent::ok("orchestrator", "route", "weather", BTreeMap::new(), None);
        assert_eq!(t.to_event().event_type, EventType::Route);
    }

    #[test]
    fn to_event_falls_back_to_error_for_unknown_actions() {
        let t = TraceEvent::ok("x", "something_else", "y", BTreeMap::new(), None);
        assert_eq!(t.to_event().event_type, EventType::Error);
    }

    #[test]
    fn to_event_embeds_the_tool_error() {
        let err = crate::ToolError::new(
            "open_meteo",
            crate::ToolErrorType::Timeout,
            "deadline exceeded",
            "trace...",
            BTreeMap::new(),
        );
        let t = TraceEvent::failed("tool_runner", "tool_call", "open_meteo", BTreeMap::new(), err, None);
        let ev = t.to_event();
        assert_eq!(ev.event_type, EventType::ToolCall);
        assert!(ev.data.contains_key("error"));
    }
}
