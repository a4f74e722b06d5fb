//! The unified `Event` stream type — the structured, replayable half of
//! the dual event model (see [`crate::trace::TraceEvent`] for the legacy
//! half).

use crate::{now_iso, CorrelationId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// What kind of thing happened. Events are totally ordered within a turn
/// by append order — this enum does not encode ordering itself.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    /// The orchestrator dispatched to a worker agent.
    Route,
    /// The coordinator produced a routing decision.
    Decision,
    /// A tool was invoked.
    ToolCall,
    /// A tool (or agent) produced an observation worth recording.
    Observation,
    /// A reply was returned to the user.
    Respond,
    /// A critique or review note (reserved for future critic agents).
    Critique,
    /// Something failed.
    Error,
}

impl EventType {
    /// The lower-case, `snake_case` name used in scratchpad lines and
    /// summary blocks — the same spelling `#[serde(rename_all =
    /// "snake_case")]` produces on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::Route => "route",
            EventType::Decision => "decision",
            EventType::ToolCall => "tool_call",
            EventType::Observation => "observation",
            EventType::Respond => "respond",
            EventType::Critique => "critique",
            EventType::Error => "error",
        }
    }
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One immutable entry in the team event stream.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// What kind of thing happened.
    #[serde(rename = "type")]
    pub event_type: EventType,
    /// Who caused this event.
    pub actor: String,
    /// What the event concerns (e.g. the agent or tool name).
    pub target: String,
    /// Structured payload, kind-specific.
    #[serde(default)]
    pub data: BTreeMap<String, serde_json::Value>,
    /// ISO-8601 UTC timestamp.
    pub timestamp: String,
    /// Id shared by every event of the same turn.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correlation_id: Option<CorrelationId>,
}

impl Event {
    /// Construct an event, stamping the current time.
    pub fn new(
        event_type: EventType,
        actor: impl Into<String>,
        target: impl Into<String>,
        data: BTreeMap<String, serde_json::Value>,
    ) -> Self {
        Self {
            event_type,
            actor: actor.into(),
            target: target.into(),
            data,
            timestamp: now_iso(),
            correlation_id: None,
        }
    }

    /// Return a copy carrying `cid` if this event doesn't already have one.
    pub fn with_correlation_id(&self, cid: &CorrelationId) -> Self {
        if self.correlation_id.is_some() {
            return self.clone();
        }
        let mut copy = self.clone();
        copy.correlation_id = Some(cid.clone());
        copy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_through_json() {
        let mut data = BTreeMap::new();
        data.insert("city".to_string(), serde_json::json!("Krakow"));
        let ev = Event::new(EventType::ToolCall, "tool_runner", "open_meteo", data)
            .with_correlation_id(&CorrelationId::from("CID-x"));
        let json = serde_json::to_string(&ev).unwrap();
        let back: Event = serde_json::from_str(&json).unwrap();
        assert_eq!(ev, back);
    }

    #[test]
    fn event_type_serializes_snake_case() {
        let data = BTreeMap::new();
        let ev = Event::new(EventType::ToolCall, "a", "b", data);
        let json = serde_json::to_value(&ev).unwrap();
        assert_eq!(json["type"], "tool_call");
    }

    #[test]
    fn as_str_matches_the_wire_spelling() {
        assert_eq!(EventType::ToolCall.as_str(), "tool_call");
        assert_eq!(EventType::ToolCall.to_string(), "tool_call");
    }
}
