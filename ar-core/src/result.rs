//! The normalized shape of whatever an agent's `handle` call produces.

use crate::{Event, Message};
use serde::{Deserialize, Serialize};

/// What an agent handed back after being dispatched a task.
///
/// Agents are free to return just a reply string in their own code; the
/// orchestrator's dispatch path normalizes that into this shape so the
/// rest of the turn engine only ever deals with one representation,
/// mirroring the Python original's `_normalize_agent_output`.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentResult {
    /// The message to append to the conversation, if the agent produced one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<Message>,
    /// Any events the agent wants recorded alongside its dispatch, already
    /// in emission order (e.g. a `tool_call` followed by an `observation`).
    #[serde(default)]
    pub events: Vec<Event>,
}

impl AgentResult {
    /// An agent result carrying only a message.
    pub fn message(message: Message) -> Self {
        Self {
            message: Some(message),
            events: Vec::new(),
        }
    }

    /// An agent result carrying only events (e.g. a coordinator's probe).
    pub fn events(events: Vec<Event>) -> Self {
        Self {
            message: None,
            events,
        }
    }

    /// An agent result carrying both a message and events.
    pub fn new(message: Option<Message>, events: Vec<Event>) -> Self {
        Self { message, events }
    }
}
