//! The `Message` value type and its `Role` classification.

use crate::{now_iso, CorrelationId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Who is speaking. Derived from `sender` when not set explicitly —
/// see [`Role::derive_from_sender`].
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// The human operating the session.
    User,
    /// A worker or coordinator agent.
    Agent,
    /// The orchestrator or another core component.
    System,
    /// A tool invocation result.
    Tool,
    /// An error surfaced as a conversational entry.
    Error,
}

impl Role {
    /// Derive a role from a sender name, per the invariant in the data model:
    /// `user` -> User, `system` -> System, `tool`/`tool_runner` -> Tool,
    /// `error` -> Error, anything else -> Agent.
    pub fn derive_from_sender(sender: &str) -> Self {
        match sender {
            "user" => Role::User,
            "system" => Role::System,
            "tool" | "tool_runner" => Role::Tool,
            "error" => Role::Error,
            _ => Role::Agent,
        }
    }
}

/// An immutable conversational entry. Built once; copies are made (with a
/// new field value) rather than mutated in place — see
/// [`Message::with_correlation_id`].
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Who produced this message (e.g. `"user"`, `"weather"`, `"coordinator"`).
    pub sender: String,
    /// The message body.
    pub content: String,
    /// Classification of the speaker; derived from `sender` if omitted.
    pub role: Role,
    /// Free-form metadata (e.g. `{"replayed": true}`).
    #[serde(default)]
    pub meta: BTreeMap<String, serde_json::Value>,
    /// ISO-8601 UTC creation timestamp.
    pub timestamp: String,
    /// Id shared by every event of the turn this message belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correlation_id: Option<CorrelationId>,
}

impl Message {
    /// Construct a message, deriving `role` from `sender` and stamping
    /// the current time.
    pub fn new(sender: impl Into<String>, content: impl Into<String>) -> Self {
        let sender = sender.into();
        let role = Role::derive_from_sender(&sender);
        Self {
            sender,
            content: content.into(),
            role,
            meta: BTreeMap::new(),
            timestamp: now_iso(),
            correlation_id: None,
        }
    }

    /// Construct with an explicit role, overriding derivation.
    pub fn with_role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }

    /// Attach metadata.
    pub fn with_meta(mut self, meta: BTreeMap<String, serde_json::Value>) -> Self {
        self.meta = meta;
        self
    }

    /// Return a copy carrying `cid` if this message doesn't already have one.
    /// Messages are immutable, so "filling in" the correlation id is always
    /// a copy, never a mutation of a shared instance.
    pub fn with_correlation_id(&self, cid: &CorrelationId) -> Self {
        if self.correlation_id.is_some() {
            return self.clone();
        }
        let mut copy = self.clone();
        copy.correlation_id = Some(cid.clone());
        copy
    }
}
