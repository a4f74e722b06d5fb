//! What an agent advertises it can do, for the coordinator to route on.

use serde::{Deserialize, Serialize};

/// A single advertised capability: a name the coordinator can route
/// requests by, and a human-readable description for operators inspecting
/// the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentCapability {
    /// Short identifier, e.g. `"weather"` or `"trip_planning"`.
    pub name: String,
    /// What the capability covers, for humans reading a registry dump.
    pub description: String,
}

impl AgentCapability {
    /// Construct a capability.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}
