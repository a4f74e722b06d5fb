//! The name-keyed collection of registered agents.

use crate::{Agent, AgentCapability, Coordinator};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

/// Errors raised by registry operations.
#[non_exhaustive]
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// An agent was already registered under that name. Raised at
    /// build/wiring time, never mid-turn.
    #[error("agent already registered: {0}")]
    DuplicateAgent(String),
    /// No agent is registered under that name. Raised when the
    /// orchestrator tries to dispatch to a name a coordinator named.
    #[error("unknown agent: {0}")]
    UnknownAgent(String),
}

/// Holds every agent available to the orchestrator, keyed by name.
///
/// Registration happens once at startup; lookups happen once per turn.
/// There is no locking here — agents are `Arc<dyn Agent>` and the
/// registry itself is read-only for the lifetime of a turn, so sharing
/// it across concurrent turns needs no more than an outer `Arc`.
#[derive(Default)]
pub struct AgentRegistry {
    agents: HashMap<String, Arc<dyn Agent>>,
}

impl AgentRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            agents: HashMap::new(),
        }
    }

    /// Register an agent. Errors if another agent already holds that name.
    pub fn register(&mut self, agent: Arc<dyn Agent>) -> Result<(), RegistryError> {
        let name = agent.name().to_string();
        if self.agents.contains_key(&name) {
            return Err(RegistryError::DuplicateAgent(name));
        }
        self.agents.insert(name, agent);
        Ok(())
    }

    /// Look up an agent by name.
    pub fn get(&self, name: &str) -> Result<Arc<dyn Agent>, RegistryError> {
        self.agents
            .get(name)
            .cloned()
            .ok_or_else(|| RegistryError::UnknownAgent(name.to_string()))
    }

    /// The name of every registered agent, in arbitrary order.
    pub fn list_names(&self) -> Vec<&str> {
        self.agents.keys().map(String::as_str).collect()
    }

    /// One [`AgentCapability`] per registered agent, the shape a
    /// [`crate::Coordinator`] needs to route by intent. `description`
    /// falls back to empty when the agent doesn't self-declare one —
    /// unlike the original, a Rust agent has no docstring to introspect
    /// at runtime, so that second fallback step isn't reproduced here.
    pub fn list_capabilities(&self) -> Vec<AgentCapability> {
        self.agents
            .values()
            .map(|agent| AgentCapability::new(agent.name(), agent.description()))
            .collect()
    }

    /// Find the first registered agent whose [`Agent::as_coordinator`]
    /// probe returns `Some`. There is no ordering guarantee beyond
    /// "some coordinator-capable agent, if one exists" — callers that
    /// care which one wins should register at most one.
    pub fn find_coordinator(&self) -> Option<Arc<dyn Agent>> {
        self.agents
            .values()
            .find(|agent| agent.as_coordinator().is_some())
            .cloned()
    }

    /// Number of registered agents.
    pub fn len(&self) -> usize {
        self.agents.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }
}

/// Narrow a resolved agent down to its [`Coordinator`] facet, if any.
///
/// A free function rather than a method on `Arc<dyn Agent>` because
/// borrowing through an `Arc` to return a `&dyn Coordinator` with the
/// right lifetime needs the caller to keep the `Arc` alive itself.
pub fn as_coordinator(agent: &Arc<dyn Agent>) -> Option<&dyn Coordinator> {
    agent.as_coordinator()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ar_core::{AgentResult, CorrelationId, Message};
    use async_trait::async_trait;

    struct Worker {
        name: &'static str,
    }

    #[async_trait]
    impl Agent for Worker {
        fn name(&self) -> &str {
            self.name
        }
        fn description(&self) -> &str {
            "reports current weather"
        }
        async fn handle(
            &self,
            _message: &Message,
            _correlation_id: Option<&CorrelationId>,
        ) -> Result<AgentResult, Box<dyn std::error::Error + Send + Sync>> {
            Ok(AgentResult::message(ar_core::Message::new(self.name, "ok")))
        }
    }

    #[test]
    fn register_then_get() {
        let mut reg = AgentRegistry::new();
        reg.register(Arc::new(Worker { name: "weather" })).unwrap();
        assert_eq!(reg.len(), 1);
        assert!(reg.get("weather").is_ok());
    }

    #[test]
    fn duplicate_registration_errors() {
        let mut reg = AgentRegistry::new();
        reg.register(Arc::new(Worker { name: "weather" })).unwrap();
        let err = reg.register(Arc::new(Worker { name: "weather" })).unwrap_err();
        assert_eq!(err, RegistryError::DuplicateAgent("weather".to_string()));
    }

    #[test]
    fn unknown_agent_errors() {
        let reg = AgentRegistry::new();
        assert_eq!(
            reg.get("nope").unwrap_err(),
            RegistryError::UnknownAgent("nope".to_string())
        );
    }

    #[test]
    fn list_capabilities_reflects_registered_agents() {
        let mut reg = AgentRegistry::new();
        reg.register(Arc::new(Worker { name: "weather" })).unwrap();
        let caps = reg.list_capabilities();
        assert_eq!(caps.len(), 1);
        assert_eq!(caps[0].name, "weather");
        assert_eq!(caps[0].description, "reports current weather");
    }

    #[test]
    fn list_capabilities_defaults_description_to_empty() {
        struct Silent;
        #[async_trait]
        impl Agent for Silent {
            fn name(&self) -> &str {
                "silent"
            }
            async fn handle(
                &self,
                _message: &Message,
                _correlation_id: Option<&CorrelationId>,
            ) -> Result<AgentResult, Box<dyn std::error::Error + Send + Sync>> {
                Ok(AgentResult::message(ar_core::Message::new("silent", "ok")))
            }
        }
        let mut reg = AgentRegistry::new();
        reg.register(Arc::new(Silent)).unwrap();
        assert_eq!(reg.list_capabilities()[0].description, "");
    }

    #[test]
    fn find_coordinator_is_none_when_no_agent_implements_it() {
        let mut reg = AgentRegistry::new();
        reg.register(Arc::new(Worker { name: "weather" })).unwrap();
        assert!(reg.find_coordinator().is_none());
    }
}
