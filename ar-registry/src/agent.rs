//! The `Agent` and `Coordinator` traits.

use crate::AgentCapability;
use ar_core::{CorrelationId, CoordinatorDecision, Message};
use ar_memory::TeamMemoryContext;
use async_trait::async_trait;
use std::error::Error;
use thiserror::Error as ThisError;

/// What an agent handed back, normalized for the orchestrator.
pub use ar_core::AgentResult as AgentOutput;

/// An agent: something the orchestrator can dispatch a [`Message`] to.
///
/// Object-safe so agents live behind `Arc<dyn Agent>` in the registry;
/// that also means `handle` takes `&self`, not `&mut self` — agents that
/// need interior state use their own locking, the same constraint the
/// turn engine places on tools.
#[async_trait]
pub trait Agent: Send + Sync {
    /// The name other components (registry, coordinator, traces) know
    /// this agent by. Must be stable for the agent's lifetime.
    fn name(&self) -> &str;

    /// This agent's self-declared description, used to build its
    /// [`AgentCapability`] entry in [`crate::AgentRegistry::list_capabilities`].
    /// Empty by default.
    fn description(&self) -> &str {
        ""
    }

    /// Handle the user's message directly — this is the same message
    /// text the coordinator saw, not a task description derived from it.
    async fn handle(
        &self,
        message: &Message,
        correlation_id: Option<&CorrelationId>,
    ) -> Result<AgentOutput, Box<dyn Error + Send + Sync>>;

    /// Capability probe: an agent that is *also* a coordinator overrides
    /// this to return `Some(self)`. The default `None` means "this is a
    /// plain worker agent" without requiring a separate marker trait or
    /// an inheritance hierarchy.
    fn as_coordinator(&self) -> Option<&dyn Coordinator> {
        None
    }
}

/// Errors a [`Coordinator`] can raise instead of producing a decision.
#[non_exhaustive]
#[derive(Debug, ThisError, Clone, PartialEq, Eq)]
pub enum CoordinatorError {
    /// The default fallback coordinator's legacy `RoutingRule` list had no
    /// keyword matching the message text.
    #[error("no routing rule matched the message")]
    NoRoute,
}

/// An agent in the registry the orchestrator can route an entire turn
/// through: given the incoming message, the condensed team memory
/// context, and a view of who else is registered, produce a
/// [`CoordinatorDecision`].
#[async_trait]
pub trait Coordinator: Send + Sync {
    /// Decide what happens next in the turn.
    ///
    /// `team_ctx` is the bounded context `TeamMemory::context()` produced
    /// from every event recorded so far, across every prior turn — the
    /// memory-to-coordinator feedback loop the rest of the system exists
    /// to support. `available_agents` is one [`AgentCapability`] per
    /// other registered agent, for routing by intent.
    async fn decide(
        &self,
        message: &Message,
        team_ctx: &TeamMemoryContext,
        available_agents: &[AgentCapability],
        correlation_id: Option<&CorrelationId>,
    ) -> Result<CoordinatorDecision, CoordinatorError>;
}
