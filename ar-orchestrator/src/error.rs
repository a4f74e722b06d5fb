//! The turn engine's unified error type.

use ar_core::DecisionError;
use ar_registry::{CoordinatorError, RegistryError};
use thiserror::Error;

/// Everything that can stop a turn before it produces a reply.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum TurnError {
    /// Agent or coordinator lookup failed.
    #[error("registry error: {0}")]
    Registry(#[from] RegistryError),
    /// A coordinator produced a structurally invalid decision.
    #[error("invalid coordinator decision: {0}")]
    InvalidDecision(#[from] DecisionError),
    /// The resolved coordinator did not implement `decide` at all. Never
    /// raised by this port — `Agent::as_coordinator` is checked before a
    /// coordinator is ever called — but kept in the taxonomy for parity
    /// with coordinators that resolve dynamically (e.g. over a wire
    /// protocol) rather than through a static trait probe.
    #[error("resolved coordinator does not implement decide")]
    InvalidCoordinator,
    /// The default fallback coordinator had no `RoutingRule` matching the
    /// message text.
    #[error("no routing rule matched the message")]
    NoRoute,
    /// The agent dispatched to returned an error rather than a result.
    #[error("agent {agent} failed: {source}")]
    AgentFailed {
        /// The agent that failed.
        agent: String,
        /// The underlying error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl From<CoordinatorError> for TurnError {
    fn from(error: CoordinatorError) -> Self {
        match error {
            CoordinatorError::NoRoute => TurnError::NoRoute,
        }
    }
}
