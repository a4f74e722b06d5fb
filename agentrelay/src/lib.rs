#![deny(missing_docs)]
//! # agentrelay — umbrella crate
//!
//! A single import surface over the multi-agent orchestration runtime.
//! Each concern lives in its own crate (`ar-core`, `ar-tool`, `ar-retry`,
//! `ar-recovery`, `ar-registry`, `ar-coordinator`, `ar-memory`,
//! `ar-orchestrator`) and is re-exported here behind a feature flag, plus
//! a [`prelude`] for the common case of wanting the whole turn engine.

#[cfg(feature = "core")]
pub use ar_core;
#[cfg(feature = "coordinator")]
pub use ar_coordinator;
#[cfg(feature = "memory")]
pub use ar_memory;
#[cfg(feature = "orchestrator")]
pub use ar_orchestrator;
#[cfg(feature = "recovery")]
pub use ar_recovery;
#[cfg(feature = "core")]
pub use ar_registry;
#[cfg(feature = "retry")]
pub use ar_retry;
#[cfg(feature = "core")]
pub use ar_tool;

/// Happy-path imports for wiring up a turn engine.
pub mod prelude {
    #[cfg(feature = "core")]
    pub use ar_core::{
        CoordinatorDecision, CorrelationId, Event, EventType, FixAction, FixPlan, Message, Role,
        Task, ToolError, ToolErrorType, TraceEvent,
    };

    #[cfg(feature = "core")]
    pub use ar_registry::{Agent, AgentCapability, AgentRegistry, Coordinator, CoordinatorError};

    #[cfg(feature = "core")]
    pub use ar_tool::{ToolDyn, ToolRegistry};

    #[cfg(feature = "coordinator")]
    pub use ar_coordinator::{DefaultCoordinator, KeywordCoordinator, RoutingRule};

    #[cfg(feature = "memory")]
    pub use ar_memory::{TeamMemory, TeamMemoryContext};

    #[cfg(feature = "retry")]
    pub use ar_retry::{call_tool_with_retry, RetryPolicy};

    #[cfg(feature = "recovery")]
    pub use ar_recovery::RecoveryAgent;

    #[cfg(feature = "orchestrator")]
    pub use ar_orchestrator::{Orchestrator, OrchestratorConfig};
}
