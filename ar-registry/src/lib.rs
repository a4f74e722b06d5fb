#![deny(missing_docs)]
//! # ar-registry — agent trait and name-keyed registry
//!
//! Defines the object-safe [`Agent`] trait every worker and coordinator
//! implements, the [`Coordinator`] trait a subset of agents additionally
//! implement, and [`AgentRegistry`], the in-process lookup the
//! orchestrator dispatches through.
//!
//! An agent that is *also* a coordinator does not inherit from a separate
//! base class — there is no inheritance chain to climb. Instead `Agent`
//! exposes a capability probe, [`Agent::as_coordinator`], that a
//! coordinator-capable agent overrides to return `Some(self)`. This keeps
//! the orchestrator's resolution path to a single lookup plus one probe,
//! regardless of how many agents in the registry also coordinate.

pub mod agent;
pub mod capability;
pub mod registry;

pub use agent::{Agent, AgentOutput, Coordinator, CoordinatorError};
pub use capability::AgentCapability;
pub use registry::{AgentRegistry, RegistryError};
