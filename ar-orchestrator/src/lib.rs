#![deny(missing_docs)]
//! # ar-orchestrator — the turn-execution engine
//!
//! [`Orchestrator::handle`] is the one entry point every external
//! interface (CLI, HTTP handler, test) calls: given the next user
//! message, it resolves a coordinator, gets a routing decision, dispatches
//! to an agent if the decision isn't a direct stop, and returns the reply
//! message. Every step along the way appends to both the unified
//! [`ar_core::Event`] stream ([`Orchestrator::team_events`]) and, for
//! callers that haven't migrated, the legacy [`ar_core::TraceEvent`]
//! stream ([`Orchestrator::team_conversation`]).

pub mod config;
pub mod error;
pub mod orchestrator;
pub mod preferences;
pub mod replay;
pub mod sinks;

pub use config::OrchestratorConfig;
pub use error::TurnError;
pub use orchestrator::Orchestrator;
pub use preferences::{InMemoryPreferenceStore, PreferenceStore};
pub use replay::replay_history_from_events;
