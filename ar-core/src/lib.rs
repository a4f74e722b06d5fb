#![deny(missing_docs)]
//! # ar-core — value types and error taxonomy for the turn-execution engine
//!
//! This crate defines the immutable data model that crosses every boundary
//! in the orchestration runtime: `Message`, `Event`, `TraceEvent`,
//! `ToolError`, `Task`, `FixPlan`, `CoordinatorDecision`, `AgentResult`.
//!
//! Every type here is a value object: constructed once, never mutated,
//! freely cloned and shared. None of them own a connection, a lock, or a
//! handle to anything external — that keeps the turn engine's ownership
//! story simple (see `ar-orchestrator` for who owns what).

pub mod correlation;
pub mod decision;
pub mod event;
pub mod fixplan;
pub mod message;
pub mod result;
pub mod task;
pub mod tool_error;
pub mod trace;

pub use correlation::CorrelationId;
pub use decision::{CoordinatorDecision, DecisionError};
pub use event::{Event, EventType};
pub use fixplan::{FixAction, FixPlan};
pub use message::{Message, Role};
pub use result::AgentResult;
pub use task::Task;
pub use tool_error::{ToolError, ToolErrorType};
pub use trace::{Outcome, TraceEvent};

/// Current UTC timestamp formatted as ISO-8601, the one place every other
/// module gets "now" from — keeps the wire format consistent end to end.
pub fn now_iso() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}
