//! External sinks for the two event streams a turn produces.
//!
//! These are optional: `Orchestrator::handle` works with no sink
//! configured at all. They exist for callers that want every turn's
//! conversation and trace persisted somewhere durable without the
//! orchestrator itself depending on any particular storage backend.

pub mod history;
pub mod trace;

pub use history::{FileHistorySink, HistorySink, HistorySinkError};
pub use trace::{JsonlTraceSink, TraceSink, TraceSinkError};
