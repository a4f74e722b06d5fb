#![deny(missing_docs)]
//! # ar-memory — bounded team memory
//!
//! [`TeamMemory`] accumulates a short, append-only scratchpad of what
//! happened in the team's shared event stream. Left unbounded that
//! scratchpad would grow for the life of a long-running conversation, so
//! once it passes a threshold the oldest entries are condensed into a
//! running [`RollingSummary`] and dropped from the scratchpad itself —
//! the full detail is gone, but the gist survives, and facts explicitly
//! recorded via [`TeamMemory::add_facts`] never get condensed away.

pub mod context;
pub mod summary;
pub mod team_memory;

pub use context::TeamMemoryContext;
pub use summary::RollingSummary;
pub use team_memory::TeamMemory;
