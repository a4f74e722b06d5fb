#![deny(missing_docs)]
//! # ar-recovery — fix-plan proposals for failed tool calls
//!
//! [`RecoveryAgent`] implements a two-stage algorithm: a handful of fast
//! heuristics recognize common, shallow failure shapes (no results, a
//! malformed date, a transient upstream error) and propose a fix without
//! ever leaving the process. Anything the heuristics don't recognize
//! escalates to an optional [`LlmEscalation`] hook; if that's absent or
//! itself fails, the fallback is to fail the task outright rather than
//! loop forever.

pub mod escalation;
pub mod heuristics;

pub use escalation::LlmEscalation;
pub use heuristics::RecoveryAgent;
