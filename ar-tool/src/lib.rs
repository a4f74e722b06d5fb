#![deny(missing_docs)]
//! # ar-tool — tool invocation for the turn-execution engine
//!
//! Defines the object-safe [`ToolDyn`] trait any tool implements, a
//! [`ToolRegistry`] to look tools up by name, and a traced call path
//! ([`call_tool_with_trace`]) that turns a panic or an `Err` into a
//! structured [`ar_core::ToolError`] instead of letting it escape.

pub mod registry;
pub mod runner;

pub use registry::{ToolDyn, ToolRegistry, ToolRegistryError};
pub use runner::call_tool_with_trace;
