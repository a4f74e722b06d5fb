#![deny(missing_docs)]
//! # ar-retry — bounded retry loop for tool calls
//!
//! Wraps [`ar_tool::call_tool_with_trace`] in a bounded loop governed by a
//! [`RetryPolicy`]: only certain `ToolErrorType`s and HTTP statuses are
//! worth retrying, and every attempt (successful or not) contributes a
//! `TraceEvent` so the retry history is fully auditable.

pub mod policy;

pub use policy::{call_tool_with_retry, RetryExceeded, RetryPolicy};
