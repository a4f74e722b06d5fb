//! The structured error a tool invocation produces on failure.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Coarse classification of why a tool call failed. Retry and recovery
/// logic branch on this, not on the free-form `message`.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ToolErrorType {
    /// The tool itself raised an uncaught exception.
    Exception,
    /// The tool's HTTP transport returned a non-2xx status.
    HttpError,
    /// The call exceeded its deadline.
    Timeout,
    /// The tool completed but found nothing matching the request.
    NoResults,
    /// Anything that doesn't fit the other classifications.
    Other,
}

impl fmt::Display for ToolErrorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ToolErrorType::Exception => "EXCEPTION",
            ToolErrorType::HttpError => "HTTP_ERROR",
            ToolErrorType::Timeout => "TIMEOUT",
            ToolErrorType::NoResults => "NO_RESULTS",
            ToolErrorType::Other => "OTHER",
        };
        write!(f, "{s}")
    }
}

/// The structured payload a failed tool call produces. Carried inside
/// `TraceEvent::error` and handed to `ar-recovery` as the thing to fix.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolError {
    /// The tool that failed.
    pub tool_name: String,
    /// Coarse failure classification.
    pub error_type: ToolErrorType,
    /// Human-readable failure detail.
    pub message: String,
    /// HTTP status code, when `error_type == HttpError`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    /// First 12 hex digits of a sha256 hash of the captured stack trace,
    /// stable across retries of the *same* underlying fault so operators
    /// can group occurrences without storing the full trace.
    pub stack_trace_id: String,
    /// The parameters the tool was called with, for recovery/debugging.
    #[serde(default)]
    pub params: BTreeMap<String, serde_json::Value>,
}

impl ToolError {
    /// Build a `ToolError`, computing `stack_trace_id` from `stack_trace`.
    pub fn new(
        tool_name: impl Into<String>,
        error_type: ToolErrorType,
        message: impl Into<String>,
        stack_trace: &str,
        params: BTreeMap<String, serde_json::Value>,
    ) -> Self {
        Self {
            tool_name: tool_name.into(),
            error_type,
            message: message.into(),
            status_code: None,
            stack_trace_id: stack_trace_id(stack_trace),
            params,
        }
    }

    /// Attach an HTTP status code.
    pub fn with_status_code(mut self, status_code: u16) -> Self {
        self.status_code = Some(status_code);
        self
    }
}

/// First 12 hex digits of `sha256(stack_trace)`.
///
/// Mirrors the Python original's `hashlib.sha256(...).hexdigest()[:12]`:
/// short enough to eyeball in a log line, long enough that two distinct
/// traces colliding is not a practical concern.
pub fn stack_trace_id(stack_trace: &str) -> String {
    use sha2::{Digest, Sha256};
    let digest = Sha256::digest(stack_trace.as_bytes());
    let hex = format!("{digest:x}");
    hex[..12].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stack_trace_id_is_deterministic() {
        assert_eq!(stack_trace_id("boom"), stack_trace_id("boom"));
        assert_ne!(stack_trace_id("boom"), stack_trace_id("bang"));
        assert_eq!(stack_trace_id("boom").len(), 12);
    }

    #[test]
    fn error_type_serializes_screaming_snake_case() {
        let err = ToolError::new(
            "open_meteo",
            ToolErrorType::HttpError,
            "upstream 503",
            "trace...",
            BTreeMap::new(),
        )
        .with_status_code(503);
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["error_type"], "HTTP_ERROR");
        assert_eq!(json["status_code"], 503);
    }
}
