//! The traced call path: invoke a tool, convert whatever it does into a
//! `TraceEvent`, and never let a tool panic escape the turn engine.

use crate::registry::ToolDyn;
use ar_core::{CorrelationId, ToolError, ToolErrorType, TraceEvent};
use futures::FutureExt;
use std::panic::AssertUnwindSafe;

/// Call `tool` with `params`, recording the outcome as a [`TraceEvent`].
///
/// Three things can happen, mirroring the Python original's
/// `call_tool_with_trace`:
/// - the tool returns `Ok(value)` — a success trace entry is produced;
/// - the tool returns `Err(e)` — `e` is wrapped into a [`ToolError`] with
///   `error_type = Exception` unless the tool already produced a
///   structured error (tools normally don't; this is the backstop);
/// - the tool's future panics — caught via `catch_unwind` so one broken
///   tool cannot take the whole turn down with it, and reported the same
///   way as an `Err`.
///
/// The returned `Result` carries the tool's raw JSON output on success so
/// callers don't have to re-parse it out of the trace entry's `params`.
pub async fn call_tool_with_trace(
    tool: &dyn ToolDyn,
    params: serde_json::Value,
    actor: &str,
    correlation_id: Option<&CorrelationId>,
) -> (TraceEvent, Result<serde_json::Value, ToolError>) {
    let tool_name = tool.name().to_string();
    let call_params = as_param_map(&params);
    let cid = correlation_id.cloned();

    let outcome = AssertUnwindSafe(tool.call(params.clone())).catch_unwind().await;

    match outcome {
        Ok(Ok(value)) => {
            let trace = TraceEvent::ok(actor, "tool_call", &tool_name, call_params, cid);
            (trace, Ok(value))
        }
        Ok(Err(e)) => {
            tracing::warn!(tool = %tool_name, error = %e, "tool call failed");
            let tool_error = ToolError::new(
                &tool_name,
                ToolErrorType::Exception,
                e.to_string(),
                &format!("{e:?}"),
                call_params.clone(),
            );
            let trace = TraceEvent::failed(actor, "tool_call", &tool_name, call_params, tool_error.clone(), cid);
            (trace, Err(tool_error))
        }
        Err(panic) => {
            let message = panic_message(&panic);
            tracing::error!(tool = %tool_name, message, "tool call panicked");
            let tool_error = ToolError::new(
                &tool_name,
                ToolErrorType::Exception,
                format!("tool panicked: {message}"),
                &message,
                call_params.clone(),
            );
            let trace = TraceEvent::failed(actor, "tool_call", &tool_name, call_params, tool_error.clone(), cid);
            (trace, Err(tool_error))
        }
    }
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

fn as_param_map(value: &serde_json::Value) -> std::collections::BTreeMap<String, serde_json::Value> {
    match value {
        serde_json::Value::Object(map) => map.iter().map(|(k, v)| (k.clone(), v.clone())).collect(),
        other => {
            let mut map = std::collections::BTreeMap::new();
            map.insert("value".to_string(), other.clone());
            map
        }
    }
}
