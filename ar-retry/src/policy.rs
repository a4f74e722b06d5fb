//! Retry policy and the bounded call loop built on top of it.

use ar_core::{CorrelationId, ToolError, ToolErrorType, TraceEvent};
use ar_tool::ToolDyn;
use std::collections::HashSet;
use std::time::Duration;
use thiserror::Error;

/// Governs whether a failed tool call is worth retrying, and how long to
/// wait before the next attempt.
///
/// Defaults mirror the Python original: three attempts total, retrying on
/// exceptions, timeouts, and HTTP errors whose status is one of the
/// classic "try again" codes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    retryable_error_types: HashSet<ToolErrorType>,
    retryable_statuses: HashSet<u16>,
    backoff_base_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        let mut retryable_error_types = HashSet::new();
        retryable_error_types.insert(ToolErrorType::Exception);
        retryable_error_types.insert(ToolErrorType::Timeout);
        retryable_error_types.insert(ToolErrorType::HttpError);

        let retryable_statuses = [429u16, 500, 502, 503, 504].into_iter().collect();

        Self {
            max_attempts: 3,
            retryable_error_types,
            retryable_statuses,
            backoff_base_ms: 250,
        }
    }
}

impl RetryPolicy {
    /// Start from the default policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the maximum number of attempts (including the first).
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Override the base backoff, in milliseconds; attempt `n` waits
    /// `backoff_base_ms * 2^(n-1)` before retrying.
    pub fn with_backoff_ms(mut self, backoff_base_ms: u64) -> Self {
        self.backoff_base_ms = backoff_base_ms;
        self
    }

    /// Override which `ToolErrorType`s are considered retryable.
    pub fn with_retryable_error_types(mut self, types: HashSet<ToolErrorType>) -> Self {
        self.retryable_error_types = types;
        self
    }

    /// Override which HTTP statuses are considered retryable.
    pub fn with_retryable_statuses(mut self, statuses: HashSet<u16>) -> Self {
        self.retryable_statuses = statuses;
        self
    }

    /// The maximum number of attempts this policy allows.
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Whether `error`, having just failed on `attempt` (1-based), is
    /// worth retrying under this policy.
    ///
    /// Matches the original's `attempt_no < max_attempts AND (err.code IN
    /// retryable_statuses OR err.type IN retryable_error_types)` exactly:
    /// the two checks are an OR, not a status-gated refinement of the type
    /// check, so a type already in `retryable_error_types` (as `HTTP_ERROR`
    /// is, by default) retries regardless of status code.
    pub fn should_retry(&self, error: &ToolError, attempt: u32) -> bool {
        if attempt >= self.max_attempts {
            return false;
        }
        let status_is_retryable = error
            .status_code
            .is_some_and(|status| self.retryable_statuses.contains(&status));
        let type_is_retryable = self.retryable_error_types.contains(&error.error_type);
        status_is_retryable || type_is_retryable
    }

    /// Backoff to wait before `attempt` (1-based, the attempt about to be
    /// made — so the wait happens after attempt `attempt - 1` failed).
    pub fn backoff_for_attempt(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(16);
        Duration::from_millis(self.backoff_base_ms.saturating_mul(1u64 << exponent))
    }
}

/// Every attempt allowed by the policy was exhausted without success.
#[derive(Debug, Error)]
#[error("exhausted {attempts} attempt(s) calling {tool_name}: {last_error}")]
pub struct RetryExceeded {
    /// The tool that was being called.
    pub tool_name: String,
    /// How many attempts were made.
    pub attempts: u32,
    /// The error from the final attempt.
    pub last_error: ToolError,
    /// One trace entry per attempt, in order.
    pub traces: Vec<TraceEvent>,
}

/// Call `tool` with `params`, retrying per `policy` until it succeeds or
/// the policy gives up.
///
/// Returns every attempt's `TraceEvent` alongside the final outcome so
/// callers can append the full retry history to the team event stream,
/// not just the last attempt.
pub async fn call_tool_with_retry(
    tool: &dyn ToolDyn,
    params: serde_json::Value,
    actor: &str,
    correlation_id: Option<&CorrelationId>,
    policy: &RetryPolicy,
) -> Result<(Vec<TraceEvent>, serde_json::Value), RetryExceeded> {
    let mut traces = Vec::new();
    let mut attempt: u32 = 0;

    loop {
        attempt += 1;
        let (trace, result) =
            ar_tool::call_tool_with_trace(tool, params.clone(), actor, correlation_id).await;
        traces.push(trace);

        match result {
            Ok(value) => return Ok((traces, value)),
            Err(error) => {
                if policy.should_retry(&error, attempt) {
                    tracing::info!(
                        tool = error.tool_name,
                        attempt,
                        max_attempts = policy.max_attempts(),
                        "retrying tool call"
                    );
                    tokio::time::sleep(policy.backoff_for_attempt(attempt + 1)).await;
                    continue;
                }
                return Err(RetryExceeded {
                    tool_name: error.tool_name.clone(),
                    attempts: attempt,
                    last_error: error,
                    traces,
                });
            }
        }
    }
}
