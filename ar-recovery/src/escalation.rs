//! The optional LLM escalation hook.

use ar_core::{Task, ToolError};
use async_trait::async_trait;
use std::error::Error;

/// Something that can ask an LLM what to do about a tool failure the
/// local heuristics didn't recognize.
///
/// The response shape this trait models mirrors a JSON object of the
/// form `{"action": "retry_tool" | "fallback_tool" | "fail", "tool":
/// ..., "params": {...}, "reason": "..."}` — implementations are
/// responsible for getting their backing model to produce exactly that
/// and parsing it back into a [`ar_core::FixPlan`].
#[async_trait]
pub trait LlmEscalation: Send + Sync {
    /// Ask the model for a fix plan given the failure and the task that
    /// produced it.
    async fn propose_fix(
        &self,
        error: &ToolError,
        last_task: &Task,
    ) -> Result<ar_core::FixPlan, Box<dyn Error + Send + Sync>>;
}
