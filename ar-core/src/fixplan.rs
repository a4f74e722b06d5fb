//! The recovery agent's proposed remedy for a failed task.

use crate::Task;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// What a recovery proposal recommends doing next.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FixAction {
    /// Re-run the same tool, usually with adjusted params.
    RetryTool,
    /// Run a different tool instead.
    FallbackTool,
    /// Give up and surface the failure to the user.
    Fail,
}

/// A recovery agent's proposed remedy for a failed tool call.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixPlan {
    /// What to do.
    pub action: FixAction,
    /// The tool to call, when `action != Fail`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool: Option<String>,
    /// Parameters to call `tool` with, when `action != Fail`.
    #[serde(default)]
    pub params: BTreeMap<String, serde_json::Value>,
    /// Why this remedy was chosen, for logging and operator review.
    pub reason: String,
}

impl FixPlan {
    /// A plan to retry the same tool with new params.
    pub fn retry_tool(
        tool: impl Into<String>,
        params: BTreeMap<String, serde_json::Value>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            action: FixAction::RetryTool,
            tool: Some(tool.into()),
            params,
            reason: reason.into(),
        }
    }

    /// A plan to call a different tool instead.
    pub fn fallback_tool(
        tool: impl Into<String>,
        params: BTreeMap<String, serde_json::Value>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            action: FixAction::FallbackTool,
            tool: Some(tool.into()),
            params,
            reason: reason.into(),
        }
    }

    /// A plan to give up.
    pub fn fail(reason: impl Into<String>) -> Self {
        Self {
            action: FixAction::Fail,
            tool: None,
            params: BTreeMap::new(),
            reason: reason.into(),
        }
    }

    /// Turn this plan into the `Task` it recommends executing, if any.
    /// Returns `None` when `action == Fail`.
    pub fn as_task(&self) -> Option<Task> {
        let tool = self.tool.clone()?;
        Some(Task::with_params(tool, self.params.clone()))
    }

    /// Apply the Python original's safety downgrade: a `RetryTool` plan
    /// that names a different tool than the one that just failed is not
    /// actually a retry — demote it to `FallbackTool` so callers can
    /// trust that `RetryTool` always means "same tool, new params".
    pub fn normalize_against(mut self, failed_tool: &str) -> Self {
        if self.action == FixAction::RetryTool {
            if let Some(tool) = &self.tool {
                if tool != failed_tool {
                    self.action = FixAction::FallbackTool;
                }
            }
        }
        self
    }
}
