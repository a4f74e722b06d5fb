//! The unit of work a coordinator hands to an agent or a tool.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A directive to call a named target (agent or tool) with parameters.
///
/// `Task` is intentionally target-agnostic: whether `target` resolves to
/// an agent name or a tool name is a property of the registry that
/// receives it, not of the task itself.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// The agent or tool this task is directed at.
    pub target: String,
    /// Call parameters.
    #[serde(default)]
    pub params: BTreeMap<String, serde_json::Value>,
}

impl Task {
    /// Construct a task with no parameters.
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            params: BTreeMap::new(),
        }
    }

    /// Construct a task with parameters.
    pub fn with_params(target: impl Into<String>, params: BTreeMap<String, serde_json::Value>) -> Self {
        Self {
            target: target.into(),
            params,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_has_empty_params() {
        let t = Task::new("open_meteo");
        assert_eq!(t.target, "open_meteo");
        assert!(t.params.is_empty());
    }
}
