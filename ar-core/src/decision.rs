//! The coordinator's routing decision for a turn.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A `CoordinatorDecision` that fails [`CoordinatorDecision::validate`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DecisionError {
    /// `stop == false` but `next_agent` was empty.
    #[error("decision names no next_agent and does not stop")]
    MissingNextAgent,
    /// `stop == false` but `task` was empty.
    #[error("decision has no task")]
    MissingTask,
    /// `stop == false` but `expected_output` was empty.
    #[error("decision has no expected_output")]
    MissingExpectedOutput,
}

/// The coordinator's verdict on what should happen next in a turn: stop
/// and reply directly, or route to a named agent with a task description
/// and the tools that task is expected to need.
///
/// Wire-compatible with LLM output: `{next_agent, task, expected_output,
/// stop, needed_tools}`. `next_agent`, `task`, and `expected_output` must
/// all be non-empty unless `stop` is set.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoordinatorDecision {
    /// The agent to route to. Required unless `stop` is set.
    #[serde(default)]
    pub next_agent: String,
    /// What the target agent should do, in the coordinator's own words.
    #[serde(default)]
    pub task: String,
    /// What a successful result looks like, for the agent and for trace
    /// readers.
    #[serde(default)]
    pub expected_output: String,
    /// `true` when the coordinator itself is answering — no agent dispatch.
    #[serde(default)]
    pub stop: bool,
    /// Tool names the coordinator expects the target agent to need.
    /// Advisory only; nothing in the turn engine enforces it.
    #[serde(default)]
    pub needed_tools: Vec<String>,
}

impl CoordinatorDecision {
    /// A decision that routes to `next_agent` with no particular tools
    /// called out.
    pub fn route(next_agent: impl Into<String>, task: impl Into<String>, expected_output: impl Into<String>) -> Self {
        Self {
            next_agent: next_agent.into(),
            task: task.into(),
            expected_output: expected_output.into(),
            stop: false,
            needed_tools: Vec::new(),
        }
    }

    /// A decision that routes to `next_agent`, naming the tools it
    /// expects that agent to need.
    pub fn route_with_tools(
        next_agent: impl Into<String>,
        task: impl Into<String>,
        expected_output: impl Into<String>,
        needed_tools: Vec<String>,
    ) -> Self {
        Self {
            needed_tools,
            ..Self::route(next_agent, task, expected_output)
        }
    }

    /// A decision that answers immediately without dispatching to any
    /// agent. `reply` is carried in `expected_output`, the only free-text
    /// field a stopping decision still has.
    pub fn stop(reply: impl Into<String>) -> Self {
        Self {
            next_agent: String::new(),
            task: String::new(),
            expected_output: reply.into(),
            stop: true,
            needed_tools: Vec::new(),
        }
    }

    /// Check the structural invariants every decision must satisfy before
    /// the orchestrator acts on it: a non-stopping decision must name a
    /// target, a task, and an expected output.
    pub fn validate(&self) -> Result<(), DecisionError> {
        if self.stop {
            return Ok(());
        }
        if self.next_agent.trim().is_empty() {
            return Err(DecisionError::MissingNextAgent);
        }
        if self.task.trim().is_empty() {
            return Err(DecisionError::MissingTask);
        }
        if self.expected_output.trim().is_empty() {
            return Err(DecisionError::MissingExpectedOutput);
        }
        Ok(())
    }

    /// Serialize to a JSON object, e.g. for embedding in an `Event`'s `data`.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).expect("CoordinatorDecision always serializes")
    }

    /// Parse a decision back out of a JSON object.
    pub fn from_json(value: serde_json::Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn route_without_target_fails_validation() {
        let bad = CoordinatorDecision::route("", "check weather", "a forecast");
        assert_eq!(bad.validate(), Err(DecisionError::MissingNextAgent));
    }

    #[test]
    fn route_without_task_fails_validation() {
        let bad = CoordinatorDecision::route("weather", "", "a forecast");
        assert_eq!(bad.validate(), Err(DecisionError::MissingTask));
    }

    #[test]
    fn route_without_expected_output_fails_validation() {
        let bad = CoordinatorDecision::route("weather", "check weather", "");
        assert_eq!(bad.validate(), Err(DecisionError::MissingExpectedOutput));
    }

    #[test]
    fn well_formed_route_validates() {
        let good = CoordinatorDecision::route("weather", "check the weather", "a current forecast");
        assert!(good.validate().is_ok());
    }

    #[test]
    fn a_stopping_decision_validates_even_with_empty_fields() {
        let good = CoordinatorDecision::stop("goodbye");
        assert!(good.validate().is_ok());
    }

    #[test]
    fn json_round_trip() {
        let d = CoordinatorDecision::route_with_tools(
            "weather",
            "check the weather",
            "a current forecast",
            vec!["open_meteo".to_string()],
        );
        let back = CoordinatorDecision::from_json(d.to_json()).unwrap();
        assert_eq!(d, back);
    }

    #[test]
    fn deserializes_the_literal_wire_shape() {
        let json = serde_json::json!({
            "next_agent": "weather",
            "task": "check the weather in Krakow",
            "expected_output": "a forecast with a temperature unit",
            "stop": false,
            "needed_tools": ["open_meteo"]
        });
        let decision = CoordinatorDecision::from_json(json).unwrap();
        assert_eq!(decision.next_agent, "weather");
        assert_eq!(decision.needed_tools, vec!["open_meteo".to_string()]);
        assert!(decision.validate().is_ok());
    }

    #[test]
    fn missing_optional_fields_default_rather_than_failing_to_parse() {
        let json = serde_json::json!({"next_agent": "weather", "task": "t", "expected_output": "o"});
        let decision = CoordinatorDecision::from_json(json).unwrap();
        assert!(!decision.stop);
        assert!(decision.needed_tools.is_empty());
    }
}
