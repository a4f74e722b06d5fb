//! The heuristic fast path, plus the agent that wires it to LLM escalation.

use crate::LlmEscalation;
use ar_core::{FixPlan, Task, ToolError, ToolErrorType};
use regex::Regex;
use std::sync::Arc;
use std::sync::OnceLock;

/// Proposes a [`FixPlan`] for a failed tool call.
///
/// Tries, in order: a "no results" pattern, a malformed-date pattern, a
/// transient-upstream pattern, and only then — if an [`LlmEscalation`]
/// was configured — asks the model. With no heuristic match and no LLM
/// configured, the default is to fail the task rather than spin forever.
pub struct RecoveryAgent {
    llm: Option<Arc<dyn LlmEscalation>>,
}

impl RecoveryAgent {
    /// A recovery agent with no LLM escalation; heuristics only.
    pub fn new() -> Self {
        Self { llm: None }
    }

    /// A recovery agent that escalates to `llm` when heuristics don't match.
    pub fn with_llm(llm: Arc<dyn LlmEscalation>) -> Self {
        Self { llm: Some(llm) }
    }

    /// Propose a fix for `error`, which was produced by calling
    /// `last_task.target` with `last_task.params`.
    pub async fn propose_fix(&self, error: &ToolError, last_task: &Task) -> FixPlan {
        if let Some(plan) = no_results_heuristic(error, last_task) {
            return plan.normalize_against(&last_task.target);
        }
        if let Some(plan) = invalid_date_heuristic(error, last_task) {
            return plan.normalize_against(&last_task.target);
        }
        if let Some(plan) = transient_heuristic(error, last_task) {
            return plan.normalize_against(&last_task.target);
        }

        match &self.llm {
            Some(llm) => match llm.propose_fix(error, last_task).await {
                Ok(plan) => plan.normalize_against(&last_task.target),
                Err(e) => {
                    tracing::warn!(error = %e, "llm escalation failed, failing task");
                    FixPlan::fail(format!("llm escalation failed: {e}"))
                }
            },
            None => FixPlan::fail(format!(
                "no heuristic matched and no llm escalation configured: {}",
                error.message
            )),
        }
    }
}

impl Default for RecoveryAgent {
    fn default() -> Self {
        Self::new()
    }
}

const NO_RESULTS_LANGUAGE: &str = "pl";
const NO_RESULTS_MIN_COUNT: i64 = 5;

fn no_results_heuristic(error: &ToolError, last_task: &Task) -> Option<FixPlan> {
    let message = error.message.to_lowercase();
    if !(message.contains("no results") || message.contains("no result") || message.contains("not found")) {
        return None;
    }

    let mut params = last_task.params.clone();
    let mut patched_any = false;

    if let Some(language) = last_task.params.get("language").and_then(|v| v.as_str()) {
        if language != NO_RESULTS_LANGUAGE {
            params.insert("language".to_string(), serde_json::json!(NO_RESULTS_LANGUAGE));
            patched_any = true;
        }
    }

    if let Some(count) = last_task.params.get("count") {
        let current = count.as_i64().unwrap_or(1);
        let bumped = current.max(NO_RESULTS_MIN_COUNT);
        params.insert("count".to_string(), serde_json::json!(bumped));
        patched_any = true;
    }

    if patched_any {
        return Some(FixPlan::retry_tool(
            &last_task.target,
            params,
            "no results found, retrying in Polish with a wider result count",
        ));
    }

    Some(FixPlan::fallback_tool(
        "fallback_geocoder",
        last_task.params.clone(),
        "no results found, trying the fallback geocoder",
    ))
}

fn date_pattern_slash_or_dot() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(\d{4})[/.](\d{2})[/.](\d{2})$").unwrap())
}

fn date_pattern_day_first() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(\d{2})-(\d{2})-(\d{4})$").unwrap())
}

/// Normalize a single date-like string to `YYYY-MM-DD`, recognizing
/// `YYYY/MM/DD`, `YYYY.MM.DD`, and `DD-MM-YYYY`. Returns `None` if
/// nothing matches.
pub fn normalize_date(raw: &str) -> Option<String> {
    if let Some(caps) = date_pattern_slash_or_dot().captures(raw) {
        return Some(format!("{}-{}-{}", &caps[1], &caps[2], &caps[3]));
    }
    if let Some(caps) = date_pattern_day_first().captures(raw) {
        return Some(format!("{}-{}-{}", &caps[3], &caps[2], &caps[1]));
    }
    None
}

fn invalid_date_heuristic(error: &ToolError, last_task: &Task) -> Option<FixPlan> {
    let message = error.message.to_lowercase();
    let looks_like_date_error = error.status_code == Some(400)
        || message.contains("invalid date")
        || message.contains("date format")
        || message.contains("fromisoformat");
    if !looks_like_date_error {
        return None;
    }

    let date = last_task.params.get("date").and_then(|v| v.as_str())?;
    if date.is_empty() {
        return None;
    }
    let fixed = normalize_date(date)?;

    let mut params = last_task.params.clone();
    params.insert("date".to_string(), serde_json::json!(fixed));
    Some(FixPlan::retry_tool(
        &last_task.target,
        params,
        "normalized a malformed date parameter to ISO-8601",
    ))
}

fn transient_heuristic(error: &ToolError, last_task: &Task) -> Option<FixPlan> {
    let message = error.message.to_lowercase();
    let is_transient = error.error_type == ToolErrorType::Timeout
        || message.contains("temporar")
        || message.contains("timeout")
        || message.contains("try again")
        || message.contains("rate limit")
        || message.contains("too many requests");
    if !is_transient {
        return None;
    }
    Some(FixPlan::retry_tool(
        &last_task.target,
        last_task.params.clone(),
        "transient upstream failure, retrying unchanged",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ar_core::FixAction;
    use std::collections::BTreeMap;

    fn task(target: &str, params: BTreeMap<String, serde_json::Value>) -> Task {
        Task::with_params(target, params)
    }

    #[tokio::test]
    async fn no_results_patches_language_to_polish_and_bumps_count() {
        // Spec scenario S5: location "Warszawie" found nothing in
        // English with count=1; retry in Polish with a wider count.
        let mut params = BTreeMap::new();
        params.insert("location".to_string(), serde_json::json!("Warszawie"));
        params.insert("count".to_string(), serde_json::json!(1));
        params.insert("language".to_string(), serde_json::json!("en"));
        let t = task("open_meteo", params);
        let err = ToolError::new(
            "open_meteo",
            ToolErrorType::Exception,
            "Open-Meteo geocoding: no results for 'Warszawie'",
            "trace",
            t.params.clone(),
        );

        let agent = RecoveryAgent::new();
        let plan = agent.propose_fix(&err, &t).await;
        assert_eq!(plan.action, FixAction::RetryTool);
        assert_eq!(plan.params.get("language"), Some(&serde_json::json!("pl")));
        assert_eq!(plan.params.get("count"), Some(&serde_json::json!(5)));
    }

    #[tokio::test]
    async fn no_results_already_polish_with_no_count_falls_back_to_geocoder() {
        let mut params = BTreeMap::new();
        params.insert("language".to_string(), serde_json::json!("pl"));
        let t = task("open_meteo", params);
        let err = ToolError::new("open_meteo", ToolErrorType::Exception, "no results", "trace", t.params.clone());

        let agent = RecoveryAgent::new();
        let plan = agent.propose_fix(&err, &t).await;
        assert_eq!(plan.action, FixAction::FallbackTool);
        assert_eq!(plan.tool.as_deref(), Some("fallback_geocoder"));
    }

    #[tokio::test]
    async fn no_results_with_no_matching_params_falls_back_to_geocoder() {
        let t = task("open_meteo", BTreeMap::new());
        let err = ToolError::new("open_meteo", ToolErrorType::Exception, "no results", "trace", t.params.clone());

        let agent = RecoveryAgent::new();
        let plan = agent.propose_fix(&err, &t).await;
        assert_eq!(plan.action, FixAction::FallbackTool);
        assert_eq!(plan.tool.as_deref(), Some("fallback_geocoder"));
    }

    #[tokio::test]
    async fn no_results_count_already_high_enough_is_still_patched() {
        let mut params = BTreeMap::new();
        params.insert("count".to_string(), serde_json::json!(10));
        let t = task("open_meteo", params);
        let err = ToolError::new("open_meteo", ToolErrorType::Exception, "not found", "trace", t.params.clone());

        let agent = RecoveryAgent::new();
        let plan = agent.propose_fix(&err, &t).await;
        assert_eq!(plan.action, FixAction::RetryTool);
        assert_eq!(plan.params.get("count"), Some(&serde_json::json!(10)));
    }

    #[tokio::test]
    async fn invalid_date_is_normalized_and_retried() {
        let mut params = BTreeMap::new();
        params.insert("date".to_string(), serde_json::json!("2026/07/28"));
        let t = task("book_stay", params);
        let err = ToolError::new("book_stay", ToolErrorType::Exception, "invalid date format", "trace", t.params.clone())
            .with_status_code(400);

        let agent = RecoveryAgent::new();
        let plan = agent.propose_fix(&err, &t).await;
        assert_eq!(plan.action, FixAction::RetryTool);
        assert_eq!(plan.params.get("date"), Some(&serde_json::json!("2026-07-28")));
    }

    #[tokio::test]
    async fn day_first_date_is_normalized() {
        assert_eq!(normalize_date("28-07-2026"), Some("2026-07-28".to_string()));
        assert_eq!(normalize_date("2026.07.28"), Some("2026-07-28".to_string()));
        assert_eq!(normalize_date("not-a-date"), None);
    }

    #[tokio::test]
    async fn transient_http_error_retries_unchanged() {
        let t = task("open_meteo", BTreeMap::new());
        let err = ToolError::new(
            "open_meteo",
            ToolErrorType::HttpError,
            "upstream rate limit exceeded, try again shortly",
            "trace",
            t.params.clone(),
        )
        .with_status_code(429);

        let agent = RecoveryAgent::new();
        let plan = agent.propose_fix(&err, &t).await;
        assert_eq!(plan.action, FixAction::RetryTool);
        assert_eq!(plan.tool.as_deref(), Some("open_meteo"));
    }

    #[tokio::test]
    async fn timeout_error_type_is_transient_regardless_of_message() {
        let t = task("open_meteo", BTreeMap::new());
        let err = ToolError::new("open_meteo", ToolErrorType::Timeout, "deadline exceeded", "trace", t.params.clone());

        let agent = RecoveryAgent::new();
        let plan = agent.propose_fix(&err, &t).await;
        assert_eq!(plan.action, FixAction::RetryTool);
    }

    #[tokio::test]
    async fn unrecognized_failure_with_no_llm_fails() {
        let t = task("open_meteo", BTreeMap::new());
        let err = ToolError::new("open_meteo", ToolErrorType::Other, "weird shape", "trace", t.params.clone());

        let agent = RecoveryAgent::new();
        let plan = agent.propose_fix(&err, &t).await;
        assert_eq!(plan.action, FixAction::Fail);
    }
}
