//! The orchestrator's never-fails-silently routing fallback.

use ar_core::{CorrelationId, CoordinatorDecision, Message};
use ar_memory::TeamMemoryContext;
use ar_registry::{AgentCapability, Coordinator, CoordinatorError};
use async_trait::async_trait;

/// A legacy keyword-to-agent mapping. Used solely by [`DefaultCoordinator`]
/// — nothing else in the turn engine consults it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutingRule {
    /// Case-insensitive substring matched against the incoming message text.
    pub keyword: String,
    /// The agent a matching message routes to.
    pub agent_name: String,
}

impl RoutingRule {
    /// Construct a routing rule.
    pub fn new(keyword: impl Into<String>, agent_name: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            agent_name: agent_name.into(),
        }
    }
}

/// Routes by matching the incoming message's text against an ordered list
/// of legacy [`RoutingRule`]s, first match wins. Fails with
/// [`CoordinatorError::NoRoute`] when nothing matches, rather than
/// guessing.
///
/// The orchestrator falls back to this when no registered agent's
/// `as_coordinator` probe returns `Some` — a team with no dedicated
/// coordinator still needs *some* deterministic behavior, but unlike
/// [`crate::KeywordCoordinator`] this fallback never invents a target: it
/// either matches a rule or gives up.
pub struct DefaultCoordinator {
    rules: Vec<RoutingRule>,
}

impl DefaultCoordinator {
    /// Build a fallback coordinator around an explicit rule list.
    pub fn new(rules: Vec<RoutingRule>) -> Self {
        Self { rules }
    }
}

impl Default for DefaultCoordinator {
    /// A small default rule set covering the same intents
    /// [`crate::KeywordCoordinator`] classifies by keyword.
    fn default() -> Self {
        Self::new(vec![
            RoutingRule::new("weather", "weather"),
            RoutingRule::new("forecast", "weather"),
            RoutingRule::new("hotel", "stays"),
            RoutingRule::new("stay", "stays"),
            RoutingRule::new("itinerary", "planner"),
            RoutingRule::new("plan", "planner"),
        ])
    }
}

#[async_trait]
impl Coordinator for DefaultCoordinator {
    async fn decide(
        &self,
        message: &Message,
        _team_ctx: &TeamMemoryContext,
        _available_agents: &[AgentCapability],
        _correlation_id: Option<&CorrelationId>,
    ) -> Result<CoordinatorDecision, CoordinatorError> {
        let text = message.content.to_lowercase();
        let rule = self.rules.iter().find(|rule| text.contains(&rule.keyword.to_lowercase()));
        match rule {
            Some(rule) => Ok(CoordinatorDecision::route(
                rule.agent_name.clone(),
                message.content.clone(),
                format!("matched legacy routing rule keyword \"{}\"", rule.keyword),
            )),
            None => Err(CoordinatorError::NoRoute),
        }
    }
}
