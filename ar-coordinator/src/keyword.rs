//! A small keyword-matching reference coordinator — no model call required.

use ar_core::{CorrelationId, CoordinatorDecision, Message};
use ar_memory::TeamMemoryContext;
use ar_registry::{AgentCapability, Coordinator, CoordinatorError};
use async_trait::async_trait;

const EXIT_WORDS: &[&str] = &["exit", "quit", "stop", "goodbye", "bye"];
const WEATHER_WORDS: &[&str] = &["weather", "forecast", "temperature"];
const STAYS_WORDS: &[&str] = &["hotel", "stay", "lodging", "accommodation"];
const PLAN_WORDS: &[&str] = &["plan", "itinerary", "trip"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Intent {
    Weather,
    Stays,
    Plan,
    Exit,
    Other,
}

fn classify(text: &str) -> Intent {
    if EXIT_WORDS.iter().any(|w| text.contains(w)) {
        Intent::Exit
    } else if WEATHER_WORDS.iter().any(|w| text.contains(w)) {
        Intent::Weather
    } else if STAYS_WORDS.iter().any(|w| text.contains(w)) {
        Intent::Stays
    } else if PLAN_WORDS.iter().any(|w| text.contains(w)) {
        Intent::Plan
    } else {
        Intent::Other
    }
}

/// Classifies the incoming message into one of `{weather, stays, plan,
/// exit, other}` by lowercase substring matching, and routes to the
/// capability whose name matches the classified intent if one is
/// registered, else to `"planner"` if registered, else to the first
/// registered agent.
///
/// This is the same shape of routing logic the original system used: a
/// fixed, language-specific keyword table checked before anything else
/// for an explicit exit phrase.
pub struct KeywordCoordinator;

#[async_trait]
impl Coordinator for KeywordCoordinator {
    async fn decide(
        &self,
        message: &Message,
        _team_ctx: &TeamMemoryContext,
        available_agents: &[AgentCapability],
        _correlation_id: Option<&CorrelationId>,
    ) -> Result<CoordinatorDecision, CoordinatorError> {
        let text = message.content.to_lowercase();

        match classify(&text) {
            Intent::Exit => return Ok(CoordinatorDecision::stop("goodbye")),
            Intent::Weather => {
                if let Some(cap) = available_agents.iter().find(|c| c.name == "weather") {
                    return Ok(route_to(cap, message, "message matched the weather intent"));
                }
            }
            Intent::Stays => {
                if let Some(cap) = available_agents.iter().find(|c| c.name == "stays") {
                    return Ok(route_to(cap, message, "message matched the stays intent"));
                }
            }
            Intent::Plan => {
                if let Some(cap) = available_agents.iter().find(|c| c.name == "planner") {
                    return Ok(route_to(cap, message, "message matched the plan intent"));
                }
            }
            Intent::Other => {}
        }

        if let Some(cap) = available_agents.iter().find(|c| c.name == "planner") {
            return Ok(route_to(cap, message, "no intent matched, routing to the planner"));
        }

        match available_agents.first() {
            Some(cap) => Ok(route_to(
                cap,
                message,
                "no intent matched and no planner registered, routing to the first agent",
            )),
            None => Err(CoordinatorError::NoRoute),
        }
    }
}

fn route_to(capability: &AgentCapability, message: &Message, expected_output: &str) -> CoordinatorDecision {
    CoordinatorDecision::route(capability.name.clone(), message.content.clone(), expected_output)
}
