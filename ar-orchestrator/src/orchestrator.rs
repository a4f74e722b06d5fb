//! The turn engine itself.

use crate::{OrchestratorConfig, TurnError};
use ar_core::{CorrelationId, CoordinatorDecision, Event, EventType, Message, TraceEvent};
use ar_coordinator::DefaultCoordinator;
use ar_memory::{TeamMemory, TeamMemoryContext};
use ar_registry::{Agent, AgentRegistry, Coordinator};
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::sinks::{HistorySink, TraceSink};

/// Ties a coordinator-driven routing decision to agent dispatch, bounded
/// retries live inside agents themselves, and bounded team memory.
///
/// `Orchestrator` does not call tools directly — that's the concern of
/// whatever agent is dispatched to, using `ar-tool`/`ar-retry`/
/// `ar-recovery` internally. This type's only job is resolving *who*
/// handles a turn and stitching the resulting messages and events
/// together, the same separation of concerns `layer0::Orchestrator` and
/// `neuron-orch-local::LocalOrch` draw between dispatch and execution.
pub struct Orchestrator {
    agents: AgentRegistry,
    memory: Mutex<TeamMemory>,
    history: Mutex<Vec<Message>>,
    conversation: Mutex<Vec<TraceEvent>>,
    events: Mutex<Vec<Event>>,
    config: OrchestratorConfig,
    history_sink: Option<Arc<dyn HistorySink>>,
    trace_sink: Option<Arc<dyn TraceSink>>,
}

impl Orchestrator {
    /// Build an orchestrator around a fully-wired agent registry.
    pub fn new(agents: AgentRegistry, config: OrchestratorConfig) -> Self {
        let memory = TeamMemory::new(config.keep_scratchpad, config.summarize_every, config.keep_recent_events);
        Self {
            agents,
            memory: Mutex::new(memory),
            history: Mutex::new(Vec::new()),
            conversation: Mutex::new(Vec::new()),
            events: Mutex::new(Vec::new()),
            config,
            history_sink: None,
            trace_sink: None,
        }
    }

    /// Attach a sink that every user-facing message gets appended to.
    pub fn with_history_sink(mut self, sink: Arc<dyn HistorySink>) -> Self {
        self.history_sink = Some(sink);
        self
    }

    /// Attach a sink that every legacy trace entry gets appended to.
    /// Left unset, legacy `TraceEvent`s are still produced and kept in
    /// [`Orchestrator::team_conversation`] but never written anywhere
    /// durable.
    pub fn with_trace_sink(mut self, sink: Arc<dyn TraceSink>) -> Self {
        self.trace_sink = Some(sink);
        self
    }

    /// Wrap plain text as a user [`Message`], the same shape
    /// [`Orchestrator::handle`] expects.
    pub fn handle_user_text(text: impl Into<String>) -> Message {
        Message::new("user", text)
    }

    /// Handle one incoming user message end to end: resolve a
    /// coordinator, get a routing decision, dispatch to an agent unless
    /// the decision stops the turn outright, and return the single reply
    /// message. Event ordering within the turn is always `decision` →
    /// (`route` → agent-emitted events, unless the decision stops) →
    /// `respond`.
    pub async fn handle(&self, incoming: Message) -> Result<Message, TurnError> {
        let cid = incoming
            .correlation_id
            .clone()
            .unwrap_or_else(CorrelationId::generate);
        let incoming = incoming.with_correlation_id(&cid);
        self.record_message(&incoming).await;

        // Resolve the coordinator by name first, the way the original
        // system does ("look up coordinator_name in the registry"),
        // falling back to DefaultCoordinator if that name is unregistered
        // or isn't coordinator-capable.
        let coordinator_agent = self
            .agents
            .get(&self.config.coordinator_name)
            .ok()
            .filter(|agent| agent.as_coordinator().is_some());
        let is_fallback = coordinator_agent.is_none();
        let coordinator_name = coordinator_agent
            .as_ref()
            .map(|a| a.name().to_string())
            .unwrap_or_else(|| self.config.coordinator_name.clone());

        let team_ctx = self.team_context().await;
        let available_agents = self.agents.list_capabilities();

        let decision = match &coordinator_agent {
            Some(agent) => {
                let coordinator = agent
                    .as_coordinator()
                    .expect("filtered to agents whose as_coordinator probe succeeds");
                coordinator
                    .decide(&incoming, &team_ctx, &available_agents, Some(&cid))
                    .await
            }
            None => {
                DefaultCoordinator::default()
                    .decide(&incoming, &team_ctx, &available_agents, Some(&cid))
                    .await
            }
        }?;
        decision.validate()?;

        self.emit_decision(&coordinator_name, &decision, is_fallback, &cid).await;

        if decision.stop {
            return Ok(self
                .finish_with_reply(&coordinator_name, decision.expected_output.clone(), &cid)
                .await);
        }

        let target_name = decision.next_agent.clone();
        let agent = self.agents.get(&target_name)?;

        self.emit_route(&coordinator_name, &target_name, &incoming.content, &decision.task, &cid)
            .await;

        let output = agent
            .handle(&incoming, Some(&cid))
            .await
            .map_err(|source| TurnError::AgentFailed {
                agent: target_name.clone(),
                source,
            })?;

        for event in &output.events {
            let event = event.with_correlation_id(&cid);
            self.record_event(&event).await;
        }

        let message = output
            .message
            .unwrap_or_else(|| Message::new(target_name.clone(), ""))
            .with_correlation_id(&cid);
        self.record_message(&message).await;
        self.emit_respond(&message, &cid).await;

        Ok(message)
    }

    /// Ordered snapshot of every user-facing [`Message`] recorded so far
    /// (user then agent, per turn).
    pub async fn history(&self) -> Vec<Message> {
        self.history.lock().await.clone()
    }

    /// Alias for [`Orchestrator::history`].
    pub async fn user_history(&self) -> Vec<Message> {
        self.history().await
    }

    /// Ordered snapshot of every legacy [`TraceEvent`] the orchestrator
    /// itself has appended (debug tooling that hasn't migrated to
    /// [`Orchestrator::team_events`]).
    pub async fn team_conversation(&self) -> Vec<TraceEvent> {
        self.conversation.lock().await.clone()
    }

    /// Ordered snapshot of every unified [`Event`] appended so far, across
    /// every turn.
    pub async fn team_events(&self) -> Vec<Event> {
        self.events.lock().await.clone()
    }

    /// Snapshot of the condensed team memory a coordinator would see if it
    /// decided right now.
    pub async fn team_context(&self) -> TeamMemoryContext {
        self.memory.lock().await.context()
    }

    /// Assert facts that should persist in team memory regardless of
    /// condensation — the explicit API a coordinator, recovery agent, or
    /// critic uses instead of reaching into team memory directly.
    pub async fn add_team_facts(&self, facts: impl IntoIterator<Item = String>) {
        self.memory.lock().await.add_facts(facts);
    }

    /// Clear user history, the legacy trace, the unified event stream, and
    /// team memory. Leaves the agent registry and sinks untouched.
    pub async fn reset(&self) {
        self.history.lock().await.clear();
        self.conversation.lock().await.clear();
        self.events.lock().await.clear();
        self.memory.lock().await.clear();
    }

    async fn finish_with_reply(&self, actor: &str, content: String, cid: &CorrelationId) -> Message {
        let message = Message::new(actor, content).with_correlation_id(cid);
        self.record_message(&message).await;
        self.emit_respond(&message, cid).await;
        message
    }

    async fn record_message(&self, message: &Message) {
        self.history.lock().await.push(message.clone());
        if let Some(sink) = &self.history_sink {
            if let Err(e) = sink.append(message).await {
                tracing::warn!(error = %e, "failed to persist message to history sink");
            }
        }
    }

    async fn record_event(&self, event: &Event) {
        self.memory.lock().await.add_event(event);
        self.events.lock().await.push(event.clone());
    }

    /// Only pay for legacy trace construction and serialization when a
    /// `TraceSink` is actually registered — otherwise the legacy stream
    /// still gets kept in `conversation` but has no durable reader.
    async fn record_trace(&self, trace: TraceEvent) {
        self.conversation.lock().await.push(trace.clone());
        if let Some(sink) = &self.trace_sink {
            let event = trace.to_event();
            if let Err(e) = sink.append(&event).await {
                tracing::warn!(error = %e, "failed to persist trace event");
            }
        }
    }

    async fn emit_decision(
        &self,
        coordinator_name: &str,
        decision: &CoordinatorDecision,
        is_fallback: bool,
        cid: &CorrelationId,
    ) {
        let target = if decision.stop {
            coordinator_name.to_string()
        } else {
            decision.next_agent.clone()
        };
        let mut data = BTreeMap::new();
        data.insert("decision".to_string(), decision.to_json());
        let event = Event::new(EventType::Decision, coordinator_name, &target, data).with_correlation_id(cid);
        self.record_event(&event).await;
        // A decision event is always recorded on the unified stream, but
        // the legacy trace only gets an entry when the coordinator was
        // actually resolved from the registry — the fallback default
        // never did, in the original system either.
        if !is_fallback {
            self.record_trace(TraceEvent::ok(
                coordinator_name,
                "decision",
                &target,
                BTreeMap::new(),
                Some(cid.clone()),
            ))
            .await;
        }
    }

    async fn emit_route(&self, actor: &str, target: &str, text: &str, task: &str, cid: &CorrelationId) {
        let mut data = BTreeMap::new();
        data.insert("text".to_string(), serde_json::json!(text));
        data.insert("task".to_string(), serde_json::json!(task));
        let event = Event::new(EventType::Route, actor, target, data).with_correlation_id(cid);
        self.record_event(&event).await;
        self.record_trace(TraceEvent::ok(actor, "route", target, BTreeMap::new(), Some(cid.clone())))
            .await;
    }

    async fn emit_respond(&self, message: &Message, cid: &CorrelationId) {
        let mut data = BTreeMap::new();
        data.insert("content".to_string(), serde_json::json!(message.content));
        let event = Event::new(EventType::Respond, &message.sender, "user", data).with_correlation_id(cid);
        self.record_event(&event).await;
        self.record_trace(TraceEvent::ok(
            &message.sender,
            "respond",
            "user",
            BTreeMap::new(),
            Some(cid.clone()),
        ))
        .await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ar_core::AgentResult;
    use ar_registry::{AgentCapability, CoordinatorError};
    use async_trait::async_trait;

    struct EchoAgent;

    #[async_trait]
    impl Agent for EchoAgent {
        fn name(&self) -> &str {
            "weather"
        }
        fn description(&self) -> &str {
            "reports current weather"
        }
        async fn handle(
            &self,
            message: &Message,
            _correlation_id: Option<&CorrelationId>,
        ) -> Result<AgentResult, Box<dyn std::error::Error + Send + Sync>> {
            Ok(AgentResult::message(Message::new("weather", format!("handled {}", message.content))))
        }
    }

    fn orchestrator_with_echo_agent() -> Orchestrator {
        let mut agents = AgentRegistry::new();
        agents.register(Arc::new(EchoAgent)).unwrap();
        Orchestrator::new(agents, OrchestratorConfig::default())
    }

    #[tokio::test]
    async fn routes_to_the_only_agent_with_no_coordinator_registered() {
        let orchestrator = orchestrator_with_echo_agent();
        let reply = orchestrator.handle(Message::new("user", "what's the weather?")).await.unwrap();
        assert!(reply.content.starts_with("handled"));
        let events = orchestrator.team_events().await;
        assert!(events.iter().any(|e| e.event_type == EventType::Decision));
        assert!(events.iter().any(|e| e.event_type == EventType::Route));
        assert!(events.iter().any(|e| e.event_type == EventType::Respond));
    }

    #[tokio::test]
    async fn every_event_in_a_turn_shares_one_correlation_id() {
        let orchestrator = orchestrator_with_echo_agent();
        let reply = orchestrator.handle(Message::new("user", "what's the weather?")).await.unwrap();
        let cid = reply.correlation_id.clone().expect("handle always stamps a correlation id");
        for event in orchestrator.team_events().await {
            assert_eq!(event.correlation_id, Some(cid.clone()));
        }
    }

    #[tokio::test]
    async fn no_matching_routing_rule_is_a_fatal_no_route_error() {
        // No agents registered at all: DefaultCoordinator's legacy rule
        // list has nothing to match "hi" against, so the turn is fatal
        // rather than silently stopping.
        let agents = AgentRegistry::new();
        let orchestrator = Orchestrator::new(agents, OrchestratorConfig::default());
        let err = orchestrator.handle(Message::new("user", "hi")).await.unwrap_err();
        assert!(matches!(err, TurnError::NoRoute));
    }

    struct NamedCoordinator;

    #[async_trait]
    impl Agent for NamedCoordinator {
        fn name(&self) -> &str {
            "coordinator"
        }
        async fn handle(
            &self,
            _message: &Message,
            _correlation_id: Option<&CorrelationId>,
        ) -> Result<AgentResult, Box<dyn std::error::Error + Send + Sync>> {
            unreachable!("this coordinator is never dispatched to directly")
        }
        fn as_coordinator(&self) -> Option<&dyn Coordinator> {
            Some(self)
        }
    }

    #[async_trait]
    impl Coordinator for NamedCoordinator {
        async fn decide(
            &self,
            _message: &Message,
            _team_ctx: &TeamMemoryContext,
            _available_agents: &[AgentCapability],
            _correlation_id: Option<&CorrelationId>,
        ) -> Result<CoordinatorDecision, CoordinatorError> {
            Ok(CoordinatorDecision::route(
                "weather",
                "check the weather",
                "named coordinator always routes to weather",
            ))
        }
    }

    #[tokio::test]
    async fn resolves_the_coordinator_by_the_configured_name() {
        let mut agents = AgentRegistry::new();
        agents.register(Arc::new(EchoAgent)).unwrap();
        agents.register(Arc::new(NamedCoordinator)).unwrap();
        let orchestrator = Orchestrator::new(agents, OrchestratorConfig::default());
        orchestrator.handle(Message::new("user", "anything")).await.unwrap();
        let decision_event = orchestrator
            .team_events()
            .await
            .into_iter()
            .find(|e| e.event_type == EventType::Decision)
            .unwrap();
        assert_eq!(decision_event.actor, "coordinator");
    }

    struct StopCoordinator;

    #[async_trait]
    impl Agent for StopCoordinator {
        fn name(&self) -> &str {
            "coordinator"
        }
        async fn handle(
            &self,
            _message: &Message,
            _correlation_id: Option<&CorrelationId>,
        ) -> Result<AgentResult, Box<dyn std::error::Error + Send + Sync>> {
            unreachable!("this coordinator is never dispatched to directly")
        }
        fn as_coordinator(&self) -> Option<&dyn Coordinator> {
            Some(self)
        }
    }

    #[async_trait]
    impl Coordinator for StopCoordinator {
        async fn decide(
            &self,
            _message: &Message,
            _team_ctx: &TeamMemoryContext,
            _available_agents: &[AgentCapability],
            _correlation_id: Option<&CorrelationId>,
        ) -> Result<CoordinatorDecision, CoordinatorError> {
            Ok(CoordinatorDecision::stop("goodbye"))
        }
    }

    #[tokio::test]
    async fn stopping_decision_produces_decision_then_respond_with_no_route() {
        let mut agents = AgentRegistry::new();
        agents.register(Arc::new(EchoAgent)).unwrap();
        agents.register(Arc::new(StopCoordinator)).unwrap();
        let orchestrator = Orchestrator::new(agents, OrchestratorConfig::default());
        let reply = orchestrator.handle(Message::new("user", "exit")).await.unwrap();
        assert_eq!(reply.sender, "coordinator");

        let events = orchestrator.team_events().await;
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].event_type, EventType::Decision);
        assert_eq!(events[1].event_type, EventType::Respond);
        assert!(!events.iter().any(|e| e.event_type == EventType::Route));
    }

    #[tokio::test]
    async fn add_team_facts_surfaces_in_team_context() {
        let orchestrator = orchestrator_with_echo_agent();
        orchestrator.add_team_facts(["destination: Krakow".to_string()]).await;
        let ctx = orchestrator.team_context().await;
        assert_eq!(ctx.facts, vec!["destination: Krakow".to_string()]);
    }

    #[tokio::test]
    async fn reset_clears_history_events_trace_and_memory() {
        let orchestrator = orchestrator_with_echo_agent();
        orchestrator.handle(Message::new("user", "what's the weather?")).await.unwrap();
        orchestrator.reset().await;
        assert!(orchestrator.history().await.is_empty());
        assert!(orchestrator.team_events().await.is_empty());
        assert!(orchestrator.team_conversation().await.is_empty());
        assert!(orchestrator.team_context().await.facts.is_empty());
    }

    #[test]
    fn handle_user_text_wraps_plain_text_as_a_user_message() {
        let message = Orchestrator::handle_user_text("hi there");
        assert_eq!(message.sender, "user");
        assert_eq!(message.content, "hi there");
    }
}
