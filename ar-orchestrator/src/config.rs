//! Orchestrator-wide configuration.

/// Tunables for a single [`crate::Orchestrator`] instance.
///
/// Built with defaults and adjusted via `with_*` methods, the same shape
/// every other crate in this workspace uses for its config objects —
/// there is no generic file/env loader here, since the orchestrator is
/// wired up in code by whatever embeds it. Tool-call retry policy is
/// deliberately not here: retries happen inside whichever agent calls a
/// tool, via `ar-retry`, not centrally in the turn engine.
#[derive(Debug, Clone)]
pub struct OrchestratorConfig {
    /// Name looked up in the agent registry to resolve the coordinator
    /// for a turn. If no agent by this name is registered (or it isn't
    /// coordinator-capable), [`crate::Orchestrator`] falls back to
    /// `ar_coordinator::DefaultCoordinator`.
    pub coordinator_name: String,
    /// How many team-memory events must accumulate since the last
    /// condensation before the next chunk is folded into the rolling
    /// summary. `0` disables cadence-based condensation entirely (the
    /// scratchpad overflow safety valve still applies).
    pub summarize_every: usize,
    /// How many of the most recent full events team memory's context
    /// snapshot reports verbatim, alongside the scratchpad.
    pub keep_recent_events: usize,
    /// How many recent scratchpad entries team memory keeps verbatim
    /// before condensing older ones into the rolling summary.
    pub keep_scratchpad: usize,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            coordinator_name: "coordinator".to_string(),
            summarize_every: 12,
            keep_recent_events: 20,
            keep_scratchpad: 12,
        }
    }
}

impl OrchestratorConfig {
    /// Start from defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the agent name the registry is queried with to resolve
    /// the coordinator.
    pub fn with_coordinator_name(mut self, coordinator_name: impl Into<String>) -> Self {
        self.coordinator_name = coordinator_name.into();
        self
    }

    /// Override the team-memory summarization cadence.
    pub fn with_summarize_every(mut self, summarize_every: usize) -> Self {
        self.summarize_every = summarize_every;
        self
    }

    /// Override how many recent events team memory reports verbatim.
    pub fn with_keep_recent_events(mut self, keep_recent_events: usize) -> Self {
        self.keep_recent_events = keep_recent_events;
        self
    }

    /// Override how many scratchpad entries team memory keeps verbatim.
    pub fn with_keep_scratchpad(mut self, keep_scratchpad: usize) -> Self {
        self.keep_scratchpad = keep_scratchpad;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let config = OrchestratorConfig::default();
        assert_eq!(config.coordinator_name, "coordinator");
        assert!(config.summarize_every > 0);
        assert!(config.keep_recent_events > 0);
        assert!(config.keep_scratchpad > 0);
    }

    #[test]
    fn builders_override_defaults() {
        let config = OrchestratorConfig::new()
            .with_coordinator_name("router")
            .with_summarize_every(5)
            .with_keep_recent_events(10)
            .with_keep_scratchpad(4);
        assert_eq!(config.coordinator_name, "router");
        assert_eq!(config.summarize_every, 5);
        assert_eq!(config.keep_recent_events, 10);
        assert_eq!(config.keep_scratchpad, 4);
    }
}
