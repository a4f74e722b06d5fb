//! The read-only view of team memory handed to agents and coordinators.

use ar_core::Event;

/// What an agent or coordinator sees when it asks team memory for
/// context: the condensed summary, recorded facts, whatever recent
/// detail hasn't been condensed away yet, and the raw recent events.
#[derive(Debug, Clone, PartialEq)]
pub struct TeamMemoryContext {
    /// Condensed gist of everything older than the scratchpad window.
    pub summary: String,
    /// Facts recorded explicitly, never condensed away.
    pub facts: Vec<String>,
    /// Recent scratchpad entries, most recent last.
    pub scratchpad: Vec<String>,
    /// The most recent full events, most recent last.
    pub recent_events: Vec<Event>,
}

impl TeamMemoryContext {
    /// Render this context as a single block of text, suitable for
    /// splicing into a prompt: summary paragraph, then facts, then the
    /// scratchpad tail.
    pub fn render(&self) -> String {
        let mut out = String::new();
        if !self.summary.is_empty() {
            out.push_str(&self.summary);
            out.push('\n');
        }
        for fact in &self.facts {
            out.push_str("- ");
            out.push_str(fact);
            out.push('\n');
        }
        for entry in &self.scratchpad {
            out.push_str(entry);
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_orders_summary_then_facts_then_scratchpad() {
        let ctx = TeamMemoryContext {
            summary: "previously, the team looked up weather".to_string(),
            facts: vec!["destination: Krakow".to_string()],
            scratchpad: vec!["route -> weather".to_string()],
            recent_events: Vec::new(),
        };
        let rendered = ctx.render();
        let summary_pos = rendered.find("previously").unwrap();
        let fact_pos = rendered.find("destination").unwrap();
        let scratch_pos = rendered.find("route ->").unwrap();
        assert!(summary_pos < fact_pos);
        assert!(fact_pos < scratch_pos);
    }
}
