//! The scratchpad-plus-summary memory store itself.

use crate::{RollingSummary, TeamMemoryContext};
use ar_core::{Event, EventType};

const MAX_SHORT_DATA_LEN: usize = 200;
const MAX_HIGHLIGHT_LINES: usize = 6;

/// Bounded memory of what's happened in a team's shared event stream.
///
/// Two condensation mechanisms run side by side:
///
/// - An overflow safety valve: once the scratchpad passes `max
///   (keep_scratchpad * 3, 30)` entries, everything older than the most
///   recent `max(keep_scratchpad * 2, 20)` is folded into the rolling
///   summary so the scratchpad never grows without bound even if
///   cadence-based summarization falls behind.
/// - Cadence-based summarization: every `summarize_every` events, the
///   next chunk of that size is condensed into one deterministic summary
///   block (counts by event type plus up to six highlight lines), and
///   the scratchpad is trimmed back down to `keep_scratchpad` entries.
///
/// Both are lossy-but-legible folds with no model call involved.
pub struct TeamMemory {
    keep_scratchpad: usize,
    summarize_every: usize,
    keep_recent: usize,
    events: Vec<Event>,
    scratchpad: Vec<String>,
    summary: RollingSummary,
    last_summarized_index: usize,
}

impl TeamMemory {
    /// Create team memory with the given scratchpad window, summarization
    /// cadence, and recent-event retention.
    pub fn new(keep_scratchpad: usize, summarize_every: usize, keep_recent: usize) -> Self {
        Self {
            keep_scratchpad: keep_scratchpad.max(1),
            summarize_every,
            keep_recent,
            events: Vec::new(),
            scratchpad: Vec::new(),
            summary: RollingSummary::new(),
            last_summarized_index: 0,
        }
    }

    /// How many events have been folded into the rolling summary so far.
    pub fn condensed_events(&self) -> usize {
        self.last_summarized_index
    }

    fn condense_threshold(&self) -> usize {
        (self.keep_scratchpad * 3).max(30)
    }

    fn keep_after_condense(&self) -> usize {
        (self.keep_scratchpad * 2).max(20)
    }

    /// Append an event to the event log and scratchpad, condensing
    /// whichever mechanism is due.
    pub fn add_event(&mut self, event: &Event) {
        self.events.push(event.clone());
        self.scratchpad.push(describe_event(event));
        self.truncate_scratchpad_overflow();
        self.maybe_summarize_by_cadence();
    }

    /// Record facts that should never be condensed away.
    pub fn add_facts(&mut self, facts: impl IntoIterator<Item = String>) {
        self.summary.add_facts(facts);
    }

    /// Reset to empty — events, scratchpad, and summary all.
    pub fn clear(&mut self) {
        self.events.clear();
        self.scratchpad.clear();
        self.summary.clear();
        self.last_summarized_index = 0;
    }

    /// A read-only snapshot suitable for handing to an agent or coordinator.
    pub fn context(&self) -> TeamMemoryContext {
        TeamMemoryContext {
            summary: self.summary.summary().to_string(),
            facts: self.summary.facts().to_vec(),
            scratchpad: last_n(&self.scratchpad, self.keep_scratchpad),
            recent_events: last_n(&self.events, self.keep_recent),
        }
    }

    fn truncate_scratchpad_overflow(&mut self) {
        let threshold = self.condense_threshold();
        if self.scratchpad.len() <= threshold {
            return;
        }
        let keep = self.keep_after_condense();
        let split_at = self.scratchpad.len() - keep;
        let chunk: Vec<String> = self.scratchpad.drain(..split_at).collect();
        tracing::debug!(
            dropped = chunk.len(),
            remaining = self.scratchpad.len(),
            "scratchpad overflowed its safety valve threshold"
        );
    }

    fn maybe_summarize_by_cadence(&mut self) {
        if self.summarize_every == 0 {
            return;
        }
        let pending = self.events.len() - self.last_summarized_index;
        if pending < self.summarize_every {
            return;
        }
        let chunk_start = self.last_summarized_index;
        let chunk_end = chunk_start + self.summarize_every;
        let chunk = &self.events[chunk_start..chunk_end];
        let block = summarize_chunk(chunk);
        self.summary.extend_summary(&block);
        self.last_summarized_index = chunk_end;

        tracing::debug!(
            condensed_events = self.last_summarized_index,
            "condensed team memory on summarization cadence"
        );

        if self.scratchpad.len() > self.keep_scratchpad {
            let split_at = self.scratchpad.len() - self.keep_scratchpad;
            self.scratchpad.drain(..split_at);
        }
    }
}

fn last_n<T: Clone>(items: &[T], n: usize) -> Vec<T> {
    if items.len() <= n {
        items.to_vec()
    } else {
        items[items.len() - n..].to_vec()
    }
}

fn describe_event(event: &Event) -> String {
    let mut line = format!("{} :: {} -> {}", event.event_type.as_str(), event.actor, event.target);
    if matches!(
        event.event_type,
        EventType::ToolCall | EventType::Observation | EventType::Critique | EventType::Decision | EventType::Error
    ) {
        let hint = short_data(&event.data, 2);
        if !hint.is_empty() {
            line.push_str(" data={");
            line.push_str(&hint);
            line.push('}');
        }
    }
    line
}

/// Render the first `limit` keys of an event's data map as a short,
/// prompt-safe string, truncating any value whose JSON text would
/// otherwise blow up the scratchpad.
fn short_data(data: &std::collections::BTreeMap<String, serde_json::Value>, limit: usize) -> String {
    data.iter()
        .take(limit)
        .map(|(k, v)| {
            let rendered = v.to_string();
            if rendered.len() > MAX_SHORT_DATA_LEN {
                let cut = rendered
                    .char_indices()
                    .map(|(i, _)| i)
                    .take_while(|&i| i <= MAX_SHORT_DATA_LEN)
                    .last()
                    .unwrap_or(0);
                format!("{k}:{}...", &rendered[..cut])
            } else {
                format!("{k}:{rendered}")
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Condense a chunk of events into one deterministic summary block:
/// `"[summary] +<N> events "` followed by sorted per-type counts, then up
/// to six highlight lines for the event types that matter most.
fn summarize_chunk(chunk: &[Event]) -> String {
    if chunk.is_empty() {
        return String::new();
    }

    let mut counts: std::collections::BTreeMap<&'static str, usize> = std::collections::BTreeMap::new();
    for event in chunk {
        *counts.entry(event.event_type.as_str()).or_insert(0) += 1;
    }
    let counts_str = counts
        .iter()
        .map(|(ty, n)| format!("{ty}:{n}"))
        .collect::<Vec<_>>()
        .join(", ");

    let mut out = format!("[summary] +{} events counts={counts_str}", chunk.len());

    let highlights: Vec<String> = chunk
        .iter()
        .filter(|e| {
            matches!(
                e.event_type,
                EventType::Decision | EventType::Critique | EventType::Error | EventType::ToolCall
            )
        })
        .take(MAX_HIGHLIGHT_LINES)
        .map(describe_event)
        .collect();

    if !highlights.is_empty() {
        out.push_str("\nhighlights:\n");
        out.push_str(&highlights.join("\n"));
    }

    out
}
