//! Reconstructing conversation history from the team event stream.

use ar_core::{Event, EventType, Message};
use std::collections::BTreeMap;

/// Rebuild the user-facing conversation from a recorded event stream,
/// keeping only `respond` events — the ones that were actually surfaced
/// to the user — in their original order. No other event type
/// participates.
///
/// Each replayed message carries `sender = event.actor` (or `"agent"` if
/// the actor is empty), `content` coerced to an empty string rather than
/// skipped when the event's data has none, the event's own correlation
/// id verbatim (including `None`), and `meta = {"replayed": true}` so a
/// caller can tell a replayed message apart from one produced live.
pub fn replay_history_from_events(events: &[Event]) -> Vec<Message> {
    events
        .iter()
        .filter(|e| e.event_type == EventType::Respond)
        .map(replay_one)
        .collect()
}

fn replay_one(event: &Event) -> Message {
    let sender = if event.actor.is_empty() { "agent" } else { event.actor.as_str() };
    let content = event
        .data
        .get("content")
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .to_string();

    let mut meta = BTreeMap::new();
    meta.insert("replayed".to_string(), serde_json::json!(true));

    let mut message = Message::new(sender, content).with_meta(meta);
    if let Some(cid) = &event.correlation_id {
        message = message.with_correlation_id(cid);
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use ar_core::CorrelationId;

    fn respond_event(actor: &str, content: &str, cid: Option<&str>) -> Event {
        let mut data = BTreeMap::new();
        data.insert("content".to_string(), serde_json::json!(content));
        let mut event = Event::new(EventType::Respond, actor, "user", data);
        if let Some(cid) = cid {
            event.correlation_id = Some(CorrelationId::from(cid));
        }
        event
    }

    #[test]
    fn keeps_only_respond_events_in_order() {
        let events = vec![
            Event::new(EventType::Route, "orchestrator", "weather", BTreeMap::new()),
            respond_event("weather", "it's sunny", Some("CID-a")),
            Event::new(EventType::ToolCall, "weather", "open_meteo", BTreeMap::new()),
            respond_event("weather", "25 degrees", Some("CID-a")),
        ];
        let history = replay_history_from_events(&events);
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].content, "it's sunny");
        assert_eq!(history[1].content, "25 degrees");
    }

    #[test]
    fn every_replayed_message_is_marked_as_such() {
        let events = vec![respond_event("weather", "it's sunny", Some("CID-a"))];
        let history = replay_history_from_events(&events);
        assert_eq!(history[0].meta.get("replayed"), Some(&serde_json::json!(true)));
    }

    #[test]
    fn missing_content_becomes_an_empty_string_rather_than_being_skipped() {
        let event = Event::new(EventType::Respond, "weather", "user", BTreeMap::new());
        let history = replay_history_from_events(&[event]);
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].content, "");
    }

    #[test]
    fn missing_correlation_id_is_replayed_as_none_rather_than_skipped() {
        let event = respond_event("weather", "it's sunny", None);
        let history = replay_history_from_events(&[event]);
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].correlation_id, None);
    }

    #[test]
    fn empty_actor_falls_back_to_agent() {
        let event = respond_event("", "it's sunny", Some("CID-a"));
        let history = replay_history_from_events(&[event]);
        assert_eq!(history[0].sender, "agent");
    }
}
