//! User/session preference storage.
//!
//! The turn engine itself never needs preferences to resolve a turn —
//! this is a seam for callers that want to feed stable, per-user
//! settings into an agent or coordinator's task params, not something
//! `Orchestrator::handle` reads from directly.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

/// Reads and writes small key/value preferences, scoped by an opaque
/// owner id (a user id, a session id — the caller decides).
#[async_trait]
pub trait PreferenceStore: Send + Sync {
    /// Fetch a preference, if set.
    async fn get(&self, owner: &str, key: &str) -> Option<serde_json::Value>;

    /// Set a preference.
    async fn set(&self, owner: &str, key: &str, value: serde_json::Value);

    /// Remove a preference. No-op if it wasn't set.
    async fn clear(&self, owner: &str, key: &str);
}

/// A `PreferenceStore` backed by an in-process map. Not durable across
/// restarts — for that, a caller provides its own `PreferenceStore`
/// backed by whatever storage the embedding application already uses.
#[derive(Default)]
pub struct InMemoryPreferenceStore {
    data: RwLock<HashMap<(String, String), serde_json::Value>>,
}

impl InMemoryPreferenceStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PreferenceStore for InMemoryPreferenceStore {
    async fn get(&self, owner: &str, key: &str) -> Option<serde_json::Value> {
        self.data
            .read()
            .expect("preference store lock poisoned")
            .get(&(owner.to_string(), key.to_string()))
            .cloned()
    }

    async fn set(&self, owner: &str, key: &str, value: serde_json::Value) {
        self.data
            .write()
            .expect("preference store lock poisoned")
            .insert((owner.to_string(), key.to_string()), value);
    }

    async fn clear(&self, owner: &str, key: &str) {
        self.data
            .write()
            .expect("preference store lock poisoned")
            .remove(&(owner.to_string(), key.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn set_then_get_round_trips() {
        let store = InMemoryPreferenceStore::new();
        store.set("alice", "units", serde_json::json!("metric")).await;
        assert_eq!(store.get("alice", "units").await, Some(serde_json::json!("metric")));
    }

    #[tokio::test]
    async fn clear_removes_the_value() {
        let store = InMemoryPreferenceStore::new();
        store.set("alice", "units", serde_json::json!("metric")).await;
        store.clear("alice", "units").await;
        assert_eq!(store.get("alice", "units").await, None);
    }

    #[tokio::test]
    async fn owners_are_isolated() {
        let store = InMemoryPreferenceStore::new();
        store.set("alice", "units", serde_json::json!("metric")).await;
        assert_eq!(store.get("bob", "units").await, None);
    }
}
