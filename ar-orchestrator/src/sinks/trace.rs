//! Durable storage for the structured team event stream.

use ar_core::Event;
use async_trait::async_trait;
use std::path::PathBuf;
use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

/// Errors from a `TraceSink`.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum TraceSinkError {
    /// The underlying storage operation failed.
    #[error("trace sink io error: {0}")]
    Io(#[from] std::io::Error),
    /// The event couldn't be serialized.
    #[error("trace sink serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Appends team events somewhere durable.
#[async_trait]
pub trait TraceSink: Send + Sync {
    /// Persist one event.
    async fn append(&self, event: &Event) -> Result<(), TraceSinkError>;
}

/// A `TraceSink` that appends newline-delimited JSON to a file.
pub struct JsonlTraceSink {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonlTraceSink {
    /// A sink that appends to `path`, creating it if it doesn't exist.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }
}

#[async_trait]
impl TraceSink for JsonlTraceSink {
    async fn append(&self, event: &Event) -> Result<(), TraceSinkError> {
        let _guard = self.lock.lock().await;
        let mut line = serde_json::to_string(event)?;
        line.push('\n');

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(line.as_bytes()).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ar_core::EventType;
    use std::collections::BTreeMap;

    #[tokio::test]
    async fn appends_newline_delimited_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trace.jsonl");
        let sink = JsonlTraceSink::new(&path);

        let event = Event::new(EventType::Route, "orchestrator", "weather", BTreeMap::new());
        sink.append(&event).await.unwrap();

        let contents = tokio::fs::read_to_string(&path).await.unwrap();
        assert_eq!(contents.lines().count(), 1);
        let back: Event = serde_json::from_str(contents.lines().next().unwrap()).unwrap();
        assert_eq!(back, event);
    }
}
