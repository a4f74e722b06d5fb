//! Durable storage for the user-facing conversation.

use ar_core::Message;
use async_trait::async_trait;
use std::path::PathBuf;
use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

/// Errors from a `HistorySink`.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum HistorySinkError {
    /// The underlying storage operation failed.
    #[error("history sink io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Appends conversation messages somewhere durable.
#[async_trait]
pub trait HistorySink: Send + Sync {
    /// Persist one message.
    async fn append(&self, message: &Message) -> Result<(), HistorySinkError>;
}

/// A `HistorySink` that appends plain-text lines to a file.
///
/// One line per message: `"[<YYYY-MM-DD HH:MM:SS>] [<sender>] <content>"`,
/// the original system's human-readable transcript format — distinct from
/// the JSON-lines format the trace sink uses, since this file is meant to
/// be read directly, not replayed.
pub struct FileHistorySink {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileHistorySink {
    /// A sink that appends to `path`, creating it if it doesn't exist.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }
}

fn format_line(message: &Message) -> String {
    let stamp = chrono::DateTime::parse_from_rfc3339(&message.timestamp)
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|_| message.timestamp.clone());
    format!("[{stamp}] [{}] {}\n", message.sender, message.content)
}

#[async_trait]
impl HistorySink for FileHistorySink {
    async fn append(&self, message: &Message) -> Result<(), HistorySinkError> {
        let _guard = self.lock.lock().await;
        let line = format_line(message);

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

    #[tokio::test]
    async fn appends_one_readable_line_per_message() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.log");
        let sink = FileHistorySink::new(&path);

        sink.append(&Message::new("user", "hello")).await.unwrap();
        sink.append(&Message::new("weather", "sunny")).await.unwrap();

        let contents = tokio::fs::read_to_string(&path).await.unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("[user] hello"));
        assert!(lines[1].contains("[weather] sunny"));
        assert!(lines[0].starts_with('['));
    }

    #[tokio::test]
    async fn creates_missing_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("history.log");
        let sink = FileHistorySink::new(&path);

        sink.append(&Message::new("user", "hi")).await.unwrap();
        assert!(path.exists());
    }
}
