//! Append-only chat log, one `"<nick>: <message>"` line per public message.

use std::path::{Path, PathBuf};

use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;

use crate::error::IrcError;

#[derive(Debug, Clone)]
pub struct ChatLog {
    path: PathBuf,
}

/// Log line for a channel message.
pub fn format_entry(nick: &str, message: &str) -> String {
    format!("{nick}: {message}")
}

impl ChatLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one line, creating the file when absent.
    pub async fn append(&self, entry: &str) -> Result<(), IrcError> {
        let wrap = |source| IrcError::ChatLog {
            path: self.path.display().to_string(),
            source,
        };
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(wrap)?;
        file.write_all(format!("{entry}\n").as_bytes())
            .await
            .map_err(wrap)?;
        file.flush().await.map_err(wrap)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_append_creates_and_extends() {
        let tmp = TempDir::new().unwrap();
        let log = ChatLog::new(tmp.path().join("chat.log"));

        log.append(&format_entry("alice", "hi")).await.unwrap();
        log.append(&format_entry("bob", "hello: world")).await.unwrap();

        let text = std::fs::read_to_string(log.path()).unwrap();
        assert_eq!(text, "alice: hi\nbob: hello: world\n");
    }

    #[tokio::test]
    async fn test_append_into_missing_dir_fails() {
        let tmp = TempDir::new().unwrap();
        let log = ChatLog::new(tmp.path().join("absent/chat.log"));
        assert!(matches!(
            log.append("x").await,
            Err(IrcError::ChatLog { .. })
        ));
    }
}
