//! File-backed session history.
//!
//! The serve mode's stand-in for the platform's channel history: published
//! messages are appended to a plain text file, and the reader hands back
//! the session lines whose embedded timestamps fall inside a window.
//! Reports and other multi-line traffic land in the same file and are
//! filtered out on read, the same way the real channel history is full of
//! non-session noise.

use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::io::AsyncWriteExt;

use gw_core::parse_line;

use crate::traits::{GatewayError, HistoryReader};

/// An append-only text log on disk.
#[derive(Debug, Clone)]
pub struct FileHistory {
    path: PathBuf,
}

impl FileHistory {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends one published message, creating parent directories on the
    /// first write.
    pub async fn append(&self, text: &str) -> Result<(), GatewayError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(text.as_bytes()).await?;
        file.write_all(b"\n").await?;
        Ok(())
    }
}

#[async_trait]
impl HistoryReader for FileHistory {
    async fn lines_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<String>, GatewayError> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            // A log that was never written to is an empty history, not an error.
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        Ok(content
            .lines()
            .filter(|line| {
                parse_line(line).is_some_and(|event| event.timestamp >= start && event.timestamp < end)
            })
            .map(str::to_string)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn ts(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 8, day, hour, 0, 0).unwrap()
    }

    #[tokio::test]
    async fn append_then_read_back_within_window() {
        let dir = TempDir::new().unwrap();
        let history = FileHistory::new(dir.path().join("sessions.log"));

        history
            .append("🚨 alice started playing Chess at 2026-08-06 09:00:00 🚨")
            .await
            .unwrap();
        history
            .append("🚨 alice stopped playing Chess at 2026-08-06 10:00:00 🚨")
            .await
            .unwrap();

        let lines = history.lines_between(ts(6, 0), ts(7, 0)).await.unwrap();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("started"));
        assert!(lines[1].contains("stopped"));
    }

    #[tokio::test]
    async fn window_excludes_lines_outside_it() {
        let dir = TempDir::new().unwrap();
        let history = FileHistory::new(dir.path().join("sessions.log"));

        history
            .append("🚨 alice started playing Chess at 2026-08-05 23:59:59 🚨")
            .await
            .unwrap();
        history
            .append("🚨 bob started playing Go at 2026-08-06 12:00:00 🚨")
            .await
            .unwrap();
        history
            .append("🚨 carol started playing Shogi at 2026-08-07 00:00:00 🚨")
            .await
            .unwrap();

        let lines = history.lines_between(ts(6, 0), ts(7, 0)).await.unwrap();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("bob"));
    }

    #[tokio::test]
    async fn non_session_traffic_is_filtered_out() {
        let dir = TempDir::new().unwrap();
        let history = FileHistory::new(dir.path().join("sessions.log"));

        history
            .append("Game stats for 2026-08-05:\n```\n| User | Game | Play Time |\n```")
            .await
            .unwrap();
        history
            .append("🚨 alice started playing Chess at 2026-08-06 09:00:00 🚨")
            .await
            .unwrap();

        let lines = history.lines_between(ts(6, 0), ts(7, 0)).await.unwrap();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("alice"));
    }

    #[tokio::test]
    async fn missing_file_reads_as_empty_history() {
        let dir = TempDir::new().unwrap();
        let history = FileHistory::new(dir.path().join("never-written.log"));

        let lines = history.lines_between(ts(6, 0), ts(7, 0)).await.unwrap();
        assert!(lines.is_empty());
    }

    #[tokio::test]
    async fn append_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let history = FileHistory::new(dir.path().join("nested").join("deep").join("sessions.log"));

        history
            .append("🚨 alice started playing Chess at 2026-08-06 09:00:00 🚨")
            .await
            .unwrap();

        assert!(history.path().exists());
    }
}
