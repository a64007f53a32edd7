//! Collaborator seams.
//!
//! The chat platform itself is out of scope; everything the tracker needs
//! from it is expressed as two narrow traits. The serve mode's file/stdio
//! transport and the test doubles are the in-tree implementations.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use gw_core::ChannelId;

/// Errors crossing the collaborator boundary.
///
/// A failing scheduled run propagates one of these to its caller and stops
/// there; the next day's run starts from scratch, so there is no retry
/// machinery.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("collaborator unavailable: {0}")]
    Unavailable(String),
}

/// Read access to the externally owned message history.
#[async_trait]
pub trait HistoryReader: Send + Sync {
    /// Returns log lines whose embedded timestamps fall in `[start, end)`,
    /// in the order the history delivered them.
    async fn lines_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<String>, GatewayError>;
}

/// Write access to a chat channel.
#[async_trait]
pub trait MessageSink: Send + Sync {
    /// Publishes a text message to the given channel.
    async fn publish(&self, channel: ChannelId, text: &str) -> Result<(), GatewayError>;
}
