//! Service layer for the game session tracker.
//!
//! Wires the pure domain logic in `gw-core` to the outside world:
//! collaborator traits for the chat platform, environment configuration,
//! the long-lived tracker service, the nightly stats job, and the trigger
//! clock that drives both scheduled jobs.

pub mod config;
pub mod history;
pub mod scheduler;
pub mod service;
pub mod snippets;
pub mod stats;
pub mod traits;

pub use config::Config;
pub use history::FileHistory;
pub use scheduler::{TriggerClock, TriggerKind};
pub use service::{InboundMessage, Mention, Tracker};
pub use snippets::{Snippet, SnippetSet};
pub use stats::StatsReporter;
pub use traits::{GatewayError, HistoryReader, MessageSink};
