//! Serve command: run the tracker on a stream of platform events.
//!
//! Events arrive as JSONL on stdin; everything the tracker publishes is
//! appended to the session log and mirrored to stdout. The two daily
//! triggers run live. Handler failures are logged and the stream
//! continues — one bad event or one failed scheduled run must not take
//! the tracker down, and the next run starts from clean state anyway.

use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use serde::Deserialize;
use tokio::io::{AsyncBufReadExt, BufReader};

use gw_core::{ChannelId, PresenceSnapshot, SubjectId};
use gw_gateway::{
    Config, FileHistory, GatewayError, InboundMessage, MessageSink, StatsReporter, Tracker,
    TriggerClock, TriggerKind,
};

/// One platform event on stdin.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum InputEvent {
    Presence {
        previous: PresenceSnapshot,
        current: PresenceSnapshot,
    },
    Reaction {
        reactor: SubjectId,
        emoji: String,
        channel: ChannelId,
    },
    Message(InboundMessage),
}

/// Publishes to the session log and mirrors to stdout.
struct LogSink {
    history: FileHistory,
}

#[async_trait]
impl MessageSink for LogSink {
    async fn publish(&self, channel: ChannelId, text: &str) -> Result<(), GatewayError> {
        self.history.append(text).await?;
        println!("[{channel}] {text}");
        Ok(())
    }
}

pub async fn run(config: Config) -> Result<()> {
    let history = FileHistory::new(&config.log_path);
    let sink = Arc::new(LogSink {
        history: history.clone(),
    });
    let mut tracker = Tracker::new(config.clone(), Arc::clone(&sink) as Arc<dyn MessageSink>);
    let reporter = StatsReporter::new();
    let clock = TriggerClock::new();

    tracing::info!(log = %config.log_path.display(), "tracker serving");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                match line.context("failed to read event stream")? {
                    Some(line) if line.trim().is_empty() => {}
                    Some(line) => match serde_json::from_str::<InputEvent>(&line) {
                        Ok(event) => {
                            if let Err(e) = dispatch(&mut tracker, event).await {
                                tracing::error!(error = %e, "event handler failed");
                            }
                        }
                        Err(e) => tracing::warn!(error = %e, "skipping malformed event"),
                    },
                    None => {
                        tracing::info!("event stream closed, shutting down");
                        return Ok(());
                    }
                }
            }
            kind = clock.wait_next(Utc::now()) => {
                let outcome = match kind {
                    TriggerKind::Reminder => tracker.send_reminder().await,
                    TriggerKind::Stats => reporter
                        .try_run(&history, sink.as_ref(), config.report_channel, Utc::now())
                        .await
                        .map(|_| ()),
                };
                if let Err(e) = outcome {
                    tracing::error!(error = %e, ?kind, "scheduled run failed");
                }
            }
        }
    }
}

async fn dispatch(tracker: &mut Tracker, event: InputEvent) -> Result<(), GatewayError> {
    match event {
        InputEvent::Presence { previous, current } => {
            tracker.handle_presence(&previous, &current, Utc::now()).await
        }
        InputEvent::Reaction {
            reactor,
            emoji,
            channel,
        } => tracker.handle_reaction(reactor, &emoji, channel).await,
        InputEvent::Message(message) => tracker.handle_message(&message).await,
    }
}
