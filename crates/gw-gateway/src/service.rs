//! The tracker service.
//!
//! Owns every piece of long-lived state (the last-online roster) and the
//! outbound sink, and translates platform callbacks — presence changes,
//! messages, reactions — into published text. Time always enters through
//! an explicit `now` argument so behaviour is reproducible in tests.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use gw_core::{ChannelId, LastOnline, PresenceSnapshot, SubjectId, detect_transition};

use crate::config::Config;
use crate::snippets::SnippetSet;
use crate::traits::{GatewayError, MessageSink};

/// Fixed reply texts, kept verbatim from the bot this service replaces.
const PING_COMMAND: &str = "!ping";
const PING_REPLY: &str = "Aici sunt, barosane!";
const ECHO_REPLY: &str = "jocek";
const REMINDER_TEXT: &str = "Servici usor, barosane!";
const CALLOUT_TEXT: &str = "vezi ca joci Dota2!";
const CALLOUT_EMOJI: &str = "🐕";

/// An inbound chat message, pre-resolved by the platform layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InboundMessage {
    pub author: SubjectId,
    pub channel: ChannelId,
    pub content: String,
    /// Subjects mentioned in the message, the service itself excluded.
    #[serde(default)]
    pub mentions: Vec<Mention>,
    /// Whether the message mentions the service.
    #[serde(default)]
    pub mentions_me: bool,
}

/// A mention of a subject, with the display name resolved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mention {
    pub subject: SubjectId,
    pub display_name: String,
}

/// The long-lived tracker service.
pub struct Tracker {
    config: Config,
    roster: LastOnline,
    snippets: SnippetSet,
    sink: Arc<dyn MessageSink>,
}

impl Tracker {
    #[must_use]
    pub fn new(config: Config, sink: Arc<dyn MessageSink>) -> Self {
        Self::with_snippets(config, sink, SnippetSet::builtin())
    }

    #[must_use]
    pub fn with_snippets(config: Config, sink: Arc<dyn MessageSink>, snippets: SnippetSet) -> Self {
        Self {
            config,
            roster: LastOnline::new(),
            snippets,
            sink,
        }
    }

    /// Handles one presence change for a subject.
    ///
    /// Updates the last-online roster for any non-offline snapshot, and
    /// publishes at most one session line when a game start or stop is
    /// detected. Publishing may suspend; the roster update happens first
    /// and is synchronous, so facts stay ordered per event.
    pub async fn handle_presence(
        &mut self,
        previous: &PresenceSnapshot,
        current: &PresenceSnapshot,
        now: DateTime<Utc>,
    ) -> Result<(), GatewayError> {
        if !current.status.is_offline() {
            self.roster.record(current.subject, now);
        }

        if let Some(event) = detect_transition(previous, current, now) {
            tracing::debug!(
                user = %event.user,
                action = %event.action,
                game = %event.game,
                "session transition detected"
            );
            self.sink
                .publish(self.config.report_channel, &event.to_line())
                .await?;
        }
        Ok(())
    }

    /// When the subject was last seen online, if ever.
    #[must_use]
    pub fn last_seen(&self, subject: SubjectId) -> Option<DateTime<Utc>> {
        self.roster.last_seen(subject)
    }

    /// Handles a reaction added to a message.
    ///
    /// Only the configured trigger subject reacting with the callout emoji
    /// does anything; everything else is ignored.
    pub async fn handle_reaction(
        &self,
        reactor: SubjectId,
        emoji: &str,
        channel: ChannelId,
    ) -> Result<(), GatewayError> {
        if reactor != self.config.trigger_subject || emoji != CALLOUT_EMOJI {
            return Ok(());
        }
        tracing::debug!(%channel, "callout reaction from trigger subject");
        let text = format!("<@{}> {CALLOUT_TEXT}", self.config.tracked_subject);
        self.sink.publish(channel, &text).await
    }

    /// Handles an inbound chat message: the tracked-subject echo, mention
    /// commands (snippets, last-online lookup), and the ping command.
    pub async fn handle_message(&self, message: &InboundMessage) -> Result<(), GatewayError> {
        if message.author == self.config.tracked_subject {
            self.sink.publish(message.channel, ECHO_REPLY).await?;
        }

        if message.mentions_me {
            let content = message.content.to_lowercase();
            if let Some(snippet) = self.snippets.lookup(&content) {
                for reply in snippet.respond() {
                    self.sink.publish(message.channel, &reply).await?;
                }
            } else if content.contains("last online") {
                let reply = self.last_online_reply(message);
                self.sink.publish(message.channel, &reply).await?;
            }
        }

        if message.content == PING_COMMAND {
            self.sink.publish(message.channel, PING_REPLY).await?;
        }
        Ok(())
    }

    fn last_online_reply(&self, message: &InboundMessage) -> String {
        let Some(mention) = message.mentions.first() else {
            return "Please mention a user to check their last online time.".to_string();
        };

        self.roster.last_seen(mention.subject).map_or_else(
            || {
                format!(
                    "I haven't seen {} online since I started tracking.",
                    mention.display_name
                )
            },
            |at| {
                format!(
                    "{} was last seen online at {}",
                    mention.display_name,
                    at.format("%Y-%m-%d %H:%M:%S")
                )
            },
        )
    }

    /// Publishes the morning reminder to the report channel.
    pub async fn send_reminder(&self) -> Result<(), GatewayError> {
        let text = format!("<@{}> {REMINDER_TEXT}", self.config.mention_target);
        self.sink.publish(self.config.report_channel, &text).await
    }
}
