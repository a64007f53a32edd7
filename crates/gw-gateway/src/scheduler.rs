//! Trigger clock: which daily job fires next, and when.

use chrono::{DateTime, Utc};

use gw_core::{DailyTrigger, reminder_trigger, stats_trigger};

/// The two scheduled jobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerKind {
    /// The weekday-morning reminder message.
    Reminder,
    /// The nightly stats reconstruction.
    Stats,
}

/// Tracks both daily triggers and picks the next one to fire.
#[derive(Debug, Clone)]
pub struct TriggerClock {
    reminder: DailyTrigger,
    stats: DailyTrigger,
}

impl TriggerClock {
    #[must_use]
    pub fn new() -> Self {
        Self {
            reminder: reminder_trigger(),
            stats: stats_trigger(),
        }
    }

    /// The next trigger strictly after `now`, with its fire time.
    #[must_use]
    pub fn next_after(&self, now: DateTime<Utc>) -> (TriggerKind, DateTime<Utc>) {
        let reminder_at = self.reminder.next_fire_after(now);
        let stats_at = self.stats.next_fire_after(now);
        if reminder_at <= stats_at {
            (TriggerKind::Reminder, reminder_at)
        } else {
            (TriggerKind::Stats, stats_at)
        }
    }

    /// Sleeps until the next trigger fires and returns which one it was.
    pub async fn wait_next(&self, now: DateTime<Utc>) -> TriggerKind {
        let (kind, fire_at) = self.next_after(now);
        let delay = (fire_at - now).to_std().unwrap_or(std::time::Duration::ZERO);
        tracing::debug!(?kind, %fire_at, "sleeping until next trigger");
        tokio::time::sleep(delay).await;
        kind
    }
}

impl Default for TriggerClock {
    fn default() -> Self {
        Self::new()
    }
}
