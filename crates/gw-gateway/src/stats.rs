//! The nightly stats job.
//!
//! Reads the previous UTC day's log lines, replays them into ranked play
//! sessions, and publishes the rendered report. Every run starts from an
//! empty table, so a failed run leaves nothing behind for the next one.

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use gw_core::{ChannelId, DailyReport, replay, reporting_window};

use crate::traits::{GatewayError, HistoryReader, MessageSink};

/// Runs the daily reconstruction, at most one at a time.
#[derive(Debug, Default)]
pub struct StatsReporter {
    guard: Mutex<()>,
}

impl StatsReporter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reconstructs and publishes the report for the day preceding `now`.
    ///
    /// Returns `Ok(false)` without doing anything if a run is already in
    /// flight; triggers fire once a day, so an overlap means the previous
    /// run is stuck on a collaborator and piling on will not help.
    pub async fn try_run(
        &self,
        history: &dyn HistoryReader,
        sink: &dyn MessageSink,
        channel: ChannelId,
        now: DateTime<Utc>,
    ) -> Result<bool, GatewayError> {
        let Ok(_running) = self.guard.try_lock() else {
            tracing::warn!("stats run already in flight, skipping");
            return Ok(false);
        };

        let (start, end) = reporting_window(now);
        let lines = history.lines_between(start, end).await?;
        let sessions = replay(lines.iter().map(String::as_str), now);
        tracing::debug!(
            lines = lines.len(),
            sessions = sessions.len(),
            date = %start.date_naive(),
            "reconstructed daily sessions"
        );

        let report = DailyReport {
            date: start.date_naive(),
            sessions,
        };
        sink.publish(channel, &report.render()).await?;
        Ok(true)
    }
}
