//! Report command: offline replay of a session log.
//!
//! Rebuilds the same report the nightly job publishes, from any log file,
//! for any day — handy for checking what a report would have said without
//! waiting for the trigger.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use serde::Serialize;

use gw_core::{DailyReport, format_play_time, replay, reporting_window};
use gw_gateway::{FileHistory, HistoryReader};

/// JSON row for `--json` output.
#[derive(Debug, Serialize)]
struct JsonSession {
    user: String,
    game: String,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    duration_ms: i64,
    play_time: String,
}

pub async fn run(log: &Path, date: Option<NaiveDate>, json: bool) -> Result<()> {
    let report = build_report(log, date, Utc::now()).await?;

    if json {
        println!("{}", to_json(&report)?);
    } else {
        println!("{}", report.render());
    }
    Ok(())
}

/// Reconstructs the report for the requested day (yesterday if none).
async fn build_report(
    log: &Path,
    date: Option<NaiveDate>,
    now: DateTime<Utc>,
) -> Result<DailyReport> {
    let (start, end) = date.map_or_else(|| reporting_window(now), day_window);

    let history = FileHistory::new(log);
    let lines = history
        .lines_between(start, end)
        .await
        .context("failed to read session log")?;
    let sessions = replay(lines.iter().map(String::as_str), now);

    Ok(DailyReport {
        date: start.date_naive(),
        sessions,
    })
}

/// The full UTC day starting at `day`, as a half-open interval.
fn day_window(day: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    let midnight = NaiveTime::from_hms_opt(0, 0, 0).unwrap();
    (
        day.and_time(midnight).and_utc(),
        (day + Duration::days(1)).and_time(midnight).and_utc(),
    )
}

fn to_json(report: &DailyReport) -> Result<String> {
    let rows: Vec<JsonSession> = report
        .sessions
        .iter()
        .map(|s| JsonSession {
            user: s.user.clone(),
            game: s.game.clone(),
            start: s.start,
            end: s.end,
            duration_ms: s.duration().num_milliseconds(),
            play_time: format_play_time(s.duration()),
        })
        .collect();
    serde_json::to_string_pretty(&rows).context("failed to serialize report")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn log_file() -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "🚨 alice started playing Chess at 2026-08-06 09:00:00 🚨"
        )
        .unwrap();
        writeln!(
            file,
            "🚨 alice stopped playing Chess at 2026-08-06 10:30:00 🚨"
        )
        .unwrap();
        file
    }

    #[test]
    fn day_window_is_half_open() {
        let (start, end) = day_window(NaiveDate::from_ymd_opt(2026, 8, 6).unwrap());
        assert_eq!(start, Utc.with_ymd_and_hms(2026, 8, 6, 0, 0, 0).unwrap());
        assert_eq!(end, Utc.with_ymd_and_hms(2026, 8, 7, 0, 0, 0).unwrap());
    }

    #[tokio::test]
    async fn builds_report_for_explicit_date() {
        let file = log_file();
        let now = Utc.with_ymd_and_hms(2026, 8, 20, 12, 0, 0).unwrap();

        let report = build_report(
            file.path(),
            Some(NaiveDate::from_ymd_opt(2026, 8, 6).unwrap()),
            now,
        )
        .await
        .unwrap();

        assert_eq!(report.date, NaiveDate::from_ymd_opt(2026, 8, 6).unwrap());
        assert_eq!(report.sessions.len(), 1);
        assert_eq!(report.sessions[0].user, "alice");
    }

    #[tokio::test]
    async fn defaults_to_yesterday() {
        let file = log_file();
        let now = Utc.with_ymd_and_hms(2026, 8, 7, 21, 0, 0).unwrap();

        let report = build_report(file.path(), None, now).await.unwrap();

        assert_eq!(report.date, NaiveDate::from_ymd_opt(2026, 8, 6).unwrap());
        assert_eq!(report.sessions.len(), 1);
    }

    #[tokio::test]
    async fn other_days_are_out_of_window() {
        let file = log_file();
        let now = Utc.with_ymd_and_hms(2026, 8, 20, 12, 0, 0).unwrap();

        let report = build_report(
            file.path(),
            Some(NaiveDate::from_ymd_opt(2026, 8, 10).unwrap()),
            now,
        )
        .await
        .unwrap();

        assert!(report.sessions.is_empty());
    }

    #[tokio::test]
    async fn json_output_carries_numeric_durations() {
        let file = log_file();
        let now = Utc.with_ymd_and_hms(2026, 8, 20, 12, 0, 0).unwrap();

        let report = build_report(
            file.path(),
            Some(NaiveDate::from_ymd_opt(2026, 8, 6).unwrap()),
            now,
        )
        .await
        .unwrap();
        let json = to_json(&report).unwrap();
        let rows: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(rows[0]["user"], "alice");
        assert_eq!(rows[0]["game"], "Chess");
        assert_eq!(rows[0]["duration_ms"], 5_400_000);
        assert_eq!(rows[0]["play_time"], "1:30:00");
    }
}
