//! Daily report rendering.
//!
//! Turns ranked play sessions into the published text block: a one-line
//! date header followed by a fixed-width pipe table inside a monospace
//! fence. Ranking happens upstream on real `Duration` values; nothing in
//! here ever compares the formatted strings.

use std::fmt::Write;

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};

use crate::reconstruct::PlaySession;

/// Table column headers.
const COLUMNS: [&str; 3] = ["User", "Game", "Play Time"];

/// Computes the reporting window for a run at `now`: the preceding full
/// UTC calendar day, as a half-open interval.
#[must_use]
pub fn reporting_window(now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
    let midnight = NaiveTime::from_hms_opt(0, 0, 0).unwrap();
    let today = now.date_naive();
    let yesterday = today - Duration::days(1);
    (
        yesterday.and_time(midnight).and_utc(),
        today.and_time(midnight).and_utc(),
    )
}

/// Formats an elapsed play time as `H:MM:SS`, with a day prefix once a
/// session crosses 24 hours (`2d 1:05:00`) and a microsecond suffix only
/// when a sub-second remainder exists. Anomalous negative durations keep
/// their sign rather than being masked.
#[must_use]
pub fn format_play_time(duration: Duration) -> String {
    let negative = duration < Duration::zero();
    let abs = if negative { -duration } else { duration };

    let total_seconds = abs.num_seconds();
    let days = total_seconds / 86_400;
    let hours = (total_seconds % 86_400) / 3_600;
    let minutes = (total_seconds % 3_600) / 60;
    let seconds = total_seconds % 60;
    let micros = abs.subsec_nanos() / 1_000;

    let mut out = String::new();
    if negative {
        out.push('-');
    }
    if days > 0 {
        write!(out, "{days}d ").unwrap();
    }
    write!(out, "{hours}:{minutes:02}:{seconds:02}").unwrap();
    if micros > 0 {
        write!(out, ".{micros:06}").unwrap();
    }
    out
}

/// A rendered-ready daily report: the reported date plus the ranked
/// sessions reconstructed for it.
#[derive(Debug, Clone)]
pub struct DailyReport {
    /// The day the report covers (the window's start date).
    pub date: NaiveDate,
    /// Sessions in rank order, as produced by replay.
    pub sessions: Vec<PlaySession>,
}

impl DailyReport {
    /// Renders the publishable text block. An empty day still renders the
    /// header and the table skeleton.
    #[must_use]
    pub fn render(&self) -> String {
        let rows: Vec<[String; 3]> = self
            .sessions
            .iter()
            .map(|s| {
                [
                    s.user.clone(),
                    s.game.clone(),
                    format_play_time(s.duration()),
                ]
            })
            .collect();

        format!(
            "Game stats for {}:\n```\n{}\n```",
            self.date,
            render_pipe_table(&COLUMNS, &rows)
        )
    }
}

/// Renders a left-aligned pipe table. Widths are computed in characters
/// so non-ASCII names keep the columns lined up.
fn render_pipe_table(headers: &[&str; 3], rows: &[[String; 3]]) -> String {
    let mut widths: [usize; 3] = [0; 3];
    for (width, header) in widths.iter_mut().zip(headers) {
        *width = header.chars().count();
    }
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_row(&mut out, headers.map(String::from), &widths);
    out.push('\n');
    out.push('|');
    for width in widths {
        out.push(':');
        out.push_str(&"-".repeat(width + 1));
        out.push('|');
    }
    for row in rows {
        out.push('\n');
        push_row(&mut out, row.clone(), &widths);
    }
    out
}

fn push_row(out: &mut String, cells: [String; 3], widths: &[usize; 3]) {
    out.push('|');
    for (cell, &width) in cells.iter().zip(widths) {
        write!(out, " {cell:<width$} |").unwrap();
    }
}
