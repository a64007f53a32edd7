//! The session log line wire format.
//!
//! A single formatted text line is the system's only persistence boundary:
//! the emitter writes it into the externally owned history and the
//! reconstructor later parses it back. Formatting and parsing must
//! round-trip exactly.
//!
//! Format:
//!
//! ```text
//! 🚨 <user> <started|stopped> playing <game> at <YYYY-MM-DD HH:MM:SS> 🚨
//! ```
//!
//! Timestamps are UTC at second resolution.

use std::sync::LazyLock;

use chrono::NaiveDateTime;
use regex::Regex;

use crate::presence::{SessionAction, SessionEvent};

/// Sentinel marking a line as a trackable session event (and doubling as a
/// visual alert in the channel).
pub const ALARM: &str = "🚨";

/// Timestamp format embedded in log lines.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Pre-compiled pattern for session log lines.
static LINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^🚨 (.+) (started|stopped) playing (.+) at (\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2}) 🚨$",
    )
    .expect("session line pattern is valid")
});

impl SessionEvent {
    /// Formats this event as a durable log line.
    #[must_use]
    pub fn to_line(&self) -> String {
        format!(
            "{ALARM} {} {} playing {} at {} {ALARM}",
            self.user,
            self.action,
            self.game,
            self.timestamp.format(TIMESTAMP_FORMAT),
        )
    }
}

/// Parses a session log line back into its event.
///
/// Returns `None` for anything that is not a well-formed session line.
/// History channels contain plenty of other traffic (reports, chatter),
/// so a non-match is expected noise, not an error.
#[must_use]
pub fn parse_line(line: &str) -> Option<SessionEvent> {
    // Cheap pre-filter before the regex; most history lines are not ours.
    if !line.contains(ALARM) {
        return None;
    }

    let caps = LINE_RE.captures(line)?;
    let action: SessionAction = caps[2].parse().ok()?;
    let timestamp = NaiveDateTime::parse_from_str(&caps[4], TIMESTAMP_FORMAT)
        .ok()?
        .and_utc();

    Some(SessionEvent {
        user: caps[1].to_string(),
        action,
        game: caps[3].to_string(),
        timestamp,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};

    fn ts() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 8, 6, 20, 15, 0).unwrap()
    }

    fn event(action: SessionAction) -> SessionEvent {
        SessionEvent {
            user: "alice".to_string(),
            action,
            game: "Chess".to_string(),
            timestamp: ts(),
        }
    }

    #[test]
    fn started_line_format() {
        assert_eq!(
            event(SessionAction::Started).to_line(),
            "🚨 alice started playing Chess at 2026-08-06 20:15:00 🚨"
        );
    }

    #[test]
    fn stopped_line_format() {
        assert_eq!(
            event(SessionAction::Stopped).to_line(),
            "🚨 alice stopped playing Chess at 2026-08-06 20:15:00 🚨"
        );
    }

    #[test]
    fn line_roundtrips_exactly() {
        for action in [SessionAction::Started, SessionAction::Stopped] {
            let original = event(action);
            let parsed = parse_line(&original.to_line()).expect("should parse");
            assert_eq!(parsed, original);
        }
    }

    #[test]
    fn parses_names_with_spaces() {
        let line = "🚨 mr big started playing Sid Meier's Civilization VI at 2026-08-06 09:30:01 🚨";
        let parsed = parse_line(line).expect("should parse");
        assert_eq!(parsed.user, "mr big");
        assert_eq!(parsed.game, "Sid Meier's Civilization VI");
        assert_eq!(parsed.action, SessionAction::Started);
    }

    #[test]
    fn rejects_lines_without_marker() {
        assert!(parse_line("alice started playing Chess at 2026-08-06 20:15:00").is_none());
    }

    #[test]
    fn rejects_marker_lines_with_other_shapes() {
        // A report header or chatter can carry the marker without being an event.
        assert!(parse_line("🚨 server restarting in 5 minutes 🚨").is_none());
        assert!(parse_line("🚨 alice paused playing Chess at 2026-08-06 20:15:00 🚨").is_none());
    }

    #[test]
    fn rejects_malformed_timestamps() {
        assert!(parse_line("🚨 alice started playing Chess at yesterday 🚨").is_none());
        assert!(parse_line("🚨 alice started playing Chess at 2026-13-40 99:99:99 🚨").is_none());
    }

    #[test]
    fn rejects_empty_input() {
        assert!(parse_line("").is_none());
    }
}
