//! Presence snapshots and game transition detection.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::SubjectId;

/// Online status reported by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    #[default]
    Online,
    Idle,
    DoNotDisturb,
    Offline,
}

impl Status {
    #[must_use]
    pub const fn is_offline(self) -> bool {
        matches!(self, Self::Offline)
    }
}

/// The kind of activity attached to a presence snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    Playing,
    Streaming,
    Listening,
    Watching,
    Competing,
    Custom,
}

/// An activity a subject is currently engaged in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    pub kind: ActivityKind,
    pub name: String,
}

/// A point-in-time view of one subject's presence.
///
/// Supplied by the platform on every change and never stored; the only
/// durable output of presence handling is the emitted log line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresenceSnapshot {
    pub subject: SubjectId,
    pub display_name: String,
    #[serde(default)]
    pub status: Status,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activity: Option<Activity>,
}

impl PresenceSnapshot {
    /// Whether this snapshot carries a "playing" activity.
    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.activity
            .as_ref()
            .is_some_and(|a| a.kind == ActivityKind::Playing)
    }
}

/// Whether a session event marks the start or the end of play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionAction {
    Started,
    Stopped,
}

impl SessionAction {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Started => "started",
            Self::Stopped => "stopped",
        }
    }
}

impl std::fmt::Display for SessionAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SessionAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "started" => Ok(Self::Started),
            "stopped" => Ok(Self::Stopped),
            _ => Err(format!("invalid session action: {s}")),
        }
    }
}

/// A detected game start or stop, ready to be formatted as a log line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionEvent {
    /// Display name of the subject at the time of the transition.
    pub user: String,
    pub action: SessionAction,
    pub game: String,
    pub timestamp: DateTime<Utc>,
}

/// Detects a game start or stop between two consecutive snapshots of the
/// same subject.
///
/// Returns at most one event:
/// - not playing → playing yields `Started` with the new activity's name;
/// - playing → not playing yields `Stopped` with the *previous* activity's
///   name (the game that just ended).
///
/// A direct switch from one game to another, with no non-playing snapshot
/// in between, yields nothing. That transition is invisible to this
/// detector; the limitation is pinned by a test below.
#[must_use]
pub fn detect_transition(
    previous: &PresenceSnapshot,
    current: &PresenceSnapshot,
    now: DateTime<Utc>,
) -> Option<SessionEvent> {
    match (previous.is_playing(), current.is_playing()) {
        (false, true) => {
            let activity = current.activity.as_ref()?;
            Some(SessionEvent {
                user: current.display_name.clone(),
                action: SessionAction::Started,
                game: activity.name.clone(),
                timestamp: now,
            })
        }
        (true, false) => {
            let activity = previous.activity.as_ref()?;
            Some(SessionEvent {
                user: current.display_name.clone(),
                action: SessionAction::Stopped,
                game: activity.name.clone(),
                timestamp: now,
            })
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn subject() -> SubjectId {
        SubjectId::new(1001).unwrap()
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 14, 15, 9, 26).unwrap()
    }

    fn snapshot(activity: Option<Activity>) -> PresenceSnapshot {
        PresenceSnapshot {
            subject: subject(),
            display_name: "alice".to_string(),
            status: Status::Online,
            activity,
        }
    }

    fn playing(game: &str) -> Option<Activity> {
        Some(Activity {
            kind: ActivityKind::Playing,
            name: game.to_string(),
        })
    }

    #[test]
    fn idle_to_playing_emits_started() {
        let event = detect_transition(&snapshot(None), &snapshot(playing("Chess")), now())
            .expect("should emit");
        assert_eq!(event.action, SessionAction::Started);
        assert_eq!(event.game, "Chess");
        assert_eq!(event.user, "alice");
        assert_eq!(event.timestamp, now());
    }

    #[test]
    fn playing_to_idle_emits_stopped_with_previous_game() {
        let event = detect_transition(&snapshot(playing("Chess")), &snapshot(None), now())
            .expect("should emit");
        assert_eq!(event.action, SessionAction::Stopped);
        assert_eq!(event.game, "Chess");
    }

    #[test]
    fn non_playing_activity_counts_as_not_playing() {
        let listening = Some(Activity {
            kind: ActivityKind::Listening,
            name: "lo-fi beats".to_string(),
        });
        // listening → playing is a start
        let event = detect_transition(&snapshot(listening.clone()), &snapshot(playing("Chess")), now())
            .expect("should emit");
        assert_eq!(event.action, SessionAction::Started);

        // playing → listening is a stop, named after the game
        let event = detect_transition(&snapshot(playing("Chess")), &snapshot(listening), now())
            .expect("should emit");
        assert_eq!(event.action, SessionAction::Stopped);
        assert_eq!(event.game, "Chess");
    }

    #[test]
    fn game_to_game_switch_emits_nothing() {
        // Accepted limitation: switching games without going idle in between
        // is invisible to the detector.
        let event = detect_transition(&snapshot(playing("Chess")), &snapshot(playing("Go")), now());
        assert!(event.is_none());
    }

    #[test]
    fn same_game_update_emits_nothing() {
        let event =
            detect_transition(&snapshot(playing("Chess")), &snapshot(playing("Chess")), now());
        assert!(event.is_none());
    }

    #[test]
    fn idle_to_idle_emits_nothing() {
        assert!(detect_transition(&snapshot(None), &snapshot(None), now()).is_none());
    }

    #[test]
    fn status_offline_check() {
        assert!(Status::Offline.is_offline());
        assert!(!Status::Online.is_offline());
        assert!(!Status::Idle.is_offline());
        assert!(!Status::DoNotDisturb.is_offline());
    }

    #[test]
    fn session_action_roundtrip() {
        for action in [SessionAction::Started, SessionAction::Stopped] {
            let s = action.as_str();
            let parsed: SessionAction = s.parse().unwrap();
            assert_eq!(parsed, action);
            assert_eq!(action.to_string(), s);
        }
        assert!("paused".parse::<SessionAction>().is_err());
    }

    #[test]
    fn snapshot_serde_roundtrip() {
        let snap = snapshot(playing("Chess"));
        let json = serde_json::to_string(&snap).unwrap();
        let parsed: PresenceSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, snap);
    }

    #[test]
    fn snapshot_deserializes_without_activity_or_status() {
        let json = r#"{"subject": 1001, "display_name": "alice"}"#;
        let parsed: PresenceSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.status, Status::Online);
        assert!(parsed.activity.is_none());
    }
}
