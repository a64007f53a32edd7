//! Session reconstruction by log replay.
//!
//! Rebuilds per-(user, game) play sessions from the day's log lines. The
//! table is built from scratch on every run — nothing carries over from
//! previous runs, which makes a failed or interrupted run recoverable by
//! simply running again.

use std::cmp::Reverse;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::logline::parse_line;
use crate::presence::{SessionAction, SessionEvent};

/// An in-progress record during replay. `end` stays `None` until a
/// matching stop is seen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SessionRecord {
    start: DateTime<Utc>,
    end: Option<DateTime<Utc>>,
}

/// A fully resolved play session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlaySession {
    pub user: String,
    pub game: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl PlaySession {
    /// Elapsed play time. Signed: a malformed history can produce an end
    /// before its start, and such rows are surfaced rather than dropped.
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Whether this session's endpoints are out of order (a data
    /// anomaly, e.g. clock skew in the history).
    #[must_use]
    pub fn is_anomalous(&self) -> bool {
        self.end < self.start
    }
}

/// Replay state: at most one record per (user, game).
///
/// Entries keep first-seen insertion order for both users and games, which
/// is what makes the final sort's tie-break deterministic.
#[derive(Debug, Default)]
pub struct SessionTable {
    users: Vec<UserSessions>,
}

#[derive(Debug)]
struct UserSessions {
    user: String,
    games: Vec<(String, SessionRecord)>,
}

impl SessionTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies one parsed session event to the table.
    pub fn apply(&mut self, event: &SessionEvent) {
        match event.action {
            SessionAction::Started => self.record_start(event),
            SessionAction::Stopped => self.record_stop(event),
        }
    }

    /// A start unconditionally replaces whatever record exists for the
    /// (user, game) pair. A second start before a matching stop discards
    /// the earlier open record; only the later session can ever be
    /// reported. Known quirk, inherited deliberately.
    fn record_start(&mut self, event: &SessionEvent) {
        let record = SessionRecord {
            start: event.timestamp,
            end: None,
        };

        let user_idx = match self.users.iter().position(|u| u.user == event.user) {
            Some(idx) => idx,
            None => {
                self.users.push(UserSessions {
                    user: event.user.clone(),
                    games: Vec::new(),
                });
                self.users.len() - 1
            }
        };
        let games = &mut self.users[user_idx].games;

        match games.iter().position(|(game, _)| *game == event.game) {
            Some(idx) => {
                if games[idx].1.end.is_none() {
                    tracing::debug!(
                        user = %event.user,
                        game = %event.game,
                        "second start before a stop, discarding open record"
                    );
                }
                games[idx].1 = record;
            }
            None => games.push((event.game.clone(), record)),
        }
    }

    /// A stop only closes an existing open record for the exact
    /// (user, game) pair; anything else is a no-op.
    fn record_stop(&mut self, event: &SessionEvent) {
        let open = self
            .users
            .iter_mut()
            .find(|u| u.user == event.user)
            .and_then(|u| u.games.iter_mut().find(|(game, _)| *game == event.game))
            .map(|(_, record)| record)
            .filter(|record| record.end.is_none());

        match open {
            Some(record) => record.end = Some(event.timestamp),
            None => tracing::debug!(
                user = %event.user,
                game = %event.game,
                "stop without a matching open session, ignoring"
            ),
        }
    }

    /// Resolves the table into sessions, in traversal order.
    ///
    /// Records still open close at `now`: an in-progress session is
    /// reported with play time up to the reconstruction run itself, not
    /// the window end.
    #[must_use]
    pub fn into_sessions(self, now: DateTime<Utc>) -> Vec<PlaySession> {
        let mut sessions = Vec::new();
        for entry in self.users {
            for (game, record) in entry.games {
                let session = PlaySession {
                    user: entry.user.clone(),
                    game,
                    start: record.start,
                    end: record.end.unwrap_or(now),
                };
                if session.is_anomalous() {
                    tracing::warn!(
                        user = %session.user,
                        game = %session.game,
                        start = %session.start,
                        end = %session.end,
                        "session ends before it starts, keeping row as data anomaly"
                    );
                }
                sessions.push(session);
            }
        }
        sessions
    }
}

/// Replays ordered log lines into ranked play sessions.
///
/// Lines that do not parse as session events are skipped; the history is
/// a shared channel and full of unrelated traffic. The result is sorted
/// by elapsed duration, descending, with ties left in traversal order
/// (the sort is stable).
#[must_use]
pub fn replay<'a, I>(lines: I, now: DateTime<Utc>) -> Vec<PlaySession>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut table = SessionTable::new();
    for line in lines {
        if let Some(event) = parse_line(line) {
            table.apply(&event);
        }
    }

    let mut sessions = table.into_sessions(now);
    sessions.sort_by_key(|s| Reverse(s.duration()));
    sessions
}
