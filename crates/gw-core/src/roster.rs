//! Last-online fact tracking.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::types::SubjectId;

/// When each subject was last seen with a non-offline status.
///
/// Facts are recorded on every non-offline presence snapshot and never
/// expire; the store lives as long as the owning service. A subject that
/// has never been observed yields `None`, not a zero time.
#[derive(Debug, Default)]
pub struct LastOnline {
    seen: HashMap<SubjectId, DateTime<Utc>>,
}

impl LastOnline {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that `subject` was seen online at `at`.
    ///
    /// Presence events arrive in platform delivery order, so the latest
    /// recording wins unconditionally.
    pub fn record(&mut self, subject: SubjectId, at: DateTime<Utc>) {
        self.seen.insert(subject, at);
    }

    /// Returns the most recent non-offline timestamp for `subject`.
    #[must_use]
    pub fn last_seen(&self, subject: SubjectId) -> Option<DateTime<Utc>> {
        self.seen.get(&subject).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}
