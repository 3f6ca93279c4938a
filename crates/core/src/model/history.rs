use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::ActivityType;
use crate::time::iso_timestamp;

/// Maximum number of events retained in the history log.
pub const HISTORY_LIMIT: usize = 300;

/// A single discrete learning event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEvent {
    pub subject: String,
    #[serde(rename = "type")]
    pub activity: ActivityType,
    /// UTC ISO-8601 instant, e.g. `2024-01-02T03:04:05.000Z`.
    pub timestamp: String,
}

impl HistoryEvent {
    #[must_use]
    pub fn new(subject: impl Into<String>, activity: ActivityType, at: DateTime<Utc>) -> Self {
        Self {
            subject: subject.into(),
            activity,
            timestamp: iso_timestamp(at),
        }
    }
}

/// Reverse-chronological event log, most recent first.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HistoryLog {
    events: VecDeque<HistoryEvent>,
}

impl HistoryLog {
    /// Prepend an event and drop the oldest entries beyond [`HISTORY_LIMIT`].
    pub fn push(&mut self, event: HistoryEvent) {
        self.events.push_front(event);
        self.events.truncate(HISTORY_LIMIT);
    }

    pub fn iter(&self) -> impl Iterator<Item = &HistoryEvent> {
        self.events.iter()
    }

    #[must_use]
    pub fn latest(&self) -> Option<&HistoryEvent> {
        self.events.front()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Number of events whose type matches `activity`.
    #[must_use]
    pub fn count_of(&self, activity: &ActivityType) -> usize {
        self.events
            .iter()
            .filter(|event| &event.activity == activity)
            .count()
    }
}
