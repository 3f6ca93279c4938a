use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::{ActivityType, Subject};

/// Per-subject counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressEntry {
    #[serde(default)]
    pub pdf_opened: u64,
    #[serde(default)]
    pub ai_mentions: u64,
}

impl ProgressEntry {
    #[must_use]
    pub fn new(pdf_opened: u64, ai_mentions: u64) -> Self {
        Self {
            pdf_opened,
            ai_mentions,
        }
    }
}

/// Mapping from subject key to its counters.
///
/// Serializes as a plain JSON object keyed by subject name, which is the
/// layout both the local store and the remote service use.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProgressSnapshot {
    entries: BTreeMap<String, ProgressEntry>,
}

impl ProgressSnapshot {
    /// Every enumerated subject present with zeroed counters.
    #[must_use]
    pub fn zeroed() -> Self {
        let mut snapshot = Self::default();
        snapshot.ensure_subjects();
        snapshot
    }

    #[must_use]
    pub fn get(&self, subject: &str) -> Option<&ProgressEntry> {
        self.entries.get(subject)
    }

    pub fn insert(&mut self, subject: impl Into<String>, entry: ProgressEntry) {
        self.entries.insert(subject.into(), entry);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ProgressEntry)> {
        self.entries.iter().map(|(key, entry)| (key.as_str(), entry))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Add a zeroed entry for each enumerated subject that is missing one.
    pub fn ensure_subjects(&mut self) {
        for subject in Subject::ALL {
            self.entries.entry(subject.name().to_string()).or_default();
        }
    }

    /// Fold a remote snapshot into this one.
    ///
    /// Remote entries replace local entries with the same key, keys present on
    /// only one side are kept, and the enumerated subjects are always present
    /// in the result.
    #[must_use]
    pub fn merge_remote(mut self, remote: ProgressSnapshot) -> Self {
        self.entries.extend(remote.entries);
        self.ensure_subjects();
        self
    }

    /// Count one activity against `subject`, creating the entry if needed.
    ///
    /// Returns `true` when a counter moved. Activity types without a counter
    /// still create the entry but leave both counters alone.
    pub fn record(&mut self, subject: &str, activity: &ActivityType) -> bool {
        let entry = self.entries.entry(subject.to_string()).or_default();
        match activity {
            ActivityType::Pdf => {
                entry.pdf_opened += 1;
                true
            }
            ActivityType::Ai => {
                entry.ai_mentions += 1;
                true
            }
            ActivityType::Test | ActivityType::Other(_) => false,
        }
    }

    /// Sum of `pdfOpened` across every subject.
    #[must_use]
    pub fn total_pdf_opened(&self) -> u64 {
        self.entries.values().map(|entry| entry.pdf_opened).sum()
    }

    /// Sum of `aiMentions` across every subject.
    #[must_use]
    pub fn total_ai_mentions(&self) -> u64 {
        self.entries.values().map(|entry| entry.ai_mentions).sum()
    }
}

impl FromIterator<(String, ProgressEntry)> for ProgressSnapshot {
    fn from_iter<T: IntoIterator<Item = (String, ProgressEntry)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
