use std::fmt;

use serde::{Deserialize, Serialize};

/// Kind of learning activity reported by a screen.
///
/// Only `Pdf` and `Ai` map to counters. `Test` and unrecognized labels still
/// flow into weekly, history, and streak bookkeeping, and keep their original
/// spelling when persisted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ActivityType {
    Pdf,
    Ai,
    Test,
    Other(String),
}

impl ActivityType {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            ActivityType::Pdf => "pdf",
            ActivityType::Ai => "ai",
            ActivityType::Test => "test",
            ActivityType::Other(raw) => raw,
        }
    }
}

impl From<&str> for ActivityType {
    fn from(raw: &str) -> Self {
        match raw {
            "pdf" => ActivityType::Pdf,
            "ai" => ActivityType::Ai,
            "test" => ActivityType::Test,
            other => ActivityType::Other(other.to_string()),
        }
    }
}

impl From<String> for ActivityType {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "pdf" | "ai" | "test" => ActivityType::from(raw.as_str()),
            _ => ActivityType::Other(raw),
        }
    }
}

impl From<ActivityType> for String {
    fn from(activity: ActivityType) -> Self {
        match activity {
            ActivityType::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for ActivityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
