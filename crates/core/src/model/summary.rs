use serde::Serialize;

use crate::model::{ActivityType, HistoryLog, ProgressSnapshot};

/// Score shown for one subject, capped at 100.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubjectScore {
    pub subject: String,
    pub score: u64,
}

/// Headline numbers for the progress screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProgressSummary {
    pub lessons_completed: u64,
    pub ai_sessions: u64,
    pub tests_completed: u64,
    pub subject_scores: Vec<SubjectScore>,
    pub average_score: u64,
}

const PDF_WEIGHT: u64 = 10;
const AI_WEIGHT: u64 = 5;
const TEST_WEIGHT: u64 = 2;
const MAX_SCORE: u64 = 100;

impl ProgressSummary {
    /// Derive the summary from a progress snapshot and the history log.
    ///
    /// Tests are not tracked per subject, so every subject's score gets the
    /// same credit for the total number of completed tests.
    #[must_use]
    pub fn from_parts(progress: &ProgressSnapshot, history: &HistoryLog) -> Self {
        let tests_completed = history.count_of(&ActivityType::Test) as u64;

        let subject_scores: Vec<SubjectScore> = progress
            .iter()
            .map(|(subject, entry)| SubjectScore {
                subject: subject.to_string(),
                score: (entry.pdf_opened * PDF_WEIGHT
                    + entry.ai_mentions * AI_WEIGHT
                    + tests_completed * TEST_WEIGHT)
                    .min(MAX_SCORE),
            })
            .collect();

        let average_score = if subject_scores.is_empty() {
            0
        } else {
            let total: u64 = subject_scores.iter().map(|s| s.score).sum();
            let count = subject_scores.len() as u64;
            // Round half up.
            (total * 2 + count) / (count * 2)
        };

        Self {
            lessons_completed: progress.total_pdf_opened(),
            ai_sessions: progress.total_ai_mentions(),
            tests_completed,
            subject_scores,
            average_score,
        }
    }
}
