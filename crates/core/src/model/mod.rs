mod activity;
mod auth;
mod history;
mod progress;
mod streak;
mod subject;
mod summary;
mod weekly;

pub use activity::ActivityType;
pub use auth::AuthContext;
pub use history::{HISTORY_LIMIT, HistoryEvent, HistoryLog};
pub use progress::{ProgressEntry, ProgressSnapshot};
pub use streak::StreakState;
pub use subject::{Subject, canonical_subject, detect_subject};
pub use summary::{ProgressSummary, SubjectScore};
pub use weekly::{DailyActivity, MAX_WINDOW_DAYS, WeeklyBucket, WeeklyLedger};
