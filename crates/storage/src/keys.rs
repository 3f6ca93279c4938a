//! Persisted key names.
//!
//! These strings are shared with already-installed clients; renaming any of
//! them orphans existing on-device state.

/// Per-subject counters (`ProgressSnapshot` JSON).
pub const PROGRESS: &str = "LOCAL_PROGRESS";
/// Day buckets (`WeeklyLedger` JSON).
pub const WEEKLY: &str = "WEEKLY_PROGRESS";
/// Event log (`HistoryLog` JSON).
pub const HISTORY: &str = "LEARNING_HISTORY";
/// Streak state (`StreakState` JSON).
pub const STREAK: &str = "DAILY_STREAK";

pub const USER_EMAIL: &str = "userEmail";
pub const USER_TOKEN: &str = "userToken";

/// Everything cleared by a progress reset. Session keys are not included.
pub const PROGRESS_KEYS: [&str; 4] = [PROGRESS, WEEKLY, HISTORY, STREAK];
