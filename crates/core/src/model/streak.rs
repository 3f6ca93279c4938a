use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Consecutive-day activity counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreakState {
    #[serde(default)]
    pub last_date: Option<NaiveDate>,
    #[serde(default)]
    pub count: u32,
}

impl StreakState {
    #[must_use]
    pub fn new(last_date: Option<NaiveDate>, count: u32) -> Self {
        Self { last_date, count }
    }

    /// Account for activity on `today`.
    ///
    /// A second call on the same day is a no-op. Activity on the day after
    /// `last_date` extends the streak; any other gap restarts it at 1.
    /// Returns `true` if the state changed.
    pub fn advance(&mut self, today: NaiveDate) -> bool {
        if self.last_date == Some(today) {
            return false;
        }
        let continues = self
            .last_date
            .is_some_and(|last| last.succ_opt() == Some(today));
        self.count = if continues { self.count + 1 } else { 1 };
        self.last_date = Some(today);
        true
    }
}
