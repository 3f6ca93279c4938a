use std::collections::BTreeMap;

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::model::ActivityType;

/// Activity counted on a single calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WeeklyBucket {
    #[serde(default)]
    pub pdf: u64,
    #[serde(default)]
    pub ai: u64,
}

impl WeeklyBucket {
    #[must_use]
    pub fn new(pdf: u64, ai: u64) -> Self {
        Self { pdf, ai }
    }
}

/// Longest series [`WeeklyLedger::window`] will produce.
pub const MAX_WINDOW_DAYS: u32 = 366;

/// Day buckets keyed by `YYYY-MM-DD`. Buckets are never pruned.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeeklyLedger {
    days: BTreeMap<NaiveDate, WeeklyBucket>,
}

/// One point of the trend series returned by [`WeeklyLedger::window`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DailyActivity {
    pub date: NaiveDate,
    pub pdf: u64,
    pub ai: u64,
}

impl WeeklyLedger {
    #[must_use]
    pub fn get(&self, date: NaiveDate) -> Option<&WeeklyBucket> {
        self.days.get(&date)
    }

    pub fn insert(&mut self, date: NaiveDate, bucket: WeeklyBucket) {
        self.days.insert(date, bucket);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.days.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Count one activity on `date`, creating the day bucket if needed.
    pub fn record(&mut self, date: NaiveDate, activity: &ActivityType) {
        let bucket = self.days.entry(date).or_default();
        match activity {
            ActivityType::Pdf => bucket.pdf += 1,
            ActivityType::Ai => bucket.ai += 1,
            ActivityType::Test | ActivityType::Other(_) => {}
        }
    }

    /// The last `days` calendar days ending at `today`, oldest first.
    ///
    /// Days without a bucket are reported as zero. `days` is capped at
    /// [`MAX_WINDOW_DAYS`], and the series stops at the earliest
    /// representable date.
    #[must_use]
    pub fn window(&self, today: NaiveDate, days: u32) -> Vec<DailyActivity> {
        let mut window: Vec<DailyActivity> = (0..u64::from(days.min(MAX_WINDOW_DAYS)))
            .map_while(|offset| today.checked_sub_days(Days::new(offset)))
            .map(|date| {
                let bucket = self.days.get(&date).copied().unwrap_or_default();
                DailyActivity {
                    date,
                    pdf: bucket.pdf,
                    ai: bucket.ai,
                }
            })
            .collect();
        window.reverse();
        window
    }
}
