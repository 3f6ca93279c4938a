use progress_core::model::{ActivityType, DailyActivity, WeeklyLedger};
use storage::keys;
use tracing::warn;

use super::{ProgressTracker, decode_remote};
use crate::error::TrackerError;

impl ProgressTracker {
    /// Count `activity` in today's bucket.
    pub async fn record_daily_activity(&self, activity: &ActivityType) {
        if let Err(err) = self.try_record_daily_activity(activity).await {
            warn!(activity = %activity, error = %err, "weekly update failed");
        }
    }

    async fn try_record_daily_activity(&self, activity: &ActivityType) -> Result<(), TrackerError> {
        let today = self.clock.today();
        let mut ledger = self.load_or_default::<WeeklyLedger>(keys::WEEKLY).await?;
        ledger.record(today, activity);
        self.save(keys::WEEKLY, &ledger).await
    }

    /// Day buckets, taken from the backend when it answers.
    ///
    /// A successful remote read replaces local data outright; it is not
    /// merged and not cached.
    pub async fn weekly_snapshot(&self) -> WeeklyLedger {
        if let Some(remote) = self.fetch_remote().await {
            if let Some(ledger) = decode_remote("remote weekly", remote.weekly.as_deref()) {
                return ledger;
            }
        }

        match self.load::<WeeklyLedger>(keys::WEEKLY).await {
            Ok(ledger) => ledger.unwrap_or_default(),
            Err(err) => {
                warn!(error = %err, "local weekly ledger unreadable");
                WeeklyLedger::default()
            }
        }
    }

    /// The last `days` days of activity ending today, oldest first.
    pub async fn weekly_window(&self, days: u32) -> Vec<DailyActivity> {
        self.weekly_snapshot().await.window(self.clock.today(), days)
    }
}
