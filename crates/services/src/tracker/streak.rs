use progress_core::model::StreakState;
use storage::keys;
use tracing::warn;

use super::ProgressTracker;
use crate::error::TrackerError;

impl ProgressTracker {
    /// Count today toward the streak.
    pub async fn update_streak(&self) {
        if let Err(err) = self.try_update_streak().await {
            warn!(error = %err, "streak update failed");
        }
    }

    async fn try_update_streak(&self) -> Result<(), TrackerError> {
        let mut streak = self.load_or_default::<StreakState>(keys::STREAK).await?;
        if streak.advance(self.clock.today()) {
            self.save(keys::STREAK, &streak).await?;
        }
        Ok(())
    }

    /// Stored streak. Local only.
    pub async fn streak(&self) -> StreakState {
        match self.load::<StreakState>(keys::STREAK).await {
            Ok(streak) => streak.unwrap_or_default(),
            Err(err) => {
                warn!(error = %err, "local streak unreadable");
                StreakState::default()
            }
        }
    }
}
