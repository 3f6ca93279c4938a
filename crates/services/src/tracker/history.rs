use progress_core::model::{ActivityType, HistoryEvent, HistoryLog};
use storage::keys;
use tracing::warn;

use super::{ProgressTracker, decode_remote};
use crate::error::TrackerError;

impl ProgressTracker {
    /// Prepend an event stamped with the current UTC time.
    pub async fn append_history_event(&self, subject: &str, activity: &ActivityType) {
        if let Err(err) = self.try_append_history_event(subject, activity).await {
            warn!(subject, activity = %activity, error = %err, "history append failed");
        }
    }

    async fn try_append_history_event(
        &self,
        subject: &str,
        activity: &ActivityType,
    ) -> Result<(), TrackerError> {
        let mut history = self.load_or_default::<HistoryLog>(keys::HISTORY).await?;
        history.push(HistoryEvent::new(subject, activity.clone(), self.clock.now()));
        self.save(keys::HISTORY, &history).await
    }

    /// Event log, most recent first, taken from the backend when it answers.
    pub async fn history_snapshot(&self) -> HistoryLog {
        if let Some(remote) = self.fetch_remote().await {
            if let Some(history) = decode_remote("remote history", remote.history.as_deref()) {
                return history;
            }
        }

        match self.load::<HistoryLog>(keys::HISTORY).await {
            Ok(history) => history.unwrap_or_default(),
            Err(err) => {
                warn!(error = %err, "local history unreadable");
                HistoryLog::default()
            }
        }
    }
}
