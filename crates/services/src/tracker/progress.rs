use progress_core::model::{
    ActivityType, ProgressSnapshot, ProgressSummary, Subject, canonical_subject, detect_subject,
};
use storage::keys;
use tracing::{info, warn};

use super::{ProgressTracker, decode_remote};
use crate::error::TrackerError;

impl ProgressTracker {
    /// Current per-subject counters, merged with the remote copy when signed in.
    ///
    /// Remote entries win on overlapping subjects and the merged result is
    /// written back locally. Remote failures fall back to the local snapshot;
    /// a corrupt local snapshot is replaced with a zeroed one.
    pub async fn progress_snapshot(&self) -> ProgressSnapshot {
        match self.try_progress_snapshot().await {
            Ok(snapshot) => snapshot,
            Err(err @ TrackerError::Decode { .. }) => {
                warn!(error = %err, "local progress is corrupt; reinitializing");
                self.initialize_progress().await
            }
            Err(err) => {
                // Do not overwrite state we merely failed to read.
                warn!(error = %err, "local progress unreadable; using zeroed snapshot");
                ProgressSnapshot::zeroed()
            }
        }
    }

    async fn try_progress_snapshot(&self) -> Result<ProgressSnapshot, TrackerError> {
        let local = match self.load::<ProgressSnapshot>(keys::PROGRESS).await? {
            Some(local) => local,
            None => self.initialize_progress().await,
        };

        let Some(remote) = self.fetch_remote().await else {
            return Ok(local);
        };
        let server: ProgressSnapshot =
            decode_remote("remote progress", remote.progress.as_deref()).unwrap_or_default();

        let merged = local.merge_remote(server);
        if let Err(err) = self.save(keys::PROGRESS, &merged).await {
            warn!(error = %err, "failed to cache merged progress");
        }
        Ok(merged)
    }

    /// Persist and return the zeroed snapshot.
    async fn initialize_progress(&self) -> ProgressSnapshot {
        let snapshot = ProgressSnapshot::zeroed();
        if let Err(err) = self.save(keys::PROGRESS, &snapshot).await {
            warn!(error = %err, "failed to persist initial progress");
        }
        snapshot
    }

    /// Record one learning activity and push the result to the backend.
    ///
    /// Updates the subject counters, the day bucket, the history log, and the
    /// streak, then syncs. Each step runs even if an earlier one failed. An
    /// empty subject is ignored entirely.
    pub async fn record_activity(&self, subject_raw: &str, activity: &ActivityType) {
        if subject_raw.is_empty() {
            return;
        }
        let subject = canonical_subject(subject_raw);

        if let Err(err) = self.bump_progress(&subject, activity).await {
            warn!(
                subject = %subject,
                activity = %activity,
                error = %err,
                "progress update failed"
            );
        }
        self.record_daily_activity(activity).await;
        self.append_history_event(&subject, activity).await;
        self.update_streak().await;
        self.sync_to_backend().await;
    }

    async fn bump_progress(
        &self,
        subject: &str,
        activity: &ActivityType,
    ) -> Result<(), TrackerError> {
        // A failed read must not turn into a write of zeroed counters.
        let mut snapshot = match self.try_progress_snapshot().await {
            Ok(snapshot) => snapshot,
            Err(err @ TrackerError::Decode { .. }) => {
                warn!(error = %err, "local progress is corrupt; reinitializing");
                self.initialize_progress().await
            }
            Err(err) => return Err(err),
        };
        snapshot.record(subject, activity);
        self.save(keys::PROGRESS, &snapshot).await
    }

    /// Record an AI-mentor message against the subject it mentions.
    ///
    /// Returns the detected subject; messages that mention none are not
    /// recorded.
    pub async fn record_chat_message(&self, text: &str) -> Option<Subject> {
        let subject = detect_subject(text)?;
        self.record_activity(subject.name(), &ActivityType::Ai).await;
        Some(subject)
    }

    /// Clear all local progress state and ask the backend to do the same.
    ///
    /// The session itself is kept.
    pub async fn reset_progress(&self) {
        let auth = self.auth.resolve().await;

        if let Err(err) = self.store.multi_remove(&keys::PROGRESS_KEYS).await {
            warn!(error = %err, "failed to clear local progress");
        }
        self.initialize_progress().await;

        if let Some(auth) = auth {
            if let Err(err) = self.remote.reset(&auth).await {
                warn!(error = %err, "remote progress reset failed");
            }
        }
        info!("progress reset");
    }

    /// Headline numbers derived from progress and history.
    pub async fn summary(&self) -> ProgressSummary {
        let progress = self.progress_snapshot().await;
        let history = self.history_snapshot().await;
        ProgressSummary::from_parts(&progress, &history)
    }
}
