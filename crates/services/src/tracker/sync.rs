use progress_core::model::AuthContext;
use storage::keys;
use tracing::{debug, warn};

use super::ProgressTracker;
use crate::error::TrackerError;
use crate::remote::ProgressBlobs;

impl ProgressTracker {
    /// Push the local progress, weekly, and history blobs to the backend.
    ///
    /// Skipped when signed out. One attempt per call; failures are logged.
    pub async fn sync_to_backend(&self) {
        let Some(auth) = self.auth.resolve().await else {
            debug!("no session; skipping progress sync");
            return;
        };
        if let Err(err) = self.try_sync(&auth).await {
            warn!(error = %err, "progress sync failed");
        }
    }

    async fn try_sync(&self, auth: &AuthContext) -> Result<(), TrackerError> {
        let blobs = ProgressBlobs {
            progress: self.store.get(keys::PROGRESS).await?,
            weekly: self.store.get(keys::WEEKLY).await?,
            history: self.store.get(keys::HISTORY).await?,
        };
        self.remote.save(auth, &blobs).await?;
        Ok(())
    }
}
