//! Local progress tracking with best-effort remote reconciliation.
//!
//! Every public operation on [`ProgressTracker`] is infallible from the
//! caller's side. Internal steps return `Result<_, TrackerError>`; the public
//! wrappers log failures and fall back to local or default state.
//!
//! Writes are read-modify-write sequences on whole blobs with no locking, so
//! two overlapping `record_activity` calls can lose an increment.

mod history;
mod progress;
mod streak;
mod sync;
mod weekly;

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use storage::repository::KeyValueStore;
use tracing::{debug, warn};

use crate::Clock;
use crate::auth::AuthResolver;
use crate::error::TrackerError;
use crate::remote::{RemoteProgress, RemoteProgressApi};

#[derive(Clone)]
pub struct ProgressTracker {
    clock: Clock,
    store: Arc<dyn KeyValueStore>,
    remote: Arc<dyn RemoteProgressApi>,
    auth: AuthResolver,
}

impl ProgressTracker {
    #[must_use]
    pub fn new(
        clock: Clock,
        store: Arc<dyn KeyValueStore>,
        remote: Arc<dyn RemoteProgressApi>,
    ) -> Self {
        let auth = AuthResolver::new(Arc::clone(&store));
        Self {
            clock,
            store,
            remote,
            auth,
        }
    }

    async fn load<T: DeserializeOwned>(
        &self,
        key: &'static str,
    ) -> Result<Option<T>, TrackerError> {
        let Some(raw) = self.store.get(key).await? else {
            return Ok(None);
        };
        let value =
            serde_json::from_str(&raw).map_err(|source| TrackerError::Decode { key, source })?;
        Ok(Some(value))
    }

    /// Like `load`, but a corrupt blob reads as the default value so the
    /// next save overwrites it. Storage faults still propagate.
    async fn load_or_default<T: DeserializeOwned + Default>(
        &self,
        key: &'static str,
    ) -> Result<T, TrackerError> {
        match self.load::<T>(key).await {
            Ok(value) => Ok(value.unwrap_or_default()),
            Err(err @ TrackerError::Decode { .. }) => {
                warn!(error = %err, "local blob is corrupt; starting from empty state");
                Ok(T::default())
            }
            Err(err) => Err(err),
        }
    }

    async fn save<T: Serialize + Sync>(
        &self,
        key: &'static str,
        value: &T,
    ) -> Result<(), TrackerError> {
        let raw =
            serde_json::to_string(value).map_err(|source| TrackerError::Encode { key, source })?;
        self.store.set(key, &raw).await?;
        Ok(())
    }

    /// Remote state for the signed-in user, or `None` when signed out or
    /// the service cannot be reached.
    async fn fetch_remote(&self) -> Option<RemoteProgress> {
        let auth = self.auth.resolve().await?;
        match self.remote.fetch(&auth).await {
            Ok(remote) => Some(remote),
            Err(err) => {
                debug!(error = %err, "remote progress unavailable; using local state");
                None
            }
        }
    }
}

/// Decode one embedded blob of a remote response.
fn decode_remote<T: DeserializeOwned>(key: &'static str, blob: Option<&str>) -> Option<T> {
    let raw = blob?;
    match serde_json::from_str(raw) {
        Ok(value) => Some(value),
        Err(source) => {
            let err = TrackerError::Decode { key, source };
            warn!(error = %err, "ignoring malformed remote blob");
            None
        }
    }
}
