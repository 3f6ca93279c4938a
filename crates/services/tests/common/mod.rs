#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use progress_core::model::AuthContext;
use progress_core::time::fixed_now;
use services::{
    Clock, ProgressBlobs, ProgressTracker, RemoteError, RemoteProgress, RemoteProgressApi,
};
use storage::keys;
use storage::repository::{InMemoryStore, KeyValueStore, StorageError};

/// Scripted stand-in for the progress backend.
#[derive(Default)]
pub struct FakeRemote {
    /// `None` behaves like an unreachable service.
    response: Mutex<Option<RemoteProgress>>,
    fetches: AtomicUsize,
    saves: Mutex<Vec<(String, ProgressBlobs)>>,
    resets: Mutex<Vec<String>>,
}

impl FakeRemote {
    pub fn unreachable() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn answering(response: RemoteProgress) -> Arc<Self> {
        let remote = Self::default();
        *remote.response.lock().unwrap() = Some(response);
        Arc::new(remote)
    }

    pub fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    pub fn saves(&self) -> Vec<(String, ProgressBlobs)> {
        self.saves.lock().unwrap().clone()
    }

    pub fn resets(&self) -> Vec<String> {
        self.resets.lock().unwrap().clone()
    }
}

#[async_trait]
impl RemoteProgressApi for FakeRemote {
    async fn fetch(&self, _auth: &AuthContext) -> Result<RemoteProgress, RemoteError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        let response = self.response.lock().unwrap().clone();
        match response {
            Some(body) if body.success => Ok(body),
            Some(_) => Err(RemoteError::Rejected),
            None => Err(RemoteError::HttpStatus(reqwest::StatusCode::SERVICE_UNAVAILABLE)),
        }
    }

    async fn save(&self, auth: &AuthContext, blobs: &ProgressBlobs) -> Result<(), RemoteError> {
        if self.response.lock().unwrap().is_none() {
            return Err(RemoteError::HttpStatus(reqwest::StatusCode::SERVICE_UNAVAILABLE));
        }
        self.saves
            .lock()
            .unwrap()
            .push((auth.email().to_string(), blobs.clone()));
        Ok(())
    }

    async fn reset(&self, auth: &AuthContext) -> Result<(), RemoteError> {
        self.resets.lock().unwrap().push(auth.email().to_string());
        Ok(())
    }
}

/// Store that fails every write to one key.
#[derive(Clone)]
pub struct FailingWrites {
    inner: InMemoryStore,
    key: &'static str,
}

impl FailingWrites {
    pub fn new(inner: InMemoryStore, key: &'static str) -> Self {
        Self { inner, key }
    }
}

#[async_trait]
impl KeyValueStore for FailingWrites {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if key == self.key {
            return Err(StorageError::Connection("disk full".into()));
        }
        self.inner.set(key, value).await
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.inner.remove(key).await
    }

    async fn multi_remove(&self, keys: &[&str]) -> Result<(), StorageError> {
        self.inner.multi_remove(keys).await
    }
}

pub fn success(
    progress: Option<&str>,
    weekly: Option<&str>,
    history: Option<&str>,
) -> RemoteProgress {
    RemoteProgress {
        success: true,
        progress: progress.map(str::to_string),
        weekly: weekly.map(str::to_string),
        history: history.map(str::to_string),
    }
}

pub async fn sign_in(store: &InMemoryStore) {
    store.set(keys::USER_EMAIL, "student@example.com").await.unwrap();
    store.set(keys::USER_TOKEN, "token-123").await.unwrap();
}

pub fn tracker(store: &InMemoryStore, remote: Arc<FakeRemote>) -> ProgressTracker {
    ProgressTracker::new(Clock::fixed(fixed_now()), Arc::new(store.clone()), remote)
}

/// Store whose reads of one key fail a set number of times before recovering.
#[derive(Clone)]
pub struct FlakyReads {
    inner: InMemoryStore,
    key: &'static str,
    failures_left: Arc<AtomicUsize>,
}

impl FlakyReads {
    pub fn new(inner: InMemoryStore, key: &'static str, failures: usize) -> Self {
        Self {
            inner,
            key,
            failures_left: Arc::new(AtomicUsize::new(failures)),
        }
    }
}

#[async_trait]
impl KeyValueStore for FlakyReads {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        if key == self.key
            && self
                .failures_left
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
                .is_ok()
        {
            return Err(StorageError::Connection("database is locked".into()));
        }
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.inner.set(key, value).await
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.inner.remove(key).await
    }

    async fn multi_remove(&self, keys: &[&str]) -> Result<(), StorageError> {
        self.inner.multi_remove(keys).await
    }
}
