use std::sync::Arc;

use progress_core::model::AuthContext;
use storage::keys;
use storage::repository::KeyValueStore;
use tracing::{debug, info};

use crate::error::SessionError;

/// Derives the current `AuthContext` from the session keys.
///
/// Resolution happens on every call; nothing is cached.
#[derive(Clone)]
pub struct AuthResolver {
    store: Arc<dyn KeyValueStore>,
}

impl AuthResolver {
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Current credentials, or `None` when signed out.
    ///
    /// Store read failures count as signed out.
    pub async fn resolve(&self) -> Option<AuthContext> {
        let email = self.read(keys::USER_EMAIL).await;
        let token = self.read(keys::USER_TOKEN).await;
        AuthContext::from_parts(email, token)
    }

    async fn read(&self, key: &'static str) -> Option<String> {
        match self.store.get(key).await {
            Ok(value) => value,
            Err(err) => {
                debug!(key, error = %err, "session key unreadable; treating as signed out");
                None
            }
        }
    }
}

/// Persists and clears the signed-in session.
#[derive(Clone)]
pub struct SessionService {
    store: Arc<dyn KeyValueStore>,
    resolver: AuthResolver,
}

impl SessionService {
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        let resolver = AuthResolver::new(Arc::clone(&store));
        Self { store, resolver }
    }

    /// Store the credentials returned by a successful sign-in.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::MissingCredentials` if either value is unusable.
    /// Returns `SessionError::Storage` if the keys cannot be written.
    pub async fn save_session(&self, token: &str, email: &str) -> Result<(), SessionError> {
        AuthContext::from_parts(Some(email.to_string()), Some(token.to_string()))
            .ok_or(SessionError::MissingCredentials)?;
        self.store.set(keys::USER_TOKEN, token).await?;
        self.store.set(keys::USER_EMAIL, email).await?;
        info!(email, "session saved");
        Ok(())
    }

    /// The stored session, if any.
    pub async fn session(&self) -> Option<AuthContext> {
        self.resolver.resolve().await
    }

    /// Forget the stored session. Progress keys are left alone.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Storage` if the keys cannot be removed.
    pub async fn clear_session(&self) -> Result<(), SessionError> {
        self.store.remove(keys::USER_TOKEN).await?;
        self.store.remove(keys::USER_EMAIL).await?;
        info!("session cleared");
        Ok(())
    }
}
