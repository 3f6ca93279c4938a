use async_trait::async_trait;
use progress_core::model::AuthContext;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::ProgressApiConfig;
use crate::error::RemoteError;

/// Body of a successful `POST /get`.
///
/// Each blob is JSON text embedded as a string; decoding is left to the
/// caller so one malformed blob does not spoil the others.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct RemoteProgress {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub progress: Option<String>,
    #[serde(default)]
    pub weekly: Option<String>,
    #[serde(default)]
    pub history: Option<String>,
}

/// Raw local blobs pushed by `POST /save`, passed through unparsed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProgressBlobs {
    pub progress: Option<String>,
    pub weekly: Option<String>,
    pub history: Option<String>,
}

/// Contract of the remote progress service.
#[async_trait]
pub trait RemoteProgressApi: Send + Sync {
    /// Read the user's stored progress.
    ///
    /// # Errors
    ///
    /// Returns `RemoteError` on transport failures, non-2xx statuses,
    /// undecodable bodies, or a response without `success: true`.
    async fn fetch(&self, auth: &AuthContext) -> Result<RemoteProgress, RemoteError>;

    /// Replace the user's stored progress with the given blobs.
    ///
    /// # Errors
    ///
    /// Returns `RemoteError` on transport failures or non-2xx statuses.
    async fn save(&self, auth: &AuthContext, blobs: &ProgressBlobs) -> Result<(), RemoteError>;

    /// Wipe the user's stored progress.
    ///
    /// # Errors
    ///
    /// Returns `RemoteError` on transport failures or non-2xx statuses.
    async fn reset(&self, auth: &AuthContext) -> Result<(), RemoteError>;
}

/// `reqwest` client for the `/get`, `/save`, and `/reset` endpoints.
#[derive(Clone)]
pub struct HttpProgressApi {
    client: Client,
    base_url: String,
}

impl HttpProgressApi {
    /// Build a client for the configured service.
    ///
    /// # Errors
    ///
    /// Returns `RemoteError::Http` if the underlying client cannot be built.
    pub fn new(config: &ProgressApiConfig) -> Result<Self, RemoteError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn post<T: Serialize + Sync>(
        &self,
        auth: &AuthContext,
        endpoint: &str,
        body: &T,
    ) -> Result<reqwest::Response, RemoteError> {
        let url = format!("{}/{endpoint}", self.base_url);
        let response = self
            .client
            .post(url)
            .bearer_auth(auth.token())
            .json(body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(RemoteError::HttpStatus(response.status()));
        }
        Ok(response)
    }
}

#[async_trait]
impl RemoteProgressApi for HttpProgressApi {
    async fn fetch(&self, auth: &AuthContext) -> Result<RemoteProgress, RemoteError> {
        let response = self
            .post(auth, "get", &EmailRequest { email: auth.email() })
            .await?;
        let body: RemoteProgress = response.json().await?;
        if !body.success {
            return Err(RemoteError::Rejected);
        }
        Ok(body)
    }

    async fn save(&self, auth: &AuthContext, blobs: &ProgressBlobs) -> Result<(), RemoteError> {
        let payload = SaveRequest {
            email: auth.email(),
            progress: blobs.progress.as_deref(),
            history: blobs.history.as_deref(),
            weekly: blobs.weekly.as_deref(),
        };
        self.post(auth, "save", &payload).await?;
        Ok(())
    }

    async fn reset(&self, auth: &AuthContext) -> Result<(), RemoteError> {
        self.post(auth, "reset", &EmailRequest { email: auth.email() })
            .await?;
        Ok(())
    }
}

#[derive(Debug, Serialize)]
struct EmailRequest<'a> {
    email: &'a str,
}

// Missing blobs are sent as `null`, not omitted.
#[derive(Debug, Serialize)]
struct SaveRequest<'a> {
    email: &'a str,
    progress: Option<&'a str>,
    history: Option<&'a str>,
    weekly: Option<&'a str>,
}
