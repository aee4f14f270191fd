use std::env;
use std::sync::Arc;

use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;
use url::Url;

use crate::repository::{BadgeRepository, ProgressRepository, SessionRepository, Storage, StorageError};

mod badge_repo;
mod progress_repo;
mod session_repo;

/// Default API origin when nothing is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:5000";

/// Path prefix shared by every journey endpoint.
const API_PREFIX: &str = "api/bible-in-a-day";

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum HttpInitError {
    #[error("invalid API url {raw}: {source}")]
    InvalidUrl {
        raw: String,
        #[source]
        source: url::ParseError,
    },
    #[error("API url cannot be a base: {0}")]
    NotABase(String),
}

/// Where the remote API lives and how to authenticate against it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
    pub token: Option<String>,
}

impl ApiConfig {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
        }
    }

    #[must_use]
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token.filter(|value| !value.trim().is_empty());
        self
    }

    /// Reads `JOURNEY_API_URL` and `JOURNEY_API_TOKEN`.
    #[must_use]
    pub fn from_env() -> Self {
        let base_url = env::var("JOURNEY_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.into());
        Self::new(base_url).with_token(env::var("JOURNEY_API_TOKEN").ok())
    }
}

/// Adapter that talks to the remote journey API over HTTP.
#[derive(Clone)]
pub struct HttpRepository {
    client: Client,
    base: Url,
    token: Option<String>,
}

impl HttpRepository {
    /// # Errors
    ///
    /// Returns `HttpInitError` if the configured base URL does not parse.
    pub fn new(config: &ApiConfig) -> Result<Self, HttpInitError> {
        let raw = config.base_url.trim();
        // Keep a trailing slash so `join` appends instead of replacing the last segment.
        let normalized = format!("{}/", raw.trim_end_matches('/'));
        let base = Url::parse(&normalized).map_err(|source| HttpInitError::InvalidUrl {
            raw: raw.to_string(),
            source,
        })?;
        if base.cannot_be_a_base() {
            return Err(HttpInitError::NotABase(raw.to_string()));
        }
        Ok(Self {
            client: Client::new(),
            base,
            token: config.token.clone(),
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, StorageError> {
        self.base
            .join(&format!("{API_PREFIX}/{path}"))
            .map_err(|e| StorageError::Serialization(e.to_string()))
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, StorageError> {
        let response = self.authorize(request).send().await.map_err(|e| {
            tracing::warn!(error = %e, "journey API request failed");
            StorageError::Connection(e.to_string())
        })?;
        let status = response.status();
        tracing::debug!(url = %response.url(), status = status.as_u16(), "journey API response");
        if status.is_success() {
            return Ok(response);
        }
        tracing::warn!(url = %response.url(), status = status.as_u16(), "journey API returned an error");
        Err(map_status(status))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, StorageError> {
        let url = self.endpoint(path)?;
        let response = self.send(self.client.get(url)).await?;
        decode(response).await
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, StorageError>
    where
        B: serde::Serialize + Sync,
        T: DeserializeOwned,
    {
        let url = self.endpoint(path)?;
        let response = self.send(self.client.post(url).json(body)).await?;
        decode(response).await
    }
}

fn map_status(status: StatusCode) -> StorageError {
    match status {
        StatusCode::NOT_FOUND => StorageError::NotFound,
        StatusCode::CONFLICT => StorageError::Conflict,
        other => StorageError::Status(other.as_u16()),
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, StorageError> {
    let bytes = response
        .bytes()
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;
    serde_json::from_slice(&bytes).map_err(|e| StorageError::Serialization(e.to_string()))
}

impl Storage {
    /// Build a `Storage` backed by the remote HTTP API.
    ///
    /// # Errors
    ///
    /// Returns `HttpInitError` if the base URL is invalid.
    pub fn http(config: &ApiConfig) -> Result<Self, HttpInitError> {
        let repo = HttpRepository::new(config)?;
        let sessions: Arc<dyn SessionRepository> = Arc::new(repo.clone());
        let progress: Arc<dyn ProgressRepository> = Arc::new(repo.clone());
        let badges: Arc<dyn BadgeRepository> = Arc::new(repo);
        Ok(Self {
            sessions,
            progress,
            badges,
        })
    }
}
