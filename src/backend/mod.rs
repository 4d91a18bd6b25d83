//! Live backend client
//!
//! Thin wrapper around the hosted backend-as-a-service. The service
//! exposes PostgREST-style table endpoints under `/rest/v1/{table}` and
//! auth endpoints under `/auth/v1/`. Two credential tiers exist: the
//! publishable key for user-scoped requests and the secret key for
//! privileged server-side relays.
//!
//! Every operation returns a `Result`; callers must check the error before
//! trusting data. No retry and no timeout policy beyond what reqwest does
//! by default.

pub mod auth;
pub mod query;

pub use auth::{AuthSession, AuthUser};
pub use query::QueryBuilder;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::BackendConfig;

/// Errors surfaced by backend operations
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// Transport-level failure (connect, TLS, body read, JSON decode)
    #[error("Backend request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The backend answered with a non-success status
    #[error("Backend error ({status}): {message}")]
    Api { status: u16, message: String },
}

impl BackendError {
    /// True for auth-shaped failures (401/403 from the backend)
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, BackendError::Api { status, .. } if *status == 401 || *status == 403)
    }
}

/// Client for one credential tier of the hosted backend.
#[derive(Debug, Clone)]
pub struct Client {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl Client {
    /// Client using the publishable (client-tier) key
    pub fn new(config: &BackendConfig) -> Self {
        Self::with_key(config, config.publishable_key.clone())
    }

    /// Client using the secret (server-only) key. Only for privileged
    /// server-side operations; never expose responses from this tier
    /// without scoping them first.
    pub fn service(config: &BackendConfig) -> Self {
        Self::with_key(config, config.secret_key.clone())
    }

    fn with_key(config: &BackendConfig, api_key: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.url.trim_end_matches('/').to_string(),
            api_key,
        }
    }

    pub(crate) fn rest_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    pub(crate) fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1/{}", self.base_url, path)
    }

    /// Attach the standing headers every backend request needs. The bearer
    /// token is the user's access token when present, else the API key.
    pub(crate) fn authorize(
        &self,
        request: reqwest::RequestBuilder,
        access_token: Option<&str>,
    ) -> reqwest::RequestBuilder {
        let bearer = access_token.unwrap_or(&self.api_key);
        request
            .header("apikey", &self.api_key)
            .bearer_auth(bearer)
    }

    /// Start a table read. Finish with `fetch` / `fetch_one`.
    pub fn from(&self, table: &str) -> QueryBuilder<'_> {
        QueryBuilder::new(self, table)
    }

    /// Insert rows into a table, returning the stored representation.
    pub async fn insert<T, R>(
        &self,
        table: &str,
        rows: &T,
        access_token: Option<&str>,
    ) -> Result<Vec<R>, BackendError>
    where
        T: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let request = self
            .http
            .post(self.rest_url(table))
            .header("Prefer", "return=representation")
            .json(rows);
        let response = self.authorize(request, access_token).send().await?;
        Self::decode(response).await
    }

    /// Update rows matching the `eq` filters.
    pub async fn update<T>(
        &self,
        table: &str,
        changes: &T,
        filters: &[(&str, &str)],
        access_token: Option<&str>,
    ) -> Result<(), BackendError>
    where
        T: Serialize + ?Sized,
    {
        let request = self
            .http
            .patch(self.rest_url(table))
            .query(&eq_params(filters))
            .json(changes);
        let response = self.authorize(request, access_token).send().await?;
        Self::check(response).await
    }

    /// Delete rows matching the `eq` filters.
    pub async fn delete(
        &self,
        table: &str,
        filters: &[(&str, &str)],
        access_token: Option<&str>,
    ) -> Result<(), BackendError> {
        let request = self
            .http
            .delete(self.rest_url(table))
            .query(&eq_params(filters));
        let response = self.authorize(request, access_token).send().await?;
        Self::check(response).await
    }

    pub(crate) async fn decode<R: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<R, BackendError> {
        let response = Self::error_for_status(response).await?;
        Ok(response.json().await?)
    }

    pub(crate) async fn check(response: reqwest::Response) -> Result<(), BackendError> {
        Self::error_for_status(response).await?;
        Ok(())
    }

    async fn error_for_status(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, BackendError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response.text().await.unwrap_or_default();
        Err(BackendError::Api {
            status: status.as_u16(),
            message,
        })
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }
}

fn eq_params(filters: &[(&str, &str)]) -> Vec<(String, String)> {
    filters
        .iter()
        .map(|(column, value)| (column.to_string(), format!("eq.{}", value)))
        .collect()
}
