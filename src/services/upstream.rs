/// Upstream recommendation backend client
///
/// Performs a single GET per call against `base + path` and folds every kind of
/// failure into a [`FetchOutcome`]. Nothing here retries or propagates errors;
/// deciding what to do next is left to the resolution policies.
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header::ACCEPT, Client as HttpClient, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{
    config::Config,
    error::{AppResult, AttemptError},
};

/// Backend routes consumed by the gateway
pub mod paths {
    use crate::models::UserId;

    pub const ACTIVE_USERS: &str = "/users/active";
    pub const POPULAR: &str = "/recommend/popular";

    pub fn content(isbn: &str) -> String {
        format!("/recommend/content/{}", urlencoding::encode(isbn))
    }

    pub fn hybrid(user_id: &UserId) -> String {
        format!("/recommend/hybrid/{}", urlencoding::encode(user_id.as_str()))
    }
}

/// Result of one upstream call
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome<T> {
    /// 2xx with a decodable body
    Ok(T),
    /// Reachable, but answered with a non-2xx status
    NotOk(StatusCode),
    /// Not configured, network failure, timeout or undecodable body
    Unreachable(AttemptError),
}

impl<T> FetchOutcome<T> {
    pub fn into_result(self) -> Result<T, AttemptError> {
        match self {
            FetchOutcome::Ok(value) => Ok(value),
            FetchOutcome::NotOk(status) => Err(AttemptError::BadStatus(status)),
            FetchOutcome::Unreachable(cause) => Err(cause),
        }
    }
}

impl FetchOutcome<Value> {
    /// Narrows a raw JSON payload to the expected shape
    ///
    /// A shape mismatch counts as a malformed payload, not a success.
    pub fn decode<T: DeserializeOwned>(self) -> FetchOutcome<T> {
        match self {
            FetchOutcome::Ok(value) => match serde_json::from_value(value) {
                Ok(decoded) => FetchOutcome::Ok(decoded),
                Err(e) => FetchOutcome::Unreachable(AttemptError::MalformedPayload(e.to_string())),
            },
            FetchOutcome::NotOk(status) => FetchOutcome::NotOk(status),
            FetchOutcome::Unreachable(cause) => FetchOutcome::Unreachable(cause),
        }
    }
}

/// Read-only access to the recommendation backend
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Upstream: Send + Sync {
    /// GET `path` relative to the configured base and decode the body as JSON
    async fn get_json(&self, path: &str) -> FetchOutcome<Value>;
}

/// GET `path` and decode the body into `T`
pub async fn fetch<T: DeserializeOwned>(upstream: &dyn Upstream, path: &str) -> FetchOutcome<T> {
    upstream.get_json(path).await.decode()
}

/// `reqwest`-backed upstream with a per-request timeout
#[derive(Clone)]
pub struct HttpUpstream {
    http_client: HttpClient,
    base_url: Option<String>,
}

impl HttpUpstream {
    /// Creates a client; `base_url` of `None` runs in substitute-only mode
    pub fn new(base_url: Option<String>, timeout: Duration) -> AppResult<Self> {
        let http_client = HttpClient::builder().timeout(timeout).build()?;

        Ok(Self {
            http_client,
            base_url: base_url.map(|base| base.trim_end_matches('/').to_string()),
        })
    }

    pub fn from_config(config: &Config) -> AppResult<Self> {
        Self::new(
            config.base_url().map(str::to_string),
            config.request_timeout(),
        )
    }

    pub fn is_configured(&self) -> bool {
        self.base_url.is_some()
    }

    fn url(&self, path: &str) -> Option<String> {
        let base = self.base_url.as_deref()?;
        if path.starts_with('/') {
            Some(format!("{base}{path}"))
        } else {
            Some(format!("{base}/{path}"))
        }
    }
}

fn classify(error: &reqwest::Error) -> AttemptError {
    if error.is_timeout() {
        AttemptError::Timeout
    } else if error.is_decode() {
        AttemptError::MalformedPayload(error.to_string())
    } else {
        AttemptError::Unreachable(error.to_string())
    }
}

#[async_trait]
impl Upstream for HttpUpstream {
    async fn get_json(&self, path: &str) -> FetchOutcome<Value> {
        let Some(url) = self.url(path) else {
            return FetchOutcome::Unreachable(AttemptError::Unconfigured);
        };

        let response = match self
            .http_client
            .get(&url)
            .header(ACCEPT, "application/json")
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                tracing::debug!(url = %url, error = %e, "Upstream request failed");
                return FetchOutcome::Unreachable(classify(&e));
            }
        };

        let status = response.status();
        if !status.is_success() {
            tracing::debug!(url = %url, status = %status, "Upstream returned non-success status");
            return FetchOutcome::NotOk(status);
        }

        match response.json::<Value>().await {
            Ok(body) => FetchOutcome::Ok(body),
            Err(e) => {
                tracing::debug!(url = %url, error = %e, "Upstream body could not be decoded");
                FetchOutcome::Unreachable(classify(&e))
            }
        }
    }
}
