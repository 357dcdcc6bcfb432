use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Application-level errors
///
/// Only configuration and wiring mistakes end up here. Upstream unavailability
/// on the read paths is absorbed by the resolution policies and never becomes
/// an `AppError`.
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Config(_) => (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()),
            AppError::HttpClient(_) => (StatusCode::BAD_GATEWAY, self.to_string()),
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

/// Why a single attempt against the upstream did not yield usable data
///
/// Callers fold every variant into "try the next source"; the distinction is
/// kept for logging only.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AttemptError {
    #[error("no upstream base URL configured")]
    Unconfigured,

    #[error("upstream unreachable: {0}")]
    Unreachable(String),

    #[error("upstream timed out")]
    Timeout,

    #[error("upstream returned status {0}")]
    BadStatus(StatusCode),

    #[error("malformed upstream payload: {0}")]
    MalformedPayload(String),

    #[error("upstream returned no usable content")]
    Empty,

    #[error("no record matched {0}")]
    NoMatch(String),
}
