use std::time::Duration;

use serde::Deserialize;

use crate::error::{AppError, AppResult};

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Upstream recommendation backend base URL
    ///
    /// Unset or empty runs every policy in substitute-only mode.
    #[serde(default)]
    pub api_base_url: Option<String>,

    /// Bounded wait for a single upstream attempt, in milliseconds
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_request_timeout_ms() -> u64 {
    3000
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: None,
            request_timeout_ms: default_request_timeout_ms(),
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let config = envy::from_env::<Config>()
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects settings that can only be programmer mistakes
    pub fn validate(&self) -> AppResult<()> {
        if self.request_timeout_ms == 0 {
            return Err(AppError::Config(
                "REQUEST_TIMEOUT_MS must be greater than zero".to_string(),
            ));
        }

        if let Some(base) = self.base_url() {
            let parsed = reqwest::Url::parse(base)
                .map_err(|e| AppError::Config(format!("Invalid API_BASE_URL {base:?}: {e}")))?;
            if !matches!(parsed.scheme(), "http" | "https") {
                return Err(AppError::Config(format!(
                    "API_BASE_URL must use http or https, got {}",
                    parsed.scheme()
                )));
            }
        }

        Ok(())
    }

    /// Normalized upstream base, `None` in substitute-only mode
    pub fn base_url(&self) -> Option<&str> {
        self.api_base_url
            .as_deref()
            .map(|base| base.trim().trim_end_matches('/'))
            .filter(|base| !base.is_empty())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
