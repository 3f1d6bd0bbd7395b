//! Backend connection settings.
//!
//! - `CAMPUSDESK_API_URL`: Base URL of the backend (default: `http://localhost:8000`)
//! - `CAMPUSDESK_TOKEN`: Pre-issued bearer token, skips the login step when set
//! - `CAMPUSDESK_TIMEOUT_SECS`: Per-request timeout in seconds (default: 30)

use std::time::Duration;

use crate::env_parse;

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub token: Option<String>,
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    #[must_use]
    pub fn from_env() -> Self {
        let base_url =
            std::env::var("CAMPUSDESK_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        Self {
            token: std::env::var("CAMPUSDESK_TOKEN")
                .ok()
                .filter(|t| !t.trim().is_empty()),
            timeout_secs: env_parse("CAMPUSDESK_TIMEOUT_SECS").unwrap_or(DEFAULT_TIMEOUT_SECS),
            ..Self::new(base_url)
        }
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout_secs = seconds;
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }

    /// Joins `path` onto the base URL with exactly one slash between them.
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}
