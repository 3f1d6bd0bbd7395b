//! Logging settings.
//!
//! - `LOG_LEVEL`: Level for campusdesk targets (default: `info`)
//! - `LOG_DIR`: When set, structured JSON logs are also written to a
//!   daily-rotated file in this directory

use std::path::PathBuf;

use tracing::Level;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogConfig {
    pub level: Level,
    pub log_dir: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            log_dir: None,
        }
    }
}

impl LogConfig {
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            level: std::env::var("LOG_LEVEL")
                .ok()
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(Level::INFO),
            log_dir: std::env::var("LOG_DIR")
                .ok()
                .filter(|d| !d.trim().is_empty())
                .map(PathBuf::from),
        }
    }

    /// Directive string for `EnvFilter`, quieting the HTTP stack.
    pub fn filter_directive(&self, crate_name: &str) -> String {
        format!(
            "{}={},campusdesk_client={},campusdesk_core={},reqwest=warn,hyper=warn",
            crate_name,
            self.level.as_str().to_ascii_lowercase(),
            self.level.as_str().to_ascii_lowercase(),
            self.level.as_str().to_ascii_lowercase(),
        )
    }
}
