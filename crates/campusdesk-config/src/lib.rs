//! # Campusdesk Config
//!
//! Configuration types for Campusdesk, loaded from environment variables:
//!
//! - [`client`]: Backend URL, session token and request timeout
//! - [`fetch`]: Page size, paging mode, fan-out and search debounce
//! - [`logging`]: Log level and optional JSON log directory
//!
//! # Example
//!
//! ```ignore
//! use campusdesk_config::{ClientConfig, FetchConfig, LogConfig};
//!
//! dotenvy::dotenv().ok();
//! let client_config = ClientConfig::from_env();
//! let fetch_config = FetchConfig::from_env();
//! let log_config = LogConfig::from_env();
//! ```

pub mod client;
pub mod fetch;
pub mod logging;

pub use client::ClientConfig;
pub use fetch::FetchConfig;
pub use logging::LogConfig;

/// Reads and parses an environment variable, `None` when unset or malformed.
pub(crate) fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

/// Parses the usual spellings of a boolean flag.
pub(crate) fn env_flag(key: &str) -> Option<bool> {
    let value = std::env::var(key).ok()?;
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
