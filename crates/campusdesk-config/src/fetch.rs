//! Fetch behaviour for list calls and the department aggregation.
//!
//! - `CAMPUSDESK_PAGE_SIZE`: `limit` sent with each list request (default: 1000)
//! - `CAMPUSDESK_EXHAUSTIVE_PAGING`: Keep requesting pages until a short one
//!   arrives (default: true). When false, a single page is fetched.
//! - `CAMPUSDESK_FAN_OUT`: Fetch each hierarchy level concurrently (default: false)
//! - `CAMPUSDESK_SEARCH_DEBOUNCE_MS`: Quiet period before a search query is
//!   applied (default: 300)

use std::time::Duration;

use crate::{env_flag, env_parse};

pub const DEFAULT_PAGE_SIZE: u32 = 1000;
pub const DEFAULT_SEARCH_DEBOUNCE_MS: u64 = 300;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchConfig {
    pub page_size: u32,
    pub exhaustive: bool,
    /// Issue the requests of one hierarchy level concurrently. Results are
    /// still joined in iteration order.
    pub fan_out: bool,
    pub search_debounce_ms: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            exhaustive: true,
            fan_out: false,
            search_debounce_ms: DEFAULT_SEARCH_DEBOUNCE_MS,
        }
    }
}

impl FetchConfig {
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            page_size: env_parse::<u32>("CAMPUSDESK_PAGE_SIZE")
                .filter(|size| *size > 0)
                .unwrap_or(defaults.page_size),
            exhaustive: env_flag("CAMPUSDESK_EXHAUSTIVE_PAGING").unwrap_or(defaults.exhaustive),
            fan_out: env_flag("CAMPUSDESK_FAN_OUT").unwrap_or(defaults.fan_out),
            search_debounce_ms: env_parse("CAMPUSDESK_SEARCH_DEBOUNCE_MS")
                .unwrap_or(defaults.search_debounce_ms),
        }
    }

    /// A single page of `page_size` rows, matching the dashboard's fixed
    /// `limit: 1000` behaviour.
    pub fn single_page(page_size: u32) -> Self {
        Self {
            page_size,
            exhaustive: false,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_fan_out(mut self, fan_out: bool) -> Self {
        self.fan_out = fan_out;
        self
    }

    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }
}
