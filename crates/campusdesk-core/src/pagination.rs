//! Pagination utilities for list endpoints.
//!
//! The backend pages every list endpoint with `skip`/`limit` query parameters
//! and returns a bare JSON array. Two helpers live here:
//!
//! - [`PaginationParams`]: offset and page bookkeeping for list screens
//!   (`limit`, `offset`, `page`), converted into a [`PageRequest`] on the wire.
//! - [`collect_pages`]: drives a page-fetching closure until a short page
//!   signals the end of the result set.
//!
//! # Example
//!
//! ```ignore
//! use campusdesk_core::pagination::{collect_pages, PageRequest};
//!
//! let users = collect_pages(1000, true, |page: PageRequest| {
//!     client.get_users_page(&filter, page)
//! })
//! .await?;
//! ```

use std::future::Future;

use serde::Serialize;
use tracing::{debug, warn};

use crate::errors::ApiResult;

/// Largest `limit` the backend accepts on a single list request.
pub const MAX_PAGE_SIZE: u32 = 1000;

/// Default number of rows per page on list screens.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Upper bound on requests made by one exhaustive [`collect_pages`] run.
///
/// A backend that ignores `skip` keeps answering with full pages; this stops
/// the loop instead of spinning forever.
pub const MAX_PAGES: usize = 100;

/// The `skip`/`limit` pair sent with every list request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageRequest {
    pub skip: u64,
    pub limit: u32,
}

impl PageRequest {
    pub fn first(limit: u32) -> Self {
        Self {
            skip: 0,
            limit: limit.clamp(1, MAX_PAGE_SIZE),
        }
    }

    /// The request for the page following this one.
    #[must_use]
    pub fn next(self) -> Self {
        Self {
            skip: self.skip + u64::from(self.limit),
            limit: self.limit,
        }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::first(MAX_PAGE_SIZE)
    }
}

/// Offset bookkeeping for a paginated list screen.
///
/// Supports both offset-based and page-based navigation. When `page` is
/// provided, it takes precedence over `offset`.
///
/// # Limits
///
/// - `limit` is clamped to the range [1, [`MAX_PAGE_SIZE`]]
/// - `offset` is clamped to a minimum of 0
/// - `page` is clamped to a minimum of 1
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    pub page: Option<i64>,
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            limit: Some(i64::from(DEFAULT_PAGE_SIZE)),
            offset: Some(0),
            page: None,
        }
    }
}

impl PaginationParams {
    /// Returns the effective limit, clamped to [1, MAX_PAGE_SIZE].
    #[must_use]
    pub fn limit(&self) -> i64 {
        self.limit
            .unwrap_or(i64::from(DEFAULT_PAGE_SIZE))
            .clamp(1, i64::from(MAX_PAGE_SIZE))
    }

    /// Returns the effective offset, derived from `page` when it is set.
    #[must_use]
    pub fn offset(&self) -> i64 {
        if let Some(page) = self.page {
            (page.max(1) - 1) * self.limit()
        } else {
            self.offset.unwrap_or(0).max(0)
        }
    }

    /// Returns the page number if provided, clamped to a minimum of 1.
    #[must_use]
    pub fn page(&self) -> Option<i64> {
        self.page.map(|p| p.max(1))
    }

    /// Parameters for the next page of the same size.
    #[must_use]
    pub fn next(&self) -> Self {
        Self {
            limit: Some(self.limit()),
            offset: Some(self.offset() + self.limit()),
            page: self.page().map(|p| p + 1),
        }
    }

    /// Parameters for the previous page; stays on the first page.
    #[must_use]
    pub fn previous(&self) -> Self {
        Self {
            limit: Some(self.limit()),
            offset: Some((self.offset() - self.limit()).max(0)),
            page: self.page().map(|p| (p - 1).max(1)),
        }
    }

    /// Whether a page that returned `returned` rows may have a successor.
    #[must_use]
    pub fn has_more(&self, returned: usize) -> bool {
        returned as i64 >= self.limit()
    }

    pub fn to_request(&self) -> PageRequest {
        PageRequest {
            skip: self.offset() as u64,
            limit: self.limit() as u32,
        }
    }
}

/// Collects a complete result set from a paged list endpoint.
///
/// With `exhaustive` set, pages of `page_size` are requested until one comes
/// back short or empty, or until [`MAX_PAGES`] requests have been made.
/// Otherwise exactly one page is fetched and a full page is reported as
/// possible truncation.
pub async fn collect_pages<T, F, Fut>(page_size: u32, exhaustive: bool, mut fetch: F) -> ApiResult<Vec<T>>
where
    F: FnMut(PageRequest) -> Fut,
    Fut: Future<Output = ApiResult<Vec<T>>>,
{
    let mut page = PageRequest::first(page_size);
    let mut items = Vec::new();
    let mut requests = 0;

    loop {
        let batch = fetch(page).await?;
        requests += 1;
        let returned = batch.len();
        items.extend(batch);

        if returned == 0 || returned < page.limit as usize {
            break;
        }

        if !exhaustive {
            warn!(
                limit = page.limit,
                "List returned a full page; results may be truncated"
            );
            break;
        }

        if requests >= MAX_PAGES {
            warn!(
                requests,
                collected = items.len(),
                "Stopped paging after the request limit; results may be truncated"
            );
            break;
        }

        debug!(skip = page.skip, returned, "Fetching next page");
        page = page.next();
    }

    Ok(items)
}
