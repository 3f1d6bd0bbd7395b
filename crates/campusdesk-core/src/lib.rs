//! # Campusdesk Core
//!
//! Core types, errors, and utilities shared by every Campusdesk crate.
//!
//! - [`errors`]: The [`ApiError`] type returned by every backend call
//! - [`pagination`]: `skip`/`limit` paging and list-screen offset bookkeeping
//! - [`batch`]: Sequential batch mutations with success/failure accounting
//! - [`serde`]: Custom serde deserialization helpers
//!
//! # Example
//!
//! ```ignore
//! use campusdesk_core::{ApiError, BatchReducer, PageRequest};
//!
//! let mut reducer = BatchReducer::new("mark_read");
//! let outcome = reducer.run(ids, |id| api.mark_read(id)).await;
//! ```

pub mod batch;
pub mod errors;
pub mod pagination;
pub mod serde;

// Re-export commonly used types at crate root
pub use batch::{BatchOutcome, BatchReducer, BatchState};
pub use errors::{ApiError, ApiResult};
pub use pagination::{MAX_PAGE_SIZE, MAX_PAGES, PageRequest, PaginationParams, collect_pages};
