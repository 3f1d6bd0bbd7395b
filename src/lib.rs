//! # Campusdesk
//!
//! Operator tooling for a college administration backend: the department
//! drill-down, user management with bulk delete, the alert inbox and group
//! broadcasts.
//!
//! ## Architecture
//!
//! ```text
//! crates/
//! ├── campusdesk-core/     # Errors, pagination, the batch reducer
//! ├── campusdesk-config/   # Environment-driven settings
//! ├── campusdesk-models/   # Typed IDs, entities and DTOs
//! └── campusdesk-client/   # Backend traits, HTTP client, session
//! src/
//! ├── cli/                 # Command handlers for the binary
//! ├── modules/             # Feature modules
//! │   ├── departments/     # Hierarchy aggregation and the detail view
//! │   ├── users/           # Search, selection and bulk delete
//! │   ├── alerts/          # Inbox and group broadcasts
//! │   └── groups/          # Bulk membership
//! └── utils/               # Selection and bulk-action glue
//! ```
//!
//! Services are generic over the backend traits (`A: UserApi + AdminApi`)
//! so every workflow runs unchanged against [`campusdesk_client::HttpClient`]
//! or an in-memory fake.
//!
//! ## Bulk actions
//!
//! Bulk actions never abort on the first failure. Each selected ID is
//! attempted once, in selection order, and the caller gets a
//! [`utils::BulkActionReport`] with success and failure counts. The
//! selection is cleared and the list reloaded afterwards either way.
//!
//! ## Quick Start
//!
//! ```bash
//! CAMPUSDESK_API_URL=http://localhost:8000 campusdesk login -u admin
//! export CAMPUSDESK_TOKEN=...
//! campusdesk department 7
//! campusdesk delete-users 3 4 5
//! ```

pub mod cli;
pub mod logging;
pub mod modules;
pub mod utils;

#[cfg(test)]
pub(crate) mod test_utils;

// Re-export workspace crates for convenience
pub use campusdesk_client;
pub use campusdesk_config;
pub use campusdesk_core;
pub use campusdesk_models;
