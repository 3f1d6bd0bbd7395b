//! # Campusdesk Client
//!
//! Typed access to the college administration backend.
//!
//! - [`api`]: One trait per backend router (departments, academic structure,
//!   users, admin, alerts, groups, auth)
//! - [`http`]: [`HttpClient`], the `reqwest` implementation of every trait
//! - [`session`]: The explicit, shareable authenticated [`Session`]
//!
//! # Example
//!
//! ```no_run
//! use campusdesk_client::{AuthApi, HttpClient, UserApi};
//! use campusdesk_config::{ClientConfig, FetchConfig};
//! use campusdesk_models::UserFilterParams;
//!
//! # async fn example() -> Result<(), campusdesk_core::ApiError> {
//! let client = HttpClient::new(ClientConfig::from_env(), FetchConfig::from_env())?;
//! client.login("admin", "secret").await?;
//! let users = client.get_users(&UserFilterParams::default()).await?;
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod http;
pub mod session;

pub use api::{AcademicApi, AdminApi, AlertApi, AuthApi, DepartmentApi, GroupApi, UserApi};
pub use http::HttpClient;
pub use session::{Session, SessionData};
