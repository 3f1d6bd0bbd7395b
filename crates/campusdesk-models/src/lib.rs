//! # Campusdesk Models
//!
//! Read-only mirrors of the records served by the college administration
//! backend, plus the request DTOs the client sends. The backend owns the
//! canonical schema; these types only consume it.
//!
//! # Modules
//!
//! - [`ids`]: Typed integer IDs
//! - [`departments`]: Departments
//! - [`academic`]: Programs, cohorts and class sections
//! - [`users`]: Users and roles
//! - [`alerts`]: Alerts
//! - [`groups`]: Groups and membership
//! - [`auth`]: Login request and token response

pub mod academic;
pub mod alerts;
pub mod auth;
pub mod departments;
pub mod groups;
pub mod ids;
pub mod users;

pub use academic::{ClassFilter, ClassSection, Cohort, CohortFilter, Program, ProgramFilter};
pub use alerts::{Alert, AlertFilterParams, AlertType, CreateAlertDto, UpdateAlertDto};
pub use auth::{LoginRequest, TokenResponse};
pub use departments::Department;
pub use groups::{AddGroupMemberDto, Group, GroupRole};
pub use ids::{AlertId, ClassId, CohortId, CollegeId, DepartmentId, GroupId, ProgramId, UserId};
pub use users::{User, UserFilterParams, UserRole};
