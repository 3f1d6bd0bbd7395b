//! User models and roles.
//!
//! Users are not nested under departments in the data model; the department
//! view fetches them separately, filtered by `department_id` and `role`.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use crate::ids::{DepartmentId, UserId};

/// Role of a user within a college.
///
/// Role strings the client does not know are preserved in [`UserRole::Other`]
/// so a single unexpected record does not fail a whole list.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum UserRole {
    SuperAdmin,
    CollegeAdmin,
    Staff,
    Student,
    Other(String),
}

impl UserRole {
    pub fn as_str(&self) -> &str {
        match self {
            UserRole::SuperAdmin => "super_admin",
            UserRole::CollegeAdmin => "college_admin",
            UserRole::Staff => "staff",
            UserRole::Student => "student",
            UserRole::Other(role) => role,
        }
    }

    /// Admin roles may create, edit and delete users.
    pub fn can_manage_users(&self) -> bool {
        matches!(self, UserRole::SuperAdmin | UserRole::CollegeAdmin)
    }
}

impl From<&str> for UserRole {
    fn from(value: &str) -> Self {
        match value {
            "super_admin" => UserRole::SuperAdmin,
            "college_admin" => UserRole::CollegeAdmin,
            "staff" => UserRole::Staff,
            "student" => UserRole::Student,
            other => UserRole::Other(other.to_string()),
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for UserRole {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(UserRole::from(s.trim()))
    }
}

impl Serialize for UserRole {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for UserRole {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(UserRole::from(raw.as_str()))
    }
}

/// A user account as returned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub full_name: String,
    pub email: String,
    pub role: UserRole,
    #[serde(default)]
    pub department_id: Option<DepartmentId>,
    #[serde(default)]
    pub is_active: bool,
}

impl User {
    /// Whether `needle` (already lowercased) occurs in the username, full name
    /// or email, ignoring case.
    pub fn matches(&self, needle: &str) -> bool {
        [&self.username, &self.full_name, &self.email]
            .iter()
            .any(|field| field.to_lowercase().contains(needle))
    }
}

/// Query filters for the user list endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UserFilterParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department_id: Option<DepartmentId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<UserRole>,
}

impl UserFilterParams {
    pub fn department_role(department_id: DepartmentId, role: UserRole) -> Self {
        Self {
            department_id: Some(department_id),
            role: Some(role),
        }
    }
}
