//! Department models.

use campusdesk_core::serde::deserialize_optional_string;
use serde::{Deserialize, Serialize};

use crate::ids::{CollegeId, DepartmentId};

/// A department of a college. Owns zero or more programs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    pub id: DepartmentId,
    pub name: String,
    pub code: String,
    pub college_id: CollegeId,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub description: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}
