//! Group models and DTOs.

use campusdesk_core::serde::deserialize_optional_string;
use serde::{Deserialize, Serialize};

use crate::ids::{CollegeId, GroupId, UserId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub id: GroupId,
    pub name: String,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub description: Option<String>,
    pub college_id: CollegeId,
    #[serde(default)]
    pub member_count: u32,
}

/// Role a member holds inside a group.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupRole {
    #[default]
    Member,
    Admin,
}

impl std::str::FromStr for GroupRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "member" => Ok(GroupRole::Member),
            "admin" => Ok(GroupRole::Admin),
            other => Err(format!("unknown group role: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddGroupMemberDto {
    pub user_id: UserId,
    pub role: GroupRole,
}
