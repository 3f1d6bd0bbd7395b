//! Academic structure models: programs, cohorts and class sections.
//!
//! The hierarchy is Department → Program → Cohort → Class. Each level is
//! listed through its own endpoint, filtered by the parent's ID.

use campusdesk_core::serde::deserialize_optional_string;
use serde::{Deserialize, Serialize};

use crate::ids::{ClassId, CohortId, CollegeId, DepartmentId, ProgramId};

/// An academic program offered by a department.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Program {
    pub id: ProgramId,
    pub name: String,
    pub code: String,
    pub department_id: DepartmentId,
    pub duration_years: u32,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub description: Option<String>,
}

/// A yearly intake of a program.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cohort {
    pub id: CohortId,
    pub name: String,
    pub code: String,
    pub program_id: ProgramId,
    pub admission_year: i32,
    pub current_semester: u32,
}

/// A class section of a cohort. Leaf of the academic hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassSection {
    pub id: ClassId,
    pub section_code: String,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub section_name: Option<String>,
    pub cohort_id: CohortId,
    pub program_id: ProgramId,
    pub college_id: CollegeId,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl ClassSection {
    /// Name shown in tables: the section name, or the code when unnamed.
    pub fn display_name(&self) -> &str {
        self.section_name.as_deref().unwrap_or(&self.section_code)
    }
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ProgramFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department_id: Option<DepartmentId>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CohortFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub program_id: Option<ProgramId>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ClassFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cohort_id: Option<CohortId>,
}

impl ProgramFilter {
    pub fn department(id: DepartmentId) -> Self {
        Self {
            department_id: Some(id),
        }
    }
}

impl CohortFilter {
    pub fn program(id: ProgramId) -> Self {
        Self {
            program_id: Some(id),
        }
    }
}

impl ClassFilter {
    pub fn cohort(id: CohortId) -> Self {
        Self {
            cohort_id: Some(id),
        }
    }
}
