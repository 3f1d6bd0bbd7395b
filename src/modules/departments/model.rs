use campusdesk_models::{ClassSection, Cohort, CohortId, Department, Program, ProgramId, User};
use serde::Serialize;

/// Everything transitively owned by one department, flattened for the tabbed
/// detail view.
///
/// `cohorts` are in program iteration order and `classes` in cohort iteration
/// order, exactly as the backend returned each level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DepartmentHierarchy {
    pub department: Department,
    pub programs: Vec<Program>,
    pub cohorts: Vec<Cohort>,
    pub classes: Vec<ClassSection>,
    pub students: Vec<User>,
    pub staff: Vec<User>,
}

/// Badge counts shown on the detail view's tabs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TabCounts {
    pub programs: usize,
    pub cohorts: usize,
    pub classes: usize,
    pub students: usize,
    pub staff: usize,
}

impl DepartmentHierarchy {
    pub fn tab_counts(&self) -> TabCounts {
        TabCounts {
            programs: self.programs.len(),
            cohorts: self.cohorts.len(),
            classes: self.classes.len(),
            students: self.students.len(),
            staff: self.staff.len(),
        }
    }

    pub fn cohorts_for_program(&self, program_id: ProgramId) -> impl Iterator<Item = &Cohort> {
        self.cohorts.iter().filter(move |c| c.program_id == program_id)
    }

    pub fn classes_for_cohort(&self, cohort_id: CohortId) -> impl Iterator<Item = &ClassSection> {
        self.classes.iter().filter(move |c| c.cohort_id == cohort_id)
    }
}

/// State of the department detail screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DetailState {
    #[default]
    Idle,
    Loading,
    NotFound,
    /// Blocking "failed to load" state; the message is shown with a retry action.
    Failed(String),
    Loaded(Box<DepartmentHierarchy>),
}

impl DetailState {
    pub fn hierarchy(&self) -> Option<&DepartmentHierarchy> {
        match self {
            DetailState::Loaded(hierarchy) => Some(hierarchy),
            _ => None,
        }
    }
}
