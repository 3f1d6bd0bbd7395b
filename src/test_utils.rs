//! In-memory backend used by the unit tests of the feature modules.

use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::sync::Notify;
use campusdesk_client::{AcademicApi, AdminApi, AlertApi, DepartmentApi, GroupApi, UserApi};
use campusdesk_core::{ApiError, ApiResult, PageRequest};
use campusdesk_models::{
    Alert, AlertFilterParams, AlertId, AlertType, ClassFilter, ClassId, ClassSection, Cohort,
    CohortFilter, CohortId, CollegeId, CreateAlertDto, Department, DepartmentId, Group, GroupId,
    GroupRole, Program, ProgramFilter, ProgramId, UpdateAlertDto, User, UserFilterParams, UserId,
    UserRole,
};

#[derive(Default)]
pub struct FakeBackend {
    pub departments: Vec<Department>,
    pub programs: Vec<Program>,
    pub cohorts: Vec<Cohort>,
    pub classes: Vec<ClassSection>,
    pub groups: Vec<Group>,
    pub users: Mutex<Vec<User>>,
    pub alerts: Mutex<Vec<Alert>>,
    pub members: Mutex<Vec<(GroupId, UserId, GroupRole)>>,
    pub created_alerts: Mutex<Vec<CreateAlertDto>>,
    pub calls: Mutex<Vec<String>>,
    pub failing: Mutex<HashSet<String>>,
    /// Call key that never completes once reached.
    pub stall_on: Mutex<Option<String>>,
    /// Notified when the stalled call has been entered.
    pub stalled: Notify,
}

impl FakeBackend {
    /// Makes the call recorded as `key` fail with `403 Forbidden`.
    pub fn fail_on(&self, key: impl Into<String>) {
        self.failing.lock().unwrap().insert(key.into());
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count_calls(&self, prefix: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.starts_with(prefix))
            .count()
    }

    /// Makes the call recorded as `key` hang until its future is dropped.
    pub fn stall_on(&self, key: impl Into<String>) {
        *self.stall_on.lock().unwrap() = Some(key.into());
    }

    async fn stall_if_requested(&self, key: &str) {
        let stall = self.stall_on.lock().unwrap().as_deref() == Some(key);
        if stall {
            self.stalled.notify_one();
            std::future::pending::<()>().await;
        }
    }

    fn record(&self, key: String) -> ApiResult<()> {
        self.calls.lock().unwrap().push(key.clone());
        if self.failing.lock().unwrap().contains(&key) {
            return Err(ApiError::Forbidden("403 Forbidden".into()));
        }
        Ok(())
    }
}

pub fn department(id: i64) -> Department {
    Department {
        id: DepartmentId::new(id),
        name: format!("Department {id}"),
        code: format!("D{id}"),
        college_id: CollegeId::new(1),
        description: None,
        is_active: true,
    }
}

pub fn program(id: i64, department_id: i64) -> Program {
    Program {
        id: ProgramId::new(id),
        name: format!("Program {id}"),
        code: format!("P{id}"),
        department_id: DepartmentId::new(department_id),
        duration_years: 4,
        description: None,
    }
}

pub fn cohort(id: i64, program_id: i64) -> Cohort {
    Cohort {
        id: CohortId::new(id),
        name: format!("Cohort {id}"),
        code: format!("C{id}"),
        program_id: ProgramId::new(program_id),
        admission_year: 2024,
        current_semester: 1,
    }
}

pub fn class(id: i64, cohort_id: i64, program_id: i64) -> ClassSection {
    ClassSection {
        id: ClassId::new(id),
        section_code: format!("S{id}"),
        section_name: None,
        cohort_id: CohortId::new(cohort_id),
        program_id: ProgramId::new(program_id),
        college_id: CollegeId::new(1),
        is_active: true,
    }
}

pub fn user(id: i64, role: UserRole, department_id: Option<i64>) -> User {
    User {
        id: UserId::new(id),
        username: format!("user{id}"),
        full_name: format!("User Number{id}"),
        email: format!("user{id}@college.edu"),
        role,
        department_id: department_id.map(DepartmentId::new),
        is_active: true,
    }
}

pub fn group(id: i64, member_count: u32) -> Group {
    Group {
        id: GroupId::new(id),
        name: format!("Group {id}"),
        description: None,
        college_id: CollegeId::new(1),
        member_count,
    }
}

pub fn alert(id: i64, is_read: bool) -> Alert {
    Alert {
        id: AlertId::new(id),
        title: format!("Alert {id}"),
        message: "Body".into(),
        alert_type: AlertType::Info,
        is_read,
        created_at: chrono::Utc::now(),
        group_id: None,
        user_id: None,
    }
}

#[async_trait]
impl DepartmentApi for FakeBackend {
    async fn get_department(&self, id: DepartmentId) -> ApiResult<Department> {
        self.record(format!("department:{id}"))?;
        self.departments
            .iter()
            .find(|d| d.id == id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound("Department not found".into()))
    }

    async fn list_departments(&self, page: PageRequest) -> ApiResult<Vec<Department>> {
        self.record("departments".into())?;
        Ok(self
            .departments
            .iter()
            .skip(page.skip as usize)
            .take(page.limit as usize)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl AcademicApi for FakeBackend {
    async fn list_programs(&self, filter: ProgramFilter) -> ApiResult<Vec<Program>> {
        let dept = filter.department_id.map(|d| d.to_string()).unwrap_or_default();
        self.record(format!("programs:{dept}"))?;
        Ok(self
            .programs
            .iter()
            .filter(|p| filter.department_id.is_none_or(|d| p.department_id == d))
            .cloned()
            .collect())
    }

    async fn list_cohorts(&self, filter: CohortFilter) -> ApiResult<Vec<Cohort>> {
        let program = filter.program_id.map(|p| p.to_string()).unwrap_or_default();
        let key = format!("cohorts:{program}");
        self.record(key.clone())?;
        self.stall_if_requested(&key).await;
        Ok(self
            .cohorts
            .iter()
            .filter(|c| filter.program_id.is_none_or(|p| c.program_id == p))
            .cloned()
            .collect())
    }

    async fn list_classes(&self, filter: ClassFilter) -> ApiResult<Vec<ClassSection>> {
        let cohort = filter.cohort_id.map(|c| c.to_string()).unwrap_or_default();
        let key = format!("classes:{cohort}");
        self.record(key.clone())?;
        self.stall_if_requested(&key).await;
        Ok(self
            .classes
            .iter()
            .filter(|c| filter.cohort_id.is_none_or(|id| c.cohort_id == id))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl UserApi for FakeBackend {
    async fn get_users(&self, filter: &UserFilterParams) -> ApiResult<Vec<User>> {
        let role = filter.role.as_ref().map(|r| r.to_string()).unwrap_or_default();
        let key = format!("users:{role}");
        self.record(key.clone())?;
        self.stall_if_requested(&key).await;
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .filter(|u| filter.department_id.is_none_or(|d| u.department_id == Some(d)))
            .filter(|u| filter.role.as_ref().is_none_or(|r| &u.role == r))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl AdminApi for FakeBackend {
    async fn delete_user(&self, id: UserId) -> ApiResult<()> {
        self.record(format!("delete_user:{id}"))?;
        self.users.lock().unwrap().retain(|u| u.id != id);
        Ok(())
    }
}

#[async_trait]
impl AlertApi for FakeBackend {
    async fn list_alerts(&self, filter: AlertFilterParams) -> ApiResult<Vec<Alert>> {
        self.record("alerts".into())?;
        Ok(self
            .alerts
            .lock()
            .unwrap()
            .iter()
            .filter(|a| filter.is_read.is_none_or(|r| a.is_read == r))
            .cloned()
            .collect())
    }

    async fn mark_all_read(&self) -> ApiResult<()> {
        self.record("mark_all_read".into())?;
        for alert in self.alerts.lock().unwrap().iter_mut() {
            alert.is_read = true;
        }
        Ok(())
    }

    async fn update_alert(&self, id: AlertId, dto: UpdateAlertDto) -> ApiResult<()> {
        self.record(format!("update_alert:{id}"))?;
        let mut alerts = self.alerts.lock().unwrap();
        let alert = alerts
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| ApiError::NotFound("Alert not found".into()))?;
        alert.is_read = dto.is_read;
        Ok(())
    }

    async fn create_alert(&self, dto: &CreateAlertDto) -> ApiResult<Alert> {
        let group = dto.group_id.map(|g| g.to_string()).unwrap_or_default();
        self.record(format!("create_alert:{group}"))?;
        let mut created = self.created_alerts.lock().unwrap();
        created.push(dto.clone());
        Ok(Alert {
            group_id: dto.group_id,
            user_id: dto.user_id,
            title: dto.title.clone(),
            message: dto.message.clone(),
            alert_type: dto.alert_type,
            ..alert(created.len() as i64, false)
        })
    }
}

#[async_trait]
impl GroupApi for FakeBackend {
    async fn list_groups(&self, _page: PageRequest) -> ApiResult<Vec<Group>> {
        self.record("groups".into())?;
        Ok(self.groups.clone())
    }

    async fn add_member(&self, group_id: GroupId, user_id: UserId, role: GroupRole) -> ApiResult<()> {
        self.record(format!("add_member:{group_id}:{user_id}"))?;
        self.members.lock().unwrap().push((group_id, user_id, role));
        Ok(())
    }
}
