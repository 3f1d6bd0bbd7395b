//! Collaborator contracts of the college administration backend.
//!
//! Each trait groups the endpoints of one backend router. [`crate::HttpClient`]
//! implements all of them over HTTP; services in the application depend on
//! the traits so they can run against in-memory fakes in tests.
//!
//! List methods return the complete result set. Paging is handled by the
//! implementation according to its `FetchConfig`.

use async_trait::async_trait;
use campusdesk_core::{ApiResult, PageRequest};
use campusdesk_models::{
    Alert, AlertFilterParams, AlertId, ClassFilter, ClassSection, Cohort,
    CohortFilter, CreateAlertDto, Department, DepartmentId, Group, GroupId, GroupRole, Program,
    ProgramFilter, UpdateAlertDto, User, UserFilterParams, UserId,
};

#[async_trait]
pub trait DepartmentApi: Send + Sync {
    /// Fails with `ApiError::NotFound` when the department does not exist.
    async fn get_department(&self, id: DepartmentId) -> ApiResult<Department>;

    /// One page of the department list screen.
    async fn list_departments(&self, page: PageRequest) -> ApiResult<Vec<Department>>;
}

#[async_trait]
pub trait AcademicApi: Send + Sync {
    async fn list_programs(&self, filter: ProgramFilter) -> ApiResult<Vec<Program>>;

    async fn list_cohorts(&self, filter: CohortFilter) -> ApiResult<Vec<Cohort>>;

    async fn list_classes(&self, filter: ClassFilter) -> ApiResult<Vec<ClassSection>>;
}

#[async_trait]
pub trait UserApi: Send + Sync {
    async fn get_users(&self, filter: &UserFilterParams) -> ApiResult<Vec<User>>;
}

#[async_trait]
pub trait AdminApi: Send + Sync {
    async fn delete_user(&self, id: UserId) -> ApiResult<()>;
}

#[async_trait]
pub trait AlertApi: Send + Sync {
    async fn list_alerts(&self, filter: AlertFilterParams) -> ApiResult<Vec<Alert>>;

    async fn mark_all_read(&self) -> ApiResult<()>;

    async fn update_alert(&self, id: AlertId, dto: UpdateAlertDto) -> ApiResult<()>;

    async fn create_alert(&self, dto: &CreateAlertDto) -> ApiResult<Alert>;
}

#[async_trait]
pub trait GroupApi: Send + Sync {
    async fn list_groups(&self, page: PageRequest) -> ApiResult<Vec<Group>>;

    async fn add_member(&self, group_id: GroupId, user_id: UserId, role: GroupRole) -> ApiResult<()>;
}

#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Exchanges credentials for a token and initialises the session.
    async fn login(&self, username: &str, password: &str) -> ApiResult<User>;

    async fn me(&self) -> ApiResult<User>;

    /// Tears the session down locally.
    async fn logout(&self);
}
