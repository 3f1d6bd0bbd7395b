//! A mock college backend served by axum on an ephemeral port.
//!
//! Routes mirror the real `/api/v1` surface closely enough for the client:
//! bare JSON arrays for lists, `skip`/`limit` paging and `{"detail": ...}`
//! error bodies. Every request is recorded so tests can assert call order.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::extract::{Path, Query, Request, State};
use axum::http::{HeaderMap, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use campusdesk_client::HttpClient;
use campusdesk_config::{ClientConfig, FetchConfig};
use campusdesk_models::{
    AddGroupMemberDto, Alert, AlertId, AlertType, ClassId, ClassSection, Cohort, CohortId,
    CollegeId, CreateAlertDto, Department, DepartmentId, Group, GroupId, Program,
    ProgramId, UpdateAlertDto, User, UserId, UserRole,
};
use fake::Fake;
use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::{FirstName, LastName};
use serde::Deserialize;
use serde_json::json;

pub const TEST_TOKEN: &str = "test-token";
pub const ADMIN_PASSWORD: &str = "correct horse";

#[derive(Default, Clone)]
pub struct Fixture {
    pub departments: Vec<Department>,
    pub programs: Vec<Program>,
    pub cohorts: Vec<Cohort>,
    pub classes: Vec<ClassSection>,
    pub users: Vec<User>,
    pub alerts: Vec<Alert>,
    pub groups: Vec<Group>,
    /// The account `/auth/me` answers with.
    pub me: Option<User>,
}

#[derive(Default)]
pub struct MockState {
    pub data: Mutex<Fixture>,
    pub requests: Mutex<Vec<String>>,
    pub members: Mutex<Vec<(GroupId, AddGroupMemberDto)>>,
    pub created_alerts: Mutex<Vec<CreateAlertDto>>,
    failures: Mutex<HashMap<String, (StatusCode, serde_json::Value)>>,
}

impl MockState {
    /// Makes `METHOD /path` answer with `status` and `{"detail": detail}`.
    pub fn fail(&self, route: &str, status: StatusCode, detail: impl Into<serde_json::Value>) {
        self.failures
            .lock()
            .unwrap()
            .insert(route.to_string(), (status, detail.into()));
    }

    /// Recorded requests as `METHOD /path?query`.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    /// Recorded request paths without their query strings.
    pub fn paths(&self) -> Vec<String> {
        self.requests()
            .into_iter()
            .map(|r| r.split('?').next().unwrap_or_default().to_string())
            .collect()
    }

    pub fn count(&self, prefix: &str) -> usize {
        self.requests().iter().filter(|r| r.starts_with(prefix)).count()
    }
}

pub struct TestBackend {
    pub base_url: String,
    pub state: Arc<MockState>,
}

impl TestBackend {
    /// A client already holding the test token.
    pub fn client(&self) -> HttpClient {
        self.client_with(FetchConfig::default())
    }

    pub fn client_with(&self, fetch: FetchConfig) -> HttpClient {
        let config = ClientConfig::new(&self.base_url).with_token(TEST_TOKEN);
        HttpClient::new(config, fetch).unwrap()
    }

    /// A client with no session.
    pub fn anonymous_client(&self) -> HttpClient {
        HttpClient::new(ClientConfig::new(&self.base_url), FetchConfig::default()).unwrap()
    }
}

pub async fn spawn_backend(fixture: Fixture) -> TestBackend {
    let state = Arc::new(MockState {
        data: Mutex::new(fixture),
        ..Default::default()
    });

    let protected = Router::new()
        .route("/departments", get(list_departments))
        .route("/departments/{id}", get(get_department))
        .route("/academic/programs", get(list_programs))
        .route("/academic/cohorts", get(list_cohorts))
        .route("/academic/classes", get(list_classes))
        .route("/users", get(list_users))
        .route("/admin/users/{id}", delete(delete_user))
        .route("/alerts", get(list_alerts).post(create_alert))
        .route("/alerts/mark-all-read", post(mark_all_read))
        .route("/alerts/{id}", put(update_alert))
        .route("/groups", get(list_groups))
        .route("/groups/{id}/members", post(add_member))
        .route("/auth/me", get(me))
        .layer(middleware::from_fn(require_token));

    let app = Router::new()
        .nest(
            "/api/v1",
            protected.route("/auth/login", post(login)),
        )
        .layer(middleware::from_fn_with_state(state.clone(), record_and_inject))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    TestBackend {
        base_url: format!("http://{addr}"),
        state,
    }
}

fn detail(status: StatusCode, detail: impl Into<serde_json::Value>) -> Response {
    (status, Json(json!({ "detail": detail.into() }))).into_response()
}

async fn record_and_inject(State(state): State<Arc<MockState>>, req: Request, next: Next) -> Response {
    let path = req.uri().path().to_string();
    let entry = match req.uri().query() {
        Some(query) => format!("{} {path}?{query}", req.method()),
        None => format!("{} {path}", req.method()),
    };
    state.requests.lock().unwrap().push(entry);

    let route = format!("{} {path}", req.method());
    let injected = state.failures.lock().unwrap().get(&route).cloned();
    if let Some((status, message)) = injected {
        return detail(status, message);
    }

    next.run(req).await
}

async fn require_token(headers: HeaderMap, req: Request, next: Next) -> Response {
    let authorized = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == format!("Bearer {TEST_TOKEN}"));

    if !authorized {
        return detail(StatusCode::UNAUTHORIZED, "Could not validate credentials");
    }
    next.run(req).await
}

#[derive(Debug, Default, Deserialize)]
struct ListQuery {
    skip: Option<usize>,
    limit: Option<usize>,
    department_id: Option<i64>,
    program_id: Option<i64>,
    cohort_id: Option<i64>,
    role: Option<String>,
    is_read: Option<bool>,
}

impl ListQuery {
    fn page<T: Clone>(&self, items: impl Iterator<Item = T>) -> Vec<T> {
        items
            .skip(self.skip.unwrap_or(0))
            .take(self.limit.unwrap_or(100))
            .collect()
    }
}

type Shared = State<Arc<MockState>>;

async fn list_departments(State(state): Shared, Query(q): Query<ListQuery>) -> Json<Vec<Department>> {
    let data = state.data.lock().unwrap();
    Json(q.page(data.departments.iter().cloned()))
}

async fn get_department(State(state): Shared, Path(id): Path<i64>) -> Response {
    let data = state.data.lock().unwrap();
    match data.departments.iter().find(|d| d.id.get() == id) {
        Some(department) => Json(department.clone()).into_response(),
        None => detail(StatusCode::NOT_FOUND, "Department not found"),
    }
}

async fn list_programs(State(state): Shared, Query(q): Query<ListQuery>) -> Json<Vec<Program>> {
    let data = state.data.lock().unwrap();
    Json(q.page(
        data.programs
            .iter()
            .filter(|p| q.department_id.is_none_or(|d| p.department_id.get() == d))
            .cloned(),
    ))
}

async fn list_cohorts(State(state): Shared, Query(q): Query<ListQuery>) -> Json<Vec<Cohort>> {
    let data = state.data.lock().unwrap();
    Json(q.page(
        data.cohorts
            .iter()
            .filter(|c| q.program_id.is_none_or(|p| c.program_id.get() == p))
            .cloned(),
    ))
}

async fn list_classes(State(state): Shared, Query(q): Query<ListQuery>) -> Json<Vec<ClassSection>> {
    let data = state.data.lock().unwrap();
    Json(q.page(
        data.classes
            .iter()
            .filter(|c| q.cohort_id.is_none_or(|id| c.cohort_id.get() == id))
            .cloned(),
    ))
}

async fn list_users(State(state): Shared, Query(q): Query<ListQuery>) -> Json<Vec<User>> {
    let data = state.data.lock().unwrap();
    Json(q.page(
        data.users
            .iter()
            .filter(|u| q.department_id.is_none_or(|d| u.department_id.is_some_and(|id| id.get() == d)))
            .filter(|u| q.role.as_deref().is_none_or(|r| u.role.as_str() == r))
            .cloned(),
    ))
}

async fn delete_user(State(state): Shared, Path(id): Path<i64>) -> Response {
    let mut data = state.data.lock().unwrap();
    let before = data.users.len();
    data.users.retain(|u| u.id.get() != id);
    if data.users.len() == before {
        return detail(StatusCode::NOT_FOUND, "User not found");
    }
    StatusCode::NO_CONTENT.into_response()
}

async fn list_alerts(State(state): Shared, Query(q): Query<ListQuery>) -> Json<Vec<Alert>> {
    let data = state.data.lock().unwrap();
    Json(q.page(
        data.alerts
            .iter()
            .filter(|a| q.is_read.is_none_or(|r| a.is_read == r))
            .cloned(),
    ))
}

async fn create_alert(State(state): Shared, Json(dto): Json<CreateAlertDto>) -> Response {
    let mut created = state.created_alerts.lock().unwrap();
    created.push(dto.clone());
    let alert = Alert {
        title: dto.title,
        message: dto.message,
        alert_type: dto.alert_type,
        group_id: dto.group_id,
        user_id: dto.user_id,
        ..alert(1000 + created.len() as i64, false)
    };
    (StatusCode::CREATED, Json(alert)).into_response()
}

async fn mark_all_read(State(state): Shared) -> Json<serde_json::Value> {
    let mut data = state.data.lock().unwrap();
    for alert in &mut data.alerts {
        alert.is_read = true;
    }
    Json(json!({ "message": "All alerts marked as read" }))
}

async fn update_alert(
    State(state): Shared,
    Path(id): Path<i64>,
    Json(dto): Json<UpdateAlertDto>,
) -> Response {
    let mut data = state.data.lock().unwrap();
    match data.alerts.iter_mut().find(|a| a.id.get() == id) {
        Some(alert) => {
            alert.is_read = dto.is_read;
            Json(alert.clone()).into_response()
        }
        None => detail(StatusCode::NOT_FOUND, "Alert not found"),
    }
}

async fn list_groups(State(state): Shared, Query(q): Query<ListQuery>) -> Json<Vec<Group>> {
    let data = state.data.lock().unwrap();
    Json(q.page(data.groups.iter().cloned()))
}

async fn add_member(
    State(state): Shared,
    Path(id): Path<i64>,
    Json(dto): Json<AddGroupMemberDto>,
) -> Response {
    state.members.lock().unwrap().push((GroupId::new(id), dto));
    (StatusCode::CREATED, Json(json!({ "message": "Member added" }))).into_response()
}

#[derive(Deserialize)]
struct LoginBody {
    username: String,
    password: String,
}

async fn login(State(state): Shared, Json(body): Json<LoginBody>) -> Response {
    let data = state.data.lock().unwrap();
    let known = data.me.as_ref().is_some_and(|u| u.username == body.username);
    if !known || body.password != ADMIN_PASSWORD {
        return detail(StatusCode::UNAUTHORIZED, "Incorrect username or password");
    }
    Json(json!({ "access_token": TEST_TOKEN, "token_type": "bearer" })).into_response()
}

async fn me(State(state): Shared) -> Response {
    match state.data.lock().unwrap().me.clone() {
        Some(user) => Json(user).into_response(),
        None => detail(StatusCode::NOT_FOUND, "User not found"),
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

/// A user with generated name and email.
pub fn fake_user(id: i64, role: UserRole, department_id: Option<i64>) -> User {
    let first: String = FirstName().fake();
    let last: String = LastName().fake();
    User {
        id: UserId::new(id),
        username: format!("{}{id}", first.to_lowercase()),
        full_name: format!("{first} {last}"),
        email: SafeEmail().fake(),
        role,
        department_id: department_id.map(DepartmentId::new),
        is_active: true,
    }
}

pub fn admin() -> User {
    User {
        username: "registrar".into(),
        ..fake_user(1, UserRole::CollegeAdmin, None)
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

pub fn group(id: i64) -> Group {
    Group {
        id: GroupId::new(id),
        name: format!("Group {id}"),
        description: None,
        college_id: CollegeId::new(1),
        member_count: 0,
    }
}
