//! HTTP client for the college administration backend.

use std::sync::Arc;

use async_trait::async_trait;
use campusdesk_config::{ClientConfig, FetchConfig};
use campusdesk_core::{ApiError, ApiResult, PageRequest, collect_pages};
use campusdesk_models::{
    AddGroupMemberDto, Alert, AlertFilterParams, AlertId, ClassFilter, ClassSection, Cohort,
    CohortFilter, CreateAlertDto, Department, DepartmentId, Group, GroupId, GroupRole,
    LoginRequest, Program, ProgramFilter, TokenResponse, UpdateAlertDto, User, UserFilterParams,
    UserId,
};
use reqwest::{Client, Method, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};
use validator::Validate;

use crate::api::{AcademicApi, AdminApi, AlertApi, AuthApi, DepartmentApi, GroupApi, UserApi};
use crate::session::Session;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Client for every backend endpoint the dashboard consumes.
///
/// Cloning is cheap: the connection pool and the session are shared.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    config: ClientConfig,
    fetch: FetchConfig,
    session: Arc<Session>,
}

impl HttpClient {
    /// Builds a client. A token in `config` seeds the session.
    pub fn new(config: ClientConfig, fetch: FetchConfig) -> ApiResult<Self> {
        let session = match &config.token {
            Some(token) => Session::with_token(token.clone()),
            None => Session::new(),
        };
        Self::with_session(config, fetch, Arc::new(session))
    }

    pub fn with_session(
        config: ClientConfig,
        fetch: FetchConfig,
        session: Arc<Session>,
    ) -> ApiResult<Self> {
        let client = Client::builder().timeout(config.timeout()).build()?;

        Ok(Self {
            client,
            config,
            fetch,
            session,
        })
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    pub fn fetch_config(&self) -> &FetchConfig {
        &self.fetch
    }

    async fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let mut request = self
            .client
            .request(method, self.config.url(path))
            .header(REQUEST_ID_HEADER, uuid::Uuid::new_v4().to_string());

        if let Some(token) = self.session.token().await {
            request = request.bearer_auth(token);
        }

        request
    }

    /// Sends the request and maps non-success statuses to [`ApiError`].
    ///
    /// A `401` tears the session down before the error is returned.
    async fn execute(&self, request: RequestBuilder) -> ApiResult<reqwest::Response> {
        let response = request.send().await?;
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let error = ApiError::from_status(status.as_u16(), &body);

        if error.is_unauthorized() {
            warn!("Backend rejected the session token");
            self.session.teardown().await;
        } else {
            debug!(status = status.as_u16(), error = %error, "Request failed");
        }

        Err(error)
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> ApiResult<T> {
        let response = self.execute(request).await?;
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn send_empty(&self, request: RequestBuilder) -> ApiResult<()> {
        self.execute(request).await.map(|_| ())
    }

    async fn get_page<T, Q>(&self, path: &str, filter: &Q, page: PageRequest) -> ApiResult<Vec<T>>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let request = self
            .request(Method::GET, path)
            .await
            .query(filter)
            .query(&page);
        self.send_json(request).await
    }

    /// Fetches a whole list according to the configured page size and mode.
    async fn get_all<T, Q>(&self, path: &str, filter: &Q) -> ApiResult<Vec<T>>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        collect_pages(self.fetch.page_size, self.fetch.exhaustive, move |page| {
            self.get_page(path, filter, page)
        })
        .await
    }
}

#[async_trait]
impl DepartmentApi for HttpClient {
    #[instrument(skip(self))]
    async fn get_department(&self, id: DepartmentId) -> ApiResult<Department> {
        let request = self
            .request(Method::GET, &format!("/api/v1/departments/{id}"))
            .await;
        self.send_json(request).await
    }

    #[instrument(skip(self))]
    async fn list_departments(&self, page: PageRequest) -> ApiResult<Vec<Department>> {
        let request = self
            .request(Method::GET, "/api/v1/departments")
            .await
            .query(&page);
        self.send_json(request).await
    }
}

#[async_trait]
impl AcademicApi for HttpClient {
    #[instrument(skip(self))]
    async fn list_programs(&self, filter: ProgramFilter) -> ApiResult<Vec<Program>> {
        self.get_all("/api/v1/academic/programs", &filter).await
    }

    #[instrument(skip(self))]
    async fn list_cohorts(&self, filter: CohortFilter) -> ApiResult<Vec<Cohort>> {
        self.get_all("/api/v1/academic/cohorts", &filter).await
    }

    #[instrument(skip(self))]
    async fn list_classes(&self, filter: ClassFilter) -> ApiResult<Vec<ClassSection>> {
        self.get_all("/api/v1/academic/classes", &filter).await
    }
}

#[async_trait]
impl UserApi for HttpClient {
    #[instrument(skip(self))]
    async fn get_users(&self, filter: &UserFilterParams) -> ApiResult<Vec<User>> {
        self.get_all("/api/v1/users", filter).await
    }
}

#[async_trait]
impl AdminApi for HttpClient {
    #[instrument(skip(self))]
    async fn delete_user(&self, id: UserId) -> ApiResult<()> {
        let request = self
            .request(Method::DELETE, &format!("/api/v1/admin/users/{id}"))
            .await;
        self.send_empty(request).await
    }
}

#[async_trait]
impl AlertApi for HttpClient {
    #[instrument(skip(self))]
    async fn list_alerts(&self, filter: AlertFilterParams) -> ApiResult<Vec<Alert>> {
        self.get_all("/api/v1/alerts", &filter).await
    }

    #[instrument(skip(self))]
    async fn mark_all_read(&self) -> ApiResult<()> {
        let request = self
            .request(Method::POST, "/api/v1/alerts/mark-all-read")
            .await;
        self.send_empty(request).await
    }

    #[instrument(skip(self))]
    async fn update_alert(&self, id: AlertId, dto: UpdateAlertDto) -> ApiResult<()> {
        let request = self
            .request(Method::PUT, &format!("/api/v1/alerts/{id}"))
            .await
            .json(&dto);
        self.send_empty(request).await
    }

    #[instrument(skip(self, dto), fields(title = %dto.title))]
    async fn create_alert(&self, dto: &CreateAlertDto) -> ApiResult<Alert> {
        dto.validate()?;
        let request = self
            .request(Method::POST, "/api/v1/alerts")
            .await
            .json(dto);
        self.send_json(request).await
    }
}

#[async_trait]
impl GroupApi for HttpClient {
    #[instrument(skip(self))]
    async fn list_groups(&self, page: PageRequest) -> ApiResult<Vec<Group>> {
        let request = self
            .request(Method::GET, "/api/v1/groups")
            .await
            .query(&page);
        self.send_json(request).await
    }

    #[instrument(skip(self))]
    async fn add_member(&self, group_id: GroupId, user_id: UserId, role: GroupRole) -> ApiResult<()> {
        let request = self
            .request(Method::POST, &format!("/api/v1/groups/{group_id}/members"))
            .await
            .json(&AddGroupMemberDto { user_id, role });
        self.send_empty(request).await
    }
}

#[async_trait]
impl AuthApi for HttpClient {
    #[instrument(skip(self, password))]
    async fn login(&self, username: &str, password: &str) -> ApiResult<User> {
        let body = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        body.validate()?;

        let request = self
            .request(Method::POST, "/api/v1/auth/login")
            .await
            .json(&body);
        let token: TokenResponse = self.send_json(request).await?;

        self.session.establish(token.access_token, None).await;
        let user = self.me().await?;
        self.session.set_user(user.clone()).await;

        Ok(user)
    }

    #[instrument(skip(self))]
    async fn me(&self) -> ApiResult<User> {
        let request = self.request(Method::GET, "/api/v1/auth/me").await;
        self.send_json(request).await
    }

    async fn logout(&self) {
        self.session.teardown().await;
    }
}
