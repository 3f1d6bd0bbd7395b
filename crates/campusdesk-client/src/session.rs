//! Explicit authenticated session.
//!
//! A [`Session`] is created once and shared by `Arc` with every client that
//! needs the bearer token. It is initialised on successful login and torn
//! down on logout or when the backend answers `401 Unauthorized`.

use campusdesk_models::User;
use tokio::sync::RwLock;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionData {
    pub token: String,
    /// Known once `/auth/me` has been fetched.
    pub user: Option<User>,
}

#[derive(Debug, Default)]
pub struct Session {
    inner: RwLock<Option<SessionData>>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// A session seeded with a pre-issued token and no user yet.
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            inner: RwLock::new(Some(SessionData {
                token: token.into(),
                user: None,
            })),
        }
    }

    pub async fn establish(&self, token: String, user: Option<User>) {
        if let Some(user) = &user {
            info!(user_id = %user.id, role = %user.role, "Session established");
        }
        *self.inner.write().await = Some(SessionData { token, user });
    }

    /// Records the current user on an existing session.
    pub async fn set_user(&self, user: User) {
        if let Some(data) = self.inner.write().await.as_mut() {
            data.user = Some(user);
        }
    }

    pub async fn teardown(&self) {
        if self.inner.write().await.take().is_some() {
            info!("Session cleared");
        }
    }

    pub async fn token(&self) -> Option<String> {
        self.inner.read().await.as_ref().map(|d| d.token.clone())
    }

    pub async fn current_user(&self) -> Option<User> {
        self.inner.read().await.as_ref().and_then(|d| d.user.clone())
    }

    pub async fn is_authenticated(&self) -> bool {
        self.inner.read().await.is_some()
    }

    pub async fn can_manage_users(&self) -> bool {
        self.current_user()
            .await
            .is_some_and(|user| user.role.can_manage_users())
    }
}
