//! Core backend trait.

use async_trait::async_trait;
use subgate_core::content::{NewsItem, Profile, Task, TaskId};
use subgate_core::types::{Requirement, UserId};
use thiserror::Error;

/// Backend-call errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// The backend answered with a non-success status.
    #[error("Backend returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Timeout after {0} seconds")]
    Timeout(u64),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Request failed: {0}")]
    Api(String),
}

impl ClientError {
    /// True when the request never got an HTTP answer.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            ClientError::ConnectionFailed(_) | ClientError::Timeout(_) | ClientError::Api(_)
        )
    }
}

/// Result type for backend operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Where the backend lives and how to reach it.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL the `/api/...` paths are appended to.
    pub base_url: String,
    /// Request timeout in seconds. `None` waits indefinitely.
    pub timeout_secs: Option<u64>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            timeout_secs: None,
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Set timeout.
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = Some(timeout_secs);
        self
    }

    /// Join a path onto the base URL.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}

/// The app backend as seen by the client.
///
/// `validate_subscription` is the access validator; the rest feed the
/// content views once access is granted.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Get the backend name.
    fn name(&self) -> &str;

    /// Ask which required channels the user has not joined yet.
    ///
    /// The order of the returned list is the backend's order.
    async fn validate_subscription(
        &self,
        user: UserId,
        handle: Option<&str>,
    ) -> ClientResult<Vec<Requirement>>;

    /// Tasks visible to the user, with their per-user status.
    async fn tasks(&self, user: UserId) -> ClientResult<Vec<Task>>;

    /// Mark a task completed.
    async fn complete_task(&self, user: UserId, task: TaskId) -> ClientResult<()>;

    async fn profile(&self, user: UserId) -> ClientResult<Profile>;

    async fn news(&self) -> ClientResult<Vec<NewsItem>>;

    /// Check if the backend is reachable.
    async fn health_check(&self) -> ClientResult<bool> {
        Ok(true)
    }
}

#[async_trait]
impl<B: Backend + ?Sized> Backend for std::sync::Arc<B> {
    fn name(&self) -> &str {
        (**self).name()
    }

    async fn validate_subscription(
        &self,
        user: UserId,
        handle: Option<&str>,
    ) -> ClientResult<Vec<Requirement>> {
        (**self).validate_subscription(user, handle).await
    }

    async fn tasks(&self, user: UserId) -> ClientResult<Vec<Task>> {
        (**self).tasks(user).await
    }

    async fn complete_task(&self, user: UserId, task: TaskId) -> ClientResult<()> {
        (**self).complete_task(user, task).await
    }

    async fn profile(&self, user: UserId) -> ClientResult<Profile> {
        (**self).profile(user).await
    }

    async fn news(&self) -> ClientResult<Vec<NewsItem>> {
        (**self).news().await
    }

    async fn health_check(&self) -> ClientResult<bool> {
        (**self).health_check().await
    }
}
