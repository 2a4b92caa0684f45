//! HTTP backend over reqwest.
//!
//! Requires the `http` feature.

use crate::backend::{Backend, ClientConfig, ClientError, ClientResult};
use crate::wire::{
    CompleteTaskRequest, HealthResponse, NewsResponse, TasksResponse, ValidateRequest,
    ValidateResponse, COMPLETE_TASK_PATH, HEALTH_PATH, NEWS_PATH, PROFILE_PATH, TASKS_PATH,
    VALIDATE_PATH,
};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use subgate_core::content::{NewsItem, Profile, Task, TaskId};
use subgate_core::types::{Requirement, UserId};
use tracing::{debug, warn};

/// Backend reached over HTTP.
///
/// # Example
///
/// ```rust,ignore
/// use subgate_client::{Backend, ClientConfig, HttpBackend};
///
/// let backend = HttpBackend::new(ClientConfig::new("http://localhost:8000"))?;
/// let news = backend.news().await?;
/// ```
pub struct HttpBackend {
    config: ClientConfig,
    client: reqwest::Client,
}

impl HttpBackend {
    /// Create a new HTTP backend.
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(std::time::Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| ClientError::Api(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    /// Point at a base URL with default settings.
    pub fn with_base_url(base_url: &str) -> ClientResult<Self> {
        Self::new(ClientConfig::new(base_url))
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn transport_error(&self, e: reqwest::Error) -> ClientError {
        if e.is_connect() {
            ClientError::ConnectionFailed(format!("Cannot connect to {}", self.config.base_url))
        } else if e.is_timeout() {
            ClientError::Timeout(self.config.timeout_secs.unwrap_or_default())
        } else {
            ClientError::Api(e.to_string())
        }
    }

    /// Send a request and decode a JSON body from a success response.
    async fn send<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> ClientResult<T> {
        let response = request.send().await.map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "backend returned an error status");
            return Err(ClientError::Status {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ClientError::InvalidResponse(e.to_string()))
    }

    async fn get<T: DeserializeOwned>(&self, path: &str, user: Option<UserId>) -> ClientResult<T> {
        let url = self.config.url(path);
        debug!(%url, "GET");
        let mut request = self.client.get(&url);
        if let Some(user) = user {
            request = request.query(&[("telegram_id", user.as_i64())]);
        }
        self.send(request).await
    }

    async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let url = self.config.url(path);
        debug!(%url, "POST");
        self.send(self.client.post(&url).json(body)).await
    }
}

#[async_trait]
impl Backend for HttpBackend {
    fn name(&self) -> &str {
        "http"
    }

    async fn validate_subscription(
        &self,
        user: UserId,
        handle: Option<&str>,
    ) -> ClientResult<Vec<Requirement>> {
        let body = ValidateRequest {
            telegram_id: user.as_i64(),
            username: handle.map(str::to_string),
        };
        let resp: ValidateResponse = self.post(VALIDATE_PATH, &body).await?;
        Ok(resp.into_missing())
    }

    async fn tasks(&self, user: UserId) -> ClientResult<Vec<Task>> {
        let resp: TasksResponse = self.get(TASKS_PATH, Some(user)).await?;
        Ok(resp.tasks)
    }

    async fn complete_task(&self, user: UserId, task: TaskId) -> ClientResult<()> {
        let body = CompleteTaskRequest {
            telegram_id: user.as_i64(),
            task_id: task.0,
        };
        // The body is `{"status": "ok"}`; only the status code matters.
        let _: serde_json::Value = self.post(COMPLETE_TASK_PATH, &body).await?;
        Ok(())
    }

    async fn profile(&self, user: UserId) -> ClientResult<Profile> {
        self.get(PROFILE_PATH, Some(user)).await
    }

    async fn news(&self) -> ClientResult<Vec<NewsItem>> {
        let resp: NewsResponse = self.get(NEWS_PATH, None).await?;
        Ok(resp.news)
    }

    async fn health_check(&self) -> ClientResult<bool> {
        match self.get::<HealthResponse>(HEALTH_PATH, None).await {
            Ok(resp) => Ok(resp.status == "ok"),
            Err(ClientError::ConnectionFailed(_)) => Ok(false),
            Err(ClientError::Status { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_backend_config() {
        let config = ClientConfig::new("http://localhost:9").with_timeout(3);
        let backend = HttpBackend::new(config).unwrap();
        assert_eq!(backend.config().timeout_secs, Some(3));
        assert_eq!(backend.name(), "http");
    }
}
