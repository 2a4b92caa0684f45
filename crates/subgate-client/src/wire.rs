//! Request and response bodies of the backend's JSON API.

use serde::{Deserialize, Serialize};
use subgate_core::content::{NewsItem, Task};
use subgate_core::types::Requirement;

pub const VALIDATE_PATH: &str = "/api/validate-subscription";
pub const TASKS_PATH: &str = "/api/tasks";
pub const COMPLETE_TASK_PATH: &str = "/api/tasks/complete";
pub const PROFILE_PATH: &str = "/api/profile";
pub const NEWS_PATH: &str = "/api/news";
pub const HEALTH_PATH: &str = "/health";

/// `POST /api/validate-subscription` body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidateRequest {
    pub telegram_id: i64,
    pub username: Option<String>,
}

/// `POST /api/validate-subscription` response. A null or missing list is empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidateResponse {
    #[serde(default)]
    pub missing: Option<Vec<Requirement>>,
}

impl ValidateResponse {
    pub fn into_missing(self) -> Vec<Requirement> {
        self.missing.unwrap_or_default()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TasksResponse {
    pub tasks: Vec<Task>,
}

/// `POST /api/tasks/complete` body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompleteTaskRequest {
    pub telegram_id: i64,
    pub task_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsResponse {
    pub news: Vec<NewsItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}
