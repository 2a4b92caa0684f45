//! Content shown behind the gate: tasks, the user profile, and news.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::non_empty;

/// Status label shown for tasks the user has not touched yet.
pub const DEFAULT_TASK_STATUS: &str = "pending";

/// Label for news buttons that come without text.
pub const DEFAULT_BUTTON_TEXT: &str = "Open";

/// Identifier of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(pub i64);

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A task the user can complete for a token reward.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    #[serde(default, deserialize_with = "non_empty")]
    pub description: Option<String>,
    pub task_type: String,
    pub rarity: String,
    pub reward_tokens: i64,
    #[serde(default, deserialize_with = "non_empty")]
    pub status: Option<String>,
}

impl Task {
    pub fn new(id: i64, title: impl Into<String>) -> Self {
        Self {
            id: TaskId(id),
            title: title.into(),
            description: None,
            task_type: "registration".to_string(),
            rarity: "Normal".to_string(),
            reward_tokens: 0,
            status: None,
        }
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn with_reward(mut self, reward_tokens: i64) -> Self {
        self.reward_tokens = reward_tokens;
        self
    }

    pub fn status_label(&self) -> &str {
        self.status.as_deref().unwrap_or(DEFAULT_TASK_STATUS)
    }

    pub fn is_completed(&self) -> bool {
        self.status.as_deref() == Some("completed")
    }
}

/// The current user's profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub telegram_id: i64,
    #[serde(default, deserialize_with = "non_empty")]
    pub username: Option<String>,
    pub referral_link: String,
    pub tokens: i64,
    pub token_rate: String,
    pub support_link: String,
}

/// A news entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsItem {
    pub title: String,
    #[serde(default, deserialize_with = "non_empty")]
    pub content: Option<String>,
    #[serde(default, deserialize_with = "non_empty")]
    pub media_url: Option<String>,
    #[serde(default, deserialize_with = "non_empty")]
    pub media_type: Option<String>,
    #[serde(default, deserialize_with = "non_empty")]
    pub button_url: Option<String>,
    #[serde(default, deserialize_with = "non_empty")]
    pub button_text: Option<String>,
}

impl NewsItem {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: None,
            media_url: None,
            media_type: None,
            button_url: None,
            button_text: None,
        }
    }
}
