//! A mock backend for testing.

use crate::backend::{Backend, ClientError, ClientResult};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use subgate_core::content::{NewsItem, Profile, Task, TaskId};
use subgate_core::types::{Requirement, UserId};

/// How many times each endpoint was called.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CallCounts {
    pub validate: usize,
    pub tasks: usize,
    pub complete: usize,
    pub profile: usize,
    pub news: usize,
}

#[derive(Default)]
struct Counters {
    validate: AtomicUsize,
    tasks: AtomicUsize,
    complete: AtomicUsize,
    profile: AtomicUsize,
    news: AtomicUsize,
}

/// In-memory backend with canned responses and call counters.
///
/// Completing a task flips its status to `completed`, so a re-fetch sees it.
pub struct MockBackend {
    missing: Vec<Requirement>,
    validation_error: Option<ClientError>,
    validation_failures: Option<usize>,
    tasks: Mutex<Vec<Task>>,
    tasks_error: Option<ClientError>,
    complete_error: Option<ClientError>,
    profile: Option<Profile>,
    news: Vec<NewsItem>,
    news_error: Option<ClientError>,
    calls: Counters,
}

impl MockBackend {
    /// Create a new mock backend that grants access and serves no content.
    pub fn new() -> Self {
        Self {
            missing: Vec::new(),
            validation_error: None,
            validation_failures: None,
            tasks: Mutex::new(Vec::new()),
            tasks_error: None,
            complete_error: None,
            profile: None,
            news: Vec::new(),
            news_error: None,
            calls: Counters::default(),
        }
    }

    /// Channels reported as not joined.
    pub fn with_missing(mut self, missing: Vec<Requirement>) -> Self {
        self.missing = missing;
        self
    }

    /// Make validation fail with the given error.
    pub fn with_validation_error(mut self, error: ClientError) -> Self {
        self.validation_error = Some(error);
        self
    }

    /// Fail only the first `times` validations, then answer normally.
    pub fn with_validation_failures(mut self, error: ClientError, times: usize) -> Self {
        self.validation_error = Some(error);
        self.validation_failures = Some(times);
        self
    }

    pub fn with_tasks(self, tasks: Vec<Task>) -> Self {
        *self.tasks.lock().unwrap_or_else(|e| e.into_inner()) = tasks;
        self
    }

    pub fn with_tasks_error(mut self, error: ClientError) -> Self {
        self.tasks_error = Some(error);
        self
    }

    pub fn with_complete_error(mut self, error: ClientError) -> Self {
        self.complete_error = Some(error);
        self
    }

    pub fn with_profile(mut self, profile: Profile) -> Self {
        self.profile = Some(profile);
        self
    }

    pub fn with_news(mut self, news: Vec<NewsItem>) -> Self {
        self.news = news;
        self
    }

    pub fn with_news_error(mut self, error: ClientError) -> Self {
        self.news_error = Some(error);
        self
    }

    /// Snapshot of the call counters.
    pub fn calls(&self) -> CallCounts {
        CallCounts {
            validate: self.calls.validate.load(Ordering::SeqCst),
            tasks: self.calls.tasks.load(Ordering::SeqCst),
            complete: self.calls.complete.load(Ordering::SeqCst),
            profile: self.calls.profile.load(Ordering::SeqCst),
            news: self.calls.news.load(Ordering::SeqCst),
        }
    }

    fn not_found(what: &str) -> ClientError {
        ClientError::Status {
            status: 404,
            body: format!("{} not found", what),
        }
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Backend for MockBackend {
    fn name(&self) -> &str {
        "mock"
    }

    async fn validate_subscription(
        &self,
        _user: UserId,
        _handle: Option<&str>,
    ) -> ClientResult<Vec<Requirement>> {
        let seen = self.calls.validate.fetch_add(1, Ordering::SeqCst);
        match &self.validation_error {
            Some(e) if self.validation_failures.map_or(true, |n| seen < n) => Err(e.clone()),
            _ => Ok(self.missing.clone()),
        }
    }

    async fn tasks(&self, _user: UserId) -> ClientResult<Vec<Task>> {
        self.calls.tasks.fetch_add(1, Ordering::SeqCst);
        if let Some(e) = &self.tasks_error {
            return Err(e.clone());
        }
        Ok(self.tasks.lock().unwrap_or_else(|e| e.into_inner()).clone())
    }

    async fn complete_task(&self, _user: UserId, task: TaskId) -> ClientResult<()> {
        self.calls.complete.fetch_add(1, Ordering::SeqCst);
        if let Some(e) = &self.complete_error {
            return Err(e.clone());
        }
        let mut tasks = self.tasks.lock().unwrap_or_else(|e| e.into_inner());
        match tasks.iter_mut().find(|t| t.id == task) {
            Some(t) => {
                t.status = Some("completed".to_string());
                Ok(())
            }
            None => Err(Self::not_found("Task")),
        }
    }

    async fn profile(&self, _user: UserId) -> ClientResult<Profile> {
        self.calls.profile.fetch_add(1, Ordering::SeqCst);
        self.profile.clone().ok_or_else(|| Self::not_found("Profile"))
    }

    async fn news(&self) -> ClientResult<Vec<NewsItem>> {
        self.calls.news.fetch_add(1, Ordering::SeqCst);
        match &self.news_error {
            Some(e) => Err(e.clone()),
            None => Ok(self.news.clone()),
        }
    }
}
