//! Content loaders for the three views.
//!
//! Each loader fetches one endpoint and writes only its own pane. Failures
//! are caught here and shown in that pane; they never reach the siblings.

use subgate_client::Backend;
use subgate_core::error::SubgateError;
use subgate_core::types::{UserId, ViewKey};
use tracing::{debug, warn};

use crate::page::{NewsCard, Page, Pane, ProfileCard, TaskBoard, TaskCard};

/// Outcome of the fan-out: which views failed to load.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub failures: Vec<SubgateError>,
}

impl LoadReport {
    pub fn all_loaded(&self) -> bool {
        self.failures.is_empty()
    }
}

fn failed<T>(pane: &mut Pane<T>, view: ViewKey, reason: String) -> SubgateError {
    warn!(%view, %reason, "content load failed");
    *pane = Pane::Failed(reason.clone());
    SubgateError::content(view, reason)
}

/// Fetch the task list into the tasks pane.
///
/// A completion notice on the current board is carried over.
pub async fn load_tasks<B: Backend + ?Sized>(
    backend: &B,
    user: UserId,
    pane: &mut Pane<TaskBoard>,
) -> Result<(), SubgateError> {
    match backend.tasks(user).await {
        Ok(tasks) => {
            debug!(count = tasks.len(), "tasks loaded");
            let notice = match pane {
                Pane::Ready(board) => board.notice.take(),
                _ => None,
            };
            *pane = Pane::Ready(TaskBoard {
                cards: tasks.iter().map(TaskCard::from).collect(),
                notice,
            });
            Ok(())
        }
        Err(e) => Err(failed(pane, ViewKey::Tasks, e.to_string())),
    }
}

pub async fn load_profile<B: Backend + ?Sized>(
    backend: &B,
    user: UserId,
    pane: &mut Pane<ProfileCard>,
) -> Result<(), SubgateError> {
    match backend.profile(user).await {
        Ok(profile) => {
            *pane = Pane::Ready(ProfileCard::from(&profile));
            Ok(())
        }
        Err(e) => Err(failed(pane, ViewKey::Profile, e.to_string())),
    }
}

pub async fn load_news<B: Backend + ?Sized>(
    backend: &B,
    pane: &mut Pane<Vec<NewsCard>>,
) -> Result<(), SubgateError> {
    match backend.news().await {
        Ok(items) => {
            debug!(count = items.len(), "news loaded");
            *pane = Pane::Ready(items.iter().map(NewsCard::from).collect());
            Ok(())
        }
        Err(e) => Err(failed(pane, ViewKey::News, e.to_string())),
    }
}

/// Issue all three loaders concurrently and wait until each has finished.
pub async fn load_all<B: Backend + ?Sized>(
    backend: &B,
    user: UserId,
    page: &mut Page,
) -> LoadReport {
    let Page {
        tasks,
        profile,
        news,
        ..
    } = page;

    let (tasks, profile, news) = tokio::join!(
        load_tasks(backend, user, tasks),
        load_profile(backend, user, profile),
        load_news(backend, news),
    );

    LoadReport {
        failures: [tasks, profile, news]
            .into_iter()
            .filter_map(Result::err)
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use subgate_client::{ClientError, MockBackend};
    use subgate_core::content::{NewsItem, Task};

    #[tokio::test]
    async fn test_one_failure_does_not_block_others() {
        let backend = MockBackend::new()
            .with_tasks(vec![Task::new(1, "Register")])
            .with_news_error(ClientError::Status {
                status: 500,
                body: "db down".into(),
            });
        let mut page = Page::default();

        let report = load_all(&backend, UserId(1), &mut page).await;

        assert_eq!(page.tasks.ready().map(|b| b.cards.len()), Some(1));
        // No profile configured on the mock: 404.
        assert!(page.profile.is_failed());
        assert!(page.news.is_failed());
        assert_eq!(report.failures.len(), 2);
        assert!(report
            .failures
            .iter()
            .any(|e| matches!(e, SubgateError::ContentLoadFailure { view: ViewKey::News, .. })));
    }

    #[tokio::test]
    async fn test_reload_keeps_notice() {
        let backend = MockBackend::new().with_news(vec![NewsItem::new("Hello")]);
        let mut pane = Pane::Ready(TaskBoard {
            cards: vec![],
            notice: Some("done".into()),
        });
        load_tasks(&backend, UserId(1), &mut pane).await.unwrap();
        assert_eq!(pane.ready().unwrap().notice.as_deref(), Some("done"));
    }
}
