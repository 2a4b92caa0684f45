//! Session-level tests: gating, fan-out, navigation, and task completion.

use std::sync::Arc;
use subgate_client::{ClientError, MockBackend};
use subgate_core::content::{NewsItem, Profile, Task, TaskId};
use subgate_core::error::SubgateError;
use subgate_core::identity::{HostContext, StaticIdentity};
use subgate_core::types::{Requirement, ViewKey};
use subgate_runtime::{App, AppSettings, GatePanel, GateState, Message, Visible};

fn profile() -> Profile {
    Profile {
        telegram_id: 42,
        username: Some("alice".into()),
        referral_link: "https://t.me/probot?start=ref_42".into(),
        tokens: 15000,
        token_rate: "1000=0.1".into(),
        support_link: "https://t.me/support".into(),
    }
}

/// A backend that grants access and serves every view.
fn full_backend() -> Arc<MockBackend> {
    Arc::new(
        MockBackend::new()
            .with_tasks(vec![
                Task::new(7, "Register").with_reward(15000),
                Task::new(8, "Deposit").with_reward(30000),
                Task::new(9, "Follow").with_status("completed"),
            ])
            .with_profile(profile())
            .with_news(vec![NewsItem::new("Launch")]),
    )
}

fn alice() -> StaticIdentity {
    StaticIdentity::new(Some(42), Some("alice".into()))
}

#[tokio::test]
async fn absent_identity_is_unauthenticated_and_calls_nothing() {
    let backend = full_backend();
    let host = HostContext::empty();
    let mut app = App::new(backend.clone(), &host, AppSettings::default());

    assert_eq!(app.start().await, &GateState::Unauthenticated);

    let calls = backend.calls();
    assert_eq!(calls.validate, 0);
    assert_eq!(calls.tasks + calls.profile + calls.news, 0);
    assert!(matches!(app.page().gate, GatePanel::Notice { .. }));
    assert!(!app.page().body_visible);
    assert!(app.last_load().is_none());
}

#[tokio::test]
async fn granted_reveals_body_and_loads_each_view_once() {
    let backend = full_backend();
    let mut app = App::new(backend.clone(), &alice(), AppSettings::default());

    assert!(app.start().await.is_granted());

    let page = app.page();
    assert_eq!(page.gate, GatePanel::Hidden);
    assert!(page.body_visible);
    assert_eq!(page.visible(), Visible::View(ViewKey::Tasks));
    assert_eq!(page.tasks.ready().unwrap().cards.len(), 3);
    assert_eq!(page.profile.ready().unwrap().username, "alice");
    assert_eq!(page.news.ready().unwrap()[0].title, "Launch");

    let calls = backend.calls();
    assert_eq!(calls.validate, 1);
    assert_eq!(calls.tasks, 1);
    assert_eq!(calls.profile, 1);
    assert_eq!(calls.news, 1);
    assert!(app.last_load().unwrap().all_loaded());
}

#[tokio::test]
async fn start_is_idempotent() {
    let backend = full_backend();
    let mut app = App::new(backend.clone(), &alice(), AppSettings::default());
    app.start().await;
    app.start().await;
    assert_eq!(backend.calls().validate, 1);
    assert_eq!(backend.calls().tasks, 1);
}

#[tokio::test]
async fn denied_lists_one_link_per_requirement_in_order() {
    let missing = vec![
        Requirement::new("-1001").with_username("abc").with_title("ABC"),
        Requirement::new("123"),
        Requirement::new("-1002").with_title("Private"),
    ];
    let backend = Arc::new(MockBackend::new().with_missing(missing.clone()));
    let mut app = App::new(backend.clone(), &alice(), AppSettings::default());

    assert_eq!(app.start().await, &GateState::Denied(missing));

    let page = app.page();
    assert!(!page.body_visible);
    assert_eq!(page.visible(), Visible::Gate);

    let links = page.remediation_links();
    assert_eq!(links.len(), 3);
    assert_eq!(links[0].href, "https://t.me/abc");
    assert_eq!(links[0].text, "ABC");
    assert_eq!(links[1].href, "https://t.me/c/123");
    assert_eq!(links[1].text, "123");
    assert_eq!(links[2].href, "https://t.me/c/-1002");
    assert_eq!(links[2].text, "Private");

    let calls = backend.calls();
    assert_eq!(calls.tasks + calls.profile + calls.news, 0);
}

#[tokio::test]
async fn join_base_is_configurable() {
    let backend = Arc::new(MockBackend::new().with_missing(vec![Requirement::new("5")]));
    let mut settings = AppSettings::default();
    settings.gate.join_base = "https://telegram.me/".into();
    let mut app = App::new(backend, &alice(), settings);
    app.start().await;
    assert_eq!(app.page().remediation_links()[0].href, "https://telegram.me/c/5");
}

#[tokio::test]
async fn validation_failure_is_distinct_from_denied() {
    let backend = Arc::new(
        MockBackend::new().with_validation_error(ClientError::ConnectionFailed("refused".into())),
    );
    let mut app = App::new(backend.clone(), &alice(), AppSettings::default());

    let state = app.start().await.clone();
    assert!(matches!(state, GateState::Failed(SubgateError::ValidationFailure(_))));

    let page = app.page();
    assert!(!page.body_visible);
    assert!(page.remediation_links().is_empty());
    match &page.gate {
        GatePanel::Failure { message, retryable } => {
            assert!(message.contains("refused"));
            assert!(retryable);
        }
        other => panic!("expected failure panel, got {other:?}"),
    }
    assert_eq!(backend.calls().tasks, 0);
}

#[tokio::test]
async fn retry_runs_a_fresh_validation() {
    let backend = Arc::new(MockBackend::new().with_validation_error(ClientError::Status {
        status: 503,
        body: "busy".into(),
    }));
    let mut app = App::new(backend.clone(), &alice(), AppSettings::default());
    app.start().await;

    app.dispatch(Message::Retry).await.unwrap();
    assert_eq!(backend.calls().validate, 2);
    assert!(matches!(app.state(), GateState::Failed(_)));
}

#[tokio::test]
async fn retry_after_recovery_grants_and_loads_once() {
    let backend = Arc::new(
        MockBackend::new()
            .with_validation_failures(ClientError::ConnectionFailed("refused".into()), 1)
            .with_tasks(vec![Task::new(7, "Register")])
            .with_profile(profile())
            .with_news(vec![NewsItem::new("Launch")]),
    );
    let mut app = App::new(backend.clone(), &alice(), AppSettings::default());
    assert!(matches!(app.start().await, GateState::Failed(_)));
    assert_eq!(backend.calls().tasks, 0);

    app.dispatch(Message::Retry).await.unwrap();

    assert_eq!(app.state(), &GateState::Granted);
    let page = app.page();
    assert_eq!(page.gate, GatePanel::Hidden);
    assert!(page.body_visible);
    assert!(page.tasks.ready().is_some());
    assert!(page.profile.ready().is_some());
    assert!(page.news.ready().is_some());

    let calls = backend.calls();
    assert_eq!(calls.validate, 2);
    assert_eq!((calls.tasks, calls.profile, calls.news), (1, 1, 1));
}

#[tokio::test]
async fn retry_is_rejected_unless_failed() {
    let mut app = App::new(full_backend(), &alice(), AppSettings::default());
    app.start().await;
    assert_eq!(
        app.dispatch(Message::Retry).await,
        Err(SubgateError::NothingToRetry)
    );
}

#[tokio::test]
async fn navigation_requires_grant() {
    let backend = Arc::new(MockBackend::new().with_missing(vec![Requirement::new("1")]));
    let mut app = App::new(backend, &alice(), AppSettings::default());
    app.start().await;

    assert_eq!(
        app.dispatch(Message::NavigateTo(ViewKey::News)).await,
        Err(SubgateError::NotGranted)
    );
    assert_eq!(app.page().views.active(), ViewKey::Tasks);
}

#[tokio::test]
async fn actions_without_identity_report_it() {
    let backend = full_backend();
    let host = HostContext::empty();
    let mut app = App::new(backend.clone(), &host, AppSettings::default());
    app.start().await;

    assert_eq!(
        app.dispatch(Message::NavigateTo(ViewKey::News)).await,
        Err(SubgateError::IdentityAbsent)
    );
    assert_eq!(
        app.dispatch(Message::CompleteTask(TaskId(7))).await,
        Err(SubgateError::IdentityAbsent)
    );
    assert_eq!(backend.calls().complete, 0);
}

#[tokio::test]
async fn navigation_switches_exactly_one_view() {
    let mut settings = AppSettings::default();
    settings.default_view = ViewKey::Profile;
    let mut app = App::new(full_backend(), &alice(), settings);
    app.start().await;
    assert_eq!(app.page().visible(), Visible::View(ViewKey::Profile));

    for key in [ViewKey::News, ViewKey::News, ViewKey::Tasks] {
        app.dispatch(Message::NavigateTo(key)).await.unwrap();
        let nav = app.page().nav();
        assert_eq!(nav.iter().filter(|b| b.active).count(), 1);
        assert_eq!(app.page().visible(), Visible::View(key));
    }
}

#[tokio::test]
async fn completing_a_task_disables_only_that_task() {
    let backend = full_backend();
    let mut app = App::new(backend.clone(), &alice(), AppSettings::default());
    app.start().await;

    let before = app.page().tasks.ready().unwrap().clone();
    assert!(before.card(TaskId(7)).unwrap().action_enabled);

    app.dispatch(Message::CompleteTask(TaskId(7))).await.unwrap();

    let after = app.page().tasks.ready().unwrap();
    let seven = after.card(TaskId(7)).unwrap();
    assert_eq!(seven.status, "completed");
    assert!(!seven.action_enabled);
    assert_eq!(after.card(TaskId(8)), before.card(TaskId(8)));
    assert_eq!(after.card(TaskId(9)), before.card(TaskId(9)));
    assert_eq!(after.notice.as_deref(), Some("Task 7 completed"));

    let calls = backend.calls();
    assert_eq!(calls.complete, 1);
    assert_eq!(calls.tasks, 2);
}

#[tokio::test]
async fn completing_a_completed_task_is_a_no_op() {
    let backend = full_backend();
    let mut app = App::new(backend.clone(), &alice(), AppSettings::default());
    app.start().await;

    app.dispatch(Message::CompleteTask(TaskId(9))).await.unwrap();
    assert_eq!(backend.calls().complete, 0);
}

#[tokio::test]
async fn failed_completion_keeps_list_and_skips_refetch() {
    let backend = Arc::new(
        MockBackend::new()
            .with_tasks(vec![Task::new(7, "Register")])
            .with_complete_error(ClientError::Status {
                status: 500,
                body: "oops".into(),
            }),
    );
    let mut app = App::new(backend.clone(), &alice(), AppSettings::default());
    app.start().await;

    let err = app
        .dispatch(Message::CompleteTask(TaskId(7)))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        SubgateError::ContentLoadFailure {
            view: ViewKey::Tasks,
            ..
        }
    ));

    let board = app.page().tasks.ready().unwrap();
    assert!(board.card(TaskId(7)).unwrap().action_enabled);
    assert!(board.notice.as_deref().unwrap().contains("oops"));
    assert_eq!(backend.calls().tasks, 1);
}

#[tokio::test]
async fn content_failure_stays_in_its_view() {
    let backend = Arc::new(
        MockBackend::new()
            .with_tasks_error(ClientError::Timeout(30))
            .with_profile(profile())
            .with_news(vec![NewsItem::new("Still here")]),
    );
    let mut app = App::new(backend, &alice(), AppSettings::default());

    assert!(app.start().await.is_granted());
    let page = app.page();
    assert!(page.body_visible);
    assert!(page.tasks.is_failed());
    assert!(page.profile.ready().is_some());
    assert!(page.news.ready().is_some());
    assert_eq!(app.last_load().unwrap().failures.len(), 1);
}

#[test]
fn page_serializes_for_front_ends() {
    let page = subgate_runtime::Page::default();
    let json = serde_json::to_value(&page).unwrap();
    assert_eq!(json["gate"]["kind"], "hidden");
    assert_eq!(json["tasks"]["state"], "empty");
    assert_eq!(json["views"]["active"], "tasks");
}
