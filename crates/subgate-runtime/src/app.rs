//! One app session: identity, gate, page, and user messages.
//!
//! The identity is read once when the session is built. [`App::start`] runs
//! the gate and, only after the validator call has finished with a grant,
//! fans out the content loaders. User input arrives as [`Message`]s.

use subgate_client::Backend;
use subgate_core::content::TaskId;
use subgate_core::error::SubgateError;
use subgate_core::identity::IdentitySource;
use subgate_core::types::{Identity, UserId, ViewKey};
use tracing::{debug, info};

use crate::gate::{present, GateController, GateSettings, GateState};
use crate::loaders::{load_all, load_tasks, LoadReport};
use crate::page::{Page, Pane};

/// User-driven events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    NavigateTo(ViewKey),
    CompleteTask(TaskId),
    /// Re-run gating after a failed validation call.
    Retry,
}

/// Session settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppSettings {
    pub gate: GateSettings,
    /// View shown first after access is granted.
    pub default_view: ViewKey,
}

/// A gated app session.
pub struct App<B: Backend> {
    backend: B,
    identity: Identity,
    settings: AppSettings,
    state: GateState,
    started: bool,
    page: Page,
    last_load: Option<LoadReport>,
}

impl<B: Backend> App<B> {
    /// Build a session, reading the identity from `source` exactly once.
    pub fn new(backend: B, source: &dyn IdentitySource, settings: AppSettings) -> Self {
        let identity = source.identity();
        let page = Page::new(settings.default_view);
        Self {
            backend,
            identity,
            settings,
            state: GateState::Unauthenticated,
            started: false,
            page,
            last_load: None,
        }
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    pub fn state(&self) -> &GateState {
        &self.state
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Failures from the most recent content fan-out, if one ran.
    pub fn last_load(&self) -> Option<&LoadReport> {
        self.last_load.as_ref()
    }

    /// Run gating and, when granted, load every view.
    ///
    /// Only the first call does any work.
    pub async fn start(&mut self) -> &GateState {
        if self.started {
            return &self.state;
        }
        self.started = true;
        self.run_gate().await;
        &self.state
    }

    async fn run_gate(&mut self) {
        if self.identity.is_authenticated() {
            present(&GateState::Checking, &mut self.page, &self.settings.gate);
        }

        let state = {
            let mut gate = GateController::new(&self.identity, &self.backend);
            gate.evaluate().await.clone()
        };
        present(&state, &mut self.page, &self.settings.gate);
        self.state = state;

        if let (GateState::Granted, Some(user)) = (&self.state, self.identity.id) {
            let report = load_all(&self.backend, user, &mut self.page).await;
            if !report.all_loaded() {
                info!(failed = report.failures.len(), "some views failed to load");
            }
            self.last_load = Some(report);
        }
    }

    fn granted_user(&self) -> Result<UserId, SubgateError> {
        match (&self.state, self.identity.id) {
            (GateState::Granted, Some(user)) => Ok(user),
            (GateState::Unauthenticated, _) => Err(SubgateError::IdentityAbsent),
            _ => Err(SubgateError::NotGranted),
        }
    }

    /// Handle one user event.
    pub async fn dispatch(&mut self, message: Message) -> Result<(), SubgateError> {
        debug!(?message, "dispatch");
        match message {
            Message::NavigateTo(key) => self.navigate(key),
            Message::CompleteTask(task) => self.complete_task(task).await,
            Message::Retry => self.retry().await,
        }
    }

    fn navigate(&mut self, key: ViewKey) -> Result<(), SubgateError> {
        self.granted_user()?;
        self.page.views.select(key);
        Ok(())
    }

    async fn complete_task(&mut self, task: TaskId) -> Result<(), SubgateError> {
        let user = self.granted_user()?;

        if let Some(card) = self.page.tasks.ready().and_then(|b| b.card(task)) {
            if !card.action_enabled {
                debug!(%task, "task already completed");
                return Ok(());
            }
        }

        match self.backend.complete_task(user, task).await {
            Ok(()) => {
                info!(%task, "task completed");
                set_notice(&mut self.page.tasks, format!("Task {} completed", task));
                load_tasks(&self.backend, user, &mut self.page.tasks).await
            }
            Err(e) => {
                let reason = e.to_string();
                set_notice(
                    &mut self.page.tasks,
                    format!("Could not complete task {}: {}", task, reason),
                );
                Err(SubgateError::content(ViewKey::Tasks, reason))
            }
        }
    }

    /// Start a fresh gating session. Only valid after a failed validation.
    async fn retry(&mut self) -> Result<(), SubgateError> {
        if !matches!(self.state, GateState::Failed(_)) {
            return Err(SubgateError::NothingToRetry);
        }
        info!("retrying subscription validation");
        self.page = Page::new(self.settings.default_view);
        self.last_load = None;
        self.run_gate().await;
        Ok(())
    }
}

fn set_notice(pane: &mut Pane<crate::page::TaskBoard>, notice: String) {
    if let Pane::Ready(board) = pane {
        board.notice = Some(notice);
    }
}
