//! Gate controller: decides whether the application body may be shown.
//!
//! ```text
//!   Unauthenticated ──(id present)──► Checking ──┬─► Granted
//!         │                                      ├─► Denied(requirements)
//!         └─(no id, terminal)                    └─► Failed(error)
//! ```
//!
//! The validator is called at most once per controller. A failed call is
//! its own terminal state and is never folded into `Denied`.

use subgate_client::Backend;
use subgate_core::error::SubgateError;
use subgate_core::types::{join_links, GateDecision, Identity, Requirement, DEFAULT_JOIN_BASE};
use tracing::{debug, info, warn};

use crate::page::{GatePanel, Page};

/// Message shown when the host gave us no user.
pub const DEFAULT_UNAUTHENTICATED_MESSAGE: &str = "Open this WebApp from Telegram.";

/// Where the controller currently stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateState {
    Unauthenticated,
    Checking,
    Granted,
    Denied(Vec<Requirement>),
    Failed(SubgateError),
}

impl GateState {
    pub fn is_granted(&self) -> bool {
        matches!(self, GateState::Granted)
    }

    /// The decision, when validation completed successfully.
    pub fn decision(&self) -> Option<GateDecision> {
        match self {
            GateState::Granted => Some(GateDecision::Granted),
            GateState::Denied(missing) => Some(GateDecision::Denied(missing.clone())),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            GateState::Unauthenticated => "unauthenticated",
            GateState::Checking => "checking",
            GateState::Granted => "granted",
            GateState::Denied(_) => "denied",
            GateState::Failed(_) => "failed",
        }
    }
}

/// How gate outcomes are presented.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateSettings {
    /// Base URL for channel join links.
    pub join_base: String,
    pub unauthenticated_message: String,
}

impl Default for GateSettings {
    fn default() -> Self {
        Self {
            join_base: DEFAULT_JOIN_BASE.to_string(),
            unauthenticated_message: DEFAULT_UNAUTHENTICATED_MESSAGE.to_string(),
        }
    }
}

/// Runs one gating pass for one identity.
pub struct GateController<'a, B: Backend + ?Sized> {
    identity: &'a Identity,
    validator: &'a B,
    state: GateState,
    evaluated: bool,
}

impl<'a, B: Backend + ?Sized> GateController<'a, B> {
    pub fn new(identity: &'a Identity, validator: &'a B) -> Self {
        Self {
            identity,
            validator,
            state: GateState::Unauthenticated,
            evaluated: false,
        }
    }

    pub fn state(&self) -> &GateState {
        &self.state
    }

    /// Resolve the gate. Later calls return the first result unchanged.
    pub async fn evaluate(&mut self) -> &GateState {
        if self.evaluated {
            return &self.state;
        }
        self.evaluated = true;

        let Some(user) = self.identity.id else {
            info!("no user id from host, staying unauthenticated");
            self.state = GateState::Unauthenticated;
            return &self.state;
        };

        self.state = GateState::Checking;
        debug!(%user, backend = self.validator.name(), "validating subscription");

        let result = self
            .validator
            .validate_subscription(user, self.identity.handle.as_deref())
            .await;

        self.state = match result {
            Ok(missing) => match GateDecision::from_missing(missing) {
                GateDecision::Granted => {
                    info!(%user, "access granted");
                    GateState::Granted
                }
                GateDecision::Denied(missing) => {
                    info!(%user, missing = missing.len(), "access denied");
                    GateState::Denied(missing)
                }
            },
            Err(e) => {
                warn!(%user, error = %e, "subscription validation failed");
                GateState::Failed(SubgateError::validation(e.to_string()))
            }
        };
        &self.state
    }
}

/// Reflect a gate state on the page: gate panel and body visibility.
pub fn present(state: &GateState, page: &mut Page, settings: &GateSettings) {
    match state {
        GateState::Unauthenticated => {
            page.gate = GatePanel::Notice {
                message: settings.unauthenticated_message.clone(),
            };
            page.body_visible = false;
        }
        GateState::Checking => {
            page.gate = GatePanel::Checking;
            page.body_visible = false;
        }
        GateState::Granted => {
            page.gate = GatePanel::Hidden;
            page.body_visible = true;
        }
        GateState::Denied(missing) => {
            page.gate = GatePanel::Remediation {
                links: join_links(missing, &settings.join_base),
            };
            page.body_visible = false;
        }
        GateState::Failed(error) => {
            page.gate = GatePanel::Failure {
                message: error.to_string(),
                retryable: true,
            };
            page.body_visible = false;
        }
    }
}
