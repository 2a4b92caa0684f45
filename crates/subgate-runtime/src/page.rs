//! The document the app renders into.
//!
//! A front end draws a [`Page`]: the gate panel, the application body with
//! its three panes, and the navigation bar. Each content loader owns exactly
//! one pane; the gate controller owns the gate panel and body visibility.

use serde::Serialize;
use subgate_core::content::{NewsItem, Profile, Task, TaskId, DEFAULT_BUTTON_TEXT};
use subgate_core::types::{JoinLink, ViewKey};

use crate::views::ViewSwitcher;

/// What occupies the space in front of the application body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GatePanel {
    Hidden,
    /// Validation in flight.
    Checking,
    /// Static instructional message, used when there is no identity.
    Notice { message: String },
    /// One join link per unmet requirement, in backend order.
    Remediation { links: Vec<JoinLink> },
    /// Validation itself failed; the user may retry.
    Failure { message: String, retryable: bool },
}

/// Content state of a single view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "data", rename_all = "snake_case")]
pub enum Pane<T> {
    Empty,
    Ready(T),
    Failed(String),
}

impl<T> Pane<T> {
    pub fn ready(&self) -> Option<&T> {
        match self {
            Pane::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Pane::Failed(_))
    }
}

impl<T> Default for Pane<T> {
    fn default() -> Self {
        Pane::Empty
    }
}

/// A rendered task with its action control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskCard {
    pub id: TaskId,
    pub title: String,
    pub description: String,
    pub task_type: String,
    pub rarity: String,
    pub reward_tokens: i64,
    pub status: String,
    /// The "Mark Complete" control; disabled once completed.
    pub action_enabled: bool,
}

impl From<&Task> for TaskCard {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id,
            title: task.title.clone(),
            description: task.description.clone().unwrap_or_default(),
            task_type: task.task_type.clone(),
            rarity: task.rarity.clone(),
            reward_tokens: task.reward_tokens,
            status: task.status_label().to_string(),
            action_enabled: !task.is_completed(),
        }
    }
}

/// Tasks pane: the cards plus the outcome of the last completion attempt.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TaskBoard {
    pub cards: Vec<TaskCard>,
    pub notice: Option<String>,
}

impl TaskBoard {
    pub fn card(&self, id: TaskId) -> Option<&TaskCard> {
        self.cards.iter().find(|c| c.id == id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileCard {
    pub telegram_id: i64,
    /// `-` when the user has no handle.
    pub username: String,
    pub referral_link: String,
    pub tokens: i64,
    pub token_rate: String,
    /// Target of the support button.
    pub support_link: String,
}

impl From<&Profile> for ProfileCard {
    fn from(profile: &Profile) -> Self {
        Self {
            telegram_id: profile.telegram_id,
            username: profile.username.clone().unwrap_or_else(|| "-".to_string()),
            referral_link: profile.referral_link.clone(),
            tokens: profile.tokens,
            token_rate: profile.token_rate.clone(),
            support_link: profile.support_link.clone(),
        }
    }
}

/// An outbound link rendered inside a card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardLink {
    pub label: String,
    pub href: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewsCard {
    pub title: String,
    pub content: String,
    /// Labelled with the media type, e.g. `video`.
    pub media: Option<CardLink>,
    pub button: Option<CardLink>,
}

impl From<&NewsItem> for NewsCard {
    fn from(item: &NewsItem) -> Self {
        let media = item.media_url.as_ref().map(|url| CardLink {
            label: item.media_type.clone().unwrap_or_default(),
            href: url.clone(),
        });
        let button = item.button_url.as_ref().map(|url| CardLink {
            label: item
                .button_text
                .clone()
                .unwrap_or_else(|| DEFAULT_BUTTON_TEXT.to_string()),
            href: url.clone(),
        });
        Self {
            title: item.title.clone(),
            content: item.content.clone().unwrap_or_default(),
            media,
            button,
        }
    }
}

/// One button in the bottom navigation bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavButton {
    pub key: ViewKey,
    pub label: &'static str,
    pub active: bool,
}

/// Whatever the user is looking at right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visible {
    Gate,
    View(ViewKey),
}

/// The whole rendered surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page {
    pub gate: GatePanel,
    pub body_visible: bool,
    pub views: ViewSwitcher,
    pub tasks: Pane<TaskBoard>,
    pub profile: Pane<ProfileCard>,
    pub news: Pane<Vec<NewsCard>>,
}

impl Page {
    /// A blank page: gate hidden, body hidden, nothing loaded.
    pub fn new(default_view: ViewKey) -> Self {
        Self {
            gate: GatePanel::Hidden,
            body_visible: false,
            views: ViewSwitcher::new(default_view),
            tasks: Pane::Empty,
            profile: Pane::Empty,
            news: Pane::Empty,
        }
    }

    pub fn nav(&self) -> Vec<NavButton> {
        self.views
            .states()
            .into_iter()
            .map(|(key, active)| NavButton {
                key,
                label: key.label(),
                active,
            })
            .collect()
    }

    pub fn visible(&self) -> Visible {
        if self.body_visible {
            Visible::View(self.views.active())
        } else {
            Visible::Gate
        }
    }

    /// Links currently shown on the remediation panel.
    pub fn remediation_links(&self) -> &[JoinLink] {
        match &self.gate {
            GatePanel::Remediation { links } => links,
            _ => &[],
        }
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(ViewKey::default())
    }
}
