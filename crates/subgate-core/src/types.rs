//! Shared types for gating and navigation.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::SubgateError;

/// Public base for channel join links.
pub const DEFAULT_JOIN_BASE: &str = "https://t.me";

/// The host platform's numeric user identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub i64);

impl UserId {
    /// Build an id, treating zero as absent.
    pub fn new(raw: i64) -> Option<Self> {
        if raw == 0 {
            None
        } else {
            Some(Self(raw))
        }
    }

    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Who the host says the current user is.
///
/// Created once at startup and never mutated. An absent `id` is the
/// unauthenticated case, not an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: Option<UserId>,
    pub handle: Option<String>,
}

impl Identity {
    pub fn new(id: Option<UserId>, handle: Option<String>) -> Self {
        Self {
            id,
            handle: handle.filter(|h| !h.is_empty()),
        }
    }

    /// The unauthenticated identity.
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn is_authenticated(&self) -> bool {
        self.id.is_some()
    }
}

/// One unmet access precondition: a channel the user has not joined.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requirement {
    /// Raw channel identifier, kept as its decimal text.
    #[serde(deserialize_with = "id_as_string")]
    pub channel_id: String,
    #[serde(default, deserialize_with = "non_empty")]
    pub channel_username: Option<String>,
    #[serde(default, deserialize_with = "non_empty")]
    pub channel_title: Option<String>,
}

impl Requirement {
    pub fn new(channel_id: impl Into<String>) -> Self {
        Self {
            channel_id: channel_id.into(),
            channel_username: None,
            channel_title: None,
        }
    }

    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.channel_username = Some(username.into()).filter(|u: &String| !u.is_empty());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.channel_title = Some(title.into()).filter(|t: &String| !t.is_empty());
        self
    }

    /// Outbound join link for this channel.
    ///
    /// Public channels link by handle, private ones by raw id under `/c/`.
    pub fn join_link(&self, base: &str) -> JoinLink {
        let base = base.trim_end_matches('/');
        let href = match &self.channel_username {
            Some(username) => format!("{}/{}", base, username),
            None => format!("{}/c/{}", base, self.channel_id),
        };
        let text = self
            .channel_title
            .clone()
            .unwrap_or_else(|| self.channel_id.clone());
        JoinLink { href, text }
    }
}

/// A rendered remediation link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinLink {
    pub href: String,
    pub text: String,
}

/// Build one join link per requirement, preserving order.
pub fn join_links(requirements: &[Requirement], base: &str) -> Vec<JoinLink> {
    requirements.iter().map(|r| r.join_link(base)).collect()
}

/// Identifies one of the mutually exclusive content views.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewKey {
    #[default]
    Tasks,
    Profile,
    News,
}

impl ViewKey {
    /// Every view, in navigation order.
    pub const ALL: [ViewKey; 3] = [ViewKey::Tasks, ViewKey::Profile, ViewKey::News];

    pub fn as_str(&self) -> &'static str {
        match self {
            ViewKey::Tasks => "tasks",
            ViewKey::Profile => "profile",
            ViewKey::News => "news",
        }
    }

    /// Label for the navigation button.
    pub fn label(&self) -> &'static str {
        match self {
            ViewKey::Tasks => "Tasks",
            ViewKey::Profile => "Profile",
            ViewKey::News => "News",
        }
    }
}

impl fmt::Display for ViewKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViewKey {
    type Err = SubgateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tasks" => Ok(ViewKey::Tasks),
            "profile" => Ok(ViewKey::Profile),
            "news" => Ok(ViewKey::News),
            other => Err(SubgateError::UnknownView(other.to_string())),
        }
    }
}

/// Outcome of a successful validation call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    Granted,
    Denied(Vec<Requirement>),
}

impl GateDecision {
    /// Empty means granted; anything else is denied with those requirements.
    pub fn from_missing(missing: Vec<Requirement>) -> Self {
        if missing.is_empty() {
            GateDecision::Granted
        } else {
            GateDecision::Denied(missing)
        }
    }

    pub fn is_granted(&self) -> bool {
        matches!(self, GateDecision::Granted)
    }
}

/// Accepts a JSON number or string and keeps its text.
pub(crate) fn id_as_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Int(i64),
        Text(String),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Int(n) => n.to_string(),
        RawId::Text(s) => s,
    })
}

/// Null and empty strings both become `None`.
pub(crate) fn non_empty<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.is_empty()))
}
