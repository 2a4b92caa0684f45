//! View switcher: exactly one content view is active at a time.
//!
//! The switcher only knows which key is active. It has no idea whether the
//! user is allowed to navigate; the session checks that before calling it.

use serde::Serialize;
use subgate_core::types::ViewKey;

/// Exclusive selection over the fixed set of views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ViewSwitcher {
    active: ViewKey,
}

impl ViewSwitcher {
    pub fn new(default: ViewKey) -> Self {
        Self { active: default }
    }

    /// Make `key` the active view. Returns whether anything changed.
    pub fn select(&mut self, key: ViewKey) -> bool {
        let changed = self.active != key;
        self.active = key;
        changed
    }

    pub fn active(&self) -> ViewKey {
        self.active
    }

    pub fn is_active(&self, key: ViewKey) -> bool {
        self.active == key
    }

    /// Every declared view with its active flag, in navigation order.
    pub fn states(&self) -> [(ViewKey, bool); 3] {
        ViewKey::ALL.map(|key| (key, self.is_active(key)))
    }
}

impl Default for ViewSwitcher {
    fn default() -> Self {
        Self::new(ViewKey::default())
    }
}
