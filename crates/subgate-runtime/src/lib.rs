//! # Subgate Runtime
//!
//! The gated session: gate controller, view switcher, content loaders, and
//! the page they render into.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use subgate_client::MockBackend;
//! use subgate_core::identity::HostContext;
//! use subgate_runtime::{App, AppSettings, Message};
//! use subgate_core::types::ViewKey;
//!
//! let ctx = HostContext::from_json(r#"{"user": {"id": 42}}"#);
//! let mut app = App::new(MockBackend::new(), &ctx, AppSettings::default());
//! app.start().await;
//! app.dispatch(Message::NavigateTo(ViewKey::News)).await?;
//! ```

pub mod app;
pub mod gate;
pub mod loaders;
pub mod page;
pub mod views;

pub use app::{App, AppSettings, Message};
pub use gate::{present, GateController, GateSettings, GateState};
pub use loaders::{load_all, load_news, load_profile, load_tasks, LoadReport};
pub use page::{
    CardLink, GatePanel, NavButton, NewsCard, Page, Pane, ProfileCard, TaskBoard, TaskCard,
    Visible,
};
pub use views::ViewSwitcher;
