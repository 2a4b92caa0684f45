//! # Subgate
//!
//! Client for a subscription-gated web app embedded in a messaging host.
//!
//! The host injects who the user is; the app asks its backend which required
//! channels the user has not joined, and only when that list is empty does it
//! reveal the tasks, profile, and news views.
//!
//! ## Quick Start
//!
//! ```rust
//! use subgate::prelude::*;
//!
//! # tokio_test_block_on(async {
//! let backend = MockBackend::new().with_missing(vec![
//!     Requirement::new("-1001").with_username("announcements"),
//! ]);
//! let host = HostContext::from_json(r#"{"user": {"id": 42, "username": "alice"}}"#);
//!
//! let mut app = App::new(backend, &host, AppSettings::default());
//! let state = app.start().await.clone();
//!
//! assert!(matches!(state, GateState::Denied(_)));
//! assert_eq!(app.page().remediation_links()[0].href, "https://t.me/announcements");
//! # });
//! # fn tokio_test_block_on<F: std::future::Future>(f: F) -> F::Output {
//! #     tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(f)
//! # }
//! ```
//!
//! ## Architecture
//!
//! - [`subgate_core`] - Identity, requirements, view keys, content types, errors
//! - [`subgate_client`] - The `Backend` trait, the HTTP backend, and a mock
//! - [`subgate_runtime`] - Gate controller, view switcher, loaders, and the page
//!
//! ## Gate States
//!
//! | State | Body | Gate panel |
//! |-------|------|------------|
//! | Unauthenticated | hidden | instructional notice |
//! | Checking | hidden | spinner |
//! | Granted | visible | hidden |
//! | Denied | hidden | one join link per missing channel |
//! | Failed | hidden | error with retry |

// Re-export all subcrates
pub use subgate_client as client;
pub use subgate_core as core;
pub use subgate_runtime as runtime;

/// Prelude for convenient imports.
pub mod prelude {
    pub use subgate_core::prelude::*;

    pub use subgate_client::{Backend, ClientConfig, ClientError, ClientResult, MockBackend};

    #[cfg(feature = "http")]
    pub use subgate_client::HttpBackend;

    pub use subgate_runtime::{
        App, AppSettings, GateController, GatePanel, GateSettings, GateState, Message, Page,
        Pane, ViewSwitcher, Visible,
    };
}

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
