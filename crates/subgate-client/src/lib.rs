//! # Subgate Client
//!
//! Talks to the app backend: the subscription validation endpoint that
//! gates access, and the task, profile, and news endpoints behind it.
//!
//! ## Features
//!
//! - `http` (default): reqwest-backed [`HttpBackend`]
//!
//! ## Usage
//!
//! ```rust,ignore
//! use subgate_client::{Backend, ClientConfig, HttpBackend};
//! use subgate_core::types::UserId;
//!
//! let backend = HttpBackend::new(ClientConfig::new("http://localhost:8000"))?;
//! let missing = backend.validate_subscription(UserId(42), Some("alice")).await?;
//! ```

mod backend;
mod mock;
pub mod wire;

pub use backend::{Backend, ClientConfig, ClientError, ClientResult};
pub use mock::{CallCounts, MockBackend};

#[cfg(feature = "http")]
mod http;
#[cfg(feature = "http")]
pub use http::HttpBackend;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Backend, ClientConfig, ClientError, ClientResult};
    pub use crate::MockBackend;

    #[cfg(feature = "http")]
    pub use crate::HttpBackend;
}
