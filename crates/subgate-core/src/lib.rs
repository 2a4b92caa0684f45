//! # Subgate Core
//!
//! Shared types for the subscription-gated web app client.
//!
//! - **Identity** — who the host says the user is, read once at startup
//! - **Requirement** — one channel the user still has to join
//! - **ViewKey** — one of the mutually exclusive content views
//! - **GateDecision** — granted, or denied with the unmet requirements
//!
//! ## Quick Start
//!
//! ```rust
//! use subgate_core::prelude::*;
//!
//! let ctx = HostContext::from_json(r#"{"user": {"id": 42, "username": "alice"}}"#);
//! let identity = ctx.identity();
//! assert_eq!(identity.id, Some(UserId(42)));
//! assert_eq!(identity.handle.as_deref(), Some("alice"));
//! ```

pub mod content;
pub mod error;
pub mod identity;
pub mod prelude;
pub mod types;
