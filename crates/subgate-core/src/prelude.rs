//! Subgate Core Prelude — convenient imports for common usage.
//!
//! ```rust
//! use subgate_core::prelude::*;
//! ```

pub use crate::types::{
    join_links, GateDecision, Identity, JoinLink, Requirement, UserId, ViewKey,
    DEFAULT_JOIN_BASE,
};

pub use crate::content::{NewsItem, Profile, Task, TaskId};

pub use crate::identity::{HostContext, IdentitySource, StaticIdentity};

pub use crate::error::{Result, SubgateError};
