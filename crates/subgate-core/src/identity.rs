//! Identity source: reads who the user is from host-injected context.
//!
//! The host embeds the app and hands it an `initDataUnsafe`-style object,
//! `{ "user": { "id": 42, "username": "alice" } }`. Reading it never fails:
//! anything missing or malformed degrades to an absent field.

use serde_json::Value;

use crate::types::{Identity, UserId};

/// Something that can say who the current user is.
pub trait IdentitySource {
    /// Read the identity. Pure, no I/O, no failure path.
    fn identity(&self) -> Identity;
}

/// Host-injected launch context.
#[derive(Debug, Clone, Default)]
pub struct HostContext {
    raw: Value,
}

impl HostContext {
    pub fn new(raw: Value) -> Self {
        Self { raw }
    }

    /// Parse the context from JSON text. Invalid JSON yields an empty context.
    pub fn from_json(text: &str) -> Self {
        Self::new(serde_json::from_str(text).unwrap_or(Value::Null))
    }

    /// No host object at all.
    pub fn empty() -> Self {
        Self::default()
    }

    fn user(&self) -> Option<&Value> {
        self.raw.get("user").filter(|u| u.is_object())
    }
}

impl IdentitySource for HostContext {
    fn identity(&self) -> Identity {
        let Some(user) = self.user() else {
            return Identity::anonymous();
        };

        let id = match user.get("id") {
            Some(Value::Number(n)) => n.as_i64().and_then(UserId::new),
            Some(Value::String(s)) => s.trim().parse::<i64>().ok().and_then(UserId::new),
            _ => None,
        };
        let handle = user
            .get("username")
            .and_then(Value::as_str)
            .map(str::to_string);

        Identity::new(id, handle)
    }
}

/// A fixed identity, for front ends that learn it out of band.
#[derive(Debug, Clone, Default)]
pub struct StaticIdentity(pub Identity);

impl StaticIdentity {
    pub fn new(id: Option<i64>, handle: Option<String>) -> Self {
        Self(Identity::new(id.and_then(UserId::new), handle))
    }
}

impl IdentitySource for StaticIdentity {
    fn identity(&self) -> Identity {
        self.0.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_full_user() {
        let ctx = HostContext::new(json!({"user": {"id": 42, "username": "alice"}}));
        let identity = ctx.identity();
        assert_eq!(identity.id, Some(UserId(42)));
        assert_eq!(identity.handle.as_deref(), Some("alice"));
    }

    #[test]
    fn test_missing_pieces_degrade_to_absent() {
        assert_eq!(HostContext::empty().identity(), Identity::anonymous());
        assert_eq!(HostContext::from_json("not json").identity(), Identity::anonymous());
        assert_eq!(HostContext::new(json!({"user": null})).identity(), Identity::anonymous());

        let no_id = HostContext::new(json!({"user": {"username": "bob"}})).identity();
        assert_eq!(no_id.id, None);
        assert_eq!(no_id.handle.as_deref(), Some("bob"));

        let zero = HostContext::new(json!({"user": {"id": 0}})).identity();
        assert!(!zero.is_authenticated());
    }

    #[test]
    fn test_string_id_and_empty_handle() {
        let identity = HostContext::new(json!({"user": {"id": "99", "username": ""}})).identity();
        assert_eq!(identity.id, Some(UserId(99)));
        assert_eq!(identity.handle, None);
    }

    #[test]
    fn test_static_identity() {
        let source = StaticIdentity::new(Some(5), Some("carol".into()));
        assert_eq!(source.identity().id, Some(UserId(5)));
        assert!(!StaticIdentity::new(None, None).identity().is_authenticated());
    }
}
