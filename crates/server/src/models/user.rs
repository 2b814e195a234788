//! User domain types.
//!
//! These types represent the wire/domain shape of a user, separate from the
//! store's record encoding. Documents are schema-flexible: beyond `name` and
//! `email`, any additional top-level fields a client supplies ride along in a
//! flattened map.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use roster_core::UserId;

/// Keys a client can never set through a payload; the identifier belongs to
/// the store.
const RESERVED_KEYS: &[&str] = &["id", "_id"];

/// A user as stored and served.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier, assigned by the store on creation.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Additional top-level fields supplied by the client.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// Fields a client supplies when creating a user.
///
/// Binding is lenient: absent fields default to empty rather than failing to
/// decode. Client-supplied identifier keys are discarded.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserDraft {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl UserDraft {
    /// Drop reserved identifier keys before the draft reaches the store.
    pub fn strip_reserved(&mut self) {
        for key in RESERVED_KEYS {
            self.extra.remove(*key);
        }
    }

    /// Materialize the draft into a stored entity under `id`.
    #[must_use]
    pub fn into_user(mut self, id: UserId) -> User {
        self.strip_reserved();
        User {
            id,
            name: self.name,
            email: self.email,
            extra: self.extra,
        }
    }
}

/// Fields a client supplies when updating a user.
///
/// Only fields present in the payload are overwritten; everything else on the
/// stored document is left untouched. This is a field-set overwrite, not a
/// merge of nested structures.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl UserPatch {
    /// Drop reserved identifier keys before the patch reaches the store.
    pub fn strip_reserved(&mut self) {
        for key in RESERVED_KEYS {
            self.extra.remove(*key);
        }
    }

    /// True when the patch would not set any field.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.extra.is_empty()
    }

    /// Overwrite the fields present in this patch on `user`, in place.
    pub fn apply_to(&self, user: &mut User) {
        if let Some(name) = &self.name {
            user.name.clone_from(name);
        }
        if let Some(email) = &self.email {
            user.email.clone_from(email);
        }
        for (key, value) in &self.extra {
            user.extra.insert(key.clone(), value.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_draft_binds_leniently() {
        let draft: UserDraft = serde_json::from_value(json!({})).expect("empty object binds");
        assert_eq!(draft.name, "");
        assert_eq!(draft.email, "");
        assert!(draft.extra.is_empty());
    }

    #[test]
    fn test_draft_discards_client_supplied_id() {
        let draft: UserDraft = serde_json::from_value(json!({
            "name": "Alice",
            "id": "507f1f77bcf86cd799439011",
            "_id": "507f1f77bcf86cd799439011"
        }))
        .expect("draft binds");

        let id = UserId::generate();
        let user = draft.into_user(id);
        assert_eq!(user.id, id);
        assert!(user.extra.is_empty());
    }

    #[test]
    fn test_patch_applies_only_present_fields() {
        let mut user = User {
            id: UserId::generate(),
            name: "Alice".to_string(),
            email: "a@x.com".to_string(),
            extra: BTreeMap::new(),
        };

        let patch: UserPatch =
            serde_json::from_value(json!({"name": "Alicia"})).expect("patch binds");
        patch.apply_to(&mut user);

        assert_eq!(user.name, "Alicia");
        assert_eq!(user.email, "a@x.com");
    }

    #[test]
    fn test_patch_carries_extra_fields() {
        let mut patch: UserPatch = serde_json::from_value(json!({
            "nickname": "Al",
            "_id": "507f1f77bcf86cd799439011"
        }))
        .expect("patch binds");
        patch.strip_reserved();

        assert!(!patch.is_empty());
        assert_eq!(patch.extra.get("nickname"), Some(&json!("Al")));
        assert!(!patch.extra.contains_key("_id"));
    }

    #[test]
    fn test_empty_patch_is_empty() {
        let patch: UserPatch = serde_json::from_value(json!({})).expect("patch binds");
        assert!(patch.is_empty());
    }

    #[test]
    fn test_user_wire_shape() {
        let user = User {
            id: UserId::parse("507f1f77bcf86cd799439011").expect("valid id"),
            name: "Alice".to_string(),
            email: "a@x.com".to_string(),
            extra: BTreeMap::new(),
        };
        let value = serde_json::to_value(&user).expect("serialize");
        assert_eq!(
            value,
            json!({
                "id": "507f1f77bcf86cd799439011",
                "name": "Alice",
                "email": "a@x.com"
            })
        );
    }
}
