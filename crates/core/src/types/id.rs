//! User identifier type.

use core::fmt;
use core::str::FromStr;

use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`UserId`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum UserIdError {
    /// The input is not a valid identifier encoding.
    #[error("user id must be a 24-character hex string")]
    InvalidFormat,
}

/// An opaque user identifier.
///
/// Identifiers are assigned by the document store on creation and are
/// immutable thereafter. On the wire they are 24-character hex strings; the
/// store-native representation is a BSON `ObjectId`. Keeping the conversion
/// behind [`UserId::parse`] and [`UserId::to_hex`] means no other component
/// needs to know which key format the store uses.
///
/// ## Examples
///
/// ```
/// use roster_core::UserId;
///
/// let id = UserId::parse("65b2f0c4a1d2e3f4a5b6c7d8").unwrap();
/// assert_eq!(id.to_hex(), "65b2f0c4a1d2e3f4a5b6c7d8");
///
/// // Anything that is not 24 hex characters is rejected
/// assert!(UserId::parse("not-an-id").is_err());
/// assert!(UserId::parse("").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(ObjectId);

impl UserId {
    /// Parse a `UserId` from its wire (hex string) representation.
    ///
    /// # Errors
    ///
    /// Returns [`UserIdError::InvalidFormat`] if the input is not a valid
    /// 24-character hex string.
    pub fn parse(s: &str) -> Result<Self, UserIdError> {
        ObjectId::parse_str(s)
            .map(Self)
            .map_err(|_| UserIdError::InvalidFormat)
    }

    /// Generate a fresh identifier.
    ///
    /// Used by store backends that mint identifiers locally; the production
    /// backend lets the server assign them.
    #[must_use]
    pub fn generate() -> Self {
        Self(ObjectId::new())
    }

    /// The wire (hex string) representation.
    #[must_use]
    pub fn to_hex(&self) -> String {
        self.0.to_hex()
    }

    /// The store-native key.
    #[must_use]
    pub const fn as_object_id(&self) -> ObjectId {
        self.0
    }
}

impl From<ObjectId> for UserId {
    fn from(oid: ObjectId) -> Self {
        Self(oid)
    }
}

impl From<UserId> for ObjectId {
    fn from(id: UserId) -> Self {
        id.0
    }
}

impl FromStr for UserId {
    type Err = UserIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_hex())
    }
}

// Serialized as the hex string, not as BSON extended JSON. The store layer
// converts to the native ObjectId itself.
impl Serialize for UserId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0.to_hex())
    }
}

impl<'de> Deserialize<'de> for UserId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_id() {
        let id = UserId::parse("507f1f77bcf86cd799439011").expect("valid id");
        assert_eq!(id.to_hex(), "507f1f77bcf86cd799439011");
    }

    #[test]
    fn test_parse_rejects_malformed_input() {
        assert!(matches!(UserId::parse(""), Err(UserIdError::InvalidFormat)));
        assert!(matches!(
            UserId::parse("123"),
            Err(UserIdError::InvalidFormat)
        ));
        assert!(matches!(
            UserId::parse("zzzzzzzzzzzzzzzzzzzzzzzz"),
            Err(UserIdError::InvalidFormat)
        ));
        // Right length, wrong alphabet
        assert!(matches!(
            UserId::parse("507f1f77bcf86cd79943901g"),
            Err(UserIdError::InvalidFormat)
        ));
    }

    #[test]
    fn test_display_round_trips() {
        let id = UserId::generate();
        let parsed = UserId::parse(&id.to_string()).expect("round trip");
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_generated_ids_are_unique() {
        assert_ne!(UserId::generate(), UserId::generate());
    }

    #[test]
    fn test_serializes_as_hex_string() {
        let id = UserId::parse("507f1f77bcf86cd799439011").expect("valid id");
        let json = serde_json::to_value(id).expect("serialize");
        assert_eq!(json, serde_json::json!("507f1f77bcf86cd799439011"));

        let back: UserId = serde_json::from_value(json).expect("deserialize");
        assert_eq!(back, id);
    }

    #[test]
    fn test_deserialize_rejects_malformed_input() {
        let result: Result<UserId, _> = serde_json::from_value(serde_json::json!("nope"));
        assert!(result.is_err());
    }
}
