//! Boundary types shared by the directory traits.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque identifier for a user account within a namespace.
///
/// No internal structure is assumed beyond string equality; the same
/// identifier names the account in both directories.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(String);

impl AccountId {
    /// Create an account identifier from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AccountId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for AccountId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// The kind of credential artifact attached to an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CredentialKind {
    /// SSH-style public key.
    SshPublicKey,
    /// Access-key-style credential pair.
    AccessKey,
}

/// Reference to one credential artifact attached to an account.
///
/// Credentials must be revoked before their owning account can be
/// deleted; the lifecycle executor enumerates these through
/// [`AccountDirectory::list_credentials`].
///
/// [`AccountDirectory::list_credentials`]: crate::traits::AccountDirectory::list_credentials
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialRef {
    /// Which kind of credential this references.
    pub kind: CredentialKind,
    /// The credential's identifier in the account directory.
    pub id: String,
}

impl CredentialRef {
    /// Create a credential reference.
    pub fn new(kind: CredentialKind, id: impl Into<String>) -> Self {
        Self {
            kind,
            id: id.into(),
        }
    }
}

/// A user record returned by the user directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectoryUser {
    /// Primary identifier (email-style) of the user.
    pub id: AccountId,
    /// The custom attribute tree attached to the user.
    ///
    /// Absent or partial trees are valid; consumers treat missing keys
    /// as an empty value, not an error.
    #[serde(default)]
    pub custom_attributes: serde_json::Value,
}

impl DirectoryUser {
    /// Create a user record with no custom attributes.
    pub fn new(id: impl Into<AccountId>) -> Self {
        Self {
            id: id.into(),
            custom_attributes: serde_json::Value::Null,
        }
    }

    /// Create a user record with the given custom attribute tree.
    pub fn with_attributes(id: impl Into<AccountId>, custom_attributes: serde_json::Value) -> Self {
        Self {
            id: id.into(),
            custom_attributes,
        }
    }
}

/// A role record returned by the role registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleInfo {
    /// Fully-qualified role identifier.
    pub arn: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_id_equality_is_string_equality() {
        assert_eq!(AccountId::from("alice@example.com"), AccountId::new("alice@example.com"));
        assert_ne!(AccountId::from("alice@example.com"), AccountId::from("bob@example.com"));
    }

    #[test]
    fn test_account_id_display() {
        assert_eq!(AccountId::from("alice").to_string(), "alice");
    }

    #[test]
    fn test_account_id_serde_transparent() {
        let id: AccountId = serde_json::from_str("\"alice\"").unwrap();
        assert_eq!(id.as_str(), "alice");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"alice\"");
    }

    #[test]
    fn test_directory_user_defaults_to_no_attributes() {
        let user = DirectoryUser::new("alice");
        assert!(user.custom_attributes.is_null());
    }
}
