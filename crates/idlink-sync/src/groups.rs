//! Group membership map: user to declared group names.
//!
//! Sourced from a JSON object whose values are comma-joined group name
//! strings. Group names are free-form; each is trimmed of surrounding
//! whitespace and declaration order is preserved.

use idlink_connector::error::{ConnectorError, ConnectorResult};
use idlink_connector::types::AccountId;
use serde_json::Value;

/// Mapping from account identifier to that user's declared groups.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupMembershipMap {
    entries: Vec<(AccountId, Vec<String>)>,
}

impl GroupMembershipMap {
    /// Parse from a JSON object of `"user": "group1,group2"` pairs.
    ///
    /// Splitting keeps empty pieces: a user mapped to `""` has one
    /// empty group name, which later resolves as unknown and is
    /// skipped. Anything that is not an object of strings is invalid.
    pub fn from_json(value: &Value) -> ConnectorResult<Self> {
        let object = value.as_object().ok_or_else(|| {
            ConnectorError::invalid_data("user groups input is not a JSON object")
        })?;

        let mut entries = Vec::with_capacity(object.len());
        for (user, groups) in object {
            let groups = groups.as_str().ok_or_else(|| {
                ConnectorError::invalid_data(format!(
                    "group list for user '{user}' is not a string"
                ))
            })?;
            let groups = groups.split(',').map(|g| g.trim().to_string()).collect();
            entries.push((AccountId::from(user.as_str()), groups));
        }
        Ok(Self { entries })
    }

    /// Build from explicit entries (tests, callers with pre-split data).
    pub fn from_entries(entries: impl IntoIterator<Item = (AccountId, Vec<String>)>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    /// True when no users are declared.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of declared users.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Iterate users and their groups in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&AccountId, &[String])> {
        self.entries
            .iter()
            .map(|(id, groups)| (id, groups.as_slice()))
    }

    /// The declared groups for one user, if any.
    pub fn groups_for(&self, id: &AccountId) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(entry_id, _)| entry_id == id)
            .map(|(_, groups)| groups.as_slice())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_parse_splits_and_trims() {
        let map = GroupMembershipMap::from_json(&json!({
            "u1": "g1, g2",
            "u2": "g2",
        }))
        .unwrap();

        assert_eq!(map.len(), 2);
        assert_eq!(
            map.groups_for(&AccountId::from("u1")),
            Some(["g1".to_string(), "g2".to_string()].as_slice())
        );
        assert_eq!(
            map.groups_for(&AccountId::from("u2")),
            Some(["g2".to_string()].as_slice())
        );
    }

    #[test]
    fn test_declaration_order_is_preserved() {
        let map = GroupMembershipMap::from_json(&json!({
            "zeta": "g1",
            "alpha": "g2",
        }))
        .unwrap();

        let users: Vec<&AccountId> = map.iter().map(|(id, _)| id).collect();
        assert_eq!(users, vec![&AccountId::from("zeta"), &AccountId::from("alpha")]);
    }

    #[test]
    fn test_empty_value_yields_one_empty_group_name() {
        let map = GroupMembershipMap::from_json(&json!({"u1": ""})).unwrap();
        assert_eq!(
            map.groups_for(&AccountId::from("u1")),
            Some([String::new()].as_slice())
        );
    }

    #[test]
    fn test_non_object_input_is_invalid() {
        assert!(GroupMembershipMap::from_json(&json!(["u1"])).is_err());
        assert!(GroupMembershipMap::from_json(&json!("u1")).is_err());
    }

    #[test]
    fn test_non_string_value_is_invalid() {
        let err = GroupMembershipMap::from_json(&json!({"u1": ["g1"]})).unwrap_err();
        assert!(err.to_string().contains("u1"));
    }

    #[test]
    fn test_unknown_user_has_no_groups() {
        let map = GroupMembershipMap::from_json(&json!({"u1": "g1"})).unwrap();
        assert_eq!(map.groups_for(&AccountId::from("u2")), None);
    }
}
