//! Role assignment codec for the directory custom attribute.
//!
//! The user directory stores a user's federated roles under
//! `customSchemas -> AWS-SSO -> role` as a list of
//! `{"value": "<roleArn>,<providerArn>", "customType": "<type>"}`
//! entries, where the type tag is the last path segment of the role
//! ARN. This module parses and re-serializes that shape; the merge
//! logic itself lives in [`crate::merge`].

use serde_json::{json, Value};

/// One grant of access: a role and the federation provider granting it.
///
/// A user's role set may carry assignments from several providers at
/// once; the provider ARN is what scopes a merge to its own slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleAssignment {
    /// Fully-qualified access-role identifier.
    pub role_arn: String,
    /// Identity provider that grants this role.
    pub provider_arn: String,
}

impl RoleAssignment {
    /// Create a role assignment.
    pub fn new(role_arn: impl Into<String>, provider_arn: impl Into<String>) -> Self {
        Self {
            role_arn: role_arn.into(),
            provider_arn: provider_arn.into(),
        }
    }

    /// The serialized type tag: the last path segment of the role ARN.
    pub fn role_type(&self) -> &str {
        self.role_arn
            .rsplit('/')
            .next()
            .unwrap_or(self.role_arn.as_str())
    }
}

/// Parse a user's role set from the stored custom attribute tree.
///
/// Any absent key along `customSchemas -> AWS-SSO -> role` yields an
/// empty set rather than an error; malformed entries (no `value`, or a
/// value without the `role,provider` shape) are skipped.
pub fn parse_role_attribute(attributes: &Value) -> Vec<RoleAssignment> {
    let Some(entries) = attributes
        .get("customSchemas")
        .and_then(|v| v.get("AWS-SSO"))
        .and_then(|v| v.get("role"))
        .and_then(Value::as_array)
    else {
        return Vec::new();
    };

    entries
        .iter()
        .filter_map(|entry| entry.get("value").and_then(Value::as_str))
        .filter_map(|value| {
            let mut parts = value.splitn(3, ',');
            let role_arn = parts.next()?;
            let provider_arn = parts.next()?;
            Some(RoleAssignment::new(role_arn, provider_arn))
        })
        .collect()
}

/// Serialize a role set back into the custom attribute patch shape.
pub fn to_attribute_patch(roles: &[RoleAssignment]) -> Value {
    let entries: Vec<Value> = roles
        .iter()
        .map(|role| {
            json!({
                "value": format!("{},{}", role.role_arn, role.provider_arn),
                "customType": role.role_type(),
            })
        })
        .collect();

    json!({ "customSchemas": { "AWS-SSO": { "role": entries } } })
}
