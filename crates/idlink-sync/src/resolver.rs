//! Group to role resolution with explicit three-way lookup results.

use std::collections::HashMap;

use tracing::warn;

use idlink_connector::error::ConnectorResult;
use idlink_connector::traits::RoleRegistry;

/// Outcome of resolving a group name to an access role.
///
/// `NotFound` (the group is not known to the resolver at all) and
/// `FoundEmpty` (the group is known but maps to an empty role value)
/// are deliberately distinct: the merge engine skips the former
/// silently and warns on the latter. That asymmetry reproduces the
/// observed behavior of the system this replaces; see DESIGN.md.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoleLookup {
    /// The group maps to a concrete role ARN.
    Found(String),
    /// The group is known but its role value is empty.
    FoundEmpty,
    /// The group is not known to the resolver.
    NotFound,
}

/// Resolves group names to role ARNs for one provider's merge phase.
///
/// Populated once, before merging, from a fixed caller-supplied set of
/// group designations; it is not self-populating, and any group name
/// outside the fixed set is unknown.
#[derive(Debug, Clone, Default)]
pub struct GroupRoleResolver {
    roles: HashMap<String, String>,
}

impl GroupRoleResolver {
    /// Create an empty resolver.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from explicit `(group, role ARN)` pairs.
    ///
    /// Empty ARNs are kept and surface as [`RoleLookup::FoundEmpty`].
    pub fn from_pairs<G, A>(pairs: impl IntoIterator<Item = (G, A)>) -> Self
    where
        G: Into<String>,
        A: Into<String>,
    {
        Self {
            roles: pairs
                .into_iter()
                .map(|(group, arn)| (group.into(), arn.into()))
                .collect(),
        }
    }

    /// Resolve fixed `(group, role name)` designations through the
    /// role registry.
    ///
    /// A registry miss logs a warning and leaves the group unmapped,
    /// so later lookups return [`RoleLookup::NotFound`]. A failing
    /// registry call aborts the build.
    pub async fn from_registry<R: RoleRegistry + ?Sized>(
        registry: &R,
        designations: &[(String, String)],
    ) -> ConnectorResult<Self> {
        let mut resolver = Self::new();
        for (group, role_name) in designations {
            match registry.get_role(role_name).await? {
                Some(role) => resolver.insert(group.clone(), role.arn),
                None => warn!(
                    group = %group,
                    role = %role_name,
                    "Unable to locate role for group designation"
                ),
            }
        }
        Ok(resolver)
    }

    /// Map one group to a role ARN.
    pub fn insert(&mut self, group: impl Into<String>, role_arn: impl Into<String>) {
        self.roles.insert(group.into(), role_arn.into());
    }

    /// Resolve one group name.
    pub fn lookup(&self, group: &str) -> RoleLookup {
        match self.roles.get(group) {
            Some(arn) if !arn.is_empty() => RoleLookup::Found(arn.clone()),
            Some(_) => RoleLookup::FoundEmpty,
            None => RoleLookup::NotFound,
        }
    }
}

/// The standard group designations: `Viewers` and `Admins`, each
/// resolved as `<role_prefix><suffix>` in the registry.
pub fn standard_designations(role_prefix: &str) -> Vec<(String, String)> {
    [("Viewers", "viewer"), ("Admins", "admin")]
        .into_iter()
        .map(|(group, suffix)| (group.to_string(), format!("{role_prefix}{suffix}")))
        .collect()
}
