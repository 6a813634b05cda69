//! Provider-scoped role merge.
//!
//! For each user present in both the membership map and the directory
//! snapshot, recomputes the serialized role attribute: every
//! assignment this provider previously granted is dropped as a unit
//! (the merge is a full provider-scoped replace, not incremental
//! per-group), then the current standard self-service role and one
//! role per resolvable group are appended. Assignments from other
//! providers pass through untouched.

use std::collections::HashMap;

use serde_json::Value;
use tracing::warn;

use idlink_connector::types::{AccountId, DirectoryUser};

use crate::groups::GroupMembershipMap;
use crate::resolver::{GroupRoleResolver, RoleLookup};
use crate::roles::{self, RoleAssignment};

/// One staged per-user attribute update, ready for batch submission.
#[derive(Debug, Clone)]
pub struct StagedUpdate {
    /// The user the patch applies to.
    pub id: AccountId,
    /// The serialized role attribute patch.
    pub patch: Value,
}

/// Recomputes each user's role set for one identity provider.
#[derive(Debug, Clone)]
pub struct RoleMergeEngine {
    provider_arn: String,
    standard_role_prefix: String,
    standard_role_suffix: String,
}

impl RoleMergeEngine {
    /// Create a merge engine for one provider.
    ///
    /// The standard self-service role for user `u` is
    /// `<prefix><u><suffix>`.
    pub fn new(
        provider_arn: impl Into<String>,
        standard_role_prefix: impl Into<String>,
        standard_role_suffix: impl Into<String>,
    ) -> Self {
        Self {
            provider_arn: provider_arn.into(),
            standard_role_prefix: standard_role_prefix.into(),
            standard_role_suffix: standard_role_suffix.into(),
        }
    }

    /// The provider whose role slot this engine owns.
    pub fn provider_arn(&self) -> &str {
        &self.provider_arn
    }

    /// Merge one user's role set.
    ///
    /// Order is stable: surviving foreign-provider assignments first,
    /// then the standard self-service role, then one role per group in
    /// declared order. Unknown groups are skipped silently; groups
    /// known to the resolver but mapped to an empty role value are
    /// skipped with a warning naming the user and group (the two
    /// branches are intentionally not unified, see DESIGN.md).
    pub fn merge_roles(
        &self,
        id: &AccountId,
        existing: &[RoleAssignment],
        groups: &[String],
        resolver: &GroupRoleResolver,
    ) -> Vec<RoleAssignment> {
        let mut merged: Vec<RoleAssignment> = existing
            .iter()
            .filter(|role| role.provider_arn != self.provider_arn)
            .cloned()
            .collect();

        merged.push(RoleAssignment::new(
            format!(
                "{}{}{}",
                self.standard_role_prefix, id, self.standard_role_suffix
            ),
            self.provider_arn.clone(),
        ));

        for group in groups {
            match resolver.lookup(group) {
                RoleLookup::Found(role_arn) => {
                    merged.push(RoleAssignment::new(role_arn, self.provider_arn.clone()));
                }
                RoleLookup::FoundEmpty => warn!(
                    user = %id,
                    group = %group,
                    "Cannot assign role for group with empty role value"
                ),
                RoleLookup::NotFound => {}
            }
        }

        merged
    }

    /// Stage one attribute patch per user present in both the
    /// membership map and the directory snapshot.
    ///
    /// A user missing from the snapshot is skipped with a warning and
    /// never fails the run. Iteration follows the membership map's
    /// declaration order.
    pub fn stage_updates(
        &self,
        membership: &GroupMembershipMap,
        snapshot: &[DirectoryUser],
        resolver: &GroupRoleResolver,
    ) -> Vec<StagedUpdate> {
        let by_id: HashMap<&AccountId, &DirectoryUser> =
            snapshot.iter().map(|user| (&user.id, user)).collect();

        let mut staged = Vec::new();
        for (id, groups) in membership.iter() {
            let Some(user) = by_id.get(id) else {
                warn!(user = %id, "User does not exist in directory; skipping role update");
                continue;
            };

            let existing = roles::parse_role_attribute(&user.custom_attributes);
            let merged = self.merge_roles(id, &existing, groups, resolver);
            staged.push(StagedUpdate {
                id: id.clone(),
                patch: roles::to_attribute_patch(&merged),
            });
        }
        staged
    }
}
