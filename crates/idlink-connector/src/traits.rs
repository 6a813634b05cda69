//! Directory capability traits
//!
//! One trait per external system. Implementations are thin transport
//! wrappers; everything behind these seams (HTTP, process invocation,
//! credential acquisition) is outside the sync core.

use async_trait::async_trait;

use crate::error::ConnectorResult;
use crate::types::{AccountId, CredentialRef, DirectoryUser, RoleInfo};

/// The IAM-style account store owning the target account population.
///
/// Accounts are scoped by a path-like namespace prefix so one
/// reconciliation run only ever considers its own context's accounts.
#[async_trait]
pub trait AccountDirectory: Send + Sync {
    /// List the identifiers of every account under `path_prefix`.
    async fn list_accounts(&self, path_prefix: &str) -> ConnectorResult<Vec<AccountId>>;

    /// Create an account scoped to `path_prefix`.
    async fn create_account(&self, id: &AccountId, path_prefix: &str) -> ConnectorResult<()>;

    /// List every credential artifact attached to an account, across
    /// all credential kinds.
    async fn list_credentials(&self, id: &AccountId) -> ConnectorResult<Vec<CredentialRef>>;

    /// Revoke one credential artifact.
    async fn delete_credential(
        &self,
        id: &AccountId,
        credential: &CredentialRef,
    ) -> ConnectorResult<()>;

    /// Delete an account.
    ///
    /// Callers must revoke the account's credentials first; the
    /// directory rejects deletion of an account with live credentials.
    async fn delete_account(&self, id: &AccountId) -> ConnectorResult<()>;
}

/// The workspace directory holding each user's custom role attribute.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Query the user population.
    ///
    /// # Arguments
    /// * `customer` - customer/tenant scope of the query
    /// * `page_size` - page size for the underlying paged fetch
    /// * `sort_key` - attribute the directory orders results by
    async fn query_users(
        &self,
        customer: &str,
        page_size: u32,
        sort_key: &str,
    ) -> ConnectorResult<Vec<DirectoryUser>>;

    /// Apply one attribute patch to one user.
    ///
    /// Each update is independent; the batch layer issues one call per
    /// staged user and collects per-item outcomes.
    async fn update_user(
        &self,
        id: &AccountId,
        attribute_patch: &serde_json::Value,
    ) -> ConnectorResult<()>;
}

/// The provider role registry resolving role names to concrete ARNs.
#[async_trait]
pub trait RoleRegistry: Send + Sync {
    /// Look up a role by name.
    ///
    /// Returns `Ok(None)` when the registry has no such role; errors
    /// are reserved for the call itself failing.
    async fn get_role(&self, role_name: &str) -> ConnectorResult<Option<RoleInfo>>;
}
