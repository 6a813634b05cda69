//! Add/delete execution phases consuming an [`AccountDelta`].
//!
//! Any error from the account directory aborts the remainder of the
//! run - there is no partial-completion bookkeeping. That contract
//! comes from the directory API, not from this crate.
//!
//! [`AccountDelta`]: crate::reconcile::AccountDelta

use tracing::{debug, info};

use idlink_connector::error::ConnectorResult;
use idlink_connector::traits::AccountDirectory;
use idlink_connector::types::AccountId;

/// Create one account per identifier, scoped to `path_prefix`.
pub async fn add_accounts<D: AccountDirectory + ?Sized>(
    directory: &D,
    ids: &[AccountId],
    path_prefix: &str,
) -> ConnectorResult<()> {
    for id in ids {
        info!(account = %id, path = path_prefix, "Creating account");
        directory.create_account(id, path_prefix).await?;
    }
    Ok(())
}

/// Delete accounts, revoking every attached credential first.
///
/// Per account: enumerate all credential artifacts (SSH-style keys and
/// access-style keys), revoke each, then delete the account itself.
/// Revocation comes first so a failure partway never leaves a removed
/// account with dangling credential references; a revocation error
/// fails the account's deletion before the removal call is attempted.
pub async fn delete_accounts<D: AccountDirectory + ?Sized>(
    directory: &D,
    ids: &[AccountId],
) -> ConnectorResult<()> {
    for id in ids {
        info!(account = %id, "Deleting account");
        for credential in directory.list_credentials(id).await? {
            debug!(
                account = %id,
                kind = ?credential.kind,
                credential = %credential.id,
                "Revoking credential"
            );
            directory.delete_credential(id, &credential).await?;
        }
        directory.delete_account(id).await?;
    }
    Ok(())
}
