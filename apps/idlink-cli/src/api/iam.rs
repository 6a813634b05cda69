//! Account-directory and role-registry adapter driving the `aws` CLI.
//!
//! Transport only: each call shells out to one `aws iam` subcommand
//! and parses its JSON response. Credentials come from the ambient
//! `aws` configuration, not from this adapter.

use async_trait::async_trait;
use serde::Deserialize;
use tokio::process::Command;
use tracing::debug;

use idlink_connector::error::{ConnectorError, ConnectorResult};
use idlink_connector::traits::{AccountDirectory, RoleRegistry};
use idlink_connector::types::{AccountId, CredentialKind, CredentialRef, RoleInfo};

/// Account directory and role registry backed by the `aws` binary.
#[derive(Debug, Clone)]
pub struct IamCli {
    binary: String,
}

impl IamCli {
    /// Adapter over the `aws` binary on `PATH`.
    pub fn new() -> Self {
        Self {
            binary: "aws".to_string(),
        }
    }

    async fn run(&self, args: &[&str]) -> ConnectorResult<Vec<u8>> {
        debug!(args = ?args, "Invoking aws CLI");
        let output = Command::new(&self.binary)
            .args(args)
            .output()
            .await
            .map_err(|e| {
                ConnectorError::connection_failed_with_source(
                    format!("failed to invoke '{}'", self.binary),
                    e,
                )
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ConnectorError::operation_failed(format!(
                "'{} {}' failed: {}",
                self.binary,
                args.join(" "),
                stderr.trim()
            )));
        }
        Ok(output.stdout)
    }

    async fn run_json<T: serde::de::DeserializeOwned>(&self, args: &[&str]) -> ConnectorResult<T> {
        let stdout = self.run(args).await?;
        serde_json::from_slice(&stdout).map_err(|e| {
            ConnectorError::serialization(format!(
                "unexpected response from '{} {}': {e}",
                self.binary,
                args.join(" ")
            ))
        })
    }
}

impl Default for IamCli {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Deserialize)]
struct ListUsersResponse {
    #[serde(rename = "Users", default)]
    users: Vec<UserEntry>,
}

#[derive(Deserialize)]
struct UserEntry {
    #[serde(rename = "UserName")]
    user_name: String,
}

#[derive(Deserialize)]
struct ListSshKeysResponse {
    #[serde(rename = "SSHPublicKeys", default)]
    keys: Vec<SshKeyEntry>,
}

#[derive(Deserialize)]
struct SshKeyEntry {
    #[serde(rename = "SSHPublicKeyId")]
    id: String,
}

#[derive(Deserialize)]
struct ListAccessKeysResponse {
    #[serde(rename = "AccessKeyMetadata", default)]
    keys: Vec<AccessKeyEntry>,
}

#[derive(Deserialize)]
struct AccessKeyEntry {
    #[serde(rename = "AccessKeyId")]
    id: String,
}

#[derive(Deserialize)]
struct GetRoleResponse {
    #[serde(rename = "Role")]
    role: RoleEntry,
}

#[derive(Deserialize)]
struct RoleEntry {
    #[serde(rename = "Arn")]
    arn: String,
}

#[async_trait]
impl AccountDirectory for IamCli {
    async fn list_accounts(&self, path_prefix: &str) -> ConnectorResult<Vec<AccountId>> {
        let response: ListUsersResponse = self
            .run_json(&["iam", "list-users", "--path-prefix", path_prefix])
            .await?;
        Ok(response
            .users
            .into_iter()
            .map(|user| AccountId::new(user.user_name))
            .collect())
    }

    async fn create_account(&self, id: &AccountId, path_prefix: &str) -> ConnectorResult<()> {
        self.run(&[
            "iam",
            "create-user",
            "--user-name",
            id.as_str(),
            "--path",
            path_prefix,
        ])
        .await
        .map(|_| ())
    }

    async fn list_credentials(&self, id: &AccountId) -> ConnectorResult<Vec<CredentialRef>> {
        let ssh: ListSshKeysResponse = self
            .run_json(&["iam", "list-ssh-public-keys", "--user-name", id.as_str()])
            .await?;
        let access: ListAccessKeysResponse = self
            .run_json(&["iam", "list-access-keys", "--user-name", id.as_str()])
            .await?;

        let mut credentials: Vec<CredentialRef> = ssh
            .keys
            .into_iter()
            .map(|key| CredentialRef::new(CredentialKind::SshPublicKey, key.id))
            .collect();
        credentials.extend(
            access
                .keys
                .into_iter()
                .map(|key| CredentialRef::new(CredentialKind::AccessKey, key.id)),
        );
        Ok(credentials)
    }

    async fn delete_credential(
        &self,
        id: &AccountId,
        credential: &CredentialRef,
    ) -> ConnectorResult<()> {
        let args = match credential.kind {
            CredentialKind::SshPublicKey => [
                "iam",
                "delete-ssh-public-key",
                "--user-name",
                id.as_str(),
                "--ssh-public-key-id",
                credential.id.as_str(),
            ],
            CredentialKind::AccessKey => [
                "iam",
                "delete-access-key",
                "--user-name",
                id.as_str(),
                "--access-key-id",
                credential.id.as_str(),
            ],
        };
        self.run(&args).await.map(|_| ())
    }

    async fn delete_account(&self, id: &AccountId) -> ConnectorResult<()> {
        self.run(&["iam", "delete-user", "--user-name", id.as_str()])
            .await
            .map(|_| ())
    }
}

#[async_trait]
impl RoleRegistry for IamCli {
    async fn get_role(&self, role_name: &str) -> ConnectorResult<Option<RoleInfo>> {
        // `get-role` exits non-zero for a missing role; that is a
        // registry miss, not a call failure.
        match self
            .run_json::<GetRoleResponse>(&["iam", "get-role", "--role-name", role_name])
            .await
        {
            Ok(response) => Ok(Some(RoleInfo {
                arn: response.role.arn,
            })),
            Err(ConnectorError::OperationFailed { message, .. })
                if message.contains("NoSuchEntity") =>
            {
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}
