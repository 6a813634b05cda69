//! Link command - merges federated role assignments onto directory
//! users.

use std::path::PathBuf;

use clap::Args;
use tracing::{info, warn};

use idlink_connector::traits::UserDirectory;
use idlink_sync::merge::RoleMergeEngine;
use idlink_sync::resolver::{standard_designations, GroupRoleResolver};
use idlink_sync::{batch, GroupMembershipMap};

use crate::api::directory::RestUserDirectory;
use crate::api::iam::IamCli;
use crate::error::{CliError, CliResult};

/// Page size for the directory user query.
const QUERY_PAGE_SIZE: u32 = 500;

/// Attribute the directory orders query results by.
const QUERY_SORT_KEY: &str = "email";

/// Arguments for the link command
#[derive(Args)]
pub struct LinkArgs {
    /// SAML provider ARN whose role slot this run owns
    pub provider_arn: String,

    /// JSON file mapping account identifier to a comma-separated
    /// string of group names
    pub user_groups_file: PathBuf,

    /// Prefix prepended to per-user standard role names
    pub role_prefix: String,

    /// Suffix appended to per-user standard role names
    pub role_suffix: String,

    /// Base URL of the workspace directory API
    #[arg(
        long,
        default_value = "https://admin.googleapis.com/admin/directory/v1"
    )]
    pub directory_url: String,

    /// Customer scope for the directory query
    #[arg(long, default_value = "my_customer")]
    pub customer: String,

    /// Bearer token for the directory API; acquiring it is external to
    /// this tool
    #[arg(long, env = "IDLINK_DIRECTORY_TOKEN", hide_env_values = true)]
    pub directory_token: String,
}

/// Execute the link command
pub async fn execute(args: LinkArgs) -> CliResult<()> {
    // The provider ARN carries the cloud account id in its fifth
    // colon-separated field.
    let account_id = args
        .provider_arn
        .split(':')
        .nth(4)
        .filter(|field| !field.is_empty())
        .ok_or_else(|| {
            CliError::Validation(format!(
                "provider ARN '{}' has no account id field",
                args.provider_arn
            ))
        })?;

    let contents = std::fs::read_to_string(&args.user_groups_file)?;
    let membership = GroupMembershipMap::from_json(&serde_json::from_str(&contents)?)?;
    if membership.is_empty() {
        info!("No user group mappings declared; nothing to link");
        return Ok(());
    }

    let registry = IamCli::new();
    let resolver =
        GroupRoleResolver::from_registry(&registry, &standard_designations(&args.role_prefix))
            .await?;

    let directory = RestUserDirectory::new(&args.directory_url, &args.directory_token)?;
    let snapshot = directory
        .query_users(&args.customer, QUERY_PAGE_SIZE, QUERY_SORT_KEY)
        .await?;
    info!(users = snapshot.len(), "Fetched directory snapshot");

    let engine = RoleMergeEngine::new(
        args.provider_arn.clone(),
        format!("arn:aws:iam::{account_id}:role/{}", args.role_prefix),
        args.role_suffix.clone(),
    );
    let staged = engine.stage_updates(&membership, &snapshot, &resolver);
    info!(staged = staged.len(), "Submitting role updates");

    let report = batch::submit_updates(&directory, &staged).await;
    if report.has_failures() {
        warn!(
            failed = report.failure_count,
            total = report.total,
            "Some role updates failed"
        );
    } else {
        info!(applied = report.success_count, "All role updates applied");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_account_id_field_extraction() {
        let arn = "arn:aws:iam::123456789012:saml-provider/gsuite";
        assert_eq!(arn.split(':').nth(4), Some("123456789012"));
    }

    #[test]
    fn test_arn_without_account_field() {
        assert_eq!("not-an-arn".split(':').nth(4), None);
        assert_eq!("a:b:c:d::e".split(':').nth(4), Some(""));
    }
}
