//! Provision command - account lifecycle reconciliation plus the
//! stdin/stdout group mapping transposition.

use std::io::Read;
use std::path::{Path, PathBuf};

use clap::Args;
use tracing::{debug, info};

use idlink_connector::traits::AccountDirectory;
use idlink_connector::types::AccountId;
use idlink_sync::{lifecycle, transpose, AccountDelta};

use crate::api::iam::IamCli;
use crate::error::{CliError, CliResult};

/// Arguments for the provision command
#[derive(Args)]
pub struct ProvisionArgs {
    /// `add` to create the missing accounts, `delete` to delete the extras
    pub mode: String,

    /// JSON file containing the desired list of account identifiers
    pub users_file: PathBuf,

    /// Unique context for this environment deployment; must be stable
    /// across redeployments to the same context
    pub context: String,
}

/// Reconciliation mode.
#[derive(Debug)]
enum Mode {
    Add,
    Delete,
}

impl Mode {
    // Not a clap value_enum: a rejected value must exit 1, not clap's
    // usage-error code.
    fn parse(mode: &str) -> CliResult<Self> {
        match mode {
            "add" => Ok(Mode::Add),
            "delete" => Ok(Mode::Delete),
            other => Err(CliError::InvalidMode(other.to_string())),
        }
    }
}

/// Execute the provision command
pub async fn execute(args: ProvisionArgs) -> CliResult<()> {
    let mode = Mode::parse(&args.mode)?;
    let path_prefix = format!("/{}/", args.context);

    if args.users_file.is_file() {
        let directory = IamCli::new();
        let desired = read_desired_accounts(&args.users_file)?;
        let actual = directory.list_accounts(&path_prefix).await?;
        info!(
            desired = desired.len(),
            actual = actual.len(),
            path = %path_prefix,
            "Reconciling account population"
        );

        let delta = AccountDelta::compute(&desired, &actual);
        match mode {
            Mode::Add => lifecycle::add_accounts(&directory, &delta.to_add, &path_prefix).await?,
            Mode::Delete => lifecycle::delete_accounts(&directory, &delta.to_delete).await?,
        }
    } else {
        debug!(
            file = %args.users_file.display(),
            "Desired-state file not present; skipping reconciliation"
        );
    }

    // Always runs, reconciliation or not; absent or malformed input is
    // a silent no-op.
    transpose_stdin_to_stdout();
    Ok(())
}

fn read_desired_accounts(path: &Path) -> CliResult<Vec<AccountId>> {
    let contents = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

fn transpose_stdin_to_stdout() {
    let mut input = String::new();
    if std::io::stdin().read_to_string(&mut input).is_err() {
        return;
    }
    let Ok(value) = serde_json::from_str::<serde_json::Value>(&input) else {
        return;
    };
    if let Some(transposed) = transpose::transpose(&value) {
        if let Ok(output) = serde_json::to_string(&transposed) {
            println!("{output}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_parse_accepts_add_and_delete() {
        assert!(matches!(Mode::parse("add"), Ok(Mode::Add)));
        assert!(matches!(Mode::parse("delete"), Ok(Mode::Delete)));
    }

    #[test]
    fn test_mode_parse_rejects_anything_else() {
        let err = Mode::parse("upsert").unwrap_err();
        assert!(matches!(err, CliError::InvalidMode(_)));
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_read_desired_accounts_parses_json_array() {
        let dir = std::env::temp_dir().join("idlink-provision-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("users.json");
        std::fs::write(&path, r#"["alice", "bob"]"#).unwrap();

        let accounts = read_desired_accounts(&path).unwrap();
        assert_eq!(accounts, vec![AccountId::from("alice"), AccountId::from("bob")]);
    }

    #[test]
    fn test_read_desired_accounts_rejects_non_array() {
        let dir = std::env::temp_dir().join("idlink-provision-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("bad.json");
        std::fs::write(&path, r#"{"alice": true}"#).unwrap();

        assert!(matches!(
            read_desired_accounts(&path),
            Err(CliError::Json(_))
        ));
    }
}
