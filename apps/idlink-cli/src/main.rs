//! idlink CLI - reconciles a workspace user directory with a cloud IAM
//! role store.
//!
//! Two pipelines:
//! - `provision` - compare a desired account list against the accounts
//!   under a deployment context and create or delete the difference,
//!   then transpose any group mapping on stdin to stdout
//! - `link` - recompute each user's federated role attribute for one
//!   identity provider and write it back through the directory API

use clap::{Parser, Subcommand};

mod api;
mod commands;
mod error;

use error::CliResult;

/// idlink - directory/IAM identity reconciliation
#[derive(Parser)]
#[command(name = "idlink")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Reconcile the account population against a desired-state file
    Provision(commands::provision::ProvisionArgs),

    /// Merge federated role assignments onto directory users
    Link(commands::link::LinkArgs),
}

#[tokio::main]
async fn main() {
    // Logs go to stderr: stdout is reserved for the transposition
    // output, which downstream tooling consumes.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            e.print();
            std::process::exit(e.exit_code());
        }
    }
}

async fn run(cli: Cli) -> CliResult<()> {
    match cli.command {
        Commands::Provision(args) => commands::provision::execute(args).await,
        Commands::Link(args) => commands::link::execute(args).await,
    }
}
