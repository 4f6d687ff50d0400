//! # sbt CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use sbt_cli::admin::{
    run_grant, run_init, run_pause, run_renounce, run_revoke, run_unpause, InitArgs, PauseArgs,
    RenounceArgs, RoleMemberArgs,
};
use sbt_cli::issue::{run_batch_mint, run_mint, BatchMintArgs, MintArgs};
use sbt_cli::query::{
    run_balance, run_events, run_has_role, run_owner_of, run_show, run_status, BalanceArgs,
    CredentialArgs, EventsArgs, HasRoleArgs,
};
use sbt_cli::transfer::{run_transfer, TransferArgs};

/// Soulbound credential ledger CLI.
///
/// Issues non-transferable credentials under role-based authorization and an
/// emergency pause switch. State lives in a single sealed snapshot file.
#[derive(Parser, Debug)]
#[command(name = "sbt", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Ledger snapshot file.
    #[arg(long, global = true, value_name = "FILE", default_value = "sbt-state.json")]
    state: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create a new ledger file.
    Init(InitArgs),

    /// Issue one credential.
    Mint(MintArgs),

    /// Issue several credentials atomically.
    BatchMint(BatchMintArgs),

    /// Show a credential.
    Show(CredentialArgs),

    /// Print the holder of a credential.
    OwnerOf(CredentialArgs),

    /// Count and list the credentials an account holds.
    Balance(BalanceArgs),

    /// Grant a role (caller must hold the role's admin role).
    Grant(RoleMemberArgs),

    /// Revoke a role (caller must hold the role's admin role).
    Revoke(RoleMemberArgs),

    /// Give up a role held by the caller.
    Renounce(RenounceArgs),

    /// Check role membership; exit code 1 when absent.
    HasRole(HasRoleArgs),

    /// Halt issuance.
    Pause(PauseArgs),

    /// Resume issuance.
    Unpause(PauseArgs),

    /// Ledger summary and state digest.
    Status,

    /// Attempt a transfer. Always refused.
    Transfer(TransferArgs),

    /// Print journal events as JSON lines.
    Events(EventsArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(state = %cli.state.display(), "sbt CLI starting");

    let state = cli.state.as_path();
    let result = match &cli.command {
        Commands::Init(args) => run_init(args, state),
        Commands::Mint(args) => run_mint(args, state),
        Commands::BatchMint(args) => run_batch_mint(args, state),
        Commands::Show(args) => run_show(args, state),
        Commands::OwnerOf(args) => run_owner_of(args, state),
        Commands::Balance(args) => run_balance(args, state),
        Commands::Grant(args) => run_grant(args, state),
        Commands::Revoke(args) => run_revoke(args, state),
        Commands::Renounce(args) => run_renounce(args, state),
        Commands::HasRole(args) => run_has_role(args, state),
        Commands::Pause(args) => run_pause(args, state),
        Commands::Unpause(args) => run_unpause(args, state),
        Commands::Status => run_status(state),
        Commands::Transfer(args) => run_transfer(args, state),
        Commands::Events(args) => run_events(args, state),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
