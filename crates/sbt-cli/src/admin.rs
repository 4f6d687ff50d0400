//! # Administration Subcommands
//!
//! `init`, role administration (`grant`, `revoke`, `renounce`) and the pause
//! switch (`pause`, `unpause`).

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Args;

use sbt_core::{AccountId, RoleId};
use sbt_state::{CredentialLedger, GenesisConfig};

use crate::{report_rejection, store};

/// Arguments for `sbt init`.
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Initial admin; receives the root admin, minter and pauser roles.
    #[arg(long, value_name = "ACCOUNT", required_unless_present = "genesis")]
    pub admin: Option<AccountId>,
    /// Collection name.
    #[arg(long, default_value = "Soulbound Credentials")]
    pub name: String,
    /// Collection symbol.
    #[arg(long, default_value = "SBT")]
    pub symbol: String,
    /// YAML genesis document; overrides the other flags.
    #[arg(long, value_name = "FILE", conflicts_with = "admin")]
    pub genesis: Option<PathBuf>,
    /// Replace an existing ledger file.
    #[arg(long)]
    pub force: bool,
}

/// Arguments for `sbt grant` and `sbt revoke`.
#[derive(Args, Debug)]
pub struct RoleMemberArgs {
    /// Calling account.
    #[arg(long = "as", value_name = "ACCOUNT")]
    pub caller: AccountId,
    /// Role name (`MINTER_ROLE`) or 0x-hex id.
    pub role: RoleId,
    /// Account whose membership changes.
    pub account: AccountId,
}

/// Arguments for `sbt renounce`.
#[derive(Args, Debug)]
pub struct RenounceArgs {
    /// Calling account; gives up the role.
    #[arg(long = "as", value_name = "ACCOUNT")]
    pub caller: AccountId,
    /// Role name or 0x-hex id.
    pub role: RoleId,
}

/// Arguments for `sbt pause` and `sbt unpause`.
#[derive(Args, Debug)]
pub struct PauseArgs {
    /// Calling account; must bear PAUSER_ROLE.
    #[arg(long = "as", value_name = "ACCOUNT")]
    pub caller: AccountId,
}

/// Execute `sbt init`.
pub fn run_init(args: &InitArgs, state: &Path) -> Result<u8> {
    if state.exists() && !args.force {
        bail!(
            "ledger file already exists: {} (use --force to replace it)",
            state.display()
        );
    }

    let genesis = match (&args.genesis, args.admin) {
        (Some(path), _) => {
            let source = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read genesis config: {}", path.display()))?;
            GenesisConfig::from_yaml(&source)
                .with_context(|| format!("invalid genesis config: {}", path.display()))?
        }
        (None, Some(admin)) => GenesisConfig::new(&args.name, &args.symbol, admin),
        (None, None) => bail!("either --admin or --genesis is required"),
    };

    let ledger = CredentialLedger::genesis(genesis);
    store::save(&ledger, state)?;
    println!(
        "OK: initialized {} ({}) at {}",
        ledger.name(),
        ledger.symbol(),
        state.display()
    );
    Ok(0)
}

/// Execute `sbt grant`.
pub fn run_grant(args: &RoleMemberArgs, state: &Path) -> Result<u8> {
    let outcome = store::transact(state, |service| {
        service.grant_role(args.caller, args.role, args.account)
    })?;
    Ok(match outcome {
        Ok(true) => {
            println!("OK: granted {} to {}", args.role.label(), args.account);
            0
        }
        Ok(false) => {
            println!("OK: {} already holds {}", args.account, args.role.label());
            0
        }
        Err(err) => report_rejection(&err),
    })
}

/// Execute `sbt revoke`.
pub fn run_revoke(args: &RoleMemberArgs, state: &Path) -> Result<u8> {
    let outcome = store::transact(state, |service| {
        service.revoke_role(args.caller, args.role, args.account)
    })?;
    Ok(match outcome {
        Ok(true) => {
            println!("OK: revoked {} from {}", args.role.label(), args.account);
            0
        }
        Ok(false) => {
            println!("OK: {} does not hold {}", args.account, args.role.label());
            0
        }
        Err(err) => report_rejection(&err),
    })
}

/// Execute `sbt renounce`.
pub fn run_renounce(args: &RenounceArgs, state: &Path) -> Result<u8> {
    let outcome = store::transact(state, |service| {
        service.renounce_role(args.caller, args.role, args.caller)
    })?;
    Ok(match outcome {
        Ok(_) => {
            println!("OK: {} no longer holds {}", args.caller, args.role.label());
            0
        }
        Err(err) => report_rejection(&err),
    })
}

/// Execute `sbt pause`.
pub fn run_pause(args: &PauseArgs, state: &Path) -> Result<u8> {
    let outcome = store::transact(state, |service| service.pause(args.caller))?;
    Ok(match outcome {
        Ok(()) => {
            println!("OK: issuance paused");
            0
        }
        Err(err) => report_rejection(&err),
    })
}

/// Execute `sbt unpause`.
pub fn run_unpause(args: &PauseArgs, state: &Path) -> Result<u8> {
    let outcome = store::transact(state, |service| service.unpause(args.caller))?;
    Ok(match outcome {
        Ok(()) => {
            println!("OK: issuance resumed");
            0
        }
        Err(err) => report_rejection(&err),
    })
}
