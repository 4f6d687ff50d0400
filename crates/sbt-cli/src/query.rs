//! # Query Subcommands
//!
//! Read-only commands. They never rewrite the ledger file and work in both
//! operating states.

use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;

use sbt_core::{AccountId, CredentialId, RoleId};

use crate::{report_rejection, store};

/// Arguments for `sbt show` and `sbt owner-of`.
#[derive(Args, Debug)]
pub struct CredentialArgs {
    /// Credential id.
    pub id: CredentialId,
}

/// Arguments for `sbt balance`.
#[derive(Args, Debug)]
pub struct BalanceArgs {
    /// Holder account.
    pub account: AccountId,
}

/// Arguments for `sbt has-role`.
#[derive(Args, Debug)]
pub struct HasRoleArgs {
    /// Role name or 0x-hex id.
    pub role: RoleId,
    /// Account to check.
    pub account: AccountId,
}

/// Arguments for `sbt events`.
#[derive(Args, Debug)]
pub struct EventsArgs {
    /// Print events with a sequence number greater than this.
    #[arg(long, default_value_t = 0)]
    pub since: u64,
}

/// Execute `sbt show`: print the credential as JSON.
pub fn run_show(args: &CredentialArgs, state: &Path) -> Result<u8> {
    let ledger = store::load(state)?;
    match ledger.credential(args.id) {
        Ok(credential) => {
            let rendered = serde_json::json!({
                "id": credential.id,
                "owner": credential.owner,
                "uri": credential.uri,
                "locked": true,
            });
            println!("{}", serde_json::to_string_pretty(&rendered)?);
            Ok(0)
        }
        Err(err) => Ok(report_rejection(&err)),
    }
}

/// Execute `sbt owner-of`.
pub fn run_owner_of(args: &CredentialArgs, state: &Path) -> Result<u8> {
    let ledger = store::load(state)?;
    Ok(match ledger.owner_of(args.id) {
        Ok(owner) => {
            println!("{owner}");
            0
        }
        Err(err) => report_rejection(&err),
    })
}

/// Execute `sbt balance`: count, then one id per line.
pub fn run_balance(args: &BalanceArgs, state: &Path) -> Result<u8> {
    let ledger = store::load(state)?;
    println!("{}", ledger.balance_of(args.account));
    for id in ledger.credentials_of(args.account) {
        println!("  {id}");
    }
    Ok(0)
}

/// Execute `sbt has-role`. Exit code 0 when the account bears the role, 1
/// otherwise.
pub fn run_has_role(args: &HasRoleArgs, state: &Path) -> Result<u8> {
    let ledger = store::load(state)?;
    let member = ledger.has_role(args.role, args.account);
    println!("{member}");
    Ok(if member { 0 } else { 1 })
}

/// Execute `sbt status`: ledger summary as JSON.
pub fn run_status(state: &Path) -> Result<u8> {
    let ledger = store::load(state)?;
    let digest = ledger
        .state_digest()
        .context("failed to compute state digest")?;
    let summary = serde_json::json!({
        "name": ledger.name(),
        "symbol": ledger.symbol(),
        "state": ledger.operating_state(),
        "total_supply": ledger.total_supply(),
        "id_counter": ledger.id_counter(),
        "minters": ledger.role_members(RoleId::minter()),
        "pausers": ledger.role_members(RoleId::pauser()),
        "digest": digest.to_string(),
    });
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(0)
}

/// Execute `sbt events`: one JSON object per line.
pub fn run_events(args: &EventsArgs, state: &Path) -> Result<u8> {
    let ledger = store::load(state)?;
    for event in ledger.events_since(args.since) {
        println!("{}", serde_json::to_string(event)?);
    }
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::admin::{run_init, InitArgs};
    use crate::EXIT_REJECTED;

    fn init(path: &Path) -> AccountId {
        let admin = AccountId::from_bytes([1; 20]);
        let args = InitArgs {
            admin: Some(admin),
            name: "Badges".into(),
            symbol: "BDG".into(),
            genesis: None,
            force: false,
        };
        run_init(&args, path).unwrap();
        admin
    }

    #[test]
    fn unknown_credential_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.json");
        init(&path);
        let args = CredentialArgs {
            id: CredentialId::new(1),
        };
        assert_eq!(run_show(&args, &path).unwrap(), EXIT_REJECTED);
        assert_eq!(run_owner_of(&args, &path).unwrap(), EXIT_REJECTED);
    }

    #[test]
    fn has_role_exit_code_reflects_membership() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.json");
        let admin = init(&path);
        let yes = HasRoleArgs {
            role: RoleId::minter(),
            account: admin,
        };
        let no = HasRoleArgs {
            role: RoleId::minter(),
            account: AccountId::ZERO,
        };
        assert_eq!(run_has_role(&yes, &path).unwrap(), 0);
        assert_eq!(run_has_role(&no, &path).unwrap(), 1);
    }

    #[test]
    fn queries_do_not_rewrite_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.json");
        init(&path);
        let before = std::fs::read(&path).unwrap();
        run_status(&path).unwrap();
        run_events(&EventsArgs { since: 0 }, &path).unwrap();
        run_balance(
            &BalanceArgs {
                account: AccountId::ZERO,
            },
            &path,
        )
        .unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), before);
    }
}
