//! End-to-end runs of the `sbt` subcommands against one ledger file.

use std::path::Path;

use sbt_cli::admin::{run_grant, run_init, run_pause, run_unpause, InitArgs, PauseArgs, RoleMemberArgs};
use sbt_cli::issue::{run_batch_mint, run_mint, BatchMintArgs, MintArgs};
use sbt_cli::query::{run_has_role, run_status, HasRoleArgs};
use sbt_cli::store;
use sbt_cli::transfer::{run_transfer, TransferArgs};
use sbt_cli::EXIT_REJECTED;
use sbt_core::{AccountId, CredentialId, RoleId};

fn account(tag: u8) -> AccountId {
    AccountId::from_bytes([tag; 20])
}

fn mint(path: &Path, caller: AccountId, to: AccountId, uri: &str) -> u8 {
    let args = MintArgs {
        caller,
        to,
        uri: uri.into(),
    };
    run_mint(&args, path).unwrap()
}

#[test]
fn issuance_program_through_the_cli() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sbt-state.json");
    let admin = account(0xad);
    let issuer = account(0x11);

    let init = InitArgs {
        admin: Some(admin),
        name: "Badges".into(),
        symbol: "BDG".into(),
        genesis: None,
        force: false,
    };
    assert_eq!(run_init(&init, &path).unwrap(), 0);

    // A second issuer is onboarded by the admin.
    let grant = RoleMemberArgs {
        caller: admin,
        role: RoleId::minter(),
        account: issuer,
    };
    assert_eq!(run_grant(&grant, &path).unwrap(), 0);
    let check = HasRoleArgs {
        role: RoleId::minter(),
        account: issuer,
    };
    assert_eq!(run_has_role(&check, &path).unwrap(), 0);

    assert_eq!(mint(&path, issuer, account(0xb0), "ipfs://cid1"), 0);

    // Emergency stop blocks every issuance path.
    let pause = PauseArgs { caller: admin };
    assert_eq!(run_pause(&pause, &path).unwrap(), 0);
    assert_eq!(mint(&path, issuer, account(0xb1), "ipfs://cid2"), EXIT_REJECTED);
    let batch = BatchMintArgs {
        caller: issuer,
        to: vec![account(0xb1)],
        uris: vec!["ipfs://cid2".into()],
    };
    assert_eq!(run_batch_mint(&batch, &path).unwrap(), EXIT_REJECTED);
    assert_eq!(run_unpause(&pause, &path).unwrap(), 0);
    assert_eq!(run_batch_mint(&batch, &path).unwrap(), 0);

    // The holder cannot move the credential.
    let before = std::fs::read(&path).unwrap();
    let transfer = TransferArgs {
        from: account(0xb0),
        to: account(0xee),
        id: CredentialId::new(1),
    };
    assert_eq!(run_transfer(&transfer, &path).unwrap(), EXIT_REJECTED);
    assert_eq!(std::fs::read(&path).unwrap(), before);

    let ledger = store::load(&path).unwrap();
    assert_eq!(ledger.total_supply(), 2);
    assert_eq!(ledger.owner_of(CredentialId::new(1)), Ok(account(0xb0)));
    assert_eq!(ledger.owner_of(CredentialId::new(2)), Ok(account(0xb1)));
    assert!(!ledger.is_paused());
    assert_eq!(run_status(&path).unwrap(), 0);
}

#[test]
fn tampered_file_is_refused() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sbt-state.json");
    let init = InitArgs {
        admin: Some(account(0xad)),
        name: "Badges".into(),
        symbol: "BDG".into(),
        genesis: None,
        force: false,
    };
    run_init(&init, &path).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    std::fs::write(&path, text.replace("Badges", "Forged")).unwrap();

    assert!(run_status(&path).is_err());
    assert!(run_mint(
        &MintArgs {
            caller: account(0xad),
            to: account(0xb0),
            uri: "u".into(),
        },
        &path,
    )
    .is_err());
}
