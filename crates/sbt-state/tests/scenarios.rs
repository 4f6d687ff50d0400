//! End-to-end walkthrough of a credential program: an admin delegates
//! issuance, credentials are minted singly and in batches, the circuit
//! breaker trips and resets, and transfer attempts bounce off.

use sbt_core::{AccountId, CredentialId, RoleId};
use sbt_state::{
    CredentialError, CredentialLedger, CredentialService, EventKind, GenesisConfig,
};

fn account(tag: u8) -> AccountId {
    let mut bytes = [0u8; 20];
    bytes[0] = tag;
    AccountId::from_bytes(bytes)
}

struct Cast {
    admin: AccountId,
    alice: AccountId,
    bob: AccountId,
    carol: AccountId,
    dave: AccountId,
    eve: AccountId,
}

fn cast() -> Cast {
    Cast {
        admin: account(0xad),
        alice: account(0xa1),
        bob: account(0xb0),
        carol: account(0xca),
        dave: account(0xda),
        eve: account(0xee),
    }
}

#[test]
fn credential_program_lifecycle() {
    let c = cast();
    let mut ledger =
        CredentialLedger::genesis(GenesisConfig::new("Course Certificates", "CERT", c.admin));

    // Admin delegates issuance; Alice mints to Bob.
    {
        let mut service = CredentialService::new(&mut ledger);
        assert!(service.grant_role(c.admin, RoleId::minter(), c.alice).unwrap());
        let id = service.mint_credential(c.alice, c.bob, "ipfs://cid1").unwrap();
        assert_eq!(id, CredentialId::new(1));
        assert_eq!(service.owner_of(id).unwrap(), c.bob);
        assert_eq!(service.get_credential(id).unwrap(), "ipfs://cid1");
    }

    // Batch issuance continues the same id sequence.
    {
        let mut service = CredentialService::new(&mut ledger);
        let ids = service
            .batch_mint_credentials(
                c.alice,
                &[c.carol, c.dave],
                &["u1".to_string(), "u2".to_string()],
            )
            .unwrap();
        assert_eq!(ids, vec![CredentialId::new(2), CredentialId::new(3)]);
        assert_eq!(service.owner_of(ids[0]).unwrap(), c.carol);
        assert_eq!(service.owner_of(ids[1]).unwrap(), c.dave);
    }
    assert_eq!(ledger.id_counter(), 3);

    // An account without the minter role is refused.
    let err = CredentialService::new(&mut ledger)
        .mint_credential(c.eve, c.eve, "ipfs://forged")
        .unwrap_err();
    assert!(matches!(err, CredentialError::PermissionDenied { account, .. } if account == c.eve));
    assert_eq!(ledger.id_counter(), 3);

    // Pausing blocks Alice's issuance.
    CredentialService::new(&mut ledger).pause(c.admin).unwrap();
    let err = CredentialService::new(&mut ledger)
        .mint_credential(c.alice, c.bob, "ipfs://cid5")
        .unwrap_err();
    assert_eq!(err, CredentialError::Paused);
    assert_eq!(ledger.id_counter(), 3);

    // Bob cannot move his credential.
    let err = CredentialService::new(&mut ledger)
        .transfer(c.bob, c.eve, CredentialId::new(1))
        .unwrap_err();
    assert_eq!(err.kind(), "SOULBOUND_VIOLATION");
    assert_eq!(ledger.owner_of(CredentialId::new(1)).unwrap(), c.bob);

    // Unpausing resumes issuance at the next id.
    CredentialService::new(&mut ledger).unpause(c.admin).unwrap();
    let id = CredentialService::new(&mut ledger)
        .mint_credential(c.alice, c.bob, "ipfs://cid4")
        .unwrap();
    assert_eq!(id, CredentialId::new(4));

    assert_eq!(ledger.balance_of(c.bob), 2);
    assert_eq!(ledger.total_supply(), 4);
}

#[test]
fn journal_records_only_committed_effects() {
    let c = cast();
    let mut ledger = CredentialLedger::genesis(GenesisConfig::new("Badges", "BDG", c.admin));
    let genesis_events = ledger.events_since(0).len();

    let mut service = CredentialService::new(&mut ledger);
    service.grant_role(c.admin, RoleId::minter(), c.alice).unwrap();
    service.mint_credential(c.alice, c.bob, "ipfs://a").unwrap();
    let _ = service.mint_credential(c.eve, c.bob, "ipfs://b");
    let _ = service.batch_mint_credentials(c.alice, &[c.bob], &[]);
    let _ = service.unpause(c.admin);
    service.pause(c.admin).unwrap();

    let events = ledger.events_since(genesis_events as u64);
    let kinds: Vec<_> = events.iter().map(|e| &e.kind).collect();
    assert_eq!(kinds.len(), 3);
    assert!(matches!(kinds[0], EventKind::RoleGranted { account, .. } if *account == c.alice));
    assert!(matches!(kinds[1], EventKind::CredentialIssued { id, .. } if id.value() == 1));
    assert!(matches!(kinds[2], EventKind::Paused { account } if *account == c.admin));

    let sequences: Vec<u64> = ledger.events_since(0).iter().map(|e| e.sequence).collect();
    let expected: Vec<u64> = (1..=sequences.len() as u64).collect();
    assert_eq!(sequences, expected);
}

#[test]
fn admin_can_hand_over_and_step_down() {
    let c = cast();
    let mut ledger = CredentialLedger::genesis(GenesisConfig::new("Badges", "BDG", c.admin));
    let mut service = CredentialService::new(&mut ledger);

    service
        .grant_role(c.admin, RoleId::DEFAULT_ADMIN, c.alice)
        .unwrap();
    assert!(service
        .renounce_role(c.admin, RoleId::DEFAULT_ADMIN, c.admin)
        .unwrap());

    // The former admin can no longer manage roles.
    let err = service
        .grant_role(c.admin, RoleId::minter(), c.bob)
        .unwrap_err();
    assert_eq!(err.kind(), "PERMISSION_DENIED");

    // The new admin can, and can remove the old admin's remaining roles.
    assert!(service.revoke_role(c.alice, RoleId::minter(), c.admin).unwrap());
    assert!(!service.has_role(RoleId::minter(), c.admin));
}

#[test]
fn nobody_can_renounce_on_behalf_of_another() {
    let c = cast();
    let mut ledger = CredentialLedger::genesis(GenesisConfig::new("Badges", "BDG", c.admin));
    let err = CredentialService::new(&mut ledger)
        .renounce_role(c.admin, RoleId::minter(), c.alice)
        .unwrap_err();
    assert_eq!(err.kind(), "PERMISSION_DENIED");
}
