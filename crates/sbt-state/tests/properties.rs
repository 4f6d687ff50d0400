//! Property tests over arbitrary call sequences.

use proptest::prelude::*;

use sbt_core::{AccountId, CredentialId, RoleId};
use sbt_state::{CredentialLedger, CredentialService, GenesisConfig};

const ADMIN: AccountId = AccountId::from_bytes([0xad; 20]);

fn fresh() -> CredentialLedger {
    CredentialLedger::genesis(GenesisConfig::new("Props", "PRP", ADMIN))
}

fn arb_account() -> impl Strategy<Value = AccountId> {
    any::<[u8; 20]>().prop_map(AccountId::from_bytes)
}

#[derive(Debug, Clone)]
enum Call {
    Mint(AccountId),
    Batch(Vec<AccountId>),
    Mismatched(Vec<AccountId>),
    Pause,
    Unpause,
    Outsider(AccountId),
}

fn arb_call() -> impl Strategy<Value = Call> {
    prop_oneof![
        arb_account().prop_map(Call::Mint),
        prop::collection::vec(arb_account(), 0..5).prop_map(Call::Batch),
        prop::collection::vec(arb_account(), 1..5).prop_map(Call::Mismatched),
        Just(Call::Pause),
        Just(Call::Unpause),
        arb_account().prop_map(Call::Outsider),
    ]
}

proptest! {
    /// Ids handed out across single and batch issuance are strictly
    /// increasing, gap-free, and the counter only moves on success.
    #[test]
    fn ids_are_sequential_across_paths(calls in prop::collection::vec(arb_call(), 1..30)) {
        let mut ledger = fresh();
        let mut issued: Vec<CredentialId> = Vec::new();

        for call in calls {
            let before = ledger.id_counter();
            let mut service = CredentialService::new(&mut ledger);
            let result = match call {
                Call::Mint(to) => service.mint_credential(ADMIN, to, "uri").map(|id| vec![id]),
                Call::Batch(to) => {
                    let uris = vec!["uri".to_string(); to.len()];
                    service.batch_mint_credentials(ADMIN, &to, &uris)
                }
                Call::Mismatched(to) => {
                    let uris = vec!["uri".to_string(); to.len() - 1];
                    service.batch_mint_credentials(ADMIN, &to, &uris)
                }
                Call::Pause => service.pause(ADMIN).map(|_| Vec::new()),
                Call::Unpause => service.unpause(ADMIN).map(|_| Vec::new()),
                Call::Outsider(caller) if caller != ADMIN => {
                    service.mint_credential(caller, caller, "uri").map(|id| vec![id])
                }
                Call::Outsider(_) => Ok(Vec::new()),
            };

            match result {
                Ok(ids) => {
                    prop_assert_eq!(ledger.id_counter(), before + ids.len() as u64);
                    issued.extend(ids);
                }
                Err(_) => prop_assert_eq!(ledger.id_counter(), before),
            }
        }

        let expected: Vec<CredentialId> = (1..=issued.len() as u64).map(CredentialId::new).collect();
        prop_assert_eq!(&issued, &expected);
        prop_assert_eq!(ledger.total_supply(), issued.len() as u64);
    }

    /// Transfer-shaped calls fail for every input and never change state.
    #[test]
    fn guard_is_total(
        from in arb_account(),
        to in arb_account(),
        raw_id in any::<u64>(),
        data in prop::collection::vec(any::<u8>(), 0..16),
        enabled in any::<bool>(),
    ) {
        let mut ledger = fresh();
        CredentialService::new(&mut ledger).mint_credential(ADMIN, from, "uri").unwrap();
        let before = ledger.clone();
        let id = CredentialId::new(raw_id);

        let service = CredentialService::new(&mut ledger);
        let results = [
            service.transfer(from, to, id),
            service.safe_transfer(from, to, id, &data),
            service.approve(to, id),
            service.set_approval_for_all(to, enabled),
        ];
        for result in results {
            prop_assert_eq!(result.unwrap_err().kind(), "SOULBOUND_VIOLATION");
        }
        prop_assert_eq!(ledger, before);
    }

    /// Mismatched batches leave the ledger byte-for-byte unchanged,
    /// whoever the caller and whatever the pause state.
    #[test]
    fn mismatched_batch_changes_nothing(
        caller in arb_account(),
        to in prop::collection::vec(arb_account(), 0..6),
        extra in 1usize..4,
        paused in any::<bool>(),
    ) {
        let mut ledger = fresh();
        if paused {
            CredentialService::new(&mut ledger).pause(ADMIN).unwrap();
        }
        let before = ledger.clone();
        let uris = vec!["uri".to_string(); to.len() + extra];
        let err = CredentialService::new(&mut ledger)
            .batch_mint_credentials(caller, &to, &uris)
            .unwrap_err();
        prop_assert_eq!(err.kind(), "LENGTH_MISMATCH");
        prop_assert_eq!(ledger, before);
    }

    /// Revocation always removes membership, whatever was held before.
    #[test]
    fn revoke_removes_membership(account in arb_account(), name in "[A-Z]{3,12}_ROLE") {
        let role = RoleId::from_name(&name);
        let mut ledger = fresh();
        let mut service = CredentialService::new(&mut ledger);
        service.grant_role(ADMIN, role, account).unwrap();
        prop_assert!(service.has_role(role, account));
        service.revoke_role(ADMIN, role, account).unwrap();
        prop_assert!(!service.has_role(role, account));
    }
}
