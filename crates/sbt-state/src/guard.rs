//! # Transfer Guard
//!
//! Token-capability abstraction for transfer- and approval-shaped entry
//! points. A capability is either [`Transferability::Transferable`] or
//! [`Transferability::NonTransferable`]; this ledger only ships the latter,
//! [`TransferGuard`], whose every operation is a constant failure.
//!
//! The guard holds no reference to ledger state, so it can neither read nor
//! mutate it. Rejection is total: it does not depend on the caller, the pause
//! flag, whether the id exists, or whether an account is zero-valued.

use serde::{Deserialize, Serialize};

use sbt_core::{AccountId, CredentialId};

use crate::error::CredentialError;

/// Whether a token surface permits ownership changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Transferability {
    /// Ownership may change after issuance.
    Transferable,
    /// Ownership is fixed at issuance.
    NonTransferable,
}

/// The transferable-token surface expected by consumers.
pub trait TokenCapability {
    /// Which variant this capability implements.
    fn transferability(&self) -> Transferability;

    /// Move `id` from `from` to `to`.
    fn transfer(&self, from: AccountId, to: AccountId, id: CredentialId)
        -> Result<(), CredentialError>;

    /// Move `id` from `from` to `to`, passing `data` to the receiver.
    fn safe_transfer(
        &self,
        from: AccountId,
        to: AccountId,
        id: CredentialId,
        data: &[u8],
    ) -> Result<(), CredentialError>;

    /// Allow `spender` to move `id`.
    fn approve(&self, spender: AccountId, id: CredentialId) -> Result<(), CredentialError>;

    /// Allow or disallow `operator` to move every credential of the caller.
    fn set_approval_for_all(
        &self,
        operator: AccountId,
        enabled: bool,
    ) -> Result<(), CredentialError>;
}

/// The non-transferable capability.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransferGuard;

impl TransferGuard {
    fn reject(operation: &'static str) -> Result<(), CredentialError> {
        tracing::debug!(operation, "rejected transfer-shaped call on soulbound credential");
        Err(CredentialError::SoulboundViolation { operation })
    }
}

impl TokenCapability for TransferGuard {
    fn transferability(&self) -> Transferability {
        Transferability::NonTransferable
    }

    fn transfer(
        &self,
        _from: AccountId,
        _to: AccountId,
        _id: CredentialId,
    ) -> Result<(), CredentialError> {
        Self::reject("transfer")
    }

    fn safe_transfer(
        &self,
        _from: AccountId,
        _to: AccountId,
        _id: CredentialId,
        _data: &[u8],
    ) -> Result<(), CredentialError> {
        Self::reject("safe_transfer")
    }

    fn approve(&self, _spender: AccountId, _id: CredentialId) -> Result<(), CredentialError> {
        Self::reject("approve")
    }

    fn set_approval_for_all(
        &self,
        _operator: AccountId,
        _enabled: bool,
    ) -> Result<(), CredentialError> {
        Self::reject("set_approval_for_all")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guard_is_non_transferable() {
        assert_eq!(
            TransferGuard.transferability(),
            Transferability::NonTransferable
        );
    }

    #[test]
    fn test_every_operation_is_soulbound_violation() {
        let guard = TransferGuard;
        let a = AccountId::from_bytes([1; 20]);
        let id = CredentialId::new(1);
        let results = [
            guard.transfer(a, AccountId::ZERO, id),
            guard.safe_transfer(a, a, id, b"payload"),
            guard.approve(AccountId::ZERO, CredentialId::new(0)),
            guard.set_approval_for_all(a, true),
            guard.set_approval_for_all(a, false),
        ];
        for result in results {
            assert_eq!(result.unwrap_err().kind(), "SOULBOUND_VIOLATION");
        }
    }

    #[test]
    fn test_operation_name_reported() {
        let err = TransferGuard
            .approve(AccountId::ZERO, CredentialId::new(u64::MAX))
            .unwrap_err();
        assert_eq!(
            err,
            CredentialError::SoulboundViolation {
                operation: "approve"
            }
        );
    }
}
