//! # Credential Service
//!
//! Orchestrates one external call against a [`CredentialLedger`]. The service
//! owns no state: it borrows the ledger mutably for exactly one call, which is
//! the exclusive-writer transaction boundary.
//!
//! ## Issuance pipeline
//!
//! ```text
//! input shape check ──▶ preconditions (HasRole(MINTER), NotPaused) ──▶ allocate + issue
//!                                                                         │
//!                          any failure ◀── rollback counter, table, journal
//! ```
//!
//! Preconditions are an ordered list evaluated before any mutation; the
//! first failing one determines the error. Single and batch mint share the
//! same list and the same issuance loop, so both are all-or-nothing.

use sbt_core::{AccountId, CredentialId, RoleId};

use crate::error::CredentialError;
use crate::guard::{TokenCapability, TransferGuard};
use crate::journal::EventKind;
use crate::ledger::CredentialLedger;

// ─── Preconditions ──────────────────────────────────────────────────

/// A guard evaluated before a mutating call touches the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Precondition {
    /// Caller must bear the role.
    HasRole(RoleId),
    /// The pause switch must be in the `ACTIVE` state.
    NotPaused,
}

impl Precondition {
    /// Evaluate against the current ledger.
    pub fn check(&self, ledger: &CredentialLedger, caller: AccountId) -> Result<(), CredentialError> {
        match self {
            Self::HasRole(role) => ledger.roles().check_role(*role, caller),
            Self::NotPaused => {
                if ledger.is_paused() {
                    Err(CredentialError::Paused)
                } else {
                    Ok(())
                }
            }
        }
    }
}

/// Preconditions shared by single and batch issuance, in evaluation order.
pub fn issuance_preconditions() -> [Precondition; 2] {
    [Precondition::HasRole(RoleId::minter()), Precondition::NotPaused]
}

fn check_all(
    preconditions: &[Precondition],
    ledger: &CredentialLedger,
    caller: AccountId,
) -> Result<(), CredentialError> {
    preconditions
        .iter()
        .try_for_each(|precondition| precondition.check(ledger, caller))
}

// ─── Service ────────────────────────────────────────────────────────

/// One call's view of the ledger.
#[derive(Debug)]
pub struct CredentialService<'a> {
    ledger: &'a mut CredentialLedger,
    guard: TransferGuard,
}

impl<'a> CredentialService<'a> {
    /// Borrow `ledger` for one call.
    pub fn new(ledger: &'a mut CredentialLedger) -> Self {
        Self {
            ledger,
            guard: TransferGuard,
        }
    }

    /// Read access to the borrowed ledger.
    pub fn ledger(&self) -> &CredentialLedger {
        &*self.ledger
    }

    // ── Issuance ─────────────────────────────────────────────────────

    /// Issue one credential to `to`. Returns the allocated id.
    pub fn mint_credential(
        &mut self,
        caller: AccountId,
        to: AccountId,
        uri: impl Into<String>,
    ) -> Result<CredentialId, CredentialError> {
        let uri = uri.into();
        self.issue_guarded(caller, |ledger, issued| {
            let id = ledger.issue_next(to, uri)?;
            issued.push(id);
            Ok(id)
        })
    }

    /// Issue one credential per `(to[i], uris[i])` pair, in order, with
    /// sequential ids. Either every credential is issued or none is.
    pub fn batch_mint_credentials(
        &mut self,
        caller: AccountId,
        to: &[AccountId],
        uris: &[String],
    ) -> Result<Vec<CredentialId>, CredentialError> {
        if to.len() != uris.len() {
            tracing::warn!(
                %caller,
                recipients = to.len(),
                uris = uris.len(),
                "batch mint rejected: length mismatch"
            );
            return Err(CredentialError::LengthMismatch {
                recipients: to.len(),
                uris: uris.len(),
            });
        }
        self.issue_guarded(caller, |ledger, issued| {
            for (owner, uri) in to.iter().zip(uris) {
                issued.push(ledger.issue_next(*owner, uri.clone())?);
            }
            Ok(issued.clone())
        })
    }

    /// Check the issuance preconditions, then run `issue` as one
    /// all-or-nothing step. `issue` records every id it allocates in
    /// `issued` so a failure can be rolled back exactly.
    fn issue_guarded<R>(
        &mut self,
        caller: AccountId,
        issue: impl FnOnce(&mut CredentialLedger, &mut Vec<CredentialId>) -> Result<R, CredentialError>,
    ) -> Result<R, CredentialError> {
        if let Err(err) = check_all(&issuance_preconditions(), &*self.ledger, caller) {
            tracing::warn!(%caller, error = %err, "issuance rejected");
            return Err(err);
        }

        let checkpoint = self.ledger.checkpoint();
        let mut issued = Vec::new();
        match issue(&mut *self.ledger, &mut issued) {
            Ok(outcome) => {
                tracing::info!(
                    %caller,
                    count = issued.len(),
                    first = ?issued.first(),
                    last = ?issued.last(),
                    "credentials issued"
                );
                Ok(outcome)
            }
            Err(err) => {
                tracing::error!(
                    %caller,
                    error = %err,
                    discarded = issued.len(),
                    "issuance aborted; rolling back"
                );
                self.ledger.rollback(checkpoint, &issued);
                Err(err)
            }
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    /// Metadata reference of `id`. Available in both operating states.
    pub fn get_credential(&self, id: CredentialId) -> Result<&str, CredentialError> {
        self.ledger.get_credential(id)
    }

    /// Owner of `id`.
    pub fn owner_of(&self, id: CredentialId) -> Result<AccountId, CredentialError> {
        self.ledger.owner_of(id)
    }

    /// Whether `account` bears `role`.
    pub fn has_role(&self, role: RoleId, account: AccountId) -> bool {
        self.ledger.has_role(role, account)
    }

    /// Whether issuance is blocked.
    pub fn is_paused(&self) -> bool {
        self.ledger.is_paused()
    }

    // ── Pause switch ─────────────────────────────────────────────────

    /// Engage the circuit breaker.
    pub fn pause(&mut self, caller: AccountId) -> Result<(), CredentialError> {
        let (switch, roles) = self.ledger.pause_and_roles_mut();
        if let Err(err) = switch.pause(roles, caller) {
            tracing::warn!(%caller, error = %err, "pause rejected");
            return Err(err);
        }
        self.ledger
            .journal_mut()
            .record(EventKind::Paused { account: caller });
        tracing::info!(%caller, "credential issuance paused");
        Ok(())
    }

    /// Release the circuit breaker.
    pub fn unpause(&mut self, caller: AccountId) -> Result<(), CredentialError> {
        let (switch, roles) = self.ledger.pause_and_roles_mut();
        if let Err(err) = switch.unpause(roles, caller) {
            tracing::warn!(%caller, error = %err, "unpause rejected");
            return Err(err);
        }
        self.ledger
            .journal_mut()
            .record(EventKind::Unpaused { account: caller });
        tracing::info!(%caller, "credential issuance resumed");
        Ok(())
    }

    // ── Roles ────────────────────────────────────────────────────────

    /// Grant `role` to `account`. Returns whether membership changed.
    pub fn grant_role(
        &mut self,
        caller: AccountId,
        role: RoleId,
        account: AccountId,
    ) -> Result<bool, CredentialError> {
        let changed = self.ledger.roles_mut().grant_role(role, account, caller)?;
        if changed {
            self.ledger.journal_mut().record(EventKind::RoleGranted {
                role,
                account,
                sender: caller,
            });
            tracing::info!(%caller, role = %role.label(), %account, "role granted");
        }
        Ok(changed)
    }

    /// Revoke `role` from `account`. Returns whether membership changed.
    pub fn revoke_role(
        &mut self,
        caller: AccountId,
        role: RoleId,
        account: AccountId,
    ) -> Result<bool, CredentialError> {
        let changed = self.ledger.roles_mut().revoke_role(role, account, caller)?;
        if changed {
            self.record_revocation(caller, role, account);
        }
        Ok(changed)
    }

    /// Give up `role`. `account` must be the caller.
    pub fn renounce_role(
        &mut self,
        caller: AccountId,
        role: RoleId,
        account: AccountId,
    ) -> Result<bool, CredentialError> {
        let changed = self.ledger.roles_mut().renounce_role(role, account, caller)?;
        if changed {
            self.record_revocation(caller, role, account);
        }
        Ok(changed)
    }

    fn record_revocation(&mut self, caller: AccountId, role: RoleId, account: AccountId) {
        self.ledger.journal_mut().record(EventKind::RoleRevoked {
            role,
            account,
            sender: caller,
        });
        tracing::info!(%caller, role = %role.label(), %account, "role revoked");
    }

    // ── Transfer surface ─────────────────────────────────────────────

    /// Always fails with `SoulboundViolation`.
    pub fn transfer(
        &self,
        from: AccountId,
        to: AccountId,
        id: CredentialId,
    ) -> Result<(), CredentialError> {
        self.guard.transfer(from, to, id)
    }

    /// Always fails with `SoulboundViolation`.
    pub fn safe_transfer(
        &self,
        from: AccountId,
        to: AccountId,
        id: CredentialId,
        data: &[u8],
    ) -> Result<(), CredentialError> {
        self.guard.safe_transfer(from, to, id, data)
    }

    /// Always fails with `SoulboundViolation`.
    pub fn approve(&self, spender: AccountId, id: CredentialId) -> Result<(), CredentialError> {
        self.guard.approve(spender, id)
    }

    /// Always fails with `SoulboundViolation`.
    pub fn set_approval_for_all(
        &self,
        operator: AccountId,
        enabled: bool,
    ) -> Result<(), CredentialError> {
        self.guard.set_approval_for_all(operator, enabled)
    }
}
