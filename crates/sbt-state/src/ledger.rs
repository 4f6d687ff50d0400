//! # Credential Ledger
//!
//! The single exclusively-owned store of one system instance. It owns the
//! four logical tables (role membership, pause flag, credential map, id
//! counter) plus the collection metadata and the event journal.
//!
//! Every query of the call surface is a method here taking `&self`.
//! Mutations go through [`CredentialService`](crate::service::CredentialService),
//! which borrows the ledger mutably for the duration of one call.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use sbt_core::{
    sha256_digest, AccountId, CanonicalBytes, CanonicalizationError, ContentDigest, CredentialId,
    RoleId,
};

use crate::error::{CredentialError, SnapshotError};
use crate::journal::{EventJournal, EventKind, LedgerEvent};
use crate::pause::{OperatingState, PauseSwitch};
use crate::registry::{Checkpoint, Credential, CredentialRegistry};
use crate::roles::RoleRegistry;

// ─── Genesis ────────────────────────────────────────────────────────

/// Initialization parameters.
///
/// ```yaml
/// name: Course Certificates
/// symbol: CERT
/// admin: "0x00000000000000000000000000000000000000ad"
/// role_admins:
///   AUDITOR_ROLE: PAUSER_ROLE
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenesisConfig {
    /// Collection name.
    pub name: String,
    /// Collection symbol.
    pub symbol: String,
    /// Initializing principal. Receives the root admin, minter and pauser roles.
    pub admin: AccountId,
    /// Administering-role overrides (role → administering role).
    #[serde(default)]
    pub role_admins: BTreeMap<RoleId, RoleId>,
}

impl GenesisConfig {
    /// A config with no role-admin overrides.
    pub fn new(name: impl Into<String>, symbol: impl Into<String>, admin: AccountId) -> Self {
        Self {
            name: name.into(),
            symbol: symbol.into(),
            admin,
            role_admins: BTreeMap::new(),
        }
    }

    /// Parse a YAML genesis document.
    pub fn from_yaml(source: &str) -> Result<Self, SnapshotError> {
        Ok(serde_yaml::from_str(source)?)
    }
}

// ─── Ledger ─────────────────────────────────────────────────────────

/// Position of the ledger before a call, for all-or-nothing rollback.
#[derive(Debug, Clone, Copy)]
pub(crate) struct LedgerCheckpoint {
    registry: Checkpoint,
    journal_len: usize,
}

/// All state of one credential system instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialLedger {
    name: String,
    symbol: String,
    roles: RoleRegistry,
    pause: PauseSwitch,
    registry: CredentialRegistry,
    journal: EventJournal,
}

impl CredentialLedger {
    /// Initialize a ledger from genesis parameters.
    pub fn genesis(config: GenesisConfig) -> Self {
        let mut ledger = Self {
            name: config.name,
            symbol: config.symbol,
            roles: RoleRegistry::new(),
            pause: PauseSwitch::new(),
            registry: CredentialRegistry::new(),
            journal: EventJournal::new(),
        };
        for (role, admin_role) in &config.role_admins {
            ledger.roles.set_role_admin(*role, *admin_role);
        }
        for role in [RoleId::DEFAULT_ADMIN, RoleId::minter(), RoleId::pauser()] {
            if ledger.roles.insert_member(role, config.admin) {
                ledger.journal.record(EventKind::RoleGranted {
                    role,
                    account: config.admin,
                    sender: config.admin,
                });
            }
        }
        tracing::info!(
            name = %ledger.name,
            symbol = %ledger.symbol,
            admin = %config.admin,
            "credential ledger initialized"
        );
        ledger
    }

    // ── Collection ───────────────────────────────────────────────────

    /// Collection name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Collection symbol.
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    // ── Roles ────────────────────────────────────────────────────────

    /// Whether `account` bears `role`.
    pub fn has_role(&self, role: RoleId, account: AccountId) -> bool {
        self.roles.has_role(role, account)
    }

    /// Administering role of `role`.
    pub fn role_admin(&self, role: RoleId) -> RoleId {
        self.roles.role_admin(role)
    }

    /// Sorted bearers of `role`.
    pub fn role_members(&self, role: RoleId) -> Vec<AccountId> {
        self.roles.members(role)
    }

    // ── Pause ────────────────────────────────────────────────────────

    /// Whether issuance is blocked.
    pub fn is_paused(&self) -> bool {
        self.pause.is_paused()
    }

    /// Current operating super-state.
    pub fn operating_state(&self) -> OperatingState {
        self.pause.state()
    }

    // ── Credentials ──────────────────────────────────────────────────

    /// Whether `id` has been issued.
    pub fn exists(&self, id: CredentialId) -> bool {
        self.registry.exists(id)
    }

    /// Full record of `id`.
    pub fn credential(&self, id: CredentialId) -> Result<&Credential, CredentialError> {
        self.registry.get(id)
    }

    /// Metadata reference of `id`.
    pub fn get_credential(&self, id: CredentialId) -> Result<&str, CredentialError> {
        self.registry.metadata_of(id)
    }

    /// Owner of `id`.
    pub fn owner_of(&self, id: CredentialId) -> Result<AccountId, CredentialError> {
        self.registry.owner_of(id)
    }

    /// Lock status of `id`. Every issued credential is locked.
    pub fn locked(&self, id: CredentialId) -> Result<bool, CredentialError> {
        self.registry.get(id).map(|_| true)
    }

    /// Number of credentials bound to `owner`.
    pub fn balance_of(&self, owner: AccountId) -> u64 {
        self.registry.balance_of(owner)
    }

    /// Ids bound to `owner`, ascending.
    pub fn credentials_of(&self, owner: AccountId) -> Vec<CredentialId> {
        self.registry.credentials_of(owner)
    }

    /// Number of issued credentials.
    pub fn total_supply(&self) -> u64 {
        self.registry.total_supply()
    }

    /// Last allocated id value.
    pub fn id_counter(&self) -> u64 {
        self.registry.counter()
    }

    // ── Journal ──────────────────────────────────────────────────────

    /// Events committed after sequence number `sequence`.
    pub fn events_since(&self, sequence: u64) -> &[LedgerEvent] {
        self.journal.since(sequence)
    }

    // ── Digest ───────────────────────────────────────────────────────

    /// SHA-256 over the canonical form of the whole ledger.
    pub fn state_digest(&self) -> Result<ContentDigest, CanonicalizationError> {
        let canonical = CanonicalBytes::new(self)?;
        Ok(sha256_digest(&canonical))
    }

    // ── Crate-internal mutation ──────────────────────────────────────

    pub(crate) fn roles(&self) -> &RoleRegistry {
        &self.roles
    }

    pub(crate) fn roles_mut(&mut self) -> &mut RoleRegistry {
        &mut self.roles
    }

    pub(crate) fn pause_and_roles_mut(&mut self) -> (&mut PauseSwitch, &RoleRegistry) {
        (&mut self.pause, &self.roles)
    }

    pub(crate) fn journal_mut(&mut self) -> &mut EventJournal {
        &mut self.journal
    }

    #[cfg(test)]
    pub(crate) fn registry_mut(&mut self) -> &mut CredentialRegistry {
        &mut self.registry
    }

    /// Allocate the next id, issue it to `owner`, and journal it.
    pub(crate) fn issue_next(
        &mut self,
        owner: AccountId,
        uri: String,
    ) -> Result<CredentialId, CredentialError> {
        let id = self.registry.allocate_id();
        self.registry.issue(id, owner, uri.clone())?;
        self.journal
            .record(EventKind::CredentialIssued { id, owner, uri });
        Ok(id)
    }

    pub(crate) fn checkpoint(&self) -> LedgerCheckpoint {
        LedgerCheckpoint {
            registry: self.registry.checkpoint(),
            journal_len: self.journal.len(),
        }
    }

    pub(crate) fn rollback(&mut self, checkpoint: LedgerCheckpoint, issued: &[CredentialId]) {
        self.registry.rollback(checkpoint.registry, issued);
        self.journal.truncate(checkpoint.journal_len);
    }

    /// Structural invariants checked when a ledger is loaded from outside.
    pub(crate) fn validate(&self) -> Result<(), SnapshotError> {
        self.registry.validate().map_err(SnapshotError::Inconsistent)?;
        self.journal.validate().map_err(SnapshotError::Inconsistent)?;
        Ok(())
    }
}
