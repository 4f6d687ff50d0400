//! # sbt-state — Soulbound Credential Ledger
//!
//! The state machine behind the credential surface. One [`CredentialLedger`]
//! owns every table; a [`CredentialService`] borrows it mutably for one call
//! and either commits all effects of that call or none.
//!
//! ## Components
//!
//! - **Roles** (`roles.rs`): role membership and administering-role lookup.
//!   Grant and revoke are gated by the administering role.
//!
//! - **Pause** (`pause.rs`): the `ACTIVE ⇄ PAUSED` circuit breaker. Only
//!   issuance is blocked while paused.
//!
//! - **Registry** (`registry.rs`): credential table plus the pre-incremented
//!   id counter. Ids start at 1 and are never reused.
//!
//! - **Guard** (`guard.rs`): the non-transferable token capability. Every
//!   transfer- or approval-shaped call fails with `SoulboundViolation`.
//!
//! - **Journal** (`journal.rs`): ordered log of committed mutations.
//!
//! - **Snapshot** (`snapshot.rs`): digest-sealed persistence of a ledger.
//!
//! ## Design
//!
//! Ownership binding is permanent by construction: the registry exposes no
//! operation that changes an owner after issuance, and the guard holds no
//! reference to ledger state at all.

pub mod error;
pub mod guard;
pub mod journal;
pub mod ledger;
pub mod pause;
pub mod registry;
pub mod roles;
pub mod service;
pub mod snapshot;

// ─── Ledger re-exports ──────────────────────────────────────────────

pub use ledger::{CredentialLedger, GenesisConfig};
pub use snapshot::LedgerSnapshot;

// ─── Component re-exports ───────────────────────────────────────────

pub use guard::{TokenCapability, TransferGuard, Transferability};
pub use journal::{EventJournal, EventKind, LedgerEvent};
pub use pause::{OperatingState, PauseSwitch};
pub use registry::{Credential, CredentialRegistry};
pub use roles::{RoleData, RoleRegistry};

// ─── Service re-exports ─────────────────────────────────────────────

pub use error::{CredentialError, SnapshotError};
pub use service::{issuance_preconditions, CredentialService, Precondition};
