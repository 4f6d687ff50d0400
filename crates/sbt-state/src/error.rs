//! # Ledger Errors
//!
//! [`CredentialError`] is the complete failure taxonomy of the call surface.
//! Every variant aborts the triggering call; nothing is retried internally.
//! [`SnapshotError`] covers loading and saving sealed ledger snapshots.

use sbt_core::{AccountId, CanonicalizationError, CredentialId};
use thiserror::Error;

/// Failure of a ledger operation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CredentialError {
    /// Caller lacks the role the operation requires.
    #[error("permission denied for {account}: {reason}")]
    PermissionDenied {
        /// The rejected caller.
        account: AccountId,
        /// What was missing.
        reason: String,
    },

    /// Pause or unpause requested while already in the target state.
    #[error("invalid state: cannot {operation} while {state}")]
    InvalidState {
        /// The requested operation.
        operation: &'static str,
        /// Current operating state.
        state: String,
    },

    /// Issuance attempted while the circuit breaker is engaged.
    #[error("credential issuance is paused")]
    Paused,

    /// Batch input arrays differ in length.
    #[error("length mismatch: {recipients} recipients but {uris} metadata references")]
    LengthMismatch {
        /// Number of recipients supplied.
        recipients: usize,
        /// Number of metadata references supplied.
        uris: usize,
    },

    /// Query on a credential id that was never issued.
    #[error("credential {0} not found")]
    NotFound(CredentialId),

    /// Any transfer- or approval-shaped operation.
    #[error("soulbound violation: {operation} is not supported for non-transferable credentials")]
    SoulboundViolation {
        /// The rejected operation.
        operation: &'static str,
    },

    /// The allocator handed out an id that is already issued.
    #[error("duplicate credential id {0}: id allocator invariant violated")]
    DuplicateId(CredentialId),
}

impl CredentialError {
    /// Stable machine-readable code for this failure kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::PermissionDenied { .. } => "PERMISSION_DENIED",
            Self::InvalidState { .. } => "INVALID_STATE",
            Self::Paused => "PAUSED",
            Self::LengthMismatch { .. } => "LENGTH_MISMATCH",
            Self::NotFound(_) => "NOT_FOUND",
            Self::SoulboundViolation { .. } => "SOULBOUND_VIOLATION",
            Self::DuplicateId(_) => "DUPLICATE_ID",
        }
    }

    /// Whether the error signals a bug rather than bad input.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::DuplicateId(_))
    }
}

/// Failure loading or saving a ledger snapshot.
#[derive(Error, Debug)]
pub enum SnapshotError {
    /// Filesystem failure.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Snapshot JSON could not be read or written.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Genesis YAML could not be parsed.
    #[error("genesis config error: {0}")]
    Genesis(#[from] serde_yaml::Error),

    /// Ledger could not be canonicalized for sealing.
    #[error("canonicalization error: {0}")]
    Canonicalization(#[from] CanonicalizationError),

    /// The sealed digest does not match the ledger content.
    #[error("snapshot digest mismatch: sealed {expected}, computed {actual}")]
    DigestMismatch {
        /// Digest recorded in the snapshot.
        expected: String,
        /// Digest recomputed from the ledger.
        actual: String,
    },

    /// Ledger content violates a structural invariant.
    #[error("inconsistent ledger: {0}")]
    Inconsistent(String),
}
