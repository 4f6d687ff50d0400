//! # Sealed Snapshots
//!
//! A [`LedgerSnapshot`] pairs a ledger with the SHA-256 digest of its
//! canonical form. Loading recomputes the digest and re-checks structural
//! invariants, so a hand-edited or truncated file is rejected instead of
//! silently producing a ledger whose counter or journal disagrees with its
//! tables.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::SnapshotError;
use crate::ledger::CredentialLedger;

/// A ledger sealed with its content digest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    /// `sha256:<hex>` over the canonical ledger.
    pub digest: String,
    /// The sealed ledger.
    pub ledger: CredentialLedger,
}

impl LedgerSnapshot {
    /// Verify the seal and structural invariants, yielding the ledger.
    pub fn into_ledger(self) -> Result<CredentialLedger, SnapshotError> {
        let actual = self.ledger.state_digest()?.to_string();
        if actual != self.digest {
            return Err(SnapshotError::DigestMismatch {
                expected: self.digest,
                actual,
            });
        }
        self.ledger.validate()?;
        Ok(self.ledger)
    }
}

impl CredentialLedger {
    /// Seal a copy of the current ledger.
    pub fn snapshot(&self) -> Result<LedgerSnapshot, SnapshotError> {
        Ok(LedgerSnapshot {
            digest: self.state_digest()?.to_string(),
            ledger: self.clone(),
        })
    }

    /// Write a sealed snapshot to `path`.
    ///
    /// The file is written next to `path` first and renamed into place, so a
    /// reader never observes a partially written snapshot.
    pub fn save_to(&self, path: &Path) -> Result<(), SnapshotError> {
        let snapshot = self.snapshot()?;
        let json = serde_json::to_string_pretty(&snapshot)?;
        let mut staging = path.as_os_str().to_owned();
        staging.push(".tmp");
        std::fs::write(&staging, json)?;
        std::fs::rename(&staging, path)?;
        tracing::debug!(path = %path.display(), digest = %snapshot.digest, "ledger snapshot saved");
        Ok(())
    }

    /// Read and verify a sealed snapshot from `path`.
    pub fn load_from(path: &Path) -> Result<Self, SnapshotError> {
        let content = std::fs::read_to_string(path)?;
        let snapshot: LedgerSnapshot = serde_json::from_str(&content)?;
        let ledger = snapshot.into_ledger()?;
        tracing::debug!(path = %path.display(), "ledger snapshot loaded");
        Ok(ledger)
    }
}
