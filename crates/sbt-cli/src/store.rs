//! # Ledger File Store
//!
//! Loads and saves the sealed snapshot behind `--state`, and runs one
//! service call as a read-modify-write transaction over it.

use std::path::Path;

use anyhow::{Context, Result};

use sbt_state::{CredentialError, CredentialLedger, CredentialService};

/// Load and verify the ledger at `path`.
pub fn load(path: &Path) -> Result<CredentialLedger> {
    CredentialLedger::load_from(path)
        .with_context(|| format!("failed to load ledger: {}", path.display()))
}

/// Seal and write the ledger to `path`.
pub fn save(ledger: &CredentialLedger, path: &Path) -> Result<()> {
    ledger
        .save_to(path)
        .with_context(|| format!("failed to save ledger: {}", path.display()))
}

/// Run one service call against the ledger at `path`.
///
/// The outer `Result` carries file errors. The inner one is the ledger's
/// answer; the file is rewritten only when it is `Ok`.
pub fn transact<R>(
    path: &Path,
    call: impl FnOnce(&mut CredentialService<'_>) -> Result<R, CredentialError>,
) -> Result<Result<R, CredentialError>> {
    let mut ledger = load(path)?;
    let outcome = call(&mut CredentialService::new(&mut ledger));
    if outcome.is_ok() {
        save(&ledger, path)?;
        tracing::debug!(path = %path.display(), "ledger committed");
    } else {
        tracing::debug!(path = %path.display(), "ledger call rejected; file untouched");
    }
    Ok(outcome)
}
