//! # Transfer Subcommand
//!
//! Exists so that the refusal is explicit. It never opens the ledger file
//! for writing: the non-transferable guard answers without consulting state.

use std::path::Path;

use anyhow::Result;
use clap::Args;

use sbt_core::{AccountId, CredentialId};
use sbt_state::{TokenCapability, TransferGuard};

use crate::report_rejection;

/// Arguments for `sbt transfer`.
#[derive(Args, Debug)]
pub struct TransferArgs {
    /// Current holder.
    pub from: AccountId,
    /// Intended recipient.
    pub to: AccountId,
    /// Credential id.
    pub id: CredentialId,
}

/// Execute `sbt transfer`. Always exits with the rejection code.
pub fn run_transfer(args: &TransferArgs, _state: &Path) -> Result<u8> {
    Ok(match TransferGuard.transfer(args.from, args.to, args.id) {
        Ok(()) => 0,
        Err(err) => report_rejection(&err),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EXIT_REJECTED;

    #[test]
    fn transfer_is_always_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let args = TransferArgs {
            from: AccountId::from_bytes([1; 20]),
            to: AccountId::ZERO,
            id: CredentialId::new(1),
        };
        // No ledger file needed: the guard never reads state.
        assert_eq!(
            run_transfer(&args, &dir.path().join("absent.json")).unwrap(),
            EXIT_REJECTED
        );
    }
}
