//! # Issuance Subcommands
//!
//! `mint` issues one credential; `batch-mint` issues one per `--to`/`--uri`
//! pair, all or nothing.

use std::path::Path;

use anyhow::Result;
use clap::Args;

use sbt_core::AccountId;

use crate::{report_rejection, store};

/// Arguments for `sbt mint`.
#[derive(Args, Debug)]
pub struct MintArgs {
    /// Calling account; must bear MINTER_ROLE.
    #[arg(long = "as", value_name = "ACCOUNT")]
    pub caller: AccountId,
    /// Recipient.
    pub to: AccountId,
    /// Metadata reference.
    pub uri: String,
}

/// Arguments for `sbt batch-mint`.
#[derive(Args, Debug)]
pub struct BatchMintArgs {
    /// Calling account; must bear MINTER_ROLE.
    #[arg(long = "as", value_name = "ACCOUNT")]
    pub caller: AccountId,
    /// Recipient (repeatable, paired by position with --uri).
    #[arg(long = "to", value_name = "ACCOUNT")]
    pub to: Vec<AccountId>,
    /// Metadata reference (repeatable).
    #[arg(long = "uri", value_name = "URI")]
    pub uris: Vec<String>,
}

/// Execute `sbt mint`.
pub fn run_mint(args: &MintArgs, state: &Path) -> Result<u8> {
    let outcome = store::transact(state, |service| {
        service.mint_credential(args.caller, args.to, args.uri.clone())
    })?;
    Ok(match outcome {
        Ok(id) => {
            println!("{id}");
            0
        }
        Err(err) => report_rejection(&err),
    })
}

/// Execute `sbt batch-mint`.
pub fn run_batch_mint(args: &BatchMintArgs, state: &Path) -> Result<u8> {
    let outcome = store::transact(state, |service| {
        service.batch_mint_credentials(args.caller, &args.to, &args.uris)
    })?;
    Ok(match outcome {
        Ok(ids) => {
            for id in ids {
                println!("{id}");
            }
            0
        }
        Err(err) => report_rejection(&err),
    })
}
