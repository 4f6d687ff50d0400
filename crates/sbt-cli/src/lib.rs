//! # sbt-cli — Command-Line Interface for the Credential Ledger
//!
//! Provides the `sbt` binary. Every command operates on one sealed ledger
//! snapshot file (`--state`, default `sbt-state.json`).
//!
//! ## Subcommands
//!
//! - `sbt init` — Create a ledger file from genesis parameters.
//! - `sbt mint`, `sbt batch-mint` — Issue credentials.
//! - `sbt grant`, `sbt revoke`, `sbt renounce` — Role administration.
//! - `sbt pause`, `sbt unpause` — Circuit breaker.
//! - `sbt show`, `sbt owner-of`, `sbt balance`, `sbt has-role`, `sbt status`,
//!   `sbt events` — Queries.
//! - `sbt transfer` — Always refused; credentials are soulbound.
//!
//! ## Transactions
//!
//! A mutating command loads the file, runs exactly one ledger call, and
//! rewrites the file only if that call succeeded:
//!
//! ```bash
//! sbt init --admin 0x…ad
//! sbt mint --as 0x…ad 0x…b0 ipfs://cid1
//! sbt transfer 0x…b0 0x…ee 1              # exit code 2, file untouched
//! ```

pub mod admin;
pub mod issue;
pub mod query;
pub mod store;
pub mod transfer;

use sbt_state::CredentialError;

/// Exit code for a call the ledger rejected.
pub const EXIT_REJECTED: u8 = 2;

/// Report a ledger rejection on stderr and return [`EXIT_REJECTED`].
pub fn report_rejection(err: &CredentialError) -> u8 {
    if err.is_fatal() {
        tracing::error!(kind = err.kind(), "{err}");
    }
    eprintln!("REJECTED ({}): {err}", err.kind());
    EXIT_REJECTED
}
