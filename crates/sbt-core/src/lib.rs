//! # sbt-core — Foundational Types for the Credential Ledger
//!
//! Leaf crate of the workspace. Defines the identifier newtypes and the
//! canonical-bytes/digest pipeline every other crate builds on.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype wrappers for identifiers.** `AccountId`, `RoleId` and
//!    `CredentialId` are distinct types with validated parsers. An account can
//!    never be passed where a role is expected.
//!
//! 2. **`CanonicalBytes` newtype.** Ledger digests are computed only from
//!    JCS-canonical bytes, so two equal ledgers always hash identically.
//!
//! 3. **UTC-only timestamps.** `Timestamp` is UTC with seconds precision.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `sbt-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod canonical;
pub mod digest;
pub mod error;
pub mod identity;
pub mod temporal;

// Re-export primary types for ergonomic imports.
pub use canonical::CanonicalBytes;
pub use digest::{sha256_digest, ContentDigest};
pub use error::{CanonicalizationError, ValidationError};
pub use identity::{AccountId, CredentialId, RoleId};
pub use temporal::Timestamp;
