//! # Error Types
//!
//! Errors raised by the foundational types. Domain errors (authorization,
//! pause state, issuance) live in `sbt-state`.

use thiserror::Error;

/// An identifier or timestamp failed to parse.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Account identifier is not `0x` followed by 40 hex digits.
    #[error("invalid account id {input:?}: {reason}")]
    InvalidAccountId {
        /// The rejected input.
        input: String,
        /// Why it was rejected.
        reason: String,
    },

    /// Role identifier is neither a 32-byte hex value nor a role name.
    #[error("invalid role id {input:?}: {reason}")]
    InvalidRoleId {
        /// The rejected input.
        input: String,
        /// Why it was rejected.
        reason: String,
    },

    /// Credential identifiers are unsigned decimal integers.
    #[error("invalid credential id {0:?}: expected an unsigned decimal integer")]
    InvalidCredentialId(String),

    /// Timestamp is not RFC 3339 UTC.
    #[error("invalid timestamp {input:?}: {reason}")]
    InvalidTimestamp {
        /// The rejected input.
        input: String,
        /// Why it was rejected.
        reason: String,
    },
}

/// Error during canonical serialization.
#[derive(Error, Debug)]
pub enum CanonicalizationError {
    /// Float values are not permitted in canonical representations.
    #[error("float values are not permitted in canonical representations: {0}")]
    FloatRejected(f64),

    /// JSON serialization failed.
    #[error("serialization failed: {0}")]
    SerializationFailed(#[from] serde_json::Error),
}
