//! # API Route Modules
//!
//! - `credentials` — issuance, credential lookups, holder queries.
//! - `roles` — role description, membership, grant/revoke/renounce.
//! - `pause` — circuit breaker status and control.
//! - `transfers` — transfer- and approval-shaped endpoints, always refused.
//! - `ledger` — collection summary, state digest, event feed.

pub mod credentials;
pub mod ledger;
pub mod pause;
pub mod roles;
pub mod transfers;
