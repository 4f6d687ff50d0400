//! # Application State
//!
//! Shared state for the Axum application, passed to all route handlers via
//! the `State` extractor.
//!
//! The ledger sits behind a single `parking_lot::Mutex`. Every mutating
//! request runs one [`CredentialService`] call under that lock, which is the
//! serializing single-writer boundary: no request can observe another
//! request's partially applied effects. The lock is never held across an
//! `.await`.

use std::path::PathBuf;
use std::sync::Arc;

use parking_lot::Mutex;

use sbt_core::AccountId;
use sbt_state::{CredentialError, CredentialLedger, CredentialService};

// ─── Configuration ──────────────────────────────────────────────────

/// Application configuration.
///
/// Custom `Debug` redacts the auth token.
#[derive(Clone)]
pub struct AppConfig {
    /// Port to bind the HTTP server to.
    pub port: u16,
    /// Shared secret expected after the account in bearer tokens.
    /// If `None`, the secret is not checked.
    pub auth_token: Option<String>,
    /// Path to a YAML genesis document.
    pub genesis_config: Option<PathBuf>,
    /// Initial admin when no genesis document is given.
    pub genesis_admin: Option<AccountId>,
}

impl AppConfig {
    /// Read configuration from `PORT`, `AUTH_TOKEN`, `GENESIS_CONFIG` and
    /// `GENESIS_ADMIN`.
    pub fn from_env() -> Result<Self, sbt_core::ValidationError> {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8080);
        let auth_token = std::env::var("AUTH_TOKEN").ok().filter(|t| !t.is_empty());
        let genesis_config = std::env::var_os("GENESIS_CONFIG").map(PathBuf::from);
        let genesis_admin = std::env::var("GENESIS_ADMIN")
            .ok()
            .map(|raw| raw.parse())
            .transpose()?;
        Ok(Self {
            port,
            auth_token,
            genesis_config,
            genesis_admin,
        })
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("port", &self.port)
            .field(
                "auth_token",
                &self.auth_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("genesis_config", &self.genesis_config)
            .field("genesis_admin", &self.genesis_admin)
            .finish()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            auth_token: None,
            genesis_config: None,
            genesis_admin: None,
        }
    }
}

// ─── State ──────────────────────────────────────────────────────────

/// Shared application state.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: AppConfig,
    ledger: Arc<Mutex<CredentialLedger>>,
}

impl AppState {
    /// Wrap an initialized ledger.
    pub fn new(config: AppConfig, ledger: CredentialLedger) -> Self {
        Self {
            config,
            ledger: Arc::new(Mutex::new(ledger)),
        }
    }

    /// Run a read-only query against the ledger.
    pub fn read<R>(&self, f: impl FnOnce(&CredentialLedger) -> R) -> R {
        f(&self.ledger.lock())
    }

    /// Run one service call as an exclusive transaction.
    pub fn transact<R>(
        &self,
        f: impl FnOnce(&mut CredentialService<'_>) -> Result<R, CredentialError>,
    ) -> Result<R, CredentialError> {
        let mut ledger = self.ledger.lock();
        let mut service = CredentialService::new(&mut ledger);
        f(&mut service)
    }
}
