//! # Ledger Bootstrap
//!
//! Builds the genesis ledger at startup.
//!
//! 1. If `GENESIS_CONFIG` names a YAML file, parse it as a [`GenesisConfig`].
//! 2. Otherwise, if `GENESIS_ADMIN` is set, use a default collection
//!    administered by that account.
//! 3. Otherwise refuse to start: a ledger without an admin could never
//!    grant a role.

use sbt_state::{CredentialLedger, GenesisConfig, SnapshotError};

use crate::state::{AppConfig, AppState};

/// Collection name used when no genesis document is supplied.
pub const DEFAULT_NAME: &str = "Soulbound Credentials";
/// Collection symbol used when no genesis document is supplied.
pub const DEFAULT_SYMBOL: &str = "SBT";

/// Errors during bootstrap.
#[derive(Debug, thiserror::Error)]
pub enum BootstrapError {
    /// Neither a genesis document nor an admin account was configured.
    #[error("no genesis configured: set GENESIS_CONFIG or GENESIS_ADMIN")]
    MissingGenesis,

    /// Genesis document could not be read.
    #[error("genesis config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Genesis document could not be parsed.
    #[error("genesis config: {0}")]
    Genesis(#[from] SnapshotError),
}

/// Resolve the genesis parameters from configuration.
pub fn genesis_config(config: &AppConfig) -> Result<GenesisConfig, BootstrapError> {
    if let Some(path) = &config.genesis_config {
        let source = std::fs::read_to_string(path).map_err(|source| BootstrapError::Io {
            path: path.display().to_string(),
            source,
        })?;
        return Ok(GenesisConfig::from_yaml(&source)?);
    }
    config
        .genesis_admin
        .map(|admin| GenesisConfig::new(DEFAULT_NAME, DEFAULT_SYMBOL, admin))
        .ok_or(BootstrapError::MissingGenesis)
}

/// Initialize the ledger and wrap it in application state.
pub fn bootstrap(config: AppConfig) -> Result<AppState, BootstrapError> {
    let genesis = genesis_config(&config)?;
    let ledger = CredentialLedger::genesis(genesis);
    tracing::info!(
        name = %ledger.name(),
        symbol = %ledger.symbol(),
        auth = config.auth_token.is_some(),
        "ledger bootstrapped"
    );
    Ok(AppState::new(config, ledger))
}
