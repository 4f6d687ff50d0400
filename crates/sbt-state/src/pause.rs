//! # Pause Switch
//!
//! Two-state circuit breaker gating issuance.
//!
//! ```text
//! ACTIVE ──pause()──▶ PAUSED
//!   ▲                   │
//!   └────unpause()──────┘
//! ```
//!
//! Both transitions require `PAUSER_ROLE`. Requesting the state the switch
//! is already in fails with `InvalidState`. There is no terminal state.

use serde::{Deserialize, Serialize};

use sbt_core::{AccountId, RoleId};

use crate::error::CredentialError;
use crate::roles::RoleRegistry;

/// Operating super-state of the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OperatingState {
    /// Issuance allowed.
    Active,
    /// Issuance blocked; queries still served.
    Paused,
}

impl OperatingState {
    /// Canonical name of this state.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Paused => "PAUSED",
        }
    }
}

impl std::fmt::Display for OperatingState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The pause flag. False at initialization.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PauseSwitch {
    paused: bool,
}

impl PauseSwitch {
    /// A switch in the `ACTIVE` state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether issuance is currently blocked.
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Current super-state.
    pub fn state(&self) -> OperatingState {
        if self.paused {
            OperatingState::Paused
        } else {
            OperatingState::Active
        }
    }

    /// ACTIVE → PAUSED.
    pub fn pause(&mut self, roles: &RoleRegistry, caller: AccountId) -> Result<(), CredentialError> {
        self.transition(roles, caller, OperatingState::Paused, "pause")
    }

    /// PAUSED → ACTIVE.
    pub fn unpause(
        &mut self,
        roles: &RoleRegistry,
        caller: AccountId,
    ) -> Result<(), CredentialError> {
        self.transition(roles, caller, OperatingState::Active, "unpause")
    }

    fn transition(
        &mut self,
        roles: &RoleRegistry,
        caller: AccountId,
        target: OperatingState,
        operation: &'static str,
    ) -> Result<(), CredentialError> {
        roles.check_role(RoleId::pauser(), caller)?;
        if self.state() == target {
            return Err(CredentialError::InvalidState {
                operation,
                state: self.state().to_string(),
            });
        }
        self.paused = target == OperatingState::Paused;
        Ok(())
    }
}
