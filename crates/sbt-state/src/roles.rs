//! # Role Registry
//!
//! Named permissions, their bearers, and the role that administers each one.
//!
//! ```text
//! DEFAULT_ADMIN_ROLE ──administers──▶ DEFAULT_ADMIN_ROLE
//!                    ──administers──▶ MINTER_ROLE
//!                    ──administers──▶ PAUSER_ROLE
//!                    ──administers──▶ any role without an override
//! ```
//!
//! Every role has exactly one administering role. Roles never seen before
//! are administered by the root role. Overrides are applied at genesis only.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use sbt_core::{AccountId, RoleId};

use crate::error::CredentialError;

/// Bearers and administrator of one role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleData {
    /// The role whose bearers may grant and revoke this one.
    pub admin_role: RoleId,
    /// Accounts currently bearing the role.
    pub members: BTreeSet<AccountId>,
}

impl Default for RoleData {
    fn default() -> Self {
        Self {
            admin_role: RoleId::DEFAULT_ADMIN,
            members: BTreeSet::new(),
        }
    }
}

/// Role membership table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleRegistry {
    roles: BTreeMap<RoleId, RoleData>,
}

impl RoleRegistry {
    /// An empty registry. Every role is administered by the root role.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `account` bears `role`.
    pub fn has_role(&self, role: RoleId, account: AccountId) -> bool {
        self.roles
            .get(&role)
            .is_some_and(|data| data.members.contains(&account))
    }

    /// The role administering `role`.
    pub fn role_admin(&self, role: RoleId) -> RoleId {
        self.roles
            .get(&role)
            .map(|data| data.admin_role)
            .unwrap_or(RoleId::DEFAULT_ADMIN)
    }

    /// Sorted bearers of `role`.
    pub fn members(&self, role: RoleId) -> Vec<AccountId> {
        self.roles
            .get(&role)
            .map(|data| data.members.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Fail with `PermissionDenied` unless `account` bears `role`.
    pub fn check_role(&self, role: RoleId, account: AccountId) -> Result<(), CredentialError> {
        if self.has_role(role, account) {
            Ok(())
        } else {
            Err(CredentialError::PermissionDenied {
                account,
                reason: format!("missing role {}", role.label()),
            })
        }
    }

    /// Add `account` to `role`. Requires `caller` to bear the administering
    /// role. Returns whether membership changed.
    pub fn grant_role(
        &mut self,
        role: RoleId,
        account: AccountId,
        caller: AccountId,
    ) -> Result<bool, CredentialError> {
        self.check_role(self.role_admin(role), caller)?;
        Ok(self.insert_member(role, account))
    }

    /// Remove `account` from `role`. Same authorization as granting.
    /// Returns whether membership changed.
    pub fn revoke_role(
        &mut self,
        role: RoleId,
        account: AccountId,
        caller: AccountId,
    ) -> Result<bool, CredentialError> {
        self.check_role(self.role_admin(role), caller)?;
        Ok(self.remove_member(role, account))
    }

    /// Give up `role`. Only the bearer itself may renounce.
    pub fn renounce_role(
        &mut self,
        role: RoleId,
        account: AccountId,
        caller: AccountId,
    ) -> Result<bool, CredentialError> {
        if account != caller {
            return Err(CredentialError::PermissionDenied {
                account: caller,
                reason: format!("can only renounce roles for itself, not for {account}"),
            });
        }
        Ok(self.remove_member(role, account))
    }

    /// Set the administering role of `role`. Genesis only.
    pub(crate) fn set_role_admin(&mut self, role: RoleId, admin_role: RoleId) {
        self.roles.entry(role).or_default().admin_role = admin_role;
    }

    /// Grant without authorization. Genesis only.
    pub(crate) fn insert_member(&mut self, role: RoleId, account: AccountId) -> bool {
        self.roles.entry(role).or_default().members.insert(account)
    }

    fn remove_member(&mut self, role: RoleId, account: AccountId) -> bool {
        self.roles
            .get_mut(&role)
            .is_some_and(|data| data.members.remove(&account))
    }
}
