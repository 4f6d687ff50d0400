//! # Credential Registry
//!
//! The authoritative credential table and the monotonic id allocator.
//!
//! The counter is pre-incremented: it starts at 0 and the first allocated id
//! is 1. It is never decremented by a committed operation. A [`Checkpoint`]
//! plus the list of ids issued since lets the service undo an uncommitted
//! batch.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use sbt_core::{AccountId, CredentialId};

use crate::error::CredentialError;

/// One issued credential. Owner and metadata are fixed at issuance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    /// Allocated identifier.
    pub id: CredentialId,
    /// Bound recipient.
    pub owner: AccountId,
    /// Opaque metadata reference.
    pub uri: String,
}

/// Registry position to roll back to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checkpoint {
    counter: u64,
}

/// Credential table plus id counter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialRegistry {
    counter: u64,
    credentials: BTreeMap<CredentialId, Credential>,
}

impl CredentialRegistry {
    /// Empty registry, counter at 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the counter and return the new value.
    ///
    /// Saturates at `u64::MAX`; a saturated counter surfaces as
    /// `DuplicateId` on the following `issue`.
    pub fn allocate_id(&mut self) -> CredentialId {
        self.counter = self.counter.saturating_add(1);
        CredentialId::new(self.counter)
    }

    /// Record a new credential under `id`.
    pub fn issue(
        &mut self,
        id: CredentialId,
        owner: AccountId,
        uri: String,
    ) -> Result<(), CredentialError> {
        if self.credentials.contains_key(&id) {
            return Err(CredentialError::DuplicateId(id));
        }
        self.credentials.insert(id, Credential { id, owner, uri });
        Ok(())
    }

    /// Whether `id` has been issued.
    pub fn exists(&self, id: CredentialId) -> bool {
        self.credentials.contains_key(&id)
    }

    /// The full record for `id`.
    pub fn get(&self, id: CredentialId) -> Result<&Credential, CredentialError> {
        self.credentials
            .get(&id)
            .ok_or(CredentialError::NotFound(id))
    }

    /// Owner of `id`.
    pub fn owner_of(&self, id: CredentialId) -> Result<AccountId, CredentialError> {
        self.get(id).map(|c| c.owner)
    }

    /// Metadata reference of `id`.
    pub fn metadata_of(&self, id: CredentialId) -> Result<&str, CredentialError> {
        self.get(id).map(|c| c.uri.as_str())
    }

    /// Number of credentials bound to `owner`.
    pub fn balance_of(&self, owner: AccountId) -> u64 {
        self.credentials
            .values()
            .filter(|c| c.owner == owner)
            .count() as u64
    }

    /// Ids bound to `owner`, ascending.
    pub fn credentials_of(&self, owner: AccountId) -> Vec<CredentialId> {
        self.credentials
            .values()
            .filter(|c| c.owner == owner)
            .map(|c| c.id)
            .collect()
    }

    /// Number of issued credentials.
    pub fn total_supply(&self) -> u64 {
        self.credentials.len() as u64
    }

    /// Last allocated id value (0 before any issuance).
    pub fn counter(&self) -> u64 {
        self.counter
    }

    /// Iterate over all credentials in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Credential> {
        self.credentials.values()
    }

    pub(crate) fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            counter: self.counter,
        }
    }

    /// Remove the credentials issued since `checkpoint` and restore the
    /// counter. `issued` lists exactly those ids.
    pub(crate) fn rollback(&mut self, checkpoint: Checkpoint, issued: &[CredentialId]) {
        for id in issued {
            self.credentials.remove(id);
        }
        self.counter = checkpoint.counter;
    }

    /// Structural check used when loading a snapshot.
    pub(crate) fn validate(&self) -> Result<(), String> {
        for (key, credential) in &self.credentials {
            if *key != credential.id {
                return Err(format!(
                    "credential keyed {key} records id {}",
                    credential.id
                ));
            }
            if key.value() == 0 || key.value() > self.counter {
                return Err(format!(
                    "credential id {key} outside allocated range 1..={}",
                    self.counter
                ));
            }
        }
        Ok(())
    }
}
