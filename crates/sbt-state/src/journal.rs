//! # Event Journal
//!
//! Append-only log of committed mutations. Sequence numbers start at 1 and
//! have no gaps. Calls that fail leave no entry: the service truncates the
//! journal back to its checkpoint together with the registry.

use serde::{Deserialize, Serialize};

use sbt_core::{AccountId, CredentialId, RoleId, Timestamp};

/// What happened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventKind {
    /// A credential was bound to `owner`.
    CredentialIssued {
        id: CredentialId,
        owner: AccountId,
        uri: String,
    },
    /// `account` gained `role`.
    RoleGranted {
        role: RoleId,
        account: AccountId,
        sender: AccountId,
    },
    /// `account` lost `role`.
    RoleRevoked {
        role: RoleId,
        account: AccountId,
        sender: AccountId,
    },
    /// Issuance blocked.
    Paused { account: AccountId },
    /// Issuance resumed.
    Unpaused { account: AccountId },
}

/// One journal entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEvent {
    /// 1-based position in the journal.
    pub sequence: u64,
    /// When the event was committed.
    pub recorded_at: Timestamp,
    /// The event payload.
    #[serde(flatten)]
    pub kind: EventKind,
}

/// Ordered event log.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventJournal {
    events: Vec<LedgerEvent>,
}

impl EventJournal {
    /// Empty journal.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event, returning its sequence number.
    pub fn record(&mut self, kind: EventKind) -> u64 {
        let sequence = self.events.len() as u64 + 1;
        self.events.push(LedgerEvent {
            sequence,
            recorded_at: Timestamp::now(),
            kind,
        });
        sequence
    }

    /// Events with a sequence number greater than `sequence`.
    pub fn since(&self, sequence: u64) -> &[LedgerEvent] {
        let start = usize::try_from(sequence)
            .unwrap_or(usize::MAX)
            .min(self.events.len());
        &self.events[start..]
    }

    /// Number of recorded events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub(crate) fn truncate(&mut self, len: usize) {
        self.events.truncate(len);
    }

    pub(crate) fn validate(&self) -> Result<(), String> {
        for (index, event) in self.events.iter().enumerate() {
            if event.sequence != index as u64 + 1 {
                return Err(format!(
                    "journal entry {index} carries sequence {}",
                    event.sequence
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paused() -> EventKind {
        EventKind::Paused {
            account: AccountId::ZERO,
        }
    }

    #[test]
    fn test_sequence_starts_at_one() {
        let mut journal = EventJournal::new();
        assert_eq!(journal.record(paused()), 1);
        assert_eq!(journal.record(paused()), 2);
        assert_eq!(journal.len(), 2);
    }

    #[test]
    fn test_since_filters_by_sequence() {
        let mut journal = EventJournal::new();
        for _ in 0..5 {
            journal.record(paused());
        }
        assert_eq!(journal.since(0).len(), 5);
        assert_eq!(journal.since(3)[0].sequence, 4);
        assert!(journal.since(5).is_empty());
        assert!(journal.since(u64::MAX).is_empty());
    }

    #[test]
    fn test_truncate_drops_tail() {
        let mut journal = EventJournal::new();
        journal.record(paused());
        journal.record(paused());
        journal.truncate(1);
        assert_eq!(journal.len(), 1);
        assert_eq!(journal.record(paused()), 2);
    }

    #[test]
    fn test_event_serializes_flat_with_type_tag() {
        let mut journal = EventJournal::new();
        journal.record(EventKind::CredentialIssued {
            id: CredentialId::new(1),
            owner: AccountId::ZERO,
            uri: "ipfs://cid1".into(),
        });
        let json = serde_json::to_value(&journal.since(0)[0]).unwrap();
        assert_eq!(json["type"], "credential_issued");
        assert_eq!(json["sequence"], 1);
        assert_eq!(json["id"], 1);
        assert_eq!(json["uri"], "ipfs://cid1");
    }
}
