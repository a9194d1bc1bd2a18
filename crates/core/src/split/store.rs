//! Split storage.
//!
//! The in-memory store keeps every split behind a single reader/writer lock.
//! Reads share the lock, writes hold it exclusively, and nothing but the map
//! access happens while it is held.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;
use splitter_shared::types::{ParticipantId, SplitId};

use super::error::SplitError;
use super::types::{NewSplit, Split};

/// Storage operations for splits.
///
/// Every operation either applies fully or not at all. Returned splits are
/// snapshots; mutating them does not touch the stored record.
pub trait SplitStore: Send + Sync {
    /// Assigns an ID and timestamps, stores the split and returns it.
    fn create(&self, split: NewSplit) -> Split;

    /// Fetches a split by ID.
    ///
    /// # Errors
    ///
    /// Returns `SplitError::SplitNotFound` if the split does not exist.
    fn get(&self, id: &SplitId) -> Result<Split, SplitError>;

    /// Marks a participant as paid and refreshes `updated_at`.
    ///
    /// Settling an already paid participant succeeds.
    ///
    /// # Errors
    ///
    /// Returns `SplitError::SplitNotFound` or `SplitError::ParticipantNotFound`.
    fn settle(&self, split_id: &SplitId, participant_id: &ParticipantId)
    -> Result<Split, SplitError>;

    /// Removes a split.
    ///
    /// # Errors
    ///
    /// Returns `SplitError::SplitNotFound` if the split does not exist.
    fn delete(&self, id: &SplitId) -> Result<(), SplitError>;

    /// Number of stored splits.
    fn len(&self) -> usize;

    /// Returns true if no split is stored.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Process-lifetime split store backed by a `HashMap`.
#[derive(Debug, Default)]
pub struct InMemorySplitStore {
    splits: RwLock<HashMap<SplitId, Split>>,
}

impl InMemorySplitStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // Every write leaves the map consistent, so a poisoned lock is still usable.
    fn read(&self) -> RwLockReadGuard<'_, HashMap<SplitId, Split>> {
        self.splits.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<SplitId, Split>> {
        self.splits.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl SplitStore for InMemorySplitStore {
    fn create(&self, split: NewSplit) -> Split {
        let split = split.into_split(SplitId::new(), Utc::now());
        self.write().insert(split.id, split.clone());
        split
    }

    fn get(&self, id: &SplitId) -> Result<Split, SplitError> {
        self.read()
            .get(id)
            .cloned()
            .ok_or_else(|| SplitError::SplitNotFound(id.to_string()))
    }

    fn settle(
        &self,
        split_id: &SplitId,
        participant_id: &ParticipantId,
    ) -> Result<Split, SplitError> {
        let mut splits = self.write();
        let split = splits
            .get_mut(split_id)
            .ok_or_else(|| SplitError::SplitNotFound(split_id.to_string()))?;

        let participant = split
            .participants
            .iter_mut()
            .find(|p| p.id == *participant_id)
            .ok_or_else(|| SplitError::ParticipantNotFound(participant_id.to_string()))?;

        participant.is_paid = true;
        split.updated_at = Utc::now();
        Ok(split.clone())
    }

    fn delete(&self, id: &SplitId) -> Result<(), SplitError> {
        self.write()
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| SplitError::SplitNotFound(id.to_string()))
    }

    fn len(&self) -> usize {
        self.read().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::split::types::{Participant, SplitStrategy};
    use rust_decimal_macros::dec;
    use splitter_shared::types::CurrencyCode;
    use std::sync::Arc;

    fn draft() -> NewSplit {
        let participant = |name: &str| Participant {
            id: ParticipantId::new(),
            name: name.to_string(),
            email: None,
            amount: dec!(5),
            percentage: None,
            is_paid: false,
        };
        NewSplit {
            title: "Taxi".to_string(),
            total_amount: dec!(10),
            currency: CurrencyCode::parse("EUR").unwrap(),
            strategy: SplitStrategy::Equal,
            participants: vec![participant("ana"), participant("ben")],
            created_by: "ana".to_string(),
        }
    }

    #[test]
    fn test_create_assigns_id_and_timestamps() {
        let store = InMemorySplitStore::new();
        let a = store.create(draft());
        let b = store.create(draft());

        assert_ne!(a.id, b.id);
        assert_eq!(a.created_at, a.updated_at);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_get_returns_stored_split() {
        let store = InMemorySplitStore::new();
        let created = store.create(draft());

        assert_eq!(store.get(&created.id).unwrap(), created);
    }

    #[test]
    fn test_get_unknown_split() {
        let store = InMemorySplitStore::new();
        let id = SplitId::new();

        assert_eq!(store.get(&id), Err(SplitError::SplitNotFound(id.to_string())));
    }

    #[test]
    fn test_returned_split_is_a_snapshot() {
        let store = InMemorySplitStore::new();
        let mut created = store.create(draft());
        created.participants[0].is_paid = true;

        assert!(!store.get(&created.id).unwrap().participants[0].is_paid);
    }

    #[test]
    fn test_settle_marks_only_that_participant() {
        let store = InMemorySplitStore::new();
        let created = store.create(draft());
        let target = created.participants[1].id;

        let settled = store.settle(&created.id, &target).unwrap();

        assert!(!settled.participants[0].is_paid);
        assert!(settled.participants[1].is_paid);
        assert!(settled.updated_at >= created.updated_at);
        assert_eq!(settled.created_at, created.created_at);
        assert_eq!(store.get(&created.id).unwrap(), settled);
    }

    #[test]
    fn test_settle_is_idempotent() {
        let store = InMemorySplitStore::new();
        let created = store.create(draft());
        let target = created.participants[0].id;

        let first = store.settle(&created.id, &target).unwrap();
        let second = store.settle(&created.id, &target).unwrap();

        assert!(first.participants[0].is_paid);
        assert!(second.participants[0].is_paid);
        assert_eq!(first.participants, second.participants);
    }

    #[test]
    fn test_settle_unknown_split_and_participant() {
        let store = InMemorySplitStore::new();
        let created = store.create(draft());
        let unknown_split = SplitId::new();
        let unknown_participant = ParticipantId::new();

        assert_eq!(
            store.settle(&unknown_split, &created.participants[0].id),
            Err(SplitError::SplitNotFound(unknown_split.to_string()))
        );
        assert_eq!(
            store.settle(&created.id, &unknown_participant),
            Err(SplitError::ParticipantNotFound(
                unknown_participant.to_string()
            ))
        );
        // A failed settle leaves the record untouched.
        assert_eq!(store.get(&created.id).unwrap(), created);
    }

    #[test]
    fn test_delete_is_terminal() {
        let store = InMemorySplitStore::new();
        let created = store.create(draft());
        let participant = created.participants[0].id;

        store.delete(&created.id).unwrap();

        assert!(store.is_empty());
        assert!(matches!(
            store.get(&created.id),
            Err(SplitError::SplitNotFound(_))
        ));
        assert!(matches!(
            store.settle(&created.id, &participant),
            Err(SplitError::SplitNotFound(_))
        ));
        assert!(matches!(
            store.delete(&created.id),
            Err(SplitError::SplitNotFound(_))
        ));
    }

    #[test]
    fn test_concurrent_creates_and_settles() {
        let store = Arc::new(InMemorySplitStore::new());
        let shared = store.create(draft());

        std::thread::scope(|scope| {
            for _ in 0..8 {
                let store = Arc::clone(&store);
                let shared = &shared;
                scope.spawn(move || {
                    for _ in 0..50 {
                        let created = store.create(draft());
                        store.get(&created.id).unwrap();
                        for p in &shared.participants {
                            store.settle(&shared.id, &p.id).unwrap();
                        }
                    }
                });
            }
        });

        assert_eq!(store.len(), 1 + 8 * 50);
        let shared = store.get(&shared.id).unwrap();
        assert!(shared.participants.iter().all(|p| p.is_paid));
    }
}
