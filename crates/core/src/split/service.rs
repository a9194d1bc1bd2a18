//! Split service tying the calculator to a store.

use std::sync::Arc;

use splitter_shared::types::{ParticipantId, SplitId};

use super::calculation::ShareCalculator;
use super::error::SplitError;
use super::store::{InMemorySplitStore, SplitStore};
use super::types::{CreateSplitInput, Split, SplitSummary};

/// Split lifecycle operations.
///
/// Share calculation runs before the store is touched, so the store lock is
/// only ever held for the map access itself.
#[derive(Clone)]
pub struct SplitService {
    store: Arc<dyn SplitStore>,
}

impl SplitService {
    /// Creates a service on top of the given store.
    #[must_use]
    pub fn new(store: Arc<dyn SplitStore>) -> Self {
        Self { store }
    }

    /// Creates a service backed by a fresh [`InMemorySplitStore`].
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemorySplitStore::new()))
    }

    /// Validates the request, computes shares and stores the split.
    ///
    /// Nothing is stored when validation or calculation fails.
    pub fn create(&self, input: CreateSplitInput) -> Result<Split, SplitError> {
        let draft = ShareCalculator::prepare(input)?;
        Ok(self.store.create(draft))
    }

    /// Fetches a split.
    pub fn get(&self, id: &SplitId) -> Result<Split, SplitError> {
        self.store.get(id)
    }

    /// Marks a participant as paid.
    pub fn settle(
        &self,
        split_id: &SplitId,
        participant_id: &ParticipantId,
    ) -> Result<Split, SplitError> {
        self.store.settle(split_id, participant_id)
    }

    /// Deletes a split.
    pub fn delete(&self, id: &SplitId) -> Result<(), SplitError> {
        self.store.delete(id)
    }

    /// Returns the settlement summary of a split.
    pub fn summary(&self, id: &SplitId) -> Result<SplitSummary, SplitError> {
        self.store.get(id)?.summary()
    }

    /// Number of stored splits.
    #[must_use]
    pub fn count(&self) -> usize {
        self.store.len()
    }
}

impl std::fmt::Debug for SplitService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SplitService")
            .field("splits", &self.store.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::split::types::{ParticipantInput, SplitStrategy};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use splitter_shared::types::CurrencyCode;

    fn request(total: Decimal, strategy: &str, n: usize) -> CreateSplitInput {
        CreateSplitInput {
            title: "Cabin weekend".to_string(),
            total_amount: total,
            currency: CurrencyCode::parse("usd").unwrap(),
            strategy: strategy.to_string(),
            created_by: "user-42".to_string(),
            participants: (0..n)
                .map(|i| ParticipantInput {
                    name: format!("guest-{i}"),
                    ..ParticipantInput::default()
                })
                .collect(),
        }
    }

    #[test]
    fn test_create_persists_split() {
        let service = SplitService::in_memory();
        let split = service.create(request(dec!(100), "equal", 3)).unwrap();

        assert_eq!(split.strategy, SplitStrategy::Equal);
        assert_eq!(split.currency.as_str(), "USD");
        assert_eq!(service.get(&split.id).unwrap(), split);
        assert_eq!(service.count(), 1);
    }

    #[test]
    fn test_failed_create_has_no_side_effect() {
        let service = SplitService::in_memory();

        assert_eq!(
            service.create(request(dec!(0), "equal", 3)),
            Err(SplitError::InvalidAmount)
        );
        assert_eq!(
            service.create(request(dec!(10), "equal", 1)),
            Err(SplitError::LessThanMinimumParticipants)
        );
        assert!(matches!(
            service.create(request(dec!(10), "exact", 2)),
            Err(SplitError::AmountMismatch { .. })
        ));
        assert_eq!(service.count(), 0);
    }

    #[test]
    fn test_summary_follows_settlement() {
        let service = SplitService::in_memory();
        let split = service.create(request(dec!(100), "equal", 3)).unwrap();

        let before = service.summary(&split.id).unwrap();
        assert_eq!(before.settled_count, 0);
        assert_eq!(before.outstanding_amount, dec!(100));

        for p in &split.participants {
            service.settle(&split.id, &p.id).unwrap();
        }

        let after = service.summary(&split.id).unwrap();
        assert!(after.is_fully_settled);
        assert_eq!(after.paid_amount, dec!(100));
    }

    #[test]
    fn test_summary_overflow_is_an_error() {
        let service = SplitService::in_memory();
        let mut input = request(dec!(100), "exact", 4);
        let amounts = [
            Decimal::MAX,
            -Decimal::MAX,
            Decimal::MAX,
            -Decimal::MAX + dec!(100),
        ];
        for (p, amount) in input.participants.iter_mut().zip(amounts) {
            p.amount = Some(amount);
        }
        let split = service.create(input).unwrap();
        service
            .settle(&split.id, &split.participants[1].id)
            .unwrap();

        assert_eq!(
            service.summary(&split.id),
            Err(SplitError::AmountOutOfRange)
        );
    }

    #[test]
    fn test_delete_then_lookups_fail() {
        let service = SplitService::in_memory();
        let split = service.create(request(dec!(20), "equal", 2)).unwrap();

        service.delete(&split.id).unwrap();

        assert!(matches!(
            service.get(&split.id),
            Err(SplitError::SplitNotFound(_))
        ));
        assert!(matches!(
            service.summary(&split.id),
            Err(SplitError::SplitNotFound(_))
        ));
    }
}
