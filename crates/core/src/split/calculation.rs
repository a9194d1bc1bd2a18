//! Share calculation for the three split strategies.
//!
//! Everything here is pure: no locking, no storage, no logging. Given the same
//! input the amounts are always the same, only the generated participant IDs
//! differ between calls.

use rust_decimal::Decimal;
use splitter_shared::types::ParticipantId;
use splitter_shared::types::money::{round_to_cents, truncate_to_cents, within_tolerance};

use super::error::SplitError;
use super::types::{CreateSplitInput, NewSplit, Participant, ParticipantInput, SplitStrategy};

/// Minimum number of participants in a split.
pub const MIN_PARTICIPANTS: usize = 2;

/// Share calculator for split requests.
pub struct ShareCalculator;

impl ShareCalculator {
    /// Validates a creation request and returns its parsed strategy.
    ///
    /// Checks run in order and stop at the first failure: positive total,
    /// participant count, recognized strategy.
    ///
    /// # Errors
    ///
    /// Returns `SplitError::InvalidAmount` if the total is not positive.
    /// Returns `SplitError::LessThanMinimumParticipants` for fewer than two participants.
    /// Returns `SplitError::InvalidStrategy` if the strategy is unknown.
    pub fn validate(input: &CreateSplitInput) -> Result<SplitStrategy, SplitError> {
        if input.total_amount <= Decimal::ZERO {
            return Err(SplitError::InvalidAmount);
        }
        if input.participants.len() < MIN_PARTICIPANTS {
            return Err(SplitError::LessThanMinimumParticipants);
        }
        input.strategy.parse()
    }

    /// Validates the request and computes every participant's share.
    ///
    /// # Errors
    ///
    /// Any validation error, plus `SplitError::AmountMismatch` or
    /// `SplitError::PercentageMismatch` when declared values do not add up.
    pub fn compute_shares(input: &CreateSplitInput) -> Result<Vec<Participant>, SplitError> {
        let strategy = Self::validate(input)?;
        Self::compute_for(strategy, input.total_amount, &input.participants)
    }

    /// Validates and computes a complete split draft ready for storage.
    ///
    /// # Errors
    ///
    /// Same as [`ShareCalculator::compute_shares`].
    pub fn prepare(input: CreateSplitInput) -> Result<NewSplit, SplitError> {
        let strategy = Self::validate(&input)?;
        let participants = Self::compute_for(strategy, input.total_amount, &input.participants)?;

        Ok(NewSplit {
            title: input.title,
            total_amount: input.total_amount,
            currency: input.currency,
            strategy,
            participants,
            created_by: input.created_by,
        })
    }

    fn compute_for(
        strategy: SplitStrategy,
        total: Decimal,
        participants: &[ParticipantInput],
    ) -> Result<Vec<Participant>, SplitError> {
        match strategy {
            SplitStrategy::Equal => Ok(split_equal(total, participants)),
            SplitStrategy::Exact => split_exact(total, participants),
            SplitStrategy::Percentage => split_by_percentage(total, participants),
        }
    }
}

/// Truncated base share for everyone, the last participant absorbs the remainder.
fn split_equal(total: Decimal, participants: &[ParticipantInput]) -> Vec<Participant> {
    let count = participants.len();
    let count_dec = Decimal::from(count);

    let base = truncate_to_cents(total / count_dec);
    let remainder = round_to_cents(total - base * count_dec);
    let last = round_to_cents(base + remainder);

    participants
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let amount = if i + 1 == count { last } else { base };
            new_participant(p, amount, None)
        })
        .collect()
}

fn split_exact(
    total: Decimal,
    participants: &[ParticipantInput],
) -> Result<Vec<Participant>, SplitError> {
    let mut sum = Decimal::ZERO;
    let mut shares = Vec::with_capacity(participants.len());

    for p in participants {
        let declared = p.amount.unwrap_or_default();
        // Tolerance is checked against the unrounded declarations.
        sum = sum
            .checked_add(declared)
            .ok_or(SplitError::AmountOutOfRange)?;
        shares.push(new_participant(p, round_to_cents(declared), None));
    }

    if !within_tolerance(sum, total) {
        return Err(SplitError::AmountMismatch {
            sum,
            expected: total,
        });
    }
    Ok(shares)
}

/// `round(total * pct) / 100` with pct on a 0-100 scale.
fn split_by_percentage(
    total: Decimal,
    participants: &[ParticipantInput],
) -> Result<Vec<Participant>, SplitError> {
    let mut total_percentage = Decimal::ZERO;
    let mut shares = Vec::with_capacity(participants.len());

    for p in participants {
        let percentage = p.percentage.unwrap_or_default();
        total_percentage = total_percentage
            .checked_add(percentage)
            .ok_or(SplitError::AmountOutOfRange)?;

        let scaled = total
            .checked_mul(percentage)
            .ok_or(SplitError::AmountOutOfRange)?;
        let amount = scaled.round_dp_with_strategy(
            0,
            rust_decimal::RoundingStrategy::MidpointAwayFromZero,
        ) / Decimal::ONE_HUNDRED;

        shares.push(new_participant(p, amount, Some(percentage)));
    }

    if !within_tolerance(total_percentage, Decimal::ONE_HUNDRED) {
        return Err(SplitError::PercentageMismatch { total_percentage });
    }
    Ok(shares)
}

fn new_participant(
    input: &ParticipantInput,
    amount: Decimal,
    percentage: Option<Decimal>,
) -> Participant {
    Participant {
        id: ParticipantId::new(),
        name: input.name.clone(),
        email: input.email.clone(),
        amount,
        percentage,
        is_paid: false,
    }
}
