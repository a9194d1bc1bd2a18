//! Split data types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use splitter_shared::types::{CurrencyCode, ParticipantId, SplitId};

use super::error::SplitError;

/// Rule used to compute participant shares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitStrategy {
    /// Total divided evenly, last participant absorbs rounding.
    Equal,
    /// Each participant declares the amount they owe.
    Exact,
    /// Each participant declares a percentage (0-100 scale) of the total.
    Percentage,
}

impl SplitStrategy {
    /// Wire name of the strategy.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Equal => "equal",
            Self::Exact => "exact",
            Self::Percentage => "percentage",
        }
    }
}

impl std::fmt::Display for SplitStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SplitStrategy {
    type Err = SplitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "equal" => Ok(Self::Equal),
            "exact" => Ok(Self::Exact),
            "percentage" => Ok(Self::Percentage),
            _ => Err(SplitError::InvalidStrategy(s.to_string())),
        }
    }
}

/// One party owing a share of a split.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    /// Participant ID, assigned at calculation time.
    pub id: ParticipantId,
    /// Display name.
    pub name: String,
    /// Optional contact email.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Owed amount, rounded to cents.
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    /// Declared percentage, only set for percentage splits.
    #[serde(
        default,
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub percentage: Option<Decimal>,
    /// Whether the share has been settled.
    pub is_paid: bool,
}

/// A stored shared-expense record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Split {
    /// Split ID.
    pub id: SplitId,
    /// Split title.
    pub title: String,
    /// Total amount being split.
    #[serde(with = "rust_decimal::serde::float")]
    pub total_amount: Decimal,
    /// Currency code.
    pub currency: CurrencyCode,
    /// Strategy used for the shares.
    pub strategy: SplitStrategy,
    /// Participants in request order.
    pub participants: Vec<Participant>,
    /// Identifier of the user who created the split.
    pub created_by: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Split {
    /// Finds a participant by ID.
    #[must_use]
    pub fn participant(&self, id: &ParticipantId) -> Option<&Participant> {
        self.participants.iter().find(|p| p.id == *id)
    }

    /// Builds the settlement summary for this split.
    ///
    /// # Errors
    ///
    /// Returns [`SplitError::AmountOutOfRange`] if the paid or unpaid shares
    /// do not fit in a decimal. Exact splits only bound the running sum in
    /// request order, so a subset of them can still overflow.
    pub fn summary(&self) -> Result<SplitSummary, SplitError> {
        let (settled, open): (Vec<&Participant>, Vec<&Participant>) =
            self.participants.iter().partition(|p| p.is_paid);

        Ok(SplitSummary {
            id: self.id,
            title: self.title.clone(),
            total_amount: self.total_amount,
            currency: self.currency.clone(),
            participant_count: self.participants.len(),
            settled_count: settled.len(),
            paid_amount: checked_total(&settled)?,
            outstanding_amount: checked_total(&open)?,
            is_fully_settled: open.is_empty(),
            created_at: self.created_at,
        })
    }
}

fn checked_total(participants: &[&Participant]) -> Result<Decimal, SplitError> {
    participants
        .iter()
        .try_fold(Decimal::ZERO, |acc, p| acc.checked_add(p.amount))
        .ok_or(SplitError::AmountOutOfRange)
}

/// Settlement overview of a split.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitSummary {
    /// Split ID.
    pub id: SplitId,
    /// Split title.
    pub title: String,
    /// Total amount.
    #[serde(with = "rust_decimal::serde::float")]
    pub total_amount: Decimal,
    /// Currency code.
    pub currency: CurrencyCode,
    /// Number of participants.
    pub participant_count: usize,
    /// Number of participants marked as paid.
    pub settled_count: usize,
    /// Sum of the paid shares.
    #[serde(with = "rust_decimal::serde::float")]
    pub paid_amount: Decimal,
    /// Sum of the unpaid shares.
    #[serde(with = "rust_decimal::serde::float")]
    pub outstanding_amount: Decimal,
    /// True once every participant has paid.
    pub is_fully_settled: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Participant as submitted by the caller.
#[derive(Debug, Clone, Default)]
pub struct ParticipantInput {
    /// Display name.
    pub name: String,
    /// Optional contact email.
    pub email: Option<String>,
    /// Declared amount (exact strategy).
    pub amount: Option<Decimal>,
    /// Declared percentage on a 0-100 scale (percentage strategy).
    pub percentage: Option<Decimal>,
}

/// Input for creating a new split.
#[derive(Debug, Clone)]
pub struct CreateSplitInput {
    /// Split title.
    pub title: String,
    /// Total amount.
    pub total_amount: Decimal,
    /// Currency code.
    pub currency: CurrencyCode,
    /// Raw strategy name, parsed during validation.
    pub strategy: String,
    /// Creator identifier.
    pub created_by: String,
    /// Participants in order.
    pub participants: Vec<ParticipantInput>,
}

/// A calculated split not yet persisted (no ID or timestamps).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSplit {
    /// Split title.
    pub title: String,
    /// Total amount.
    pub total_amount: Decimal,
    /// Currency code.
    pub currency: CurrencyCode,
    /// Strategy used.
    pub strategy: SplitStrategy,
    /// Calculated participants.
    pub participants: Vec<Participant>,
    /// Creator identifier.
    pub created_by: String,
}

impl NewSplit {
    /// Turns the draft into a stored record.
    #[must_use]
    pub fn into_split(self, id: SplitId, now: DateTime<Utc>) -> Split {
        Split {
            id,
            title: self.title,
            total_amount: self.total_amount,
            currency: self.currency,
            strategy: self.strategy,
            participants: self.participants,
            created_by: self.created_by,
            created_at: now,
            updated_at: now,
        }
    }
}
