//! Split error types.

use rust_decimal::Decimal;
use splitter_shared::AppError;
use thiserror::Error;

/// Split-related errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SplitError {
    /// Total amount is zero or negative.
    #[error("total amount must be greater than 0")]
    InvalidAmount,

    /// Fewer than two participants.
    #[error("at least 2 participants are required")]
    LessThanMinimumParticipants,

    /// Strategy is not one of equal, exact or percentage.
    #[error("invalid split strategy: {0}")]
    InvalidStrategy(String),

    /// Declared exact amounts do not add up to the total.
    #[error("participant amounts do not sum to total: got {sum:.2}, expected {expected:.2}")]
    AmountMismatch {
        /// Sum of the declared amounts.
        sum: Decimal,
        /// Requested total.
        expected: Decimal,
    },

    /// Declared percentages do not add up to 100.
    #[error("participant percentages do not sum to 100: got {total_percentage:.2}%")]
    PercentageMismatch {
        /// Sum of the declared percentages.
        total_percentage: Decimal,
    },

    /// Amounts overflowed decimal range during calculation.
    #[error("amounts are too large to split")]
    AmountOutOfRange,

    /// Split not found.
    #[error("split not found: {0}")]
    SplitNotFound(String),

    /// Participant not found within an existing split.
    #[error("participant not found: {0}")]
    ParticipantNotFound(String),
}

impl SplitError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::SplitNotFound(_) | Self::ParticipantNotFound(_) => 404,
            _ => 422,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidAmount => "INVALID_AMOUNT",
            Self::LessThanMinimumParticipants => "LESS_THAN_MINIMUM_PARTICIPANTS",
            Self::InvalidStrategy(_) => "INVALID_STRATEGY",
            Self::AmountMismatch { .. } => "AMOUNT_MISMATCH",
            Self::PercentageMismatch { .. } => "PERCENTAGE_MISMATCH",
            Self::AmountOutOfRange => "AMOUNT_OUT_OF_RANGE",
            Self::SplitNotFound(_) => "SPLIT_NOT_FOUND",
            Self::ParticipantNotFound(_) => "PARTICIPANT_NOT_FOUND",
        }
    }
}

impl From<SplitError> for AppError {
    fn from(err: SplitError) -> Self {
        let code = err.error_code();
        let message = err.to_string();
        match err.status_code() {
            404 => Self::NotFound { code, message },
            _ => Self::Unprocessable { code, message },
        }
    }
}
