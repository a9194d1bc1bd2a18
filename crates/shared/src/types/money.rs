//! Money helpers with two-decimal precision.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! Every amount in the system is a `rust_decimal::Decimal` and every currency is
//! assumed to have two minor-unit digits.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of decimal places kept for amounts (cents).
pub const MINOR_UNIT_SCALE: u32 = 2;

/// Allowed deviation when checking that declared amounts or percentages add up.
pub const SUM_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Rounds to cents, half away from zero.
#[must_use]
pub fn round_to_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(MINOR_UNIT_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// Truncates to cents, toward zero.
#[must_use]
pub fn truncate_to_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(MINOR_UNIT_SCALE, RoundingStrategy::ToZero)
}

/// Returns true if `actual` is no further than [`SUM_TOLERANCE`] from `expected`.
#[must_use]
pub fn within_tolerance(actual: Decimal, expected: Decimal) -> bool {
    (actual - expected).abs() <= SUM_TOLERANCE
}

/// Error returned when a currency code cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CurrencyCodeError {
    /// Code was empty after trimming.
    #[error("currency is required")]
    Empty,
}

/// A currency code such as `USD` or `IDR`.
///
/// Any non-empty label is accepted, stored trimmed and upper-cased. No conversion between currencies happens
/// anywhere, so the code is only a label carried alongside the amounts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CurrencyCode(String);

impl CurrencyCode {
    /// Parses and normalizes a currency code.
    pub fn parse(raw: &str) -> Result<Self, CurrencyCodeError> {
        let code = raw.trim();
        if code.is_empty() {
            return Err(CurrencyCodeError::Empty);
        }
        Ok(Self(code.to_ascii_uppercase()))
    }

    /// Returns the code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for CurrencyCode {
    type Error = CurrencyCodeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<CurrencyCode> for String {
    fn from(code: CurrencyCode) -> Self {
        code.0
    }
}

impl std::fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for CurrencyCode {
    type Err = CurrencyCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
