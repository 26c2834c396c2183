#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

//! Whole-unit currency amounts used as budget limits.

use crate::error::{BudgetError, Result};
use serde::{Deserialize, Serialize};
use std::num::NonZeroU64;

/// Largest amount accepted from floating point input without losing precision.
const MAX_EXACT_F64: f64 = 9_007_199_254_740_992.0;

/// A strictly positive whole-number budget limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct BudgetLimit(NonZeroU64);

impl BudgetLimit {
    /// # Errors
    /// Returns `BudgetError::Validation` when `amount` is zero.
    pub fn new(amount: u64) -> Result<Self> {
        NonZeroU64::new(amount)
            .map(Self)
            .ok_or_else(|| BudgetError::validation("budget limit must be a positive integer, got 0"))
    }

    #[must_use]
    pub const fn amount(self) -> u64 {
        self.0.get()
    }

    /// Multiplies the limit, keeping it positive.
    ///
    /// # Errors
    /// Returns `BudgetError::Validation` on overflow.
    pub fn checked_mul(self, factor: u64) -> Result<Self> {
        self.amount()
            .checked_mul(factor)
            .ok_or_else(|| BudgetError::validation(format!("budget limit {self} x {factor} overflows")))
            .and_then(Self::new)
    }
}

impl TryFrom<u64> for BudgetLimit {
    type Error = BudgetError;

    fn try_from(amount: u64) -> Result<Self> {
        Self::new(amount)
    }
}

impl TryFrom<i64> for BudgetLimit {
    type Error = BudgetError;

    fn try_from(amount: i64) -> Result<Self> {
        u64::try_from(amount)
            .map_err(|_| {
                BudgetError::validation(format!(
                    "budget limit must be a positive integer, got {amount}"
                ))
            })
            .and_then(Self::new)
    }
}

impl TryFrom<f64> for BudgetLimit {
    type Error = BudgetError;

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn try_from(amount: f64) -> Result<Self> {
        let whole = amount.is_finite() && amount.fract() == 0.0;
        if !whole || amount <= 0.0 || amount > MAX_EXACT_F64 {
            return Err(BudgetError::validation(format!(
                "budget limit must be a positive integer, got {amount}"
            )));
        }
        Self::new(amount as u64)
    }
}

impl From<BudgetLimit> for u64 {
    fn from(limit: BudgetLimit) -> Self {
        limit.amount()
    }
}

impl std::str::FromStr for BudgetLimit {
    type Err = BudgetError;

    fn from_str(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        trimmed
            .parse::<f64>()
            .map_err(|_| {
                BudgetError::validation(format!("budget limit must be a number, got '{trimmed}'"))
            })
            .and_then(Self::try_from)
    }
}

impl std::fmt::Display for BudgetLimit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// ISO-4217 style currency code attached to every limit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CurrencyCode(String);

impl CurrencyCode {
    /// # Errors
    /// Returns `BudgetError::Validation` unless `code` is three upper-case ASCII letters.
    pub fn new(code: impl Into<String>) -> Result<Self> {
        let code = code.into();
        if code.len() == 3 && code.chars().all(|c| c.is_ascii_uppercase()) {
            Ok(Self(code))
        } else {
            Err(BudgetError::validation(format!(
                "currency must be three upper-case letters, got '{code}'"
            )))
        }
    }

    #[must_use]
    pub fn usd() -> Self {
        Self("USD".to_string())
    }

    #[must_use]
    pub fn value(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for CurrencyCode {
    type Error = BudgetError;

    fn try_from(code: String) -> Result<Self> {
        Self::new(code)
    }
}

impl From<CurrencyCode> for String {
    fn from(currency: CurrencyCode) -> Self {
        currency.0
    }
}

impl Default for CurrencyCode {
    fn default() -> Self {
        Self::usd()
    }
}
