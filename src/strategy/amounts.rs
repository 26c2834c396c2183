#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

use crate::error::{BudgetError, Result};
use crate::types::{BudgetLimit, TimeUnit};
use tracing::debug;

pub const DAYS_PER_MONTH: u64 = 30;
pub const DAYS_PER_YEAR: u64 = 365;
/// Multiplier applied to the monthly figure for the quarterly bucket.
pub const QUARTERLY_MONTHS: u64 = 3;

/// Daily share of a monthly figure, rounded down. Zero below `DAYS_PER_MONTH`.
#[must_use]
pub const fn daily_amount(monthly: u64) -> u64 {
    monthly / DAYS_PER_MONTH
}

/// `None` on overflow.
#[must_use]
pub const fn quarterly_amount(monthly: u64) -> Option<u64> {
    monthly.checked_mul(QUARTERLY_MONTHS)
}

/// Yearly figure as `DAYS_PER_YEAR` daily budgets. `None` on overflow.
#[must_use]
pub const fn yearly_amount(monthly: u64) -> Option<u64> {
    daily_amount(monthly).checked_mul(DAYS_PER_YEAR)
}

/// Limits for every period, derived once from the monthly figure.
///
/// Only built through [`DerivedAmounts::from_monthly`], so every field is a
/// positive limit that follows the daily, quarterly and yearly rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DerivedAmounts {
    monthly: BudgetLimit,
    daily: BudgetLimit,
    quarterly: BudgetLimit,
    yearly: BudgetLimit,
}

impl DerivedAmounts {
    /// # Errors
    /// Returns `BudgetError::Validation` when the monthly figure is below
    /// `DAYS_PER_MONTH` (the daily limit would round down to zero) or when a
    /// derived amount overflows.
    pub fn from_monthly(monthly: BudgetLimit) -> Result<Self> {
        let daily = BudgetLimit::new(daily_amount(monthly.amount())).map_err(|_| {
            BudgetError::validation(format!(
                "monthly budget {monthly} derives a daily budget of 0, but every budget limit \
                 must be a positive integer; use a monthly budget of at least {DAYS_PER_MONTH}"
            ))
        })?;
        let quarterly = monthly.checked_mul(QUARTERLY_MONTHS)?;
        let yearly = daily.checked_mul(DAYS_PER_YEAR)?;

        debug!(
            "Derived budgets from monthly {}: daily {}, quarterly {}, yearly {}",
            monthly, daily, quarterly, yearly
        );

        Ok(Self {
            monthly,
            daily,
            quarterly,
            yearly,
        })
    }

    #[must_use]
    pub const fn monthly(&self) -> BudgetLimit {
        self.monthly
    }

    #[must_use]
    pub const fn daily(&self) -> BudgetLimit {
        self.daily
    }

    #[must_use]
    pub const fn quarterly(&self) -> BudgetLimit {
        self.quarterly
    }

    #[must_use]
    pub const fn yearly(&self) -> BudgetLimit {
        self.yearly
    }

    #[must_use]
    pub const fn for_period(&self, period: TimeUnit) -> BudgetLimit {
        match period {
            TimeUnit::Daily => self.daily,
            TimeUnit::Monthly => self.monthly,
            TimeUnit::Quarterly => self.quarterly,
            TimeUnit::Annually => self.yearly,
        }
    }
}
