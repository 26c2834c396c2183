mod account;
mod amounts;
mod policy;

pub use account::{AccountBudgetStrategy, DerivedBudgetSet, StrategyProps};
pub use amounts::{
    daily_amount, quarterly_amount, yearly_amount, DerivedAmounts, DAYS_PER_MONTH, DAYS_PER_YEAR,
    QUARTERLY_MONTHS,
};
pub use policy::{PolicyEntry, ACCOUNT_POLICY};
