mod alert;
mod limit;
mod subscriber;
mod tag;
mod time_unit;

pub use alert::{
    AlertCondition, AlertConditionOverrides, AlertConditionSpec, ComparisonOperator,
    NotificationType, ThresholdType,
};
pub use limit::{BudgetLimit, CurrencyCode};
pub use subscriber::{Address, Subscriber, SubscriptionType};
pub use tag::{CostFilters, Tag};
pub use time_unit::TimeUnit;
