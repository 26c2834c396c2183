#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

use crate::types::{AlertConditionSpec, ComparisonOperator, NotificationType, ThresholdType, TimeUnit};

/// One row of the derivation policy: which period to watch and when to alert.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolicyEntry {
    pub id: &'static str,
    pub period: TimeUnit,
    pub threshold_percent: f64,
    pub notification_type: NotificationType,
    pub comparison_operator: ComparisonOperator,
}

impl PolicyEntry {
    const fn actual(id: &'static str, period: TimeUnit, threshold_percent: f64) -> Self {
        Self {
            id,
            period,
            threshold_percent,
            notification_type: NotificationType::Actual,
            comparison_operator: ComparisonOperator::GreaterThan,
        }
    }

    const fn forecasted(id: &'static str, period: TimeUnit, threshold_percent: f64) -> Self {
        Self {
            notification_type: NotificationType::Forecasted,
            ..Self::actual(id, period, threshold_percent)
        }
    }

    #[must_use]
    pub const fn alert_condition(&self) -> AlertConditionSpec {
        AlertConditionSpec::new(self.period, self.threshold_percent)
            .with_comparison_operator(self.comparison_operator)
            .with_notification_type(self.notification_type)
            .with_threshold_type(ThresholdType::Percentage)
    }
}

/// Budgets derived for an account, in provisioning order.
pub const ACCOUNT_POLICY: [PolicyEntry; 7] = [
    PolicyEntry::actual("daily-actual-100", TimeUnit::Daily, 100.0),
    PolicyEntry::actual("monthly-actual-50", TimeUnit::Monthly, 50.0),
    PolicyEntry::actual("monthly-actual-80", TimeUnit::Monthly, 80.0),
    PolicyEntry::actual("monthly-actual-100", TimeUnit::Monthly, 100.0),
    PolicyEntry::forecasted("monthly-forecast-100", TimeUnit::Monthly, 100.0),
    PolicyEntry::actual("quarterly-actual-100", TimeUnit::Quarterly, 100.0),
    PolicyEntry::actual("yearly-actual-100", TimeUnit::Annually, 100.0),
];
