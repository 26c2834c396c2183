#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

//! Alert conditions attached to a budget and their optional override mirror.

use super::TimeUnit;
use crate::error::{BudgetError, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ComparisonOperator {
    #[default]
    GreaterThan,
    LessThan,
    EqualTo,
}

/// Whether an alert fires on actual or forecasted spend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationType {
    #[default]
    Actual,
    Forecasted,
}

/// How `threshold` is read: percent of the limit or an absolute amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ThresholdType {
    #[default]
    Percentage,
    AbsoluteValue,
}

/// Caller-facing alert description; unset fields receive the defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AlertConditionSpec {
    pub period: TimeUnit,
    pub threshold: f64,
    #[serde(default)]
    pub comparison_operator: Option<ComparisonOperator>,
    #[serde(default)]
    pub notification_type: Option<NotificationType>,
    #[serde(default)]
    pub threshold_type: Option<ThresholdType>,
}

impl AlertConditionSpec {
    #[must_use]
    pub const fn new(period: TimeUnit, threshold: f64) -> Self {
        Self {
            period,
            threshold,
            comparison_operator: None,
            notification_type: None,
            threshold_type: None,
        }
    }

    #[must_use]
    pub const fn with_comparison_operator(mut self, operator: ComparisonOperator) -> Self {
        self.comparison_operator = Some(operator);
        self
    }

    #[must_use]
    pub const fn with_notification_type(mut self, notification_type: NotificationType) -> Self {
        self.notification_type = Some(notification_type);
        self
    }

    #[must_use]
    pub const fn with_threshold_type(mut self, threshold_type: ThresholdType) -> Self {
        self.threshold_type = Some(threshold_type);
        self
    }
}

/// Fully resolved alert condition.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "AlertConditionSpec")]
pub struct AlertCondition {
    period: TimeUnit,
    comparison_operator: ComparisonOperator,
    notification_type: NotificationType,
    threshold: f64,
    threshold_type: ThresholdType,
}

impl AlertCondition {
    /// # Errors
    /// Returns `BudgetError::Validation` when the threshold is not a finite positive number.
    pub fn new(spec: AlertConditionSpec) -> Result<Self> {
        if !spec.threshold.is_finite() || spec.threshold <= 0.0 {
            return Err(BudgetError::validation(format!(
                "alert threshold must be a positive number, got {}",
                spec.threshold
            )));
        }

        Ok(Self {
            period: spec.period,
            comparison_operator: spec.comparison_operator.unwrap_or_default(),
            notification_type: spec.notification_type.unwrap_or_default(),
            threshold: spec.threshold,
            threshold_type: spec.threshold_type.unwrap_or_default(),
        })
    }

    /// Coalesces each sub-field of `overrides` onto this condition.
    ///
    /// # Errors
    /// Returns `BudgetError::Validation` when the merged threshold is invalid.
    pub fn merge(&self, overrides: &AlertConditionOverrides) -> Result<Self> {
        Self::new(AlertConditionSpec {
            period: overrides.period.unwrap_or(self.period),
            threshold: overrides.threshold.unwrap_or(self.threshold),
            comparison_operator: Some(
                overrides
                    .comparison_operator
                    .unwrap_or(self.comparison_operator),
            ),
            notification_type: Some(overrides.notification_type.unwrap_or(self.notification_type)),
            threshold_type: Some(overrides.threshold_type.unwrap_or(self.threshold_type)),
        })
    }

    #[must_use]
    pub const fn period(&self) -> TimeUnit {
        self.period
    }

    #[must_use]
    pub const fn comparison_operator(&self) -> ComparisonOperator {
        self.comparison_operator
    }

    #[must_use]
    pub const fn notification_type(&self) -> NotificationType {
        self.notification_type
    }

    #[must_use]
    pub const fn threshold(&self) -> f64 {
        self.threshold
    }

    #[must_use]
    pub const fn threshold_type(&self) -> ThresholdType {
        self.threshold_type
    }
}

impl TryFrom<AlertConditionSpec> for AlertCondition {
    type Error = BudgetError;

    fn try_from(spec: AlertConditionSpec) -> Result<Self> {
        Self::new(spec)
    }
}

/// Optional mirror of an alert condition; set fields replace the original's.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AlertConditionOverrides {
    pub period: Option<TimeUnit>,
    pub comparison_operator: Option<ComparisonOperator>,
    pub notification_type: Option<NotificationType>,
    pub threshold: Option<f64>,
    pub threshold_type: Option<ThresholdType>,
}

impl AlertConditionOverrides {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.period.is_none()
            && self.comparison_operator.is_none()
            && self.notification_type.is_none()
            && self.threshold.is_none()
            && self.threshold_type.is_none()
    }
}
