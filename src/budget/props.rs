#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

//! Validated budget configuration and its override mirror.
//!
//! Nothing here touches a provisioner, so every invariant can be checked
//! without a scope.

use crate::error::Result;
use crate::provisioning::{
    BudgetData, BudgetDefinition, BudgetType, Notification, NotificationWithSubscribers, Spend,
};
use crate::types::{
    AlertCondition, AlertConditionOverrides, AlertConditionSpec, BudgetLimit, CostFilters,
    CurrencyCode, Subscriber, Tag,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetProps {
    limit: BudgetLimit,
    subscribers: Vec<Subscriber>,
    alert_condition: AlertCondition,
    tags: Vec<Tag>,
}

impl BudgetProps {
    /// # Errors
    /// Returns `BudgetError::Validation` if the alert condition is invalid.
    pub fn new(
        limit: BudgetLimit,
        subscribers: Vec<Subscriber>,
        alert_condition: AlertConditionSpec,
    ) -> Result<Self> {
        Ok(Self {
            limit,
            subscribers,
            alert_condition: AlertCondition::new(alert_condition)?,
            tags: Vec::new(),
        })
    }

    #[must_use]
    pub fn with_tags(mut self, tags: Vec<Tag>) -> Self {
        self.tags = tags;
        self
    }

    /// Field-by-field merge: each field comes from `overrides` when set and
    /// from `self` otherwise. The alert condition merges per sub-field.
    ///
    /// # Errors
    /// Returns `BudgetError::Validation` if the merged alert condition is invalid.
    pub fn merge(&self, overrides: &BudgetOverrides) -> Result<Self> {
        Ok(Self {
            limit: overrides.limit.unwrap_or(self.limit),
            subscribers: overrides
                .subscribers
                .clone()
                .unwrap_or_else(|| self.subscribers.clone()),
            alert_condition: self.alert_condition.merge(&overrides.alert_condition)?,
            tags: overrides.tags.clone().unwrap_or_else(|| self.tags.clone()),
        })
    }

    #[must_use]
    pub const fn limit(&self) -> BudgetLimit {
        self.limit
    }

    #[must_use]
    pub fn subscribers(&self) -> &[Subscriber] {
        &self.subscribers
    }

    #[must_use]
    pub const fn alert_condition(&self) -> &AlertCondition {
        &self.alert_condition
    }

    #[must_use]
    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    /// A budget without subscribers never notifies anyone.
    #[must_use]
    pub fn is_silent(&self) -> bool {
        self.subscribers.is_empty()
    }

    #[must_use]
    pub fn cost_filters(&self) -> Option<CostFilters> {
        CostFilters::from_tags(&self.tags)
    }

    #[must_use]
    pub fn to_definition(&self, budget_name: &str, currency: &CurrencyCode) -> BudgetDefinition {
        BudgetDefinition {
            budget: BudgetData {
                budget_type: BudgetType::Cost,
                budget_name: budget_name.to_string(),
                time_unit: self.alert_condition.period(),
                budget_limit: Spend {
                    amount: self.limit.amount(),
                    unit: currency.clone(),
                },
                cost_filters: self.cost_filters(),
            },
            notifications_with_subscribers: vec![NotificationWithSubscribers {
                notification: Notification::from(&self.alert_condition),
                subscribers: self.subscribers.clone(),
            }],
        }
    }
}

/// Optional mirror of [`BudgetProps`]; unset fields keep the original value.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BudgetOverrides {
    pub limit: Option<BudgetLimit>,
    pub subscribers: Option<Vec<Subscriber>>,
    #[serde(default)]
    pub alert_condition: AlertConditionOverrides,
    pub tags: Option<Vec<Tag>>,
}

impl BudgetOverrides {
    #[must_use]
    pub const fn limit(mut self, limit: BudgetLimit) -> Self {
        self.limit = Some(limit);
        self
    }

    #[must_use]
    pub fn subscribers(mut self, subscribers: Vec<Subscriber>) -> Self {
        self.subscribers = Some(subscribers);
        self
    }

    #[must_use]
    pub const fn alert_condition(mut self, alert_condition: AlertConditionOverrides) -> Self {
        self.alert_condition = alert_condition;
        self
    }

    #[must_use]
    pub fn tags(mut self, tags: Vec<Tag>) -> Self {
        self.tags = Some(tags);
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.limit.is_none()
            && self.subscribers.is_none()
            && self.alert_condition.is_empty()
            && self.tags.is_none()
    }
}
