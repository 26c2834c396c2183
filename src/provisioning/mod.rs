#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

//! Boundary with the collaborator that materializes budgets and topics.

mod template;

pub use template::{Resource, Template};

use crate::error::ProvisioningError;
use crate::types::{
    AlertCondition, ComparisonOperator, CostFilters, CurrencyCode, NotificationType, Subscriber,
    SubscriptionType, ThresholdType, TimeUnit,
};
use serde::{Deserialize, Serialize};

pub const BUDGET_RESOURCE_TYPE: &str = "AWS::Budgets::Budget";
pub const TOPIC_RESOURCE_TYPE: &str = "AWS::SNS::Topic";

/// Port implemented by anything able to turn definitions into live resources.
///
/// Calls are synchronous and idempotent per logical id; retry policy belongs
/// to the implementor.
pub trait Provisioner {
    /// # Errors
    /// Returns an opaque `ProvisioningError` when the resource cannot be created.
    fn provision_budget(
        &self,
        logical_id: &str,
        definition: &BudgetDefinition,
    ) -> Result<ResourceRef, ProvisioningError>;

    /// # Errors
    /// Returns an opaque `ProvisioningError` when the topic cannot be created.
    fn provision_topic(
        &self,
        logical_id: &str,
        definition: &TopicDefinition,
    ) -> Result<ResourceRef, ProvisioningError>;
}

/// Handle to a provisioned resource.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceRef {
    logical_id: String,
}

impl ResourceRef {
    #[must_use]
    pub fn new(logical_id: impl Into<String>) -> Self {
        Self {
            logical_id: logical_id.into(),
        }
    }

    #[must_use]
    pub fn logical_id(&self) -> &str {
        &self.logical_id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BudgetType {
    #[default]
    Cost,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Spend {
    pub amount: u64,
    pub unit: CurrencyCode,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BudgetData {
    pub budget_type: BudgetType,
    pub budget_name: String,
    pub time_unit: TimeUnit,
    pub budget_limit: Spend,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost_filters: Option<CostFilters>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Notification {
    pub comparison_operator: ComparisonOperator,
    pub notification_type: NotificationType,
    pub threshold: f64,
    pub threshold_type: ThresholdType,
}

impl From<&AlertCondition> for Notification {
    fn from(condition: &AlertCondition) -> Self {
        Self {
            comparison_operator: condition.comparison_operator(),
            notification_type: condition.notification_type(),
            threshold: condition.threshold(),
            threshold_type: condition.threshold_type(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct NotificationWithSubscribers {
    pub notification: Notification,
    pub subscribers: Vec<Subscriber>,
}

/// Record handed to the provisioner for one budget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BudgetDefinition {
    pub budget: BudgetData,
    pub notifications_with_subscribers: Vec<NotificationWithSubscribers>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TopicProtocol {
    Email,
    Sns,
}

impl From<SubscriptionType> for TopicProtocol {
    fn from(subscription_type: SubscriptionType) -> Self {
        match subscription_type {
            SubscriptionType::Email => Self::Email,
            SubscriptionType::Sns => Self::Sns,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TopicSubscription {
    pub endpoint: String,
    pub protocol: TopicProtocol,
}

impl TopicSubscription {
    /// `None` for subscribers that reference a resource instead of naming an endpoint.
    #[must_use]
    pub fn for_subscriber(subscriber: &Subscriber) -> Option<Self> {
        subscriber.endpoint().map(|endpoint| Self {
            endpoint: endpoint.to_string(),
            protocol: subscriber.subscription_type().into(),
        })
    }
}

/// Record handed to the provisioner for the shared notification topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TopicDefinition {
    pub topic_name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subscription: Vec<TopicSubscription>,
}

impl TopicDefinition {
    /// One subscription per literal endpoint, with the protocol taken from
    /// the subscriber kind.
    #[must_use]
    pub fn new(topic_name: impl Into<String>, subscribers: &[Subscriber]) -> Self {
        Self {
            topic_name: topic_name.into(),
            subscription: subscribers
                .iter()
                .filter_map(TopicSubscription::for_subscriber)
                .collect(),
        }
    }
}
