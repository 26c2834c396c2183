#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

use super::amounts::DerivedAmounts;
use super::policy::ACCOUNT_POLICY;
use crate::budget::{Budget, BudgetProps};
use crate::error::{BudgetError, Result};
use crate::provisioning::{ResourceRef, TopicDefinition};
use crate::scope::{Scope, ScopeRef};
use crate::types::{BudgetLimit, Subscriber, TimeUnit};
use serde::{Deserialize, Serialize};
use std::cell::Cell;
use std::rc::Rc;
use tracing::info;

const TOPIC_ID: &str = "budget-alerts-topic";
const MAX_TOPIC_NAME_LEN: usize = 256;

/// Inputs of an account-level derivation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyProps {
    pub monthly_budget: f64,
    pub default_topic: String,
    #[serde(default)]
    pub subscribers: Vec<String>,
}

impl StrategyProps {
    #[must_use]
    pub fn new(monthly_budget: f64, default_topic: impl Into<String>) -> Self {
        Self {
            monthly_budget,
            default_topic: default_topic.into(),
            subscribers: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_subscribers<I, S>(mut self, subscribers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.subscribers = subscribers.into_iter().map(Into::into).collect();
        self
    }
}

/// Expands one monthly figure into the account's family of budgets.
#[derive(Debug)]
pub struct AccountBudgetStrategy {
    scope: ScopeRef,
    amounts: DerivedAmounts,
    default_topic: String,
    subscribers: Vec<Subscriber>,
    derived: Cell<bool>,
}

impl AccountBudgetStrategy {
    /// Validates the inputs and computes the derived amounts. Nothing is
    /// provisioned until [`AccountBudgetStrategy::create_alerts`].
    ///
    /// # Errors
    /// Returns `BudgetError::Validation` if the monthly budget is not a whole
    /// number of at least 30, if a subscriber is neither an email address nor
    /// an SNS topic ARN, or if the topic name is invalid.
    pub fn new(scope: &Rc<Scope>, props: StrategyProps) -> Result<Self> {
        let monthly = BudgetLimit::try_from(props.monthly_budget)?;
        let amounts = DerivedAmounts::from_monthly(monthly)?;
        validate_topic_name(&props.default_topic)?;

        let subscribers = props
            .subscribers
            .iter()
            .map(String::as_str)
            .map(Subscriber::parse)
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            scope: scope.downgrade(),
            amounts,
            default_topic: props.default_topic,
            subscribers,
            derived: Cell::new(false),
        })
    }

    #[must_use]
    pub const fn amounts(&self) -> &DerivedAmounts {
        &self.amounts
    }

    #[must_use]
    pub const fn monthly_budget(&self) -> u64 {
        self.amounts.monthly().amount()
    }

    #[must_use]
    pub const fn daily_budget(&self) -> u64 {
        self.amounts.daily().amount()
    }

    #[must_use]
    pub const fn quarterly_budget(&self) -> u64 {
        self.amounts.quarterly().amount()
    }

    #[must_use]
    pub const fn yearly_budget(&self) -> u64 {
        self.amounts.yearly().amount()
    }

    #[must_use]
    pub fn default_topic(&self) -> &str {
        &self.default_topic
    }

    #[must_use]
    pub fn subscribers(&self) -> &[Subscriber] {
        &self.subscribers
    }

    /// Budget props for every policy entry, all notifying `topic`.
    ///
    /// # Errors
    /// Returns `BudgetError::Validation` if a policy row produces an invalid
    /// alert condition.
    pub fn plan(&self, topic: &Subscriber) -> Result<Vec<(&'static str, BudgetProps)>> {
        ACCOUNT_POLICY
            .iter()
            .map(|entry| {
                BudgetProps::new(
                    self.amounts.for_period(entry.period),
                    vec![topic.clone()],
                    entry.alert_condition(),
                )
                .map(|props| (entry.id, props))
            })
            .collect()
    }

    /// Provisions the shared topic and then every budget of the policy.
    ///
    /// All budget props are validated before the first provisioning call.
    ///
    /// # Errors
    /// Returns `BudgetError::Validation` when called twice,
    /// `BudgetError::ScopeResolution` when the owning scope is gone, and
    /// passes provisioner failures through unchanged.
    pub fn create_alerts(&self) -> Result<DerivedBudgetSet> {
        if self.derived.get() {
            return Err(BudgetError::validation(
                "alerts were already created for this strategy",
            ));
        }

        let scope = self.scope.resolve()?;
        let topic_id = scope.logical_id(&[TOPIC_ID]);
        let plan = self.plan(&Subscriber::topic_ref(topic_id.as_str()))?;

        let topic = scope.provisioner().provision_topic(
            &topic_id,
            &TopicDefinition::new(self.default_topic.as_str(), &self.subscribers),
        )?;
        info!(
            "Provisioned topic {} with {} subscriber(s)",
            topic.logical_id(),
            self.subscribers.len()
        );

        let budgets = plan
            .into_iter()
            .map(|(id, props)| Budget::new(&scope, id, props))
            .collect::<Result<Vec<_>>>()?;

        self.derived.set(true);
        info!(
            "Derived {} budgets from monthly budget {}",
            budgets.len(),
            self.amounts.monthly()
        );

        Ok(DerivedBudgetSet { topic, budgets })
    }
}

/// The topic and budgets produced by one derivation.
#[derive(Debug, Clone)]
pub struct DerivedBudgetSet {
    topic: ResourceRef,
    budgets: Vec<Budget>,
}

impl DerivedBudgetSet {
    #[must_use]
    pub const fn topic(&self) -> &ResourceRef {
        &self.topic
    }

    #[must_use]
    pub fn budgets(&self) -> &[Budget] {
        &self.budgets
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.budgets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.budgets.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Budget> {
        self.budgets.iter().find(|budget| budget.id() == id)
    }

    pub fn by_period(&self, period: TimeUnit) -> impl Iterator<Item = &Budget> {
        self.budgets
            .iter()
            .filter(move |budget| budget.props().alert_condition().period() == period)
    }
}

fn validate_topic_name(name: &str) -> Result<()> {
    let valid = !name.is_empty()
        && name.len() <= MAX_TOPIC_NAME_LEN
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');

    if valid {
        Ok(())
    } else {
        Err(BudgetError::validation(format!(
            "topic name '{name}' must be 1-{MAX_TOPIC_NAME_LEN} letters, digits, '-' or '_'"
        )))
    }
}
