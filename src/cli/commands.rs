#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

use crate::config::{load_config, split_list, ConfigOverrides};
use crate::error::{BudgetError, Result};
use crate::provisioning::Template;
use crate::scope::Scope;
use crate::strategy::{daily_amount, quarterly_amount, yearly_amount, AccountBudgetStrategy};
use crate::types::BudgetLimit;
use serde_json::{json, Value};
use std::path::Path;
use std::rc::Rc;
use tracing::debug;

pub const HELP_TEXT: &str = "budgets - derive account budgets from one monthly figure

Usage:
  budgets synth [--config PATH] [--stack-name NAME] [--monthly-budget N]
                [--default-topic NAME] [--subscribers a@x.io,b@x.io] [--currency USD]
      Print the budget and topic resources for the account as JSON.
  budgets amounts --monthly-budget N
      Print the daily, monthly, quarterly and yearly amounts. A monthly
      budget below 30 reports a daily amount of 0; synth rejects it.
  budgets help | -h | --help
  budgets -v | --version

Configuration is read from .budgets/config.toml unless --config is given;
flags override file values. Set RUST_LOG to control diagnostics on stderr.";

#[derive(Debug, Clone, PartialEq)]
pub enum CliCommand {
    Synth {
        config: Option<String>,
        stack_name: Option<String>,
        monthly_budget: Option<f64>,
        default_topic: Option<String>,
        subscribers: Option<String>,
        currency: Option<String>,
    },
    Amounts {
        monthly_budget: f64,
    },
}

impl CliCommand {
    /// Runs the command and returns the JSON document to print.
    ///
    /// # Errors
    /// Returns any configuration, validation or provisioning error raised
    /// while deriving the budgets.
    pub fn execute(&self) -> Result<Value> {
        match self {
            Self::Synth {
                config,
                stack_name,
                monthly_budget,
                default_topic,
                subscribers,
                currency,
            } => {
                let overrides = ConfigOverrides {
                    stack_name: stack_name.clone(),
                    monthly_budget: *monthly_budget,
                    default_topic: default_topic.clone(),
                    subscribers: subscribers.as_deref().map(split_list),
                    currency: currency.clone(),
                };
                synth(config.as_deref().map(Path::new), overrides)
            }
            Self::Amounts { monthly_budget } => amounts(*monthly_budget),
        }
    }
}

fn synth(config_path: Option<&Path>, overrides: ConfigOverrides) -> Result<Value> {
    let config = load_config(config_path)?.with_overrides(overrides);
    debug!("Synthesizing with {:?}", config);

    let template = Rc::new(Template::new());
    let scope = Scope::with_currency(
        config.stack_name.as_str(),
        config.currency_code()?,
        template.clone(),
    )?;
    let strategy = AccountBudgetStrategy::new(&scope, config.strategy_props()?)?;
    strategy.create_alerts()?;

    Ok(template.to_json()?)
}

/// Reports the raw period arithmetic, so a monthly figure below 30 shows a
/// daily amount of 0 instead of failing like `synth` does.
fn amounts(monthly_budget: f64) -> Result<Value> {
    let monthly = BudgetLimit::try_from(monthly_budget)?.amount();
    let overflow =
        || BudgetError::validation(format!("monthly budget {monthly} overflows a derived amount"));

    Ok(json!({
        "monthly": monthly,
        "daily": daily_amount(monthly),
        "quarterly": quarterly_amount(monthly).ok_or_else(overflow)?,
        "yearly": yearly_amount(monthly).ok_or_else(overflow)?,
    }))
}
