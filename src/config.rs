#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

use crate::error::{BudgetError, Result};
use crate::strategy::StrategyProps;
use crate::types::CurrencyCode;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub const DEFAULT_CONFIG_PATH: &str = ".budgets/config.toml";

const KNOWN_KEYS: &[&str] = &[
    "stack_name",
    "monthly_budget",
    "default_topic",
    "subscribers",
    "currency",
];

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub stack_name: String,
    pub monthly_budget: Option<f64>,
    pub default_topic: String,
    pub subscribers: Vec<String>,
    pub currency: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            stack_name: "budgets".to_string(),
            monthly_budget: None,
            default_topic: "budget-alerts".to_string(),
            subscribers: Vec::new(),
            currency: "USD".to_string(),
        }
    }
}

/// Values supplied on the command line; each set field wins over the file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigOverrides {
    pub stack_name: Option<String>,
    pub monthly_budget: Option<f64>,
    pub default_topic: Option<String>,
    pub subscribers: Option<Vec<String>>,
    pub currency: Option<String>,
}

impl Config {
    #[must_use]
    pub fn with_overrides(self, overrides: ConfigOverrides) -> Self {
        Self {
            stack_name: overrides.stack_name.unwrap_or(self.stack_name),
            monthly_budget: overrides.monthly_budget.or(self.monthly_budget),
            default_topic: overrides.default_topic.unwrap_or(self.default_topic),
            subscribers: overrides.subscribers.unwrap_or(self.subscribers),
            currency: overrides.currency.unwrap_or(self.currency),
        }
    }

    /// # Errors
    /// Returns `BudgetError::Config` when no monthly budget was configured.
    pub fn strategy_props(&self) -> Result<StrategyProps> {
        let monthly_budget = self.monthly_budget.ok_or_else(|| {
            BudgetError::Config(
                "monthly_budget is required (config file or --monthly-budget)".to_string(),
            )
        })?;

        Ok(StrategyProps::new(monthly_budget, self.default_topic.clone())
            .with_subscribers(self.subscribers.iter().cloned()))
    }

    /// # Errors
    /// Returns `BudgetError::Validation` for a malformed currency code.
    pub fn currency_code(&self) -> Result<CurrencyCode> {
        CurrencyCode::new(self.currency.clone())
    }
}

/// Loads configuration from `path`, or from [`DEFAULT_CONFIG_PATH`] when it exists.
///
/// # Errors
/// Returns `BudgetError::Config` if an explicit path is missing or the file
/// cannot be parsed, and `BudgetError::Io` if it cannot be read.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let config_path = path.map_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH), Path::to_path_buf);
    if !config_path.exists() {
        if path.is_some() {
            return Err(BudgetError::Config(format!(
                "config file not found: {}",
                config_path.display()
            )));
        }
        debug!("No config at {}, using defaults", config_path.display());
        return Ok(Config::default());
    }

    let content = std::fs::read_to_string(&config_path)?;
    parse_config_content(&content)
}

/// # Errors
/// Returns `BudgetError::Config` when `monthly_budget` is not a number.
pub fn parse_config_content(content: &str) -> Result<Config> {
    let mut config = Config::default();

    for line in content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
    {
        let Some((key, raw)) = line.split_once('=') else {
            warn!("Ignoring config line without '=': {}", line);
            continue;
        };
        let key = key.trim();
        let value = expand_env_vars(raw.trim().trim_matches('"'));

        match key {
            "stack_name" => config.stack_name = value,
            "monthly_budget" => {
                let amount = value.trim().parse::<f64>().map_err(|_| {
                    BudgetError::Config(format!("monthly_budget must be a number, got '{value}'"))
                })?;
                config.monthly_budget = Some(amount);
            }
            "default_topic" => config.default_topic = value,
            "subscribers" => config.subscribers = split_list(&value),
            "currency" => config.currency = value,
            other => match suggest_key(other) {
                Some(suggestion) => {
                    warn!("Unknown config key '{}', did you mean '{}'?", other, suggestion);
                }
                None => warn!("Unknown config key '{}'", other),
            },
        }
    }

    Ok(config)
}

/// Splits a comma separated list, dropping blanks.
#[must_use]
pub fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

fn suggest_key(typo: &str) -> Option<&'static str> {
    KNOWN_KEYS
        .iter()
        .map(|key| (*key, strsim::levenshtein(typo, key)))
        .filter(|(_, dist)| *dist <= 3)
        .min_by_key(|(_, dist)| *dist)
        .map(|(key, _)| key)
}

fn expand_env_vars(input: &str) -> String {
    let mut result = input.to_string();
    let mut search_from = 0;
    while let Some(offset) = result[search_from..].find("${") {
        let start = search_from + offset;
        let Some(end) = result[start..].find('}') else {
            break;
        };
        let var_part = &result[start + 2..start + end];
        let (var_name, default) = var_part.split_once(":-").unwrap_or((var_part, ""));
        let value = std::env::var(var_name).unwrap_or_else(|_| default.to_string());
        result.replace_range(start..=(start + end), &value);
        search_from = start + value.len();
    }
    result
}
