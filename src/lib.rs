pub mod budget;
pub mod cli;
pub mod config;
pub mod error;
pub mod provisioning;
pub mod scope;
pub mod strategy;
pub mod types;

pub use budget::{Budget, BudgetOverrides, BudgetProps};
pub use error::{BudgetError, ProvisioningError, Result};
pub use provisioning::{Provisioner, Template};
pub use scope::{Scope, ScopeRef};
pub use strategy::{AccountBudgetStrategy, DerivedAmounts, DerivedBudgetSet, StrategyProps};
pub use types::*;
