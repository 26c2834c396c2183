#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

use super::{BudgetOverrides, BudgetProps};
use crate::error::{BudgetError, Result};
use crate::provisioning::{BudgetDefinition, ResourceRef};
use crate::scope::{Scope, ScopeRef};
use std::rc::Rc;
use tracing::info;

/// A budget provisioned inside a scope.
#[derive(Debug, Clone)]
pub struct Budget {
    id: String,
    props: BudgetProps,
    definition: BudgetDefinition,
    resource: ResourceRef,
    scope: ScopeRef,
}

impl Budget {
    /// Provisions one budget named `<id>_budget` in `scope`.
    ///
    /// # Errors
    /// Returns `BudgetError::Validation` for an id without alphanumerics and
    /// passes provisioner failures through as `BudgetError::Provisioning`.
    pub fn new(scope: &Rc<Scope>, id: impl Into<String>, props: BudgetProps) -> Result<Self> {
        let id = id.into();
        if !id.chars().any(char::is_alphanumeric) {
            return Err(BudgetError::validation(format!(
                "budget id '{id}' must contain an alphanumeric character"
            )));
        }

        let definition = props.to_definition(&format!("{id}_budget"), scope.currency());
        let logical_id = scope.logical_id(&[&id]);
        let resource = scope
            .provisioner()
            .provision_budget(&logical_id, &definition)?;

        info!(
            "Provisioned {} budget {} with limit {} {}",
            definition.budget.time_unit,
            resource.logical_id(),
            props.limit(),
            scope.currency().value()
        );

        Ok(Self {
            id,
            props,
            definition,
            resource,
            scope: scope.downgrade(),
        })
    }

    /// Provisions a copy of this budget in the same scope, replacing only the
    /// fields set in `overrides`. `self` is left untouched.
    ///
    /// # Errors
    /// Returns `BudgetError::ScopeResolution` when the owning scope is gone,
    /// otherwise the same errors as [`Budget::new`].
    pub fn derive_with(&self, id: impl Into<String>, overrides: &BudgetOverrides) -> Result<Self> {
        let scope = self.scope.resolve()?;
        let props = self.props.merge(overrides)?;
        Self::new(&scope, id, props)
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub const fn props(&self) -> &BudgetProps {
        &self.props
    }

    #[must_use]
    pub const fn definition(&self) -> &BudgetDefinition {
        &self.definition
    }

    #[must_use]
    pub fn budget_name(&self) -> &str {
        &self.definition.budget.budget_name
    }

    #[must_use]
    pub const fn resource(&self) -> &ResourceRef {
        &self.resource
    }
}
