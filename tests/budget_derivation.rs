use budgets::provisioning::{
    BudgetDefinition, Provisioner, ResourceRef, Template, TopicDefinition, BUDGET_RESOURCE_TYPE,
};
use budgets::{
    AccountBudgetStrategy, AlertConditionOverrides, AlertConditionSpec, Budget, BudgetError,
    BudgetLimit, BudgetOverrides, BudgetProps, ProvisioningError, Scope, StrategyProps,
    Subscriber, Tag, ThresholdType, TimeUnit,
};
use serde_json::json;
use std::cell::Cell;
use std::rc::Rc;

/// Provisioner that accepts a fixed number of budgets and then refuses.
struct QuotaProvisioner {
    remaining: Cell<usize>,
    calls: Cell<usize>,
}

impl QuotaProvisioner {
    fn new(quota: usize) -> Self {
        Self {
            remaining: Cell::new(quota),
            calls: Cell::new(0),
        }
    }
}

impl Provisioner for QuotaProvisioner {
    fn provision_budget(
        &self,
        logical_id: &str,
        _definition: &BudgetDefinition,
    ) -> Result<ResourceRef, ProvisioningError> {
        self.calls.set(self.calls.get() + 1);
        match self.remaining.get() {
            0 => Err(ProvisioningError::new("budget quota exceeded")),
            left => {
                self.remaining.set(left - 1);
                Ok(ResourceRef::new(logical_id))
            }
        }
    }

    fn provision_topic(
        &self,
        logical_id: &str,
        _definition: &TopicDefinition,
    ) -> Result<ResourceRef, ProvisioningError> {
        self.calls.set(self.calls.get() + 1);
        Ok(ResourceRef::new(logical_id))
    }
}

fn checkout_props() -> Result<BudgetProps, BudgetError> {
    Ok(BudgetProps::new(
        BudgetLimit::new(120)?,
        vec![Subscriber::email("finance@example.com")?],
        AlertConditionSpec::new(TimeUnit::Monthly, 90.0),
    )?
    .with_tags(vec![Tag::new("service", "checkout")]))
}

#[test]
fn invalid_monthly_budgets_never_reach_the_provisioner() -> Result<(), BudgetError> {
    let provisioner = Rc::new(QuotaProvisioner::new(10));
    let scope = Scope::new("account", provisioner.clone())?;

    for monthly in [0.0, -5.0, 3.5] {
        let result = AccountBudgetStrategy::new(&scope, StrategyProps::new(monthly, "alerts"));
        assert!(matches!(result, Err(BudgetError::Validation(_))));
    }
    assert!(matches!(BudgetLimit::try_from(-5_i64), Err(BudgetError::Validation(_))));
    assert_eq!(provisioner.calls.get(), 0);
    Ok(())
}

#[test]
fn derive_with_no_overrides_matches_the_original() -> Result<(), BudgetError> {
    let template = Rc::new(Template::new());
    let scope = Scope::new("shop", template.clone())?;
    let original = Budget::new(&scope, "checkout", checkout_props()?)?;

    let copy = original.derive_with("checkout-copy", &BudgetOverrides::default())?;

    assert_eq!(copy.props(), original.props());
    assert_eq!(copy.budget_name(), "checkout-copy_budget");
    assert_eq!(template.resource_count(BUDGET_RESOURCE_TYPE), 2);
    Ok(())
}

#[test]
fn derive_with_limit_keeps_everything_else() -> Result<(), BudgetError> {
    let template = Rc::new(Template::new());
    let scope = Scope::new("shop", template.clone())?;
    let original = Budget::new(&scope, "checkout", checkout_props()?)?;

    let raised = original.derive_with(
        "checkout-raised",
        &BudgetOverrides::default().limit(BudgetLimit::new(200)?),
    )?;

    assert_eq!(raised.props().limit().amount(), 200);
    assert_eq!(raised.props().subscribers(), original.props().subscribers());
    assert_eq!(raised.props().tags(), original.props().tags());
    assert_eq!(
        raised.props().alert_condition(),
        original.props().alert_condition()
    );
    assert!(template.has_resource_properties(
        BUDGET_RESOURCE_TYPE,
        &json!({
            "Budget": {
                "BudgetName": "checkout-raised_budget",
                "BudgetLimit": {"Amount": 200},
                "CostFilters": {"TagKeyValue": ["user:service$checkout"]}
            }
        })
    ));
    Ok(())
}

#[test]
fn derive_with_threshold_type_only_touches_that_sub_field() -> Result<(), BudgetError> {
    let scope = Scope::new("shop", Rc::new(Template::new()))?;
    let original = Budget::new(&scope, "checkout", checkout_props()?)?;

    let absolute = original.derive_with(
        "checkout-absolute",
        &BudgetOverrides::default().alert_condition(AlertConditionOverrides {
            threshold_type: Some(ThresholdType::AbsoluteValue),
            threshold: Some(100.0),
            ..AlertConditionOverrides::default()
        }),
    )?;

    let condition = absolute.props().alert_condition();
    assert_eq!(condition.threshold_type(), ThresholdType::AbsoluteValue);
    assert_eq!(condition.period(), TimeUnit::Monthly);
    assert_eq!(
        condition.notification_type(),
        original.props().alert_condition().notification_type()
    );
    Ok(())
}

#[test]
fn derive_with_without_scope_is_a_scope_error() -> Result<(), BudgetError> {
    let scope = Scope::new("shop", Rc::new(Template::new()))?;
    let original = Budget::new(&scope, "checkout", checkout_props()?)?;
    drop(scope);

    let result = original.derive_with("checkout-orphan", &BudgetOverrides::default());

    assert!(matches!(result, Err(BudgetError::ScopeResolution(_))));
    Ok(())
}

#[test]
fn provisioning_failure_passes_through_unchanged() -> Result<(), BudgetError> {
    let provisioner = Rc::new(QuotaProvisioner::new(3));
    let scope = Scope::new("account", provisioner.clone())?;
    let strategy = AccountBudgetStrategy::new(
        &scope,
        StrategyProps::new(100.0, "alerts").with_subscribers(["ops@example.com"]),
    )?;

    let result = strategy.create_alerts();

    match result {
        Err(BudgetError::Provisioning(err)) => assert_eq!(err.message(), "budget quota exceeded"),
        other => return Err(BudgetError::Config(format!("unexpected result {other:?}"))),
    }
    // topic + three accepted budgets + the refused one; nothing is retried
    assert_eq!(provisioner.calls.get(), 5);
    Ok(())
}

#[test]
fn larger_accounts_scale_every_bucket() -> Result<(), BudgetError> {
    let scope = Scope::new("account", Rc::new(Template::new()))?;
    let strategy = AccountBudgetStrategy::new(&scope, StrategyProps::new(4_500.0, "alerts"))?;

    assert_eq!(strategy.daily_budget(), 150);
    assert_eq!(strategy.quarterly_budget(), 13_500);
    assert_eq!(strategy.yearly_budget(), 54_750);

    let set = strategy.create_alerts()?;
    assert_eq!(set.by_period(TimeUnit::Annually).count(), 1);
    assert!(set.budgets().iter().all(|budget| !budget.props().is_silent()));
    Ok(())
}
