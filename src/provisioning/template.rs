#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

use super::{
    BudgetDefinition, Provisioner, ResourceRef, TopicDefinition, BUDGET_RESOURCE_TYPE,
    TOPIC_RESOURCE_TYPE,
};
use crate::error::ProvisioningError;
use serde::Serialize;
use serde_json::{json, Value};
use std::cell::RefCell;
use std::collections::BTreeMap;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Resource {
    #[serde(rename = "Type")]
    pub resource_type: String,
    pub properties: Value,
}

/// In-memory provisioner that records every resource it is asked to create.
///
/// Useful both as the synthesis target of the binary and as the assertion
/// surface in tests.
#[derive(Debug, Default)]
pub struct Template {
    resources: RefCell<BTreeMap<String, Resource>>,
}

impl Template {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.resources.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.resources.borrow().is_empty()
    }

    #[must_use]
    pub fn resource_count(&self, resource_type: &str) -> usize {
        self.resources
            .borrow()
            .values()
            .filter(|resource| resource.resource_type == resource_type)
            .count()
    }

    /// Properties of every resource of `resource_type`, keyed by logical id.
    #[must_use]
    pub fn resources_of_type(&self, resource_type: &str) -> BTreeMap<String, Value> {
        self.resources
            .borrow()
            .iter()
            .filter(|(_, resource)| resource.resource_type == resource_type)
            .map(|(id, resource)| (id.clone(), resource.properties.clone()))
            .collect()
    }

    #[must_use]
    pub fn find_resource(&self, logical_id: &str) -> Option<Resource> {
        self.resources.borrow().get(logical_id).cloned()
    }

    /// True when some resource of `resource_type` contains `expected` as an
    /// object-like subset of its properties.
    #[must_use]
    pub fn has_resource_properties(&self, resource_type: &str, expected: &Value) -> bool {
        self.resources
            .borrow()
            .values()
            .filter(|resource| resource.resource_type == resource_type)
            .any(|resource| is_subset(expected, &resource.properties))
    }

    /// # Errors
    /// Returns a `serde_json::Error` if a recorded resource cannot be rendered.
    pub fn to_json(&self) -> serde_json::Result<Value> {
        let resources = serde_json::to_value(&*self.resources.borrow())?;
        Ok(json!({ "Resources": resources }))
    }

    fn record<T: Serialize>(
        &self,
        logical_id: &str,
        resource_type: &str,
        definition: &T,
    ) -> Result<ResourceRef, ProvisioningError> {
        let properties = serde_json::to_value(definition)
            .map_err(|err| ProvisioningError::new(format!("unserializable {resource_type}: {err}")))?;
        let resource = Resource {
            resource_type: resource_type.to_string(),
            properties,
        };

        let mut resources = self.resources.borrow_mut();
        match resources.get(logical_id) {
            Some(existing) if *existing == resource => {
                debug!("{} {} already recorded", resource_type, logical_id);
            }
            Some(_) => {
                warn!("Conflicting definition for {} {}", resource_type, logical_id);
                return Err(ProvisioningError::new(format!(
                    "{logical_id} is already defined with different properties"
                )));
            }
            None => {
                debug!("Recorded {} {}", resource_type, logical_id);
                resources.insert(logical_id.to_string(), resource);
            }
        }

        Ok(ResourceRef::new(logical_id))
    }
}

impl Provisioner for Template {
    fn provision_budget(
        &self,
        logical_id: &str,
        definition: &BudgetDefinition,
    ) -> Result<ResourceRef, ProvisioningError> {
        self.record(logical_id, BUDGET_RESOURCE_TYPE, definition)
    }

    fn provision_topic(
        &self,
        logical_id: &str,
        definition: &TopicDefinition,
    ) -> Result<ResourceRef, ProvisioningError> {
        self.record(logical_id, TOPIC_RESOURCE_TYPE, definition)
    }
}

fn is_subset(expected: &Value, actual: &Value) -> bool {
    match (expected, actual) {
        (Value::Object(expected), Value::Object(actual)) => expected
            .iter()
            .all(|(key, value)| actual.get(key).is_some_and(|found| is_subset(value, found))),
        (Value::Array(expected), Value::Array(actual)) => {
            expected.len() == actual.len()
                && expected
                    .iter()
                    .zip(actual)
                    .all(|(value, found)| is_subset(value, found))
        }
        _ => expected == actual,
    }
}
