#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};

/// Cost-allocation tag used to scope a budget.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tag {
    pub key: String,
    pub value: String,
}

impl Tag {
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Filter string understood by the budgets service for user tags.
    #[must_use]
    pub fn filter_value(&self) -> String {
        format!("user:{}${}", self.key, self.value)
    }
}

/// Spend filters restricting which costs count toward a budget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CostFilters {
    pub tag_key_value: Vec<String>,
}

impl CostFilters {
    /// Projects tags into a filter; `None` when there are no tags.
    #[must_use]
    pub fn from_tags(tags: &[Tag]) -> Option<Self> {
        (!tags.is_empty()).then(|| Self {
            tag_key_value: tags.iter().map(Tag::filter_value).collect(),
        })
    }
}
