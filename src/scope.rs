#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

//! Owning context for provisioned constructs.
//!
//! A [`Scope`] is shared as `Rc<Scope>`; constructs keep only a [`ScopeRef`]
//! back-reference so that a derived construct can be attached to the same
//! scope without the caller passing it again.

use crate::error::{BudgetError, Result};
use crate::provisioning::Provisioner;
use crate::types::CurrencyCode;
use sha2::{Digest, Sha256};
use std::rc::{Rc, Weak};

const MAX_HUMAN_ID_LEN: usize = 240;

pub struct Scope {
    name: String,
    currency: CurrencyCode,
    provisioner: Rc<dyn Provisioner>,
}

impl Scope {
    /// Creates a scope billing in USD.
    ///
    /// # Errors
    /// Returns `BudgetError::Validation` if `name` has no alphanumeric characters.
    pub fn new(name: impl Into<String>, provisioner: Rc<dyn Provisioner>) -> Result<Rc<Self>> {
        Self::with_currency(name, CurrencyCode::usd(), provisioner)
    }

    /// # Errors
    /// Returns `BudgetError::Validation` if `name` has no alphanumeric characters.
    pub fn with_currency(
        name: impl Into<String>,
        currency: CurrencyCode,
        provisioner: Rc<dyn Provisioner>,
    ) -> Result<Rc<Self>> {
        let name = name.into();
        if !name.chars().any(char::is_alphanumeric) {
            return Err(BudgetError::validation(format!(
                "scope name '{name}' must contain an alphanumeric character"
            )));
        }

        Ok(Rc::new(Self {
            name,
            currency,
            provisioner,
        }))
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn currency(&self) -> &CurrencyCode {
        &self.currency
    }

    #[must_use]
    pub fn provisioner(&self) -> &dyn Provisioner {
        self.provisioner.as_ref()
    }

    /// Stable identifier for the construct at `path` below this scope.
    ///
    /// The readable prefix drops non-alphanumerics; the hash suffix keeps
    /// paths that collapse to the same prefix distinct.
    #[must_use]
    pub fn logical_id(&self, path: &[&str]) -> String {
        let components: Vec<&str> = std::iter::once(self.name.as_str())
            .chain(path.iter().copied())
            .collect();

        let human: String = components
            .iter()
            .map(|component| pascal_case(component))
            .collect::<String>()
            .chars()
            .take(MAX_HUMAN_ID_LEN)
            .collect();

        let digest = Sha256::digest(components.join("/").as_bytes());
        let suffix: String = digest
            .iter()
            .take(4)
            .map(|byte| format!("{byte:02X}"))
            .collect();

        format!("{human}{suffix}")
    }

    #[must_use]
    pub fn downgrade(self: &Rc<Self>) -> ScopeRef {
        ScopeRef(Rc::downgrade(self))
    }
}

impl std::fmt::Debug for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scope")
            .field("name", &self.name)
            .field("currency", &self.currency)
            .finish_non_exhaustive()
    }
}

/// Non-owning back-reference from a construct to its scope.
#[derive(Debug, Clone, Default)]
pub struct ScopeRef(Weak<Scope>);

impl ScopeRef {
    /// A reference that never resolves.
    #[must_use]
    pub fn detached() -> Self {
        Self(Weak::new())
    }

    /// # Errors
    /// Returns `BudgetError::ScopeResolution` when the scope has been dropped.
    pub fn resolve(&self) -> Result<Rc<Scope>> {
        self.0.upgrade().ok_or_else(|| {
            BudgetError::ScopeResolution(
                "can not find scope of parent to derive a construct from".to_string(),
            )
        })
    }
}

fn pascal_case(component: &str) -> String {
    component
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_ascii_uppercase().to_string() + chars.as_str()
            })
        })
        .collect()
}
