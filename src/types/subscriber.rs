#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

use crate::error::{BudgetError, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SubscriptionType {
    Email,
    Sns,
}

/// Where a notification is delivered: a literal endpoint or a reference to a
/// resource provisioned in the same scope.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Address {
    Literal(String),
    Ref {
        #[serde(rename = "Ref")]
        logical_id: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", try_from = "SubscriberRecord")]
pub struct Subscriber {
    subscription_type: SubscriptionType,
    address: Address,
}

/// Wire shape of a subscriber before its address is checked.
#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct SubscriberRecord {
    subscription_type: SubscriptionType,
    address: Address,
}

impl TryFrom<SubscriberRecord> for Subscriber {
    type Error = BudgetError;

    fn try_from(record: SubscriberRecord) -> Result<Self> {
        match (record.subscription_type, record.address) {
            (SubscriptionType::Email, Address::Literal(address)) => Self::email(address),
            (SubscriptionType::Sns, Address::Literal(arn)) => Self::topic_arn(arn),
            (SubscriptionType::Sns, Address::Ref { logical_id }) => Ok(Self::topic_ref(logical_id)),
            (SubscriptionType::Email, Address::Ref { logical_id }) => Err(BudgetError::validation(
                format!("email subscriber can not reference resource '{logical_id}'"),
            )),
        }
    }
}

impl Subscriber {
    /// Reads a notification target: an SNS topic ARN when it starts with
    /// `arn:`, an email address otherwise.
    ///
    /// # Errors
    /// Returns `BudgetError::Validation` when `target` is neither.
    pub fn parse(target: &str) -> Result<Self> {
        let target = target.trim();
        if target.starts_with("arn:") {
            Self::topic_arn(target)
        } else {
            Self::email(target)
        }
    }

    /// # Errors
    /// Returns `BudgetError::Validation` when `address` is not a plausible email address.
    pub fn email(address: impl Into<String>) -> Result<Self> {
        let address = address.into().trim().to_string();
        validate_email(&address)?;
        Ok(Self {
            subscription_type: SubscriptionType::Email,
            address: Address::Literal(address),
        })
    }

    /// Subscribes an existing topic by ARN.
    ///
    /// # Errors
    /// Returns `BudgetError::Validation` when `arn` is not an SNS topic ARN.
    pub fn topic_arn(arn: impl Into<String>) -> Result<Self> {
        let arn = arn.into();
        if !arn.starts_with("arn:") || !arn.contains(":sns:") || arn.ends_with(':') {
            return Err(BudgetError::validation(format!(
                "'{arn}' is not an SNS topic ARN"
            )));
        }
        Ok(Self {
            subscription_type: SubscriptionType::Sns,
            address: Address::Literal(arn),
        })
    }

    /// Subscribes a topic provisioned in the same scope.
    #[must_use]
    pub fn topic_ref(logical_id: impl Into<String>) -> Self {
        Self {
            subscription_type: SubscriptionType::Sns,
            address: Address::Ref {
                logical_id: logical_id.into(),
            },
        }
    }

    #[must_use]
    pub const fn subscription_type(&self) -> SubscriptionType {
        self.subscription_type
    }

    #[must_use]
    pub const fn address(&self) -> &Address {
        &self.address
    }

    /// The literal endpoint, if this subscriber is not a resource reference.
    #[must_use]
    pub fn endpoint(&self) -> Option<&str> {
        match &self.address {
            Address::Literal(endpoint) => Some(endpoint),
            Address::Ref { .. } => None,
        }
    }
}

fn validate_email(address: &str) -> Result<()> {
    let valid = address.split_once('@').is_some_and(|(local, domain)| {
        !local.is_empty()
            && !domain.is_empty()
            && !domain.contains('@')
            && !address.chars().any(char::is_whitespace)
    });

    if valid {
        Ok(())
    } else {
        Err(BudgetError::validation(format!(
            "'{address}' is not a valid email subscriber"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::{Address, Subscriber, SubscriptionType};
    use crate::error::BudgetError;

    #[test]
    fn email_subscriber_requires_single_at_sign() {
        assert!(Subscriber::email("alert@example.com").is_ok());
        assert!(Subscriber::email("  alert@example.com ").is_ok());
        assert!(Subscriber::email("alert").is_err());
        assert!(Subscriber::email("@example.com").is_err());
        assert!(Subscriber::email("a@b@c").is_err());
        assert!(Subscriber::email("a b@example.com").is_err());
    }

    #[test]
    fn topic_arn_must_name_sns() {
        assert!(Subscriber::topic_arn("arn:aws:sns:eu-west-1:123456789012:alerts").is_ok());
        assert!(Subscriber::topic_arn("arn:aws:sqs:eu-west-1:123456789012:queue").is_err());
        assert!(Subscriber::topic_arn("arn:aws:sns:").is_err());
    }

    #[test]
    fn parse_routes_arns_and_emails() -> Result<(), BudgetError> {
        let topic = Subscriber::parse(" arn:aws:sns:eu-west-1:123456789012:ops ")?;
        assert_eq!(topic.subscription_type(), SubscriptionType::Sns);
        assert_eq!(topic.endpoint(), Some("arn:aws:sns:eu-west-1:123456789012:ops"));

        let email = Subscriber::parse("ops@example.com")?;
        assert_eq!(email.subscription_type(), SubscriptionType::Email);
        assert_eq!(email.endpoint(), Some("ops@example.com"));

        assert!(Subscriber::parse("arn:aws:sqs:eu-west-1:123456789012:queue").is_err());
        assert!(Subscriber::parse("not an email").is_err());
        assert_eq!(Subscriber::topic_ref("Topic").endpoint(), None);
        Ok(())
    }

    #[test]
    fn deserializing_rejects_malformed_addresses() -> Result<(), serde_json::Error> {
        let email: Subscriber =
            serde_json::from_str(r#"{"SubscriptionType":"EMAIL","Address":"ops@example.com"}"#)?;
        assert_eq!(email.subscription_type(), SubscriptionType::Email);
        assert_eq!(email.endpoint(), Some("ops@example.com"));

        let topic: Subscriber =
            serde_json::from_str(r#"{"SubscriptionType":"SNS","Address":{"Ref":"AlertsTopic"}}"#)?;
        assert_eq!(topic, Subscriber::topic_ref("AlertsTopic"));

        for invalid in [
            r#"{"SubscriptionType":"EMAIL","Address":"not an email"}"#,
            r#"{"SubscriptionType":"SNS","Address":"ops@example.com"}"#,
            r#"{"SubscriptionType":"EMAIL","Address":{"Ref":"AlertsTopic"}}"#,
        ] {
            assert!(
                serde_json::from_str::<Subscriber>(invalid).is_err(),
                "{invalid} was accepted"
            );
        }
        Ok(())
    }

    #[test]
    fn topic_ref_serializes_as_resource_reference() -> Result<(), serde_json::Error> {
        let subscriber = Subscriber::topic_ref("StackAlertsTopic0A1B2C3D");

        assert_eq!(subscriber.subscription_type(), SubscriptionType::Sns);
        assert!(matches!(subscriber.address(), Address::Ref { .. }));
        assert_eq!(
            serde_json::to_value(&subscriber)?,
            serde_json::json!({
                "SubscriptionType": "SNS",
                "Address": {"Ref": "StackAlertsTopic0A1B2C3D"}
            })
        );
        Ok(())
    }
}
