#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

use thiserror::Error;

/// Error code constants for type-safe error handling
pub mod code {
    pub const CLI_ERROR: &str = "CLI_ERROR";
    pub const INVALID: &str = "INVALID";
    pub const SCOPE: &str = "SCOPE";
    pub const PROVISIONING: &str = "PROVISIONING";
    pub const CONFIG: &str = "CONFIG";
    pub const IO: &str = "IO";
    pub const INTERNAL: &str = "INTERNAL";
}

/// Failure reported by a provisioning collaborator.
///
/// The message is carried verbatim; the core never inspects or retries it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct ProvisioningError(String);

impl ProvisioningError {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.0
    }
}

#[derive(Error, Debug)]
pub enum BudgetError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Scope resolution error: {0}")]
    ScopeResolution(String),

    #[error("Provisioning error: {0}")]
    Provisioning(#[from] ProvisioningError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl BudgetError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Returns the protocol error code for this error
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => code::INVALID,
            Self::ScopeResolution(_) => code::SCOPE,
            Self::Provisioning(_) => code::PROVISIONING,
            Self::Config(_) => code::CONFIG,
            Self::Io(_) => code::IO,
            Self::Serialization(_) => code::INTERNAL,
        }
    }

    /// Returns the exit code for this error
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) => 2,
            Self::Validation(_) => 3,
            Self::ScopeResolution(_) => 4,
            Self::Provisioning(_) => 5,
            Self::Io(_) => 7,
            Self::Serialization(_) => 9,
        }
    }
}

/// Protocol error codes as documented in the CLI
pub const ERROR_CODES: &[(&str, &str, &str)] = &[
    (
        code::CLI_ERROR,
        "Invalid CLI usage",
        "Run 'budgets --help' for valid options",
    ),
    (
        code::INVALID,
        "Budget input failed validation",
        "Use a positive whole-number amount and well-formed subscribers",
    ),
    (
        code::SCOPE,
        "Owning scope is no longer available",
        "Keep the scope alive while deriving budgets from it",
    ),
    (
        code::PROVISIONING,
        "Provisioning collaborator rejected a resource",
        "Inspect the collaborator message and retry",
    ),
    (
        code::CONFIG,
        "Configuration could not be loaded",
        "Check .budgets/config.toml and command flags",
    ),
    (
        code::IO,
        "Filesystem access failed",
        "Verify the path exists and is readable",
    ),
    (
        code::INTERNAL,
        "Unexpected internal failure",
        "Inspect logs and retry command",
    ),
];

/// Get error code details (description and fix) for a given error code
#[must_use]
pub fn get_error_info(error_code: &str) -> Option<(&'static str, &'static str)> {
    ERROR_CODES
        .iter()
        .find(|(code, _, _)| *code == error_code)
        .map(|(_, desc, fix)| (*desc, *fix))
}

pub type Result<T> = std::result::Result<T, BudgetError>;
