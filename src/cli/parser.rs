#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

use super::action::CliAction;
use super::args::ensure_no_unknown_flags;
use super::commands::CliCommand;

const SYNTH_FLAGS: &[&str] = &[
    "--config",
    "--stack-name",
    "--monthly-budget",
    "--default-topic",
    "--subscribers",
    "--currency",
];
const AMOUNTS_FLAGS: &[&str] = &["--monthly-budget"];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CliError {
    #[error("Missing required argument: {}", arg)]
    MissingRequiredArg { arg: String },
    #[error("Unknown command: {}", cmd)]
    UnknownCommand { cmd: String },
    #[error("Unknown flag: {}", flag)]
    UnknownFlag { flag: String },
    #[error("Invalid argument value for {}: {}", arg, error)]
    InvalidArgValue { arg: String, error: String },
}

/// Parses `args` (without the program name) into an action.
///
/// # Errors
/// Returns a `CliError` for unknown commands or flags and malformed values.
pub fn parse_cli_args(args: &[String]) -> Result<CliAction, CliError> {
    if args
        .get(1)
        .is_some_and(|arg| matches!(arg.as_str(), "-h" | "--help"))
    {
        return Ok(CliAction::ShowHelp);
    }

    match args.first().map(String::as_str) {
        None | Some("-h" | "--help" | "help" | "?") => Ok(CliAction::ShowHelp),
        Some("-v" | "--version") => Ok(CliAction::ShowVersion),
        Some("synth") => {
            ensure_no_unknown_flags(args, SYNTH_FLAGS)?;
            Ok(CliAction::Command(CliCommand::Synth {
                config: parse_optional_arg(args, "config")?,
                stack_name: parse_optional_arg(args, "stack_name")?,
                monthly_budget: parse_optional_arg(args, "monthly_budget")?,
                default_topic: parse_optional_arg(args, "default_topic")?,
                subscribers: parse_optional_arg(args, "subscribers")?,
                currency: parse_optional_arg(args, "currency")?,
            }))
        }
        Some("amounts") => {
            ensure_no_unknown_flags(args, AMOUNTS_FLAGS)?;
            Ok(CliAction::Command(CliCommand::Amounts {
                monthly_budget: parse_required_arg(args, "monthly_budget")?,
            }))
        }
        Some(cmd) => Err(CliError::UnknownCommand {
            cmd: cmd.to_string(),
        }),
    }
}

fn parse_required_arg<T>(args: &[String], name: &str) -> Result<T, CliError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    parse_optional_arg(args, name)?.ok_or_else(|| CliError::MissingRequiredArg {
        arg: name.to_string(),
    })
}

fn parse_optional_arg<T>(args: &[String], name: &str) -> Result<Option<T>, CliError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let flag = format!("--{}", name.replace('_', "-"));
    let Some(position) = args.iter().position(|a| a.as_str() == flag) else {
        return Ok(None);
    };

    match args.get(position + 1) {
        None => Err(CliError::MissingRequiredArg {
            arg: name.to_string(),
        }),
        Some(value) if value.starts_with("--") => Err(CliError::MissingRequiredArg {
            arg: name.to_string(),
        }),
        Some(value) => value
            .parse::<T>()
            .map(Some)
            .map_err(|e| CliError::InvalidArgValue {
                arg: name.to_string(),
                error: format!("{e}"),
            }),
    }
}
