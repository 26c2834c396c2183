#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

#[cfg(test)]
mod bdd_tests {
    use crate::cli::{parse_cli_args, suggest_commands, CliAction, CliCommand, CliError};
    use crate::error::BudgetError;

    fn given_cli_args(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn when_no_args_then_show_help() -> Result<(), CliError> {
        let action = parse_cli_args(&given_cli_args(&[]))?;

        assert_eq!(action, CliAction::ShowHelp);
        Ok(())
    }

    #[test]
    fn when_version_flag_then_show_version() -> Result<(), CliError> {
        let action = parse_cli_args(&given_cli_args(&["--version"]))?;

        assert_eq!(action, CliAction::ShowVersion);
        Ok(())
    }

    #[test]
    fn when_command_followed_by_help_then_show_help() -> Result<(), CliError> {
        let action = parse_cli_args(&given_cli_args(&["synth", "--help"]))?;

        assert_eq!(action, CliAction::ShowHelp);
        Ok(())
    }

    #[test]
    fn when_synth_with_flags_then_synth_command_carries_them() -> Result<(), CliError> {
        let action = parse_cli_args(&given_cli_args(&[
            "synth",
            "--monthly-budget",
            "100",
            "--subscribers",
            "a@example.com,b@example.com",
            "--stack-name",
            "mocked-stack",
        ]))?;

        assert_eq!(
            action,
            CliAction::Command(CliCommand::Synth {
                config: None,
                stack_name: Some("mocked-stack".to_string()),
                monthly_budget: Some(100.0),
                default_topic: None,
                subscribers: Some("a@example.com,b@example.com".to_string()),
                currency: None,
            })
        );
        Ok(())
    }

    #[test]
    fn when_amounts_without_monthly_budget_then_missing_arg() {
        let result = parse_cli_args(&given_cli_args(&["amounts"]));

        assert!(matches!(result, Err(CliError::MissingRequiredArg { .. })));
    }

    #[test]
    fn when_flag_value_is_not_a_number_then_invalid_value() {
        let result = parse_cli_args(&given_cli_args(&["amounts", "--monthly-budget", "lots"]));

        assert!(matches!(result, Err(CliError::InvalidArgValue { .. })));
    }

    #[test]
    fn when_unknown_flag_then_error_names_it() {
        let result = parse_cli_args(&given_cli_args(&["synth", "--montly-budget", "5"]));

        assert_eq!(
            result,
            Err(CliError::UnknownFlag {
                flag: "--montly-budget".to_string()
            })
        );
    }

    #[test]
    fn when_unknown_command_then_suggestion_is_close() {
        let result = parse_cli_args(&given_cli_args(&["synt"]));

        assert!(matches!(result, Err(CliError::UnknownCommand { .. })));
        assert_eq!(suggest_commands("synt"), vec!["synth".to_string()]);
        assert!(suggest_commands("completely-unrelated").is_empty());
    }

    #[test]
    fn when_amounts_executes_then_reference_figures_are_returned() -> Result<(), BudgetError> {
        let output = CliCommand::Amounts {
            monthly_budget: 100.0,
        }
        .execute()?;

        assert_eq!(output["daily"], 3);
        assert_eq!(output["quarterly"], 300);
        assert_eq!(output["yearly"], 1095);
        Ok(())
    }

    #[test]
    fn when_amounts_gets_small_monthly_then_daily_is_zero() -> Result<(), BudgetError> {
        let output = CliCommand::Amounts {
            monthly_budget: 10.0,
        }
        .execute()?;

        assert_eq!(output["monthly"], 10);
        assert_eq!(output["daily"], 0);
        assert_eq!(output["quarterly"], 30);
        assert_eq!(output["yearly"], 0);
        Ok(())
    }

    #[test]
    fn when_amounts_gets_fraction_then_validation_error() {
        let result = CliCommand::Amounts {
            monthly_budget: 3.5,
        }
        .execute();

        assert!(matches!(result, Err(BudgetError::Validation(_))));
    }
}
